//! Inline markup for flowing text.
//!
//! Supports the handful of tags résumé authors reach for inside course
//! names and the credit line: `<i>`/`<em>`, `<b>`/`<strong>`, `<u>`,
//! `<a href="...">` and `<br/>`. Anything else is ignored. Input that is not
//! well-formed comes back as a single plain run, so a stray `<` never loses
//! text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::font::FontStyle;

/// A styled piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupRun {
    pub text: String,
    pub style: FontStyle,
    pub href: Option<String>,
}

impl MarkupRun {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: FontStyle::REGULAR,
            href: None,
        }
    }
}

#[derive(Default)]
struct StyleDepth {
    bold: u32,
    italic: u32,
    underline: u32,
}

impl StyleDepth {
    fn style(&self, linked: bool) -> FontStyle {
        FontStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            // links are always underlined
            underline: self.underline > 0 || linked,
        }
    }
}

/// Split markup into styled runs. Plain text yields one regular run.
pub fn parse_markup(markup: &str) -> Vec<MarkupRun> {
    if !looks_like_markup(markup) {
        return vec![MarkupRun::plain(markup)];
    }

    let wrapped = format!("<m>{}</m>", markup);
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().check_end_names = false;

    let mut runs: Vec<MarkupRun> = Vec::new();
    let mut depth = StyleDepth::default();
    let mut links: Vec<Option<String>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"i" | b"em" => depth.italic += 1,
                b"b" | b"strong" => depth.bold += 1,
                b"u" => depth.underline += 1,
                b"a" => links.push(get_attr(&e, "href")),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"i" | b"em" => depth.italic = depth.italic.saturating_sub(1),
                b"b" | b"strong" => depth.bold = depth.bold.saturating_sub(1),
                b"u" => depth.underline = depth.underline.saturating_sub(1),
                b"a" => {
                    links.pop();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"br" {
                    runs.push(MarkupRun {
                        text: "\n".to_string(),
                        style: depth.style(false),
                        href: None,
                    });
                }
            }
            Ok(Event::Text(t)) => {
                let text = match t.unescape() {
                    Ok(s) => s.into_owned(),
                    Err(_) => String::from_utf8_lossy(&t).into_owned(),
                };
                if text.is_empty() {
                    continue;
                }
                let href = links.iter().rev().find_map(|l| l.clone());
                runs.push(MarkupRun {
                    text,
                    style: depth.style(href.is_some()),
                    href,
                });
            }
            Ok(Event::Eof) => break,
            Err(_) => return vec![MarkupRun::plain(markup)],
            _ => {}
        }
    }

    runs
}

/// Every `<` must open something tag-shaped and be closed by a later `>`.
fn looks_like_markup(text: &str) -> bool {
    let mut saw_tag = false;
    let mut rest = text;
    while let Some(pos) = rest.find('<') {
        let after = &rest[pos + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        if !opens_tag || !after.contains('>') {
            return false;
        }
        saw_tag = true;
        rest = after;
    }
    saw_tag
}

fn get_attr(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let runs = parse_markup("Distributed Systems");
        assert_eq!(runs, vec![MarkupRun::plain("Distributed Systems")]);
    }

    #[test]
    fn test_italic_with_link() {
        let runs = parse_markup(r#"<i>Made with (<a href="https://example.com">example.com</a>)</i>"#);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "Made with (");
        assert!(runs[0].style.italic);
        assert!(runs[0].href.is_none());
        assert_eq!(runs[1].text, "example.com");
        assert_eq!(runs[1].href.as_deref(), Some("https://example.com"));
        assert!(runs[1].style.italic && runs[1].style.underline);
        assert_eq!(runs[2].text, ")");
    }

    #[test]
    fn test_bold_and_entities() {
        let runs = parse_markup("<b>R&amp;D</b> lab");
        assert_eq!(runs[0].text, "R&D");
        assert!(runs[0].style.bold);
        assert_eq!(runs[1].text, " lab");
        assert!(!runs[1].style.bold);
    }

    #[test]
    fn test_malformed_falls_back_to_plain() {
        let runs = parse_markup("a < b");
        assert_eq!(runs, vec![MarkupRun::plain("a < b")]);
    }

    #[test]
    fn test_line_break_tag() {
        let runs = parse_markup("one<br/>two");
        let text: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "one\ntwo");
    }
}
