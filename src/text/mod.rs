//! # Text Layout
//!
//! Greedy line breaking over UAX#14 break opportunities, measured with the
//! standard font metrics from [`FontContext`].
//!
//! All widths here are in points; the canvas converts to and from user
//! units.

pub mod markup;

use crate::font::{FontContext, FontSpec};
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    /// The text on this line, without trailing whitespace.
    pub text: String,
    /// Width of `text` in points.
    pub width: f64,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Entry `i` is the opportunity *before* char `i`. Index 0 is always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields the byte offset AFTER the break; convert to char
    // indices.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            map[byte_idx] = char_idx;
            char_idx += 1;
        }
        map[text.len()] = char_idx;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextLayout;

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break `text` into lines.
    ///
    /// The first line may be narrower than the rest (`first_width`), which
    /// is how flowing text continues mid-line. If not even one word fits in
    /// that first stretch, the first line comes back empty and the word moves
    /// to the next line. Words wider than `max_width` are split between
    /// characters.
    pub fn break_into_lines(
        &self,
        font_context: &FontContext,
        text: &str,
        font: &FontSpec,
        first_width: f64,
        max_width: f64,
    ) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![BrokenLine {
                text: String::new(),
                width: 0.0,
            }];
        }

        let chars: Vec<char> = text.chars().collect();
        let widths: Vec<f64> = chars
            .iter()
            .map(|&c| {
                if is_newline(c) {
                    0.0
                } else {
                    font_context.char_width(c, font)
                }
            })
            .collect();
        let break_opps = compute_break_opportunities(text);

        let mut lines: Vec<BrokenLine> = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            let char_width = widths[i];

            if i > 0 {
                match break_opps[i] {
                    Some(BreakOpportunity::Mandatory) => {
                        let end = if is_newline(chars[i - 1]) { i - 1 } else { i };
                        lines.push(self.make_line(&chars[line_start..end], &widths[line_start..end]));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    Some(BreakOpportunity::Allowed) => {
                        last_break_point = Some(i - 1);
                    }
                    None => {}
                }
            }

            if is_newline(ch) {
                continue;
            }

            let limit = if lines.is_empty() { first_width } else { max_width };
            if line_width + char_width > limit && line_start < i && !ch.is_whitespace() {
                if let Some(bp) = last_break_point.filter(|&bp| bp >= line_start) {
                    let break_at = bp + 1;
                    lines.push(self.make_line(&chars[line_start..break_at], &widths[line_start..break_at]));
                    line_start = break_at;
                    line_width = widths[line_start..=i].iter().sum();
                    last_break_point = None;
                    continue;
                }

                // Nothing fits in a short first stretch: start on a fresh line.
                if lines.is_empty() && first_width < max_width {
                    lines.push(BrokenLine {
                        text: String::new(),
                        width: 0.0,
                    });
                    line_width = widths[line_start..=i].iter().sum();
                    if line_width <= max_width {
                        continue;
                    }
                    line_width -= char_width;
                }

                // No break point: force a break at the current character.
                lines.push(self.make_line(&chars[line_start..i], &widths[line_start..i]));
                line_start = i;
                line_width = char_width;
                last_break_point = None;
                continue;
            }

            line_width += char_width;
        }

        let end = if chars.last().copied().is_some_and(is_newline) {
            chars.len() - 1
        } else {
            chars.len()
        };
        if line_start <= end {
            lines.push(self.make_line(&chars[line_start..end], &widths[line_start..end]));
        }

        lines
    }

    fn make_line(&self, chars: &[char], widths: &[f64]) -> BrokenLine {
        let mut len = chars.len();
        while len > 0 && (chars[len - 1].is_whitespace()) {
            len -= 1;
        }
        let text: String = chars[..len].iter().filter(|c| !is_newline(**c)).collect();
        BrokenLine {
            text,
            width: widths[..len].iter().sum(),
        }
    }
}
