//! The header: optional photo, name and title on the left, contact lines
//! right-aligned on the right.

use super::{line_height, Composer, BODY_SIZE, NAME_SIZE, TITLE_SIZE};
use crate::canvas::{Align, Border, Canvas, Cell, Color, NewLine, StyleScope};
use crate::error::{Result, VitaeError};
use crate::font::FontStyle;
use crate::model::Resume;
use crate::observer::{ContactField, Notice};

const EMAIL_COLOR: Color = Color::rgb(10, 50, 200);

/// Contact line height as a multiple of the body line height.
const CONTACT_SPACING: f64 = 1.1;

/// Name and title line height as a multiple of their own font's line height.
const BLOCK_SPACING: f64 = 1.5;

impl<'a, C: Canvas + ?Sized> Composer<'a, C> {
    pub(super) fn header(&mut self) -> Result<()> {
        let resume: &'a Resume = self.resume;
        let basics = &resume.basics;
        let location = &basics.location;

        if location.is_present() && location.city.is_none() {
            return Err(VitaeError::MissingCity {
                address: location.address.clone().unwrap_or_default(),
            });
        }

        let family = self.family();
        let margins = self.canvas.margins();
        let (page_width, _) = self.canvas.page_size();
        let top = self.canvas.y();

        let (start_x, photo_height) = match &basics.picture {
            Some(src) => {
                let (width, height) = self.canvas.image_size(src)?;
                self.canvas
                    .image(src, margins.left, top, Some(width), Some(height))?;
                (margins.left + width + margins.left * 0.5, height)
            }
            None => {
                self.observer.notice(Notice::PhotoSkipped);
                (margins.left, 0.0)
            }
        };

        // Contact lines are right-aligned in the last quarter of the page.
        let anchor = 0.75 * page_width - margins.right;
        let contact_width = page_width - margins.right - anchor;
        // zero lets the block run to the right margin when the photo is wide
        let block_width = (anchor - start_x).max(0.0);

        self.canvas.set_xy(start_x, top);
        self.canvas.set_font(family, FontStyle::BOLD, NAME_SIZE);
        let name_height = line_height(&*self.canvas) * BLOCK_SPACING;
        self.canvas.multi_cell(
            block_width,
            name_height,
            &basics.name,
            Border::NONE,
            Align::Left,
            true,
        );
        if !basics.label.is_empty() {
            self.canvas.set_x(start_x);
            self.canvas
                .set_font(family, FontStyle::REGULAR, TITLE_SIZE);
            let title_height = line_height(&*self.canvas) * BLOCK_SPACING;
            self.canvas.multi_cell(
                block_width,
                title_height,
                &basics.label,
                Border::NONE,
                Align::Left,
                false,
            );
        }
        let name_bottom = self.canvas.y();

        let line = self.body_font() * CONTACT_SPACING;
        self.canvas.set_xy(anchor, top);
        let contact = |canvas: &mut C, text: &str, link: Option<&str>| {
            canvas.set_x(anchor);
            let mut cell = Cell::new(contact_width, line, text)
                .align(Align::Right)
                .new_line(NewLine::Below);
            if let Some(link) = link {
                cell = cell.link(link);
            }
            canvas.cell(cell);
        };

        match (&location.address, &location.city) {
            (Some(address), Some(city)) => {
                contact(&mut *self.canvas, address, None);
                let city_line = match &location.postal_code {
                    Some(postal_code) => format!("{} {}", city, postal_code),
                    None => {
                        self.observer.notice(Notice::PostalCodeMissing);
                        city.clone()
                    }
                };
                contact(&mut *self.canvas, &city_line, None);
            }
            _ => self
                .observer
                .notice(Notice::ContactSkipped(ContactField::Address)),
        }

        match &basics.email {
            Some(email) => {
                let mut canvas = StyleScope::new(&mut *self.canvas);
                canvas.set_text_color(EMAIL_COLOR);
                canvas.set_font(family, FontStyle::UNDERLINE, BODY_SIZE);
                let mailto = format!("mailto:{}", email);
                contact(&mut *canvas, email, Some(&mailto));
            }
            None => self
                .observer
                .notice(Notice::ContactSkipped(ContactField::Email)),
        }

        match &basics.phone {
            Some(phone) => contact(&mut *self.canvas, phone, None),
            None => self
                .observer
                .notice(Notice::ContactSkipped(ContactField::Phone)),
        }
        let contact_bottom = self.canvas.y();

        let text_height = name_bottom.max(contact_bottom) - top;
        let bottom = top + photo_height.max(text_height) + 0.5 * margins.top;
        self.canvas.set_xy(margins.left, bottom);
        self.body_font();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::canvas::{Canvas, DrawOp, PageSetup, PdfCanvas};
    use crate::error::VitaeError;
    use crate::layout::{compose, ComposeOptions};
    use crate::model::Resume;
    use crate::observer::{ContactField, Notice};

    fn compose_json(json: &str) -> (PdfCanvas, Vec<Notice>, crate::error::Result<()>) {
        let resume = Resume::from_json(json).unwrap();
        let mut canvas = PdfCanvas::new(PageSetup::default());
        let mut notices = Vec::new();
        let result = compose(&resume, &ComposeOptions::default(), &mut canvas, &mut notices);
        (canvas, notices, result)
    }

    #[test]
    fn test_address_without_city_is_fatal_and_draws_nothing() {
        let (canvas, _, result) = compose_json(
            r#"{ "basics": { "name": "Jane Doe", "location": { "address": "1 Main St" } } }"#,
        );
        match result {
            Err(VitaeError::MissingCity { address }) => assert_eq!(address, "1 Main St"),
            other => panic!("expected MissingCity, got {:?}", other),
        }
        assert!(canvas.pages()[0].ops.is_empty());
    }

    #[test]
    fn test_city_without_address_is_skipped() {
        let (canvas, notices, result) = compose_json(
            r#"{ "basics": { "name": "Jane Doe", "location": { "city": "Perth" } } }"#,
        );
        assert!(result.is_ok());
        assert!(notices.contains(&Notice::ContactSkipped(ContactField::Address)));
        assert!(!canvas.pages()[0].texts().any(|t| t.contains("Perth")));
    }

    #[test]
    fn test_missing_postal_code_warns_and_draws_city() {
        let (canvas, notices, result) = compose_json(
            r#"{ "basics": { "name": "J", "location": { "address": "1 Main St", "city": "Perth" } } }"#,
        );
        assert!(result.is_ok());
        assert!(notices.contains(&Notice::PostalCodeMissing));
        let texts: Vec<_> = canvas.pages()[0].texts().collect();
        assert!(texts.contains(&"1 Main St"));
        assert!(texts.contains(&"Perth"));
    }

    #[test]
    fn test_contact_order_and_alignment() {
        let (canvas, _, _) = compose_json(
            r#"{ "basics": { "name": "Jane Doe", "email": "jane@x.com", "phone": "555 0100",
                 "location": { "address": "1 Main St", "city": "Perth", "postalCode": "6000" } } }"#,
        );
        let (page_width, _) = canvas.page_size();
        let contacts: Vec<(String, f64, f64)> = canvas.pages()[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y, .. } if *x > page_width / 2.0 => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect();
        let names: Vec<&str> = contacts.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(names, vec!["1 Main St", "Perth 6000", "jane@x.com", "555 0100"]);
        for pair in contacts.windows(2) {
            assert!(pair[1].2 > pair[0].2, "contact lines go down the page");
        }
    }

    #[test]
    fn test_email_is_linked_and_color_restored() {
        let (canvas, _, _) = compose_json(r#"{ "basics": { "name": "J", "email": "jane@x.com" } }"#);
        let ops = &canvas.pages()[0].ops;
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Link { uri, .. } if uri == "mailto:jane@x.com")));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { text, color, font, .. }
                if text == "jane@x.com" && *color == super::EMAIL_COLOR && font.style.underline
        )));
        assert_eq!(canvas.text_color(), crate::canvas::Color::BLACK);
    }

    #[test]
    fn test_no_photo_is_noticed() {
        let (_, notices, _) = compose_json(r#"{ "basics": { "name": "J" } }"#);
        assert!(notices.contains(&Notice::PhotoSkipped));
        assert!(notices.contains(&Notice::ContactSkipped(ContactField::Email)));
        assert!(notices.contains(&Notice::ContactSkipped(ContactField::Phone)));
    }

    #[test]
    fn test_header_leaves_room_below_contacts() {
        let (canvas, _, _) = compose_json(
            r#"{ "basics": { "name": "J", "email": "a@b.c", "phone": "1",
                 "location": { "address": "A", "city": "C", "postalCode": "P" } } }"#,
        );
        let lowest_text = canvas.pages()[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .fold(0.0, f64::max);
        assert!(canvas.y() > lowest_text);
        assert_eq!(canvas.x(), canvas.margins().left);
    }
}
