//! Page geometry derived from live canvas state.
//!
//! Nothing here is cached: margins and fonts can change between calls, so
//! every caller asks again.

use crate::canvas::Canvas;

/// Page width minus the left and right margins.
pub fn content_width<C: Canvas + ?Sized>(canvas: &C) -> f64 {
    let (page_width, _) = canvas.page_size();
    let margins = canvas.margins();
    page_width - margins.left - margins.right
}

/// Page height minus the top and bottom margins.
pub fn content_height<C: Canvas + ?Sized>(canvas: &C) -> f64 {
    let (_, page_height) = canvas.page_size();
    let margins = canvas.margins();
    page_height - margins.top - margins.bottom
}

/// The line-height unit of the active font, in user units.
pub fn line_height<C: Canvas + ?Sized>(canvas: &C) -> f64 {
    canvas.font_size().1
}

/// Horizontal and vertical budget for the next row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBudget {
    pub content_width: f64,
    pub line_height: f64,
}

impl LayoutBudget {
    pub fn of<C: Canvas + ?Sized>(canvas: &C) -> Self {
        Self {
            content_width: content_width(canvas),
            line_height: line_height(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{PageSetup, PageSize, PdfCanvas};
    use crate::font::{FontFamily, FontStyle};

    #[test]
    fn test_a4_content_width() {
        let canvas = PdfCanvas::new(PageSetup::default());
        assert!((content_width(&canvas) - 190.0).abs() < 0.01);
        assert!((content_height(&canvas) - 277.0).abs() < 0.01);
    }

    #[test]
    fn test_letter_content_width() {
        let canvas = PdfCanvas::new(PageSetup::default().with_size(PageSize::Letter));
        // 8.5in = 215.9mm
        assert!((content_width(&canvas) - 195.9).abs() < 0.01);
    }

    #[test]
    fn test_budget_follows_font_size() {
        let mut canvas = PdfCanvas::new(PageSetup::default());
        canvas.set_font(FontFamily::Helvetica, FontStyle::REGULAR, 11.0);
        let small = LayoutBudget::of(&canvas);
        canvas.set_font(FontFamily::Helvetica, FontStyle::REGULAR, 22.0);
        let large = LayoutBudget::of(&canvas);
        assert!((large.line_height - 2.0 * small.line_height).abs() < 1e-9);
        assert_eq!(small.content_width, large.content_width);
    }
}
