//! Scoped style overrides.

use std::ops::{Deref, DerefMut};

use super::{Canvas, Color};
use crate::font::FontSpec;

/// Borrows a canvas and puts its font and text colour back on drop.
///
/// ```
/// use vitae::canvas::{Canvas, PageSetup, PdfCanvas, StyleScope};
/// use vitae::font::{FontFamily, FontStyle};
///
/// let mut canvas = PdfCanvas::new(PageSetup::default());
/// canvas.set_font(FontFamily::Helvetica, FontStyle::REGULAR, 11.0);
/// {
///     let mut scoped = StyleScope::new(&mut canvas);
///     scoped.set_font(FontFamily::Helvetica, FontStyle::ITALIC, 11.0);
/// }
/// assert_eq!(canvas.font().style, FontStyle::REGULAR);
/// ```
pub struct StyleScope<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    font: FontSpec,
    text_color: Color,
}

impl<'c, C: Canvas + ?Sized> StyleScope<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        let font = canvas.font();
        let text_color = canvas.text_color();
        Self {
            canvas,
            font,
            text_color,
        }
    }
}

impl<C: Canvas + ?Sized> Deref for StyleScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for StyleScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for StyleScope<'_, C> {
    fn drop(&mut self) {
        let FontSpec {
            family,
            style,
            size,
        } = self.font;
        self.canvas.set_font(family, style, size);
        self.canvas.set_text_color(self.text_color);
    }
}
