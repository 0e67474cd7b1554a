//! Flowed text and two-column label/content rows.

use super::geometry::content_width;
use crate::canvas::{Align, Border, Canvas, Cell, StyleScope};
use crate::font::FontStyle;

/// Flow `content` in a column `width` wide starting at the cursor's x, one
/// `line_height` per drawn line. Each hard-broken segment is wrapped by the
/// canvas. Afterwards x is back where it started and y sits below the last
/// line. Returns the height consumed.
pub fn flow_text<C: Canvas + ?Sized>(canvas: &mut C, width: f64, line_height: f64, content: &str) -> f64 {
    let x = canvas.x();
    let top = canvas.y();
    for segment in content.split('\n') {
        canvas.set_x(x);
        canvas.multi_cell(width, line_height, segment, Border::NONE, Align::Left, false);
    }
    canvas.set_x(x);
    canvas.y() - top
}

/// Label and content styles for [`render_row`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStyle {
    pub label: FontStyle,
    pub content: FontStyle,
}

impl RowStyle {
    pub const PLAIN: RowStyle = RowStyle {
        label: FontStyle::REGULAR,
        content: FontStyle::REGULAR,
    };

    pub const fn new(label: FontStyle, content: FontStyle) -> Self {
        Self { label, content }
    }
}

/// A two-column row: `label` in a single cell taking `ratio` of the content
/// width, `content` flowed in the rest. With `ratio == 0` the label column
/// is dropped and the content spans the full width.
///
/// The row ends below the taller of the two columns with x back at the
/// row's start. The caller's font and colour survive the call.
pub fn render_row<C: Canvas + ?Sized>(
    canvas: &mut C,
    label: &str,
    content: &str,
    style: RowStyle,
    ratio: f64,
    row_height: f64,
) {
    let mut canvas = StyleScope::new(canvas);
    let font = canvas.font();
    let ratio = ratio.clamp(0.0, 1.0);
    let width = content_width(&*canvas);
    let row_x = canvas.x();

    let label_width = width * ratio;
    let label_height = if ratio > 0.0 {
        canvas.set_font(font.family, style.label, font.size);
        canvas.cell(Cell::new(label_width, row_height, label));
        row_height
    } else {
        0.0
    };
    // a page break in the label cell moves the row to the new page
    let top = canvas.y();

    canvas.set_font(font.family, style.content, font.size);
    flow_text(&mut *canvas, width - label_width, row_height, content);

    let bottom = canvas.y().max(top + label_height);
    canvas.set_xy(row_x, bottom);
}
