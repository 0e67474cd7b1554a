//! # Canvas
//!
//! The drawing surface the composer targets. [`Canvas`] is the capability set
//! layout needs: page geometry, a current font and colours, a cursor, and a
//! few draw primitives (cells, wrapped cells, flowing text, images).
//! [`PdfCanvas`] implements it by recording draw operations per page and
//! serializing them with the PDF writer.
//!
//! Coordinates are in user units (millimetres unless configured otherwise)
//! with the origin at the top-left corner of the page.

mod pdf_canvas;
mod scope;

pub use pdf_canvas::{DrawOp, Page, PageSetup, PageSize, PdfCanvas, Unit};
pub use scope::StyleScope;

use crate::error::Result;
use crate::font::{FontFamily, FontSpec, FontStyle};

/// Page margins in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn uniform(v: f64) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

/// An RGB colour, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Which sides of a cell get a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Border {
    pub const NONE: Border = Border {
        left: false,
        top: false,
        right: false,
        bottom: false,
    };
    pub const ALL: Border = Border {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };
    pub const TOP: Border = Border {
        left: false,
        top: true,
        right: false,
        bottom: false,
    };
    pub const BOTTOM: Border = Border {
        left: false,
        top: false,
        right: false,
        bottom: true,
    };

    pub fn is_none(&self) -> bool {
        *self == Border::NONE
    }
}

/// Where the cursor goes after a cell is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewLine {
    /// Stay on the line, just right of the cell.
    #[default]
    Right,
    /// Start of the next line at the left margin.
    NextLine,
    /// Directly below the cell, same x.
    Below,
}

/// A single-line cell. Built with chained setters:
///
/// ```
/// use vitae::canvas::{Align, Cell, NewLine};
/// let cell = Cell::new(40.0, 6.0, "jane@example.com")
///     .align(Align::Right)
///     .new_line(NewLine::NextLine)
///     .link("mailto:jane@example.com");
/// assert_eq!(cell.text, "jane@example.com");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'a> {
    /// Width in user units; 0 extends the cell to the right margin.
    pub width: f64,
    pub height: f64,
    pub text: &'a str,
    pub border: Border,
    pub new_line: NewLine,
    pub align: Align,
    pub fill: bool,
    pub link: Option<&'a str>,
}

impl<'a> Cell<'a> {
    pub fn new(width: f64, height: f64, text: &'a str) -> Self {
        Self {
            width,
            height,
            text,
            border: Border::NONE,
            new_line: NewLine::Right,
            align: Align::Left,
            fill: false,
            link: None,
        }
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn new_line(mut self, new_line: NewLine) -> Self {
        self.new_line = new_line;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn link(mut self, link: &'a str) -> Self {
        self.link = Some(link);
        self
    }
}

/// The drawing capabilities the composer relies on.
///
/// Implementations own all mutable drawing state (cursor, font, colours);
/// layout code only ever reaches it through a `&mut` handle.
pub trait Canvas {
    fn margins(&self) -> Margins;

    /// Page `(width, height)` in user units.
    fn page_size(&self) -> (f64, f64);

    /// Select a font. `size` is in points.
    fn set_font(&mut self, family: FontFamily, style: FontStyle, size: f64);

    fn font(&self) -> FontSpec;

    /// Current font size as `(points, user units)`. The user-unit value is the
    /// line-height unit layout works in.
    fn font_size(&self) -> (f64, f64);

    fn set_text_color(&mut self, color: Color);
    fn text_color(&self) -> Color;
    fn set_fill_color(&mut self, color: Color);
    fn set_draw_color(&mut self, color: Color);

    /// Draw a single-line cell at the cursor and move the cursor as the
    /// cell's [`NewLine`] policy says.
    fn cell(&mut self, cell: Cell<'_>);

    /// Draw `text` soft-wrapped to `width` (0 = to the right margin), one
    /// `line_height` per line. `\n` forces a break. Afterwards x is at the
    /// left margin and y below the last line.
    fn multi_cell(
        &mut self,
        width: f64,
        line_height: f64,
        text: &str,
        border: Border,
        align: Align,
        fill: bool,
    );

    /// Flow `text` from the cursor to the right margin, wrapping to the left
    /// margin. `\n` is a hard break. The cursor ends just after the text.
    fn write(&mut self, line_height: f64, text: &str, link: Option<&str>);

    /// Like [`Canvas::write`] over inline markup (`<i>`, `<b>`, `<u>`,
    /// `<a href>`).
    fn write_markup(&mut self, line_height: f64, markup: &str);

    /// Line break: x back to the left margin, y down by `height`.
    fn ln(&mut self, height: f64);

    /// Place an image with its top-left corner at `(x, y)`. A missing
    /// dimension is derived from the image's aspect ratio; with neither given
    /// the image keeps its intrinsic size. Returns the rendered size.
    fn image(
        &mut self,
        src: &str,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(f64, f64)>;

    /// Intrinsic image size in user units (one pixel per point).
    fn image_size(&mut self, src: &str) -> Result<(f64, f64)>;

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn set_x(&mut self, x: f64);
    fn set_y(&mut self, y: f64);

    fn set_xy(&mut self, x: f64, y: f64) {
        self.set_x(x);
        self.set_y(y);
    }
}
