//! The PDF-backed [`Canvas`].
//!
//! Drawing calls are recorded as [`DrawOp`]s on the current [`Page`]; nothing
//! is serialized until [`PdfCanvas::finish`]. Keeping the recording around
//! makes the composed layout inspectable without parsing PDF bytes.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Align, Border, Canvas, Cell, Color, Margins, NewLine};
use crate::error::Result;
use crate::font::{FontContext, FontFamily, FontSpec, FontStyle};
use crate::image_loader::{self, LoadedImage};
use crate::pdf::{Metadata, PdfWriter};
use crate::text::markup::parse_markup;
use crate::text::TextLayout;

/// Colour of hyperlinked markup runs.
const LINK_COLOR: Color = Color::rgb(10, 50, 200);

/// Measurement unit for every coordinate passed to the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pt,
    #[default]
    Mm,
    In,
}

impl Unit {
    /// Points per unit.
    pub fn scale(&self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 72.0 / 25.4,
            Unit::In => 72.0,
        }
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "a3" => Ok(PageSize::A3),
            "a5" => Ok(PageSize::A5),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(format!(
                "unknown page size '{}' (expected a4, a3, a5, letter or legal)",
                other
            )),
        }
    }
}

/// Page size, unit and margins for a [`PdfCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub unit: Unit,
    /// In `unit`s.
    pub margins: Margins,
    /// Distance from the bottom edge that triggers a page break, in `unit`s.
    pub break_margin: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            unit: Unit::Mm,
            margins: Margins::uniform(10.0),
            break_margin: 20.0,
        }
    }
}

impl PageSetup {
    pub fn with_size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }
}

/// One recorded drawing operation. Coordinates are user units from the top
/// left of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `(x, y)` is the start of the baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: FontSpec,
        color: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        line_width: f64,
    },
    /// `image` indexes the canvas images in load order.
    Image {
        image: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Link {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        uri: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// The text of every text op, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

pub struct PdfCanvas {
    setup: PageSetup,
    /// Points per user unit.
    k: f64,
    page_width: f64,
    page_height: f64,
    /// Horizontal padding inside cells.
    cell_margin: f64,
    line_width: f64,

    pages: Vec<Page>,
    x: f64,
    y: f64,

    font: FontSpec,
    text_color: Color,
    fill_color: Color,
    draw_color: Color,

    images: Vec<LoadedImage>,
    image_index: HashMap<String, usize>,
    image_dimensions: HashMap<String, (u32, u32)>,

    font_context: FontContext,
    text_layout: TextLayout,
    metadata: Metadata,
}

impl PdfCanvas {
    /// A canvas with its first page already started.
    pub fn new(setup: PageSetup) -> Self {
        let k = setup.unit.scale();
        let (w_pt, h_pt) = setup.size.dimensions();
        let mut canvas = Self {
            setup,
            k,
            page_width: w_pt / k,
            page_height: h_pt / k,
            cell_margin: 2.835 / k,
            line_width: 0.567 / k,
            pages: Vec::new(),
            x: setup.margins.left,
            y: setup.margins.top,
            font: FontSpec::default(),
            text_color: Color::BLACK,
            fill_color: Color::WHITE,
            draw_color: Color::BLACK,
            images: Vec::new(),
            image_index: HashMap::new(),
            image_dimensions: HashMap::new(),
            font_context: FontContext::new(),
            text_layout: TextLayout::new(),
            metadata: Metadata::default(),
        };
        canvas.add_page();
        canvas
    }

    pub fn set_title(&mut self, title: &str) {
        self.metadata.title = Some(title.to_string());
    }

    pub fn set_author(&mut self, author: &str) {
        self.metadata.author = Some(author.to_string());
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Serialize every recorded page to PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let (w_pt, h_pt) = self.setup.size.dimensions();
        log::debug!("Serializing {} page(s)", self.pages.len());
        PdfWriter::new().write(
            &self.pages,
            &self.images,
            &self.metadata,
            (w_pt, h_pt),
            self.k,
        )
    }

    /// Width of `text` in the current font, user units.
    pub fn string_width(&self, text: &str) -> f64 {
        self.font_context.measure_string(text, &self.font) / self.k
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.x = self.setup.margins.left;
        self.y = self.setup.margins.top;
        if self.pages.len() > 1 {
            log::debug!("Starting page {}", self.pages.len());
        }
    }

    fn break_trigger(&self) -> f64 {
        self.page_height - self.setup.break_margin
    }

    /// Start a new page if something `height` tall would cross the break
    /// line. The cursor keeps its x.
    fn ensure_room(&mut self, height: f64) {
        if self.y + height > self.break_trigger() && self.y > self.setup.margins.top {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
    }

    fn font_size_units(&self) -> f64 {
        self.font.size / self.k
    }

    fn push(&mut self, op: DrawOp) {
        // `pages` is never empty after `new`.
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Text, underline and link for one run whose baseline starts at `x`.
    fn draw_text_run(&mut self, x: f64, top: f64, height: f64, text: &str, width: f64, link: Option<&str>) {
        let fs = self.font_size_units();
        let baseline = top + 0.5 * height + 0.3 * fs;
        self.push(DrawOp::Text {
            x,
            y: baseline,
            text: text.to_string(),
            font: self.font,
            color: self.text_color,
        });
        if self.font.style.underline {
            let y = baseline + 0.1 * fs;
            self.push(DrawOp::Line {
                x1: x,
                y1: y,
                x2: x + width,
                y2: y,
                width: 0.05 * fs,
                color: self.text_color,
            });
        }
        if let Some(uri) = link {
            self.push(DrawOp::Link {
                x,
                y: top + 0.5 * height - 0.5 * fs,
                width,
                height: fs,
                uri: uri.to_string(),
            });
        }
    }

    fn draw_borders(&mut self, x: f64, y: f64, w: f64, h: f64, border: Border) {
        let line = |x1: f64, y1: f64, x2: f64, y2: f64| DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width: self.line_width,
            color: self.draw_color,
        };
        let mut ops = Vec::new();
        if border.left {
            ops.push(line(x, y, x, y + h));
        }
        if border.top {
            ops.push(line(x, y, x + w, y));
        }
        if border.right {
            ops.push(line(x + w, y, x + w, y + h));
        }
        if border.bottom {
            ops.push(line(x, y + h, x + w, y + h));
        }
        for op in ops {
            self.push(op);
        }
    }

    fn load_cached_image(&mut self, src: &str) -> Result<usize> {
        if let Some(&idx) = self.image_index.get(src) {
            return Ok(idx);
        }
        let image = image_loader::load_image(src)?;
        let idx = self.images.len();
        self.image_dimensions
            .insert(src.to_string(), (image.width_px, image.height_px));
        self.images.push(image);
        self.image_index.insert(src.to_string(), idx);
        Ok(idx)
    }

    fn flow_lines(&mut self, line_height: f64, text: &str, link: Option<&str>) {
        let right = self.page_width - self.setup.margins.right;
        let full = (right - self.setup.margins.left - 2.0 * self.cell_margin).max(0.0);
        let first = (right - self.x).clamp(0.0, full);

        let lines = self.text_layout.break_into_lines(
            &self.font_context,
            text,
            &self.font,
            first * self.k,
            full * self.k,
        );

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.ln(line_height);
            }
            if line.text.is_empty() {
                continue;
            }
            self.ensure_room(line_height);
            let width = line.width / self.k;
            let (x, y) = (self.x, self.y);
            self.draw_text_run(x, y, line_height, &line.text, width, link);
            self.x += width;
        }

        if text.ends_with('\n') {
            self.ln(line_height);
        } else {
            // the breaker trims line ends; inline runs still need the gap
            let kept = text.trim_end_matches(|c: char| c.is_whitespace() && c != '\n');
            let trailing = &text[kept.len()..];
            if !trailing.is_empty() {
                self.x += self.string_width(trailing);
            }
        }
    }
}

impl Canvas for PdfCanvas {
    fn margins(&self) -> Margins {
        self.setup.margins
    }

    fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    fn set_font(&mut self, family: FontFamily, style: FontStyle, size: f64) {
        self.font = FontSpec {
            family,
            style,
            size,
        };
    }

    fn font(&self) -> FontSpec {
        self.font
    }

    fn font_size(&self) -> (f64, f64) {
        (self.font.size, self.font_size_units())
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn text_color(&self) -> Color {
        self.text_color
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn cell(&mut self, cell: Cell<'_>) {
        let w = if cell.width == 0.0 {
            self.page_width - self.setup.margins.right - self.x
        } else {
            cell.width
        };
        let h = cell.height;
        self.ensure_room(h);
        let (x, y) = (self.x, self.y);

        if cell.fill || cell.border == Border::ALL {
            self.push(DrawOp::Rect {
                x,
                y,
                width: w,
                height: h,
                fill: cell.fill.then_some(self.fill_color),
                stroke: (cell.border == Border::ALL).then_some(self.draw_color),
                line_width: self.line_width,
            });
        }
        if !cell.border.is_none() && cell.border != Border::ALL {
            self.draw_borders(x, y, w, h, cell.border);
        }

        if !cell.text.is_empty() {
            let text_w = self.string_width(cell.text);
            let dx = match cell.align {
                Align::Left => self.cell_margin,
                Align::Center => (w - text_w) / 2.0,
                Align::Right => w - self.cell_margin - text_w,
            };
            self.draw_text_run(x + dx, y, h, cell.text, text_w, cell.link);
        }

        match cell.new_line {
            NewLine::Right => self.x = x + w,
            NewLine::NextLine => {
                self.x = self.setup.margins.left;
                self.y = y + h;
            }
            NewLine::Below => {
                self.x = x;
                self.y = y + h;
            }
        }
    }

    fn multi_cell(
        &mut self,
        width: f64,
        line_height: f64,
        text: &str,
        border: Border,
        align: Align,
        fill: bool,
    ) {
        let w = if width == 0.0 {
            self.page_width - self.setup.margins.right - self.x
        } else {
            width
        };
        let wrap_width = (w - 2.0 * self.cell_margin).max(0.0) * self.k;
        let lines = self.text_layout.break_into_lines(
            &self.font_context,
            text,
            &self.font,
            wrap_width,
            wrap_width,
        );

        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let sides = Border {
                left: border.left,
                right: border.right,
                top: border.top && i == 0,
                bottom: border.bottom && i == last,
            };
            self.cell(
                Cell::new(w, line_height, &line.text)
                    .border(sides)
                    .align(align)
                    .fill(fill)
                    .new_line(NewLine::Below),
            );
        }
        self.x = self.setup.margins.left;
    }

    fn write(&mut self, line_height: f64, text: &str, link: Option<&str>) {
        self.flow_lines(line_height, text, link);
    }

    fn write_markup(&mut self, line_height: f64, markup: &str) {
        let base = self.font;
        let base_color = self.text_color;
        for run in parse_markup(markup) {
            self.font = FontSpec {
                style: base.style.with(run.style),
                ..base
            };
            if run.href.is_some() {
                self.text_color = LINK_COLOR;
            }
            self.flow_lines(line_height, &run.text, run.href.as_deref());
            self.text_color = base_color;
        }
        self.font = base;
    }

    fn ln(&mut self, height: f64) {
        self.x = self.setup.margins.left;
        self.y += height;
    }

    fn image(
        &mut self,
        src: &str,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(f64, f64)> {
        let idx = self.load_cached_image(src)?;
        let (w_px, h_px) = {
            let img = &self.images[idx];
            (img.width_px as f64, img.height_px as f64)
        };
        let (w, h) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w * h_px / w_px),
            (None, Some(h)) => (h * w_px / h_px, h),
            (None, None) => (w_px / self.k, h_px / self.k),
        };
        self.push(DrawOp::Image {
            image: idx,
            x,
            y,
            width: w,
            height: h,
        });
        Ok((w, h))
    }

    fn image_size(&mut self, src: &str) -> Result<(f64, f64)> {
        let (w_px, h_px) = match self.image_dimensions.get(src) {
            Some(&dims) => dims,
            None => {
                let dims = image_loader::load_image_dimensions(src)?;
                self.image_dimensions.insert(src.to_string(), dims);
                dims
            }
        };
        Ok((w_px as f64 / self.k, h_px as f64 / self.k))
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }
}
