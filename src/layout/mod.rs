//! # Layout Composer
//!
//! Walks the résumé section by section and turns it into canvas calls. This
//! is where the document's shape is decided; the canvas only knows how to
//! draw a cell or wrap a paragraph.
//!
//! ## Document order
//!
//! ```text
//! Header → Summary → SkillsInterests → Education[→Courses] → Work → [Credit]
//! ```
//!
//! The order is a value ([`ComposeOptions::sections`]) rather than a call
//! sequence. A section whose data is empty is skipped before anything is
//! drawn: no heading, no spacing, just a [`Notice`] to the observer.
//!
//! ## Vertical rhythm
//!
//! Every section heading is a bold cell two line-heights tall with a rule
//! under it, followed by half a line of air. Rows inside a section are
//! 1.5 line-heights. Each section ends with one blank line.
//!
//! The only hard failure is in the header: a street address without a city.
//! It is detected before the header draws anything.

pub mod flow;
pub mod geometry;
mod header;
mod sections;

pub use flow::{flow_text, render_row, RowStyle};
pub use geometry::{content_height, content_width, line_height, LayoutBudget};
pub use sections::{interest_sentence, CREDIT_MARKUP};

use std::fmt;

use serde::Deserialize;

use crate::canvas::{Canvas, Color};
use crate::error::Result;
use crate::font::{FontFamily, FontStyle};
use crate::model::Resume;
use crate::observer::{Notice, Observer};

/// Body text size in points.
pub const BODY_SIZE: f64 = 11.0;
pub const HEADING_SIZE: f64 = 15.0;
pub const NAME_SIZE: f64 = 20.0;
pub const TITLE_SIZE: f64 = 14.0;

/// Row height as a multiple of the body line height.
const ROW_SPACING: f64 = 1.5;

/// One semantic block of the document, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Summary,
    SkillsInterests,
    Education,
    Work,
    Credit,
}

impl Section {
    /// Whether the résumé has anything to draw for this section.
    pub fn has_content(&self, resume: &Resume) -> bool {
        match self {
            Section::Header | Section::Credit => true,
            Section::Summary => resume.basics.summary.is_some(),
            Section::SkillsInterests => !resume.skills.is_empty(),
            Section::Education => !resume.education.is_empty(),
            Section::Work => !resume.work.is_empty(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Header => "header",
            Section::Summary => "summary",
            Section::SkillsInterests => "skills",
            Section::Education => "education",
            Section::Work => "work",
            Section::Credit => "credit",
        })
    }
}

/// Caller-controlled composition settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposeOptions {
    /// Append the attribution line at the end of the document.
    pub include_credit: bool,
    /// Replaces the default family (Helvetica) everywhere.
    pub font_family: Option<FontFamily>,
}

impl ComposeOptions {
    /// The sections to compose, in document order.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = vec![
            Section::Header,
            Section::Summary,
            Section::SkillsInterests,
            Section::Education,
            Section::Work,
        ];
        if self.include_credit {
            sections.push(Section::Credit);
        }
        sections
    }

    pub fn family(&self) -> FontFamily {
        self.font_family.unwrap_or_default()
    }
}

/// Composes one résumé onto one canvas. Holds the canvas exclusively for the
/// whole pass.
pub struct Composer<'a, C: Canvas + ?Sized> {
    resume: &'a Resume,
    options: &'a ComposeOptions,
    canvas: &'a mut C,
    observer: &'a mut dyn Observer,
}

impl<'a, C: Canvas + ?Sized> Composer<'a, C> {
    pub fn new(
        resume: &'a Resume,
        options: &'a ComposeOptions,
        canvas: &'a mut C,
        observer: &'a mut dyn Observer,
    ) -> Self {
        Self {
            resume,
            options,
            canvas,
            observer,
        }
    }

    pub fn run(mut self) -> Result<()> {
        self.body_font();
        self.canvas.set_text_color(Color::BLACK);
        self.canvas.set_fill_color(Color::WHITE);
        self.canvas.set_draw_color(Color::BLACK);

        for section in self.options.sections() {
            if !section.has_content(self.resume) {
                self.observer.notice(Notice::SectionSkipped(section));
                continue;
            }
            log::debug!("Composing {} at y={:.2}", section, self.canvas.y());
            match section {
                Section::Header => self.header()?,
                Section::Summary => self.summary(),
                Section::SkillsInterests => self.skills_and_interests(),
                Section::Education => self.education(),
                Section::Work => self.work(),
                Section::Credit => self.credit(),
            }
        }
        Ok(())
    }

    fn family(&self) -> FontFamily {
        self.options.family()
    }

    /// Select the body font and return its line height.
    fn body_font(&mut self) -> f64 {
        let family = self.family();
        self.canvas.set_font(family, FontStyle::REGULAR, BODY_SIZE);
        line_height(&*self.canvas)
    }

    fn row_height(&mut self) -> f64 {
        self.body_font() * ROW_SPACING
    }
}

/// Compose `resume` onto `canvas`, reporting skipped content to `observer`.
pub fn compose<C: Canvas + ?Sized>(
    resume: &Resume,
    options: &ComposeOptions,
    canvas: &mut C,
    observer: &mut dyn Observer,
) -> Result<()> {
    Composer::new(resume, options, canvas, observer).run()
}
