//! # Vitae
//!
//! Turns a JSON Resume document into a one-column PDF résumé.
//!
//! The interesting part is the composer: it walks the résumé's sections in a
//! fixed order and decides where everything goes (a header with an optional
//! photo, label/content rows, wrapped paragraphs), skipping anything the
//! résumé leaves empty. The drawing surface underneath is a small canvas
//! with a moving cursor, in the spirit of classic single-pass PDF writers.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON Resume)
//!       ↓
//!   [model]    : Résumé data, typed partial dates
//!       ↓
//!   [layout]   : Composer: header, sections, rows, flowed text
//!       ↓  (Canvas trait)
//!   [canvas]   : Cursor, fonts, cells, wrapping, images, links
//!       ↓
//!   [pdf]      : Serialize to PDF bytes
//! ```
//!
//! ```no_run
//! let json = std::fs::read_to_string("resume.json")?;
//! let pdf = vitae::render_json(&json, &vitae::ComposeOptions::default())?;
//! std::fs::write("cv.pdf", pdf)?;
//! # Ok::<(), vitae::VitaeError>(())
//! ```

pub mod canvas;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod observer;
pub mod pdf;
pub mod text;

pub use error::{Result, VitaeError};
pub use layout::{compose, ComposeOptions, Section};
pub use model::Resume;
pub use observer::{LogObserver, Notice, Observer};

use canvas::{PageSetup, PdfCanvas};

/// Compose `resume` onto a fresh canvas without serializing it. Useful for
/// inspecting the layout.
pub fn compose_canvas(
    resume: &Resume,
    options: &ComposeOptions,
    setup: PageSetup,
    observer: &mut dyn Observer,
) -> Result<PdfCanvas> {
    let mut canvas = PdfCanvas::new(setup);
    let title = format!("{} - Curriculum Vitae", resume.basics.name);
    canvas.set_title(&title);
    canvas.set_author(&resume.basics.name);
    compose(resume, options, &mut canvas, observer)?;
    Ok(canvas)
}

/// Render a résumé to PDF bytes on A4 with 10 mm margins.
///
/// This is the primary entry point. Skipped content is reported through the
/// `log` facade.
pub fn render(resume: &Resume, options: &ComposeOptions) -> Result<Vec<u8>> {
    render_with(resume, options, PageSetup::default(), &mut LogObserver)
}

/// [`render`] with an explicit page setup and observer.
pub fn render_with(
    resume: &Resume,
    options: &ComposeOptions,
    setup: PageSetup,
    observer: &mut dyn Observer,
) -> Result<Vec<u8>> {
    compose_canvas(resume, options, setup, observer)?.finish()
}

/// Render a résumé given as JSON Resume text to PDF bytes.
pub fn render_json(json: &str, options: &ComposeOptions) -> Result<Vec<u8>> {
    let resume = Resume::from_json(json)?;
    render(&resume, options)
}
