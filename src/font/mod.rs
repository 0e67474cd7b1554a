//! # Font Management
//!
//! The composer only uses the standard PDF fonts (Helvetica, Times, Courier),
//! which never need embedding. This module maps a family + style to one of
//! those fonts and measures text with its AFM widths.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A font family the canvas can draw with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FromStr for FontFamily {
    type Err = String;

    /// Accepts the common aliases, so `Arial` maps onto Helvetica the way PDF
    /// viewers substitute it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "sans" | "sans-serif" => Ok(FontFamily::Helvetica),
            "times" | "times-roman" | "times new roman" | "serif" => Ok(FontFamily::Times),
            "courier" | "courier new" | "monospace" => Ok(FontFamily::Courier),
            other => Err(format!(
                "unknown font family '{}' (expected helvetica, times or courier)",
                other
            )),
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times",
            FontFamily::Courier => "Courier",
        };
        f.write_str(name)
    }
}

/// Bold / italic / underline flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontStyle {
    pub const REGULAR: FontStyle = FontStyle {
        bold: false,
        italic: false,
        underline: false,
    };
    pub const BOLD: FontStyle = FontStyle {
        bold: true,
        italic: false,
        underline: false,
    };
    pub const ITALIC: FontStyle = FontStyle {
        bold: false,
        italic: true,
        underline: false,
    };
    pub const UNDERLINE: FontStyle = FontStyle {
        bold: false,
        italic: false,
        underline: true,
    };

    /// Union of two styles.
    pub const fn with(self, other: FontStyle) -> FontStyle {
        FontStyle {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }
}

/// Everything needed to select and size a font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub style: FontStyle,
    /// Size in points.
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::Helvetica,
            style: FontStyle::REGULAR,
            size: 12.0,
        }
    }
}

/// The 12 standard PDF text fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// Pick the standard font for a family and style. Underline is drawn
    /// separately and does not affect the face.
    pub fn resolve(family: FontFamily, style: FontStyle) -> Self {
        match (family, style.bold, style.italic) {
            (FontFamily::Helvetica, false, false) => Self::Helvetica,
            (FontFamily::Helvetica, true, false) => Self::HelveticaBold,
            (FontFamily::Helvetica, false, true) => Self::HelveticaOblique,
            (FontFamily::Helvetica, true, true) => Self::HelveticaBoldOblique,
            (FontFamily::Times, false, false) => Self::TimesRoman,
            (FontFamily::Times, true, false) => Self::TimesBold,
            (FontFamily::Times, false, true) => Self::TimesItalic,
            (FontFamily::Times, true, true) => Self::TimesBoldItalic,
            (FontFamily::Courier, false, false) => Self::Courier,
            (FontFamily::Courier, true, false) => Self::CourierBold,
            (FontFamily::Courier, false, true) => Self::CourierOblique,
            (FontFamily::Courier, true, true) => Self::CourierBoldOblique,
        }
    }

    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => &metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &metrics::HELVETICA_BOLD,
            Self::TimesRoman | Self::TimesItalic => &metrics::TIMES,
            Self::TimesBold | Self::TimesBoldItalic => &metrics::TIMES_BOLD,
            Self::Courier | Self::CourierBold | Self::CourierOblique | Self::CourierBoldOblique => {
                &metrics::COURIER
            }
        }
    }
}

/// Text measurement shared by the canvas and the line breaker.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: &FontSpec) -> f64 {
        StandardFont::resolve(font.family, font.style)
            .metrics()
            .char_width(ch, font.size)
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font: &FontSpec) -> f64 {
        StandardFont::resolve(font.family, font.style)
            .metrics()
            .measure_string(text, font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(family: FontFamily, style: FontStyle) -> FontSpec {
        FontSpec {
            family,
            style,
            size: 12.0,
        }
    }

    #[test]
    fn test_bold_wider() {
        let ctx = FontContext::new();
        let regular = ctx.char_width('a', &spec(FontFamily::Helvetica, FontStyle::REGULAR));
        let bold = ctx.char_width('a', &spec(FontFamily::Helvetica, FontStyle::BOLD));
        assert!(bold > regular, "Bold a should be wider than regular a");
    }

    #[test]
    fn test_times_bold_measured_with_bold_widths() {
        let ctx = FontContext::new();
        let regular = ctx.measure_string("Skills & Interests", &spec(FontFamily::Times, FontStyle::REGULAR));
        let bold = ctx.measure_string("Skills & Interests", &spec(FontFamily::Times, FontStyle::BOLD));
        let bold_italic = ctx.measure_string(
            "Skills & Interests",
            &spec(FontFamily::Times, FontStyle::BOLD.with(FontStyle::ITALIC)),
        );
        assert!(bold > regular);
        assert_eq!(bold, bold_italic);
    }

    #[test]
    fn test_underline_does_not_change_face() {
        let styled = FontStyle::ITALIC.with(FontStyle::UNDERLINE);
        assert_eq!(
            StandardFont::resolve(FontFamily::Times, styled),
            StandardFont::TimesItalic
        );
    }

    #[test]
    fn test_family_aliases() {
        assert_eq!("Arial".parse::<FontFamily>(), Ok(FontFamily::Helvetica));
        assert_eq!("times".parse::<FontFamily>(), Ok(FontFamily::Times));
        assert!("Comic Sans".parse::<FontFamily>().is_err());
    }

    #[test]
    fn test_pdf_names() {
        assert_eq!(StandardFont::HelveticaBoldOblique.pdf_name(), "Helvetica-BoldOblique");
        assert_eq!(
            StandardFont::resolve(FontFamily::Courier, FontStyle::BOLD).pdf_name(),
            "Courier-Bold"
        );
    }
}
