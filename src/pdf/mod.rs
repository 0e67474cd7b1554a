//! # PDF Serializer
//!
//! Takes the pages recorded by [`PdfCanvas`](crate::canvas::PdfCanvas) and
//! writes a PDF 1.7 file.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Only the standard Type1 fonts are used, so text is written as
//! WinAnsiEncoding strings and nothing is embedded. Links become `/Link`
//! annotations with a `/URI` action.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::canvas::{Color, DrawOp, Page};
use crate::error::Result;
use crate::font::StandardFont;
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Font resources, `/F{index}`.
    fonts: Vec<StandardFont>,
    /// XObject ids, `/Im{index}` in canvas image order.
    image_objects: Vec<usize>,
}

struct PdfObject {
    data: Vec<u8>,
}

/// Page geometry for coordinate conversion.
struct PageFrame {
    /// Points per user unit.
    k: f64,
    height_pt: f64,
}

impl PageFrame {
    fn x(&self, x: f64) -> f64 {
        x * self.k
    }

    /// Flip a top-down user-unit y into PDF space.
    fn y(&self, y: f64) -> f64 {
        self.height_pt - y * self.k
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write recorded pages to a PDF byte vector. `page_size` is in points,
    /// `k` is points per user unit.
    pub fn write(
        &self,
        pages: &[Page],
        images: &[LoadedImage],
        metadata: &Metadata,
        page_size: (f64, f64),
        k: f64,
    ) -> Result<Vec<u8>> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            fonts: Vec::new(),
            image_objects: Vec::new(),
        };

        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: vec![] });
        }

        let font_objects = self.register_fonts(&mut builder, pages);
        for image in images {
            let id = Self::write_image_xobject(&mut builder, image);
            builder.image_objects.push(id);
        }

        let frame = PageFrame {
            k,
            height_pt: page_size.1,
        };
        let resources = self.build_resource_dict(&font_objects, &builder.image_objects);
        let mut page_obj_ids: Vec<usize> = Vec::new();

        for page in pages {
            let content = self.build_content_stream(page, &frame, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let annots = self.write_link_annotations(&mut builder, page, &frame);
            let annots_entry = if annots.is_empty() {
                String::new()
            } else {
                let refs: Vec<String> = annots.iter().map(|id| format!("{} 0 R", id)).collect();
                format!(" /Annots [{}]", refs.join(" "))
            };

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >>{} >>",
                page_size.0, page_size.1, content_obj_id, resources, annots_entry
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: self.build_info_dict(metadata).into_bytes(),
        });

        Ok(self.serialize(&builder, info_obj_id))
    }

    fn build_info_dict(&self, metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", Self::encode_text(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", Self::encode_text(author));
        }
        let creator = metadata.creator.as_deref().unwrap_or("vitae");
        let _ = write!(
            info,
            "/Creator ({}) /Producer (vitae {}) >>",
            Self::encode_text(creator),
            env!("CARGO_PKG_VERSION")
        );
        info
    }

    /// One Type1 object per standard font that any text op uses. Returns
    /// `(font, object id)` in resource order.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[Page]) -> Vec<(StandardFont, usize)> {
        let mut used: BTreeSet<StandardFont> = BTreeSet::new();
        for page in pages {
            for op in &page.ops {
                if let DrawOp::Text { font, .. } = op {
                    used.insert(StandardFont::resolve(font.family, font.style));
                }
            }
        }
        // Always have at least Helvetica
        if used.is_empty() {
            used.insert(StandardFont::Helvetica);
        }

        let mut font_objects = Vec::new();
        for font in used {
            let id = builder.objects.len();
            builder.objects.push(PdfObject {
                data: format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                )
                .into_bytes(),
            });
            builder.fonts.push(font);
            font_objects.push((font, id));
        }
        font_objects
    }

    fn build_resource_dict(&self, fonts: &[(StandardFont, usize)], images: &[usize]) -> String {
        let font_entries: Vec<String> = fonts
            .iter()
            .enumerate()
            .map(|(i, (_, id))| format!("/F{} {} 0 R", i, id))
            .collect();
        let mut resources = format!("/Font << {} >>", font_entries.join(" "));
        if !images.is_empty() {
            let image_entries: Vec<String> = images
                .iter()
                .enumerate()
                .map(|(i, id)| format!("/Im{} {} 0 R", i, id))
                .collect();
            let _ = write!(resources, " /XObject << {} >>", image_entries.join(" "));
        }
        resources
    }

    fn font_index(&self, builder: &PdfBuilder, font: StandardFont) -> usize {
        builder.fonts.iter().position(|f| *f == font).unwrap_or(0)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &Page, frame: &PageFrame, builder: &PdfBuilder) -> String {
        let mut stream = String::new();

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    text,
                    font,
                    color,
                } => {
                    let idx = self.font_index(builder, StandardFont::resolve(font.family, font.style));
                    let _ = write!(
                        stream,
                        "BT\n{} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        Self::rgb(color),
                        idx,
                        font.size,
                        frame.x(*x),
                        frame.y(*y),
                        Self::encode_text(text)
                    );
                }

                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                    color,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        Self::rgb(color),
                        width * frame.k,
                        frame.x(*x1),
                        frame.y(*y1),
                        frame.x(*x2),
                        frame.y(*y2)
                    );
                }

                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                    line_width,
                } => {
                    let paint = match (fill, stroke) {
                        (Some(_), Some(_)) => "B",
                        (Some(_), None) => "f",
                        (None, Some(_)) => "S",
                        (None, None) => continue,
                    };
                    stream.push_str("q\n");
                    if let Some(fill) = fill {
                        let _ = writeln!(stream, "{} rg", Self::rgb(fill));
                    }
                    if let Some(stroke) = stroke {
                        let _ = write!(stream, "{} RG\n{:.2} w\n", Self::rgb(stroke), line_width * frame.k);
                    }
                    let _ = write!(
                        stream,
                        "{:.2} {:.2} {:.2} {:.2} re\n{}\nQ\n",
                        frame.x(*x),
                        frame.y(y + height),
                        width * frame.k,
                        height * frame.k,
                        paint
                    );
                }

                DrawOp::Image {
                    image,
                    x,
                    y,
                    width,
                    height,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                        width * frame.k,
                        height * frame.k,
                        frame.x(*x),
                        frame.y(y + height),
                        image
                    );
                }

                // Written as annotations, not page content.
                DrawOp::Link { .. } => {}
            }
        }

        stream
    }

    fn write_link_annotations(&self, builder: &mut PdfBuilder, page: &Page, frame: &PageFrame) -> Vec<usize> {
        let mut ids = Vec::new();
        for op in &page.ops {
            if let DrawOp::Link {
                x,
                y,
                width,
                height,
                uri,
            } = op
            {
                let id = builder.objects.len();
                let annot = format!(
                    "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] \
                     /Border [0 0 0] /A << /S /URI /URI ({}) >> >>",
                    frame.x(*x),
                    frame.y(y + height),
                    frame.x(x + width),
                    frame.y(*y),
                    Self::escape_pdf_string(uri)
                );
                builder.objects.push(PdfObject {
                    data: annot.into_bytes(),
                });
                ids.push(id);
            }
        }
        ids
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space_str = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };

                let obj_id = builder.objects.len();
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace {} /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space_str,
                    data.len()
                );
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                let smask_id = alpha.as_ref().map(|alpha_data| {
                    let compressed_alpha = compress_to_vec_zlib(alpha_data, 6);
                    let smask_obj_id = builder.objects.len();
                    let mut smask_data: Vec<u8> = Vec::new();
                    let _ = write!(
                        smask_data,
                        "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                         /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>\nstream\n",
                        image.width_px,
                        image.height_px,
                        compressed_alpha.len()
                    );
                    smask_data.extend_from_slice(&compressed_alpha);
                    smask_data.extend_from_slice(b"\nendstream");
                    builder.objects.push(PdfObject { data: smask_data });
                    smask_obj_id
                });

                let compressed_rgb = compress_to_vec_zlib(rgb, 6);
                let obj_id = builder.objects.len();
                let smask_ref = smask_id
                    .map(|id| format!(" /SMask {} 0 R", id))
                    .unwrap_or_default();
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode /Length {}{} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed_rgb.len(),
                    smask_ref
                );
                obj_data.extend_from_slice(&compressed_rgb);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }
        }
    }

    fn rgb(color: &Color) -> String {
        format!(
            "{:.3} {:.3} {:.3}",
            color.r as f64 / 255.0,
            color.g as f64 / 255.0,
            color.b as f64 / 255.0
        )
    }

    /// Escape special characters in a PDF string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
    }

    /// Encode text as the body of a WinAnsi literal string. Bytes outside
    /// printable ASCII become octal escapes; unmappable characters become `?`.
    fn encode_text(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly; 0x80..=0x9F holds the
    /// typographic punctuation.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
