use std::io::BufWriter;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rect,
};
use tracing::info;

use crate::error::ExportError;
use crate::layout::{DrawOp, Page};
use crate::metrics::{Font, PT_TO_MM};
use crate::styles::PageStyle;

/// File name offered to the user for the finished report.
pub const SUGGESTED_FILENAME: &str = "Informe_Psicologico.pdf";

/// A finished, serialized document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Italic => &self.italic,
        }
    }
}

/// Serialize laid-out pages into PDF bytes.
///
/// Text uses the built-in Helvetica family, which is WinAnsi encoded. Every
/// string is checked before anything is written so a single unencodable
/// character fails the whole document rather than producing a partial one.
pub fn write_pdf(
    title: &str,
    style: &PageStyle,
    pages: &[Page],
) -> Result<RenderedDocument, ExportError> {
    check_encodable(pages)?;
    if pages.is_empty() {
        return Err(ExportError::Pdf("document has no pages".to_string()));
    }

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(style.width), Mm(style.height), "Layer 1");

    let fonts = Fonts {
        regular: add_font(&doc, BuiltinFont::Helvetica)?,
        bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
        italic: add_font(&doc, BuiltinFont::HelveticaOblique)?,
    };

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(style.width), Mm(style.height), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, page, style, &fonts);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save failed: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))?;

    info!(pages = pages.len(), bytes = bytes.len(), "pdf written");

    Ok(RenderedDocument {
        bytes,
        page_count: pages.len(),
    })
}

fn add_font(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))
}

fn black() -> Color {
    Color::Greyscale(Greyscale::new(0.0, None))
}

fn draw_page(layer: &PdfLayerReference, page: &Page, style: &PageStyle, fonts: &Fonts) {
    // printpdf measures y upwards from the bottom edge.
    let flip = |y: f32| Mm(style.height - y);

    layer.set_outline_color(black());
    layer.set_outline_thickness(style.line_width / PT_TO_MM);

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                font,
                size,
                text,
            } => {
                layer.set_fill_color(black());
                layer.use_text(text.as_str(), *size, Mm(*x), flip(*baseline), fonts.get(*font));
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                let rect = Rect::new(Mm(*x), flip(y + height), Mm(x + width), flip(*y));
                let rect = match fill {
                    Some(level) => {
                        layer.set_fill_color(Color::Greyscale(Greyscale::new(*level, None)));
                        rect.with_mode(PaintMode::FillStroke)
                    }
                    None => rect.with_mode(PaintMode::Stroke),
                };
                layer.add_rect(rect);
            }
            DrawOp::Line { x1, y1, x2, y2 } => {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), flip(*y1)), false),
                        (Point::new(Mm(*x2), flip(*y2)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

/// Characters outside Latin-1 that WinAnsiEncoding still maps (0x80–0x9F).
const WINANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

pub fn is_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{a0}'..='\u{ff}') || WINANSI_EXTRAS.contains(&c)
}

fn check_encodable(pages: &[Page]) -> Result<(), ExportError> {
    for page in pages {
        for text in page.texts() {
            if let Some(character) = text.chars().find(|c| !is_encodable(*c)) {
                return Err(ExportError::Unencodable {
                    character,
                    text: text.to_string(),
                });
            }
        }
    }
    Ok(())
}
