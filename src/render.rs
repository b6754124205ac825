//! Document layout and PDF output.
//!
//! Rendering happens in two steps. [`Document::from_record`] lays the record out
//! as pages of plain text, one page per statistics field. [`to_pdf`] then places
//! that text on A4 pages with the built-in Times fonts. Keeping the layout
//! separate from `printpdf` lets it be checked without parsing PDF output.
//!
//! The built-in fonts only cover the WinAnsi character set. Characters outside
//! it (Hangul, CJK, Cyrillic, ...) are drawn as `?` and reported with a
//! warning, so every value keeps a visible line. Lines wider than the page
//! are shortened with a trailing `...`.

use std::path::Path;

use chrono::{Local, NaiveDate};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::{Error, Res, types::StatsRecord, utils, warning};

const DOCUMENT_TITLE: &str = "Spotify Stats";

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const TOP_MARGIN: f32 = 25.0;
const BOTTOM_MARGIN: f32 = 20.0;
const SIDE_MARGIN: f32 = 15.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 9.0;
const TITLE_SPACING: f32 = 15.0;
const LINE_HEIGHT: f32 = 10.0;

const PT_TO_MM: f32 = 0.3528;
// Average advance of a Times glyph, in em.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

const REPLACEMENT_CHAR: char = '?';
const ELLIPSIS: &str = "...";
// WinAnsi code points 0x80..=0x9F that live outside Latin-1.
const WINANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub pages: Vec<Page>,
    pub footer: String,
}

impl Document {
    /// One page per record field, in page order, each line numbered from 1.
    pub fn from_record(record: &StatsRecord, generated_on: NaiveDate) -> Self {
        let pages = record
            .sections()
            .into_iter()
            .map(|(title, values)| Page {
                title: title.to_string(),
                lines: utils::numbered(&values),
            })
            .collect();

        Document {
            pages,
            footer: format!("Generated on {}", generated_on.format("%Y-%m-%d")),
        }
    }
}

/// Renders the record as a PDF at `output_path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Render`] if the PDF cannot be produced or written.
pub async fn render(record: &StatsRecord, output_path: &Path) -> Res<()> {
    let document = Document::from_record(record, Local::now().date_naive());
    let bytes = to_pdf(&document)?;

    async_fs::write(output_path, bytes)
        .await
        .map_err(|e| Error::Render(format!("{}: {}", output_path.display(), e)))
}

/// Lays the document out on A4 pages with centered titles and lines.
pub fn to_pdf(document: &Document) -> Res<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(DOCUMENT_TITLE, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let title_font = doc
        .add_builtin_font(BuiltinFont::TimesBoldItalic)
        .map_err(render_error)?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(render_error)?;

    let mut replaced = false;
    let mut draw =
        |layer: &PdfLayerReference, text: &str, size: f32, y: f32, font: &IndirectFontRef| {
            let (text, lossy) = printable(text, size);
            replaced |= lossy;
            layer.use_text(text.as_str(), size, Mm(centered_x(&text, size)), Mm(y), font);
        };

    for (index, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        let mut y = PAGE_HEIGHT.0 - TOP_MARGIN;
        draw(&layer, &page.title, TITLE_SIZE, y, &title_font);
        y -= TITLE_SPACING;

        let line_height = line_height_for(page.lines.len());
        for line in &page.lines {
            draw(&layer, line, BODY_SIZE, y, &body_font);
            y -= line_height;
        }

        draw(&layer, &document.footer, FOOTER_SIZE, BOTTOM_MARGIN / 2.0, &body_font);
    }

    if replaced {
        warning!(
            "Some values contain characters the PDF fonts cannot display; they are shown as '{}'",
            REPLACEMENT_CHAR
        );
    }

    doc.save_to_bytes().map_err(render_error)
}

fn render_error(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

fn centered_x(text: &str, font_size: f32) -> f32 {
    let width = text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH_EM * PT_TO_MM;
    ((PAGE_WIDTH.0 - width) / 2.0).max(SIDE_MARGIN)
}

fn winansi_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WINANSI_EXTRAS.contains(c)
}

/// Widest line, in characters, that fits between the side margins.
fn max_chars(font_size: f32) -> usize {
    let usable = PAGE_WIDTH.0 - 2.0 * SIDE_MARGIN;
    (usable / (font_size * AVG_CHAR_WIDTH_EM * PT_TO_MM)) as usize
}

/// Turns `text` into something the built-in fonts can draw within the page
/// width. The flag is set when a character had to be replaced.
fn printable(text: &str, font_size: f32) -> (String, bool) {
    let mut lossy = false;
    let mut chars: Vec<char> = text
        .chars()
        .map(|c| {
            if winansi_encodable(c) {
                c
            } else {
                lossy = true;
                REPLACEMENT_CHAR
            }
        })
        .collect();

    let limit = max_chars(font_size);
    if chars.len() > limit {
        chars.truncate(limit.saturating_sub(ELLIPSIS.len()));
        chars.extend(ELLIPSIS.chars());
    }

    (chars.into_iter().collect(), lossy)
}

/// Shrinks the line spacing so that every line stays on the page.
fn line_height_for(lines: usize) -> f32 {
    if lines == 0 {
        return LINE_HEIGHT;
    }
    let available = PAGE_HEIGHT.0 - TOP_MARGIN - TITLE_SPACING - BOTTOM_MARGIN;
    LINE_HEIGHT.min(available / lines as f32)
}
