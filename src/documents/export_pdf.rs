use chrono::{DateTime, FixedOffset, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::debug;

use crate::domain::UserRecord;
use crate::errors::ServerError;

pub const REPORT_FILENAME: &str = "user-report.pdf";
pub const REPORT_TITLE: &str = "User Report";
pub const REPORT_HEADERS: [&str; 5] = ["ID", "Name", "Email", "Account Type", "Created At"];

// A4 portrait, positions measured from the top-left corner.
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 14.0;
const TITLE_Y: f64 = 10.0;
const TABLE_START_Y: f64 = 20.0;
const ROW_HEIGHT: f64 = 7.0;
const LINE_HEIGHT: f64 = 3.5;
const TITLE_SIZE: f64 = 14.0;
const CELL_SIZE: f64 = 8.0;

/// Left edge and wrap width (in characters) of each column.
const COLUMNS: [(f64, usize); 5] = [
    (MARGIN, 24),
    (50.0, 22),
    (84.0, 34),
    (134.0, 16),
    (160.0, 26),
];

pub type ReportRow = [String; 5];

/// A rendered report ready to be served as an attachment.
#[derive(Debug)]
pub struct ReportExport {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
    /// The rows that went into the table, in order.
    pub rows: Vec<ReportRow>,
}

/// `M/D/YYYY, h:mm:ss AM` in the given offset.
pub fn format_created_at(at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

pub fn report_row(user: &UserRecord, offset: &FixedOffset) -> ReportRow {
    [
        user.id.clone(),
        user.full_name(),
        user.email.clone(),
        user.account_type.clone(),
        format_created_at(&user.created_at, offset),
    ]
}

pub fn export_users_pdf(
    users: &[&UserRecord],
    offset: &FixedOffset,
) -> Result<ReportExport, ServerError> {
    let rows: Vec<ReportRow> = users.iter().map(|u| report_row(u, offset)).collect();
    let bytes = render_report_pdf(&rows)?;
    debug!(rows = rows.len(), bytes = bytes.len(), "Rendered user report");

    Ok(ReportExport {
        filename: REPORT_FILENAME,
        bytes,
        rows,
    })
}

fn pdf_error(step: &str, e: impl std::fmt::Display) -> ServerError {
    ServerError::PdfError(format!("{step}: {e}"))
}

/// printpdf measures from the bottom-left corner.
fn from_top(y: f64) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

/// Breaks `text` into lines of at most `width` characters.
///
/// Words move to the next line whole; a word longer than `width` (an email,
/// an id) is split across lines. No characters are dropped.
fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let line_len = line.chars().count();
        if line.is_empty() && word_len <= width {
            line.push_str(word);
            continue;
        }
        if !line.is_empty() && line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(width.max(1)).peekable();
        while let Some(chunk) = chunks.next() {
            let piece: String = chunk.iter().collect();
            if chunks.peek().is_some() {
                lines.push(piece);
            } else {
                line = piece;
            }
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Each cell of a row, wrapped to its column.
fn wrap_row(cells: &[&str]) -> Vec<Vec<String>> {
    cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, (_, width))| wrap_cell(cell, width))
        .collect()
}

/// Height taken by a wrapped row; grows with its tallest cell.
fn row_height(wrapped: &[Vec<String>]) -> f64 {
    let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
    ROW_HEIGHT + (lines - 1) as f64 * LINE_HEIGHT
}

fn write_row(layer: &PdfLayerReference, wrapped: &[Vec<String>], y: f64, font: &IndirectFontRef) {
    for (lines, (x, _)) in wrapped.iter().zip(COLUMNS) {
        for (i, line) in lines.iter().enumerate() {
            let baseline = y + i as f64 * LINE_HEIGHT;
            layer.use_text(line.as_str(), CELL_SIZE, Mm(x), from_top(baseline), font);
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn new_page(doc: &PdfDocumentReference, header: &[Vec<String>], fonts: &Fonts) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
    let layer = doc.get_page(page).get_layer(layer);
    write_row(&layer, header, MARGIN, &fonts.bold);
    layer
}

pub fn render_report_pdf(rows: &[ReportRow]) -> Result<Vec<u8>, ServerError> {
    let (doc, page, layer) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| pdf_error("load Helvetica", e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| pdf_error("load Helvetica-Bold", e))?,
    };

    let header = wrap_row(&REPORT_HEADERS);
    let mut layer = doc.get_page(page).get_layer(layer);
    layer.use_text(REPORT_TITLE, TITLE_SIZE, Mm(MARGIN), from_top(TITLE_Y), &fonts.bold);
    write_row(&layer, &header, TABLE_START_Y, &fonts.bold);

    // Baseline of the last row written; the next row starts ROW_HEIGHT below it.
    let mut y = TABLE_START_Y + row_height(&header) - ROW_HEIGHT;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let wrapped = wrap_row(&cells);
        let height = row_height(&wrapped);

        if y + height > PAGE_HEIGHT - MARGIN {
            layer = new_page(&doc, &header, &fonts);
            y = MARGIN + row_height(&header) - ROW_HEIGHT;
        }
        write_row(&layer, &wrapped, y + ROW_HEIGHT, &fonts.regular);
        y += height;
    }

    doc.save_to_bytes().map_err(|e| pdf_error("save document", e))
}
