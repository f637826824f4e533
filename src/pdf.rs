//! Minimal PDF 1.4 writer for pages of positioned text.
//!
//! Object layout for `n` pages:
//!
//! | id            | object                       |
//! |---------------|------------------------------|
//! | 1             | catalog                      |
//! | 2             | page tree                    |
//! | 3 + 2i        | content stream of page `i`   |
//! | 4 + 2i        | page object of page `i`      |
//! | 3 + 2n        | Helvetica font resource      |

use std::fmt::Write as _;

use crate::layout::{PageInstruction, TextRun};
use crate::metrics::win_ansi_code;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FIRST_PAGE_ID: usize = 3;

/// The header plus a comment of high-bit bytes marking the file as binary.
const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

/// Media box dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

fn content_id(page_index: usize) -> usize {
    FIRST_PAGE_ID + 2 * page_index
}

fn page_id(page_index: usize) -> usize {
    content_id(page_index) + 1
}

/// Serialize laid-out pages into a complete PDF file.
///
/// An empty slice yields a single blank page.
pub fn serialize(pages: &[PageInstruction], size: PageSize) -> Vec<u8> {
    let blank = [PageInstruction::default()];
    let pages = if pages.is_empty() { &blank[..] } else { pages };
    let font_id = content_id(pages.len());

    let mut writer = PdfWriter::new();

    writer.write_object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").as_bytes(),
    );

    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", page_id(i))).collect();
    writer.write_object(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .as_bytes(),
    );

    for (i, page) in pages.iter().enumerate() {
        writer.write_stream(content_id(i), &content_stream(page));
        writer.write_object(
            page_id(i),
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                number(size.width),
                number(size.height),
                content_id(i),
            )
            .as_bytes(),
        );
    }

    writer.write_object(
        font_id,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    let bytes = writer.finish();
    log::debug!("serialized {} pages into {} bytes", pages.len(), bytes.len());
    bytes
}

/// Accumulates object bytes and the offset at which each object starts.
struct PdfWriter {
    buf: Vec<u8>,
    // offsets[id - 1] is the position of "id 0 obj"
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buf: HEADER.to_vec(),
            offsets: Vec::new(),
        }
    }

    fn begin_object(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len() + 1, "object ids must be dense");
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn write_object(&mut self, id: usize, body: &[u8]) {
        self.begin_object(id);
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn write_stream(&mut self, id: usize, data: &[u8]) {
        self.begin_object(id);
        self.buf
            .extend_from_slice(format!("<< /Length {} >>\nstream\n", data.len()).as_bytes());
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let size = self.offsets.len() + 1;
        let xref_start = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_start}\n%%EOF\n"
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

fn content_stream(page: &PageInstruction) -> Vec<u8> {
    let mut out = String::new();
    for run in &page.runs {
        text_run(run, &mut out);
    }
    out.into_bytes()
}

fn text_run(run: &TextRun, out: &mut String) {
    let _ = writeln!(out, "BT");
    let _ = writeln!(out, "/F1 {} Tf", number(run.font_size));
    let _ = writeln!(out, "1 0 0 1 {} {} Tm", number(run.x), number(run.y));
    let _ = writeln!(out, "({}) Tj", escape_text(&run.content));
    let _ = writeln!(out, "ET");
}

/// Format a coordinate with two decimals, dropping redundant zeros.
fn number(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Encode text as the body of a PDF literal string in WinAnsiEncoding.
///
/// String delimiters and backslashes are escaped; characters the encoding
/// cannot represent become `?`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => match win_ansi_code(ch) {
                Some(code) => {
                    let _ = write!(out, "\\{code:03o}");
                }
                None => out.push('?'),
            },
        }
    }
    out
}
