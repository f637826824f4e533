//! Quadra Markdown to PDF, with no rendering or PDF library involved.
//!
//! The pipeline is `parse` → [`layout`] → [`serialize`]; [`render`] runs the
//! last two. Parsing and rendering are total: every input produces a
//! document, every document produces a valid PDF.

mod block;
mod config;
mod error;
mod layout;
mod metrics;
mod parser;
mod pdf;

pub use block::{Block, Document, MAX_HEADING_LEVEL};
pub use config::{Config, FontConfig, LayoutConfig, PageConfig};
pub use error::{Error, Result};
pub use layout::{PageInstruction, TextRun};
pub use metrics::{glyph_width, measure, normalize, win_ansi_code, wrap};
pub use pdf::PageSize;

/// Parse Quadra Markdown text into a document.
pub fn parse(markdown: &str) -> Document {
    parser::parse(markdown)
}

/// Lay a document out into pages using the default config.
pub fn layout(doc: &Document) -> Vec<PageInstruction> {
    layout_with_config(doc, &Config::default())
}

/// Lay a document out into pages with custom config.
pub fn layout_with_config(doc: &Document, config: &Config) -> Vec<PageInstruction> {
    layout::layout(doc, config)
}

/// Serialize pages into PDF bytes using the default page size.
pub fn serialize(pages: &[PageInstruction]) -> Vec<u8> {
    serialize_with_config(pages, &Config::default())
}

/// Serialize pages into PDF bytes with the page size from `config`.
pub fn serialize_with_config(pages: &[PageInstruction], config: &Config) -> Vec<u8> {
    let size = PageSize {
        width: config.page.width,
        height: config.page.height,
    };
    pdf::serialize(pages, size)
}

/// Render a document to PDF bytes using the default config.
pub fn render(doc: &Document) -> Vec<u8> {
    render_with_config(doc, &Config::default())
}

/// Render a document to PDF bytes with custom config.
pub fn render_with_config(doc: &Document, config: &Config) -> Vec<u8> {
    let pages = layout_with_config(doc, config);
    serialize_with_config(&pages, config)
}

/// Convert markdown to PDF bytes using the default config.
pub fn markdown_to_pdf(markdown: &str) -> Vec<u8> {
    render(&parse(markdown))
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Vec<u8> {
    render_with_config(&parse(markdown), config)
}
