//! Line wrapping and pagination.
//!
//! The output is a format-agnostic list of positioned text runs per page; the
//! PDF serializer consumes it without knowing anything about Markdown.

use crate::block::{Block, Document};
use crate::config::Config;
use crate::metrics::{self, BULLET};

/// A single line of text placed on a page. Coordinates are in points with
/// the origin at the bottom-left corner; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub content: String,
}

/// Everything drawn on one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageInstruction {
    pub runs: Vec<TextRun>,
}

impl PageInstruction {
    pub fn is_blank(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Lay the document out into pages. Always returns at least one page.
pub fn layout(doc: &Document, config: &Config) -> Vec<PageInstruction> {
    let mut cursor = Cursor::new(config);
    for block in doc {
        cursor.place_block(block);
    }
    cursor.finish()
}

/// Placement of a block's lines relative to the left margin
struct BlockStyle {
    font_size: f64,
    indent: f64,
    /// Prefix drawn before the first line; continuation lines hang under the text
    prefix: Option<String>,
}

impl BlockStyle {
    fn for_block(block: &Block, config: &Config) -> Self {
        let font_size = config.font.size_for(block);
        match block {
            Block::ListItem { .. } => Self {
                font_size,
                indent: config.layout.list_indent,
                prefix: Some(format!("{BULLET} ")),
            },
            Block::Heading { .. } | Block::Paragraph { .. } => Self {
                font_size,
                indent: 0.0,
                prefix: None,
            },
        }
    }

    fn prefix_width(&self) -> f64 {
        self.prefix
            .as_deref()
            .map_or(0.0, |p| metrics::measure(p, self.font_size))
    }
}

struct Cursor<'a> {
    config: &'a Config,
    done: Vec<PageInstruction>,
    page: PageInstruction,
    y: f64,
}

impl<'a> Cursor<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            done: Vec::new(),
            page: PageInstruction::default(),
            y: config.page.top(),
        }
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        log::debug!(
            "page {} full after {} runs",
            self.done.len() + 1,
            page.runs.len()
        );
        self.done.push(page);
        self.y = self.config.page.top();
    }

    fn place_block(&mut self, block: &Block) {
        let style = BlockStyle::for_block(block, self.config);
        let hang = style.prefix_width();
        let width = self.config.page.content_width() - style.indent - hang;
        let text = metrics::normalize(block.text());

        let mut lines = metrics::wrap(&text, width, style.font_size);
        if lines.is_empty() {
            // Keep empty headings and items visible as a blank line
            lines.push(String::new());
        }

        // No gap at the top of a page
        if !self.page.is_blank() {
            self.y -= self.config.layout.block_gap;
        }

        let x = self.config.page.margin_left + style.indent;
        for (i, line) in lines.into_iter().enumerate() {
            match (&style.prefix, i) {
                (Some(prefix), 0) => self.place_line(x, style.font_size, format!("{prefix}{line}")),
                (Some(_), _) => self.place_line(x + hang, style.font_size, line),
                (None, _) => self.place_line(x, style.font_size, line),
            }
        }
    }

    fn place_line(&mut self, x: f64, font_size: f64, content: String) {
        let line_height = self.config.font.line_height(font_size);
        if !self.page.is_blank() && self.y - line_height < self.config.page.bottom() {
            self.new_page();
        }
        self.page.runs.push(TextRun {
            x,
            y: self.y,
            font_size,
            content,
        });
        self.y -= line_height;
    }

    fn finish(mut self) -> Vec<PageInstruction> {
        self.done.push(self.page);
        log::debug!("laid out {} pages", self.done.len());
        self.done
    }
}
