use crate::block::{Block, Document};

/// Parse Quadra Markdown text into a document. Never fails.
pub fn parse(markdown: &str) -> Document {
    let mut state = ParseState::default();

    for line in split_lines(markdown) {
        process_line(line, &mut state);
    }
    state.flush_paragraph();

    log::debug!("parsed {} blocks", state.document.len());
    state.document
}

/// Split on `\n`, `\r\n` and lone `\r`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split('\r'))
}

#[derive(Default)]
struct ParseState {
    document: Document,
    // Trimmed lines of the paragraph being accumulated
    paragraph: Vec<String>,
}

impl ParseState {
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.paragraph).join(" ");
        self.document.push(Block::paragraph(text));
    }
}

/// How a single source line contributes to the document
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Heading { level: usize, text: &'a str },
    ListItem { text: &'a str },
    Blank,
    Text(&'a str),
}

fn process_line(line: &str, state: &mut ParseState) {
    let kind = classify(line);
    log::trace!("{:?}", kind);

    match kind {
        LineKind::Heading { level, text } => {
            state.flush_paragraph();
            state.document.push(Block::heading(level, text));
        }
        LineKind::ListItem { text } => {
            state.flush_paragraph();
            state.document.push(Block::list_item(text));
        }
        LineKind::Blank => state.flush_paragraph(),
        LineKind::Text(text) => state.paragraph.push(text.to_string()),
    }
}

fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    let hashes = line.len() - line.trim_start_matches('#').len();
    if hashes > 0 {
        if let Some(text) = marker_rest(&line[hashes..]) {
            // Deeper runs clamp to level 6 in Block::heading
            return LineKind::Heading {
                level: hashes,
                text,
            };
        }
    }

    if line.starts_with(['-', '*']) {
        if let Some(text) = marker_rest(&line[1..]) {
            return LineKind::ListItem { text };
        }
    }

    LineKind::Text(line)
}

/// Text after a block marker, provided the marker is followed by whitespace
/// or ends the line.
fn marker_rest(rest: &str) -> Option<&str> {
    match rest.chars().next() {
        None => Some(""),
        Some(c) if c.is_whitespace() => Some(rest.trim()),
        Some(_) => None,
    }
}
