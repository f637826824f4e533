//! End-to-end checks on the structure of generated PDF files.

use quadra::{Block, Config, PageInstruction, TextRun};

/// Objects recovered by walking the xref table
struct Parsed<'a> {
    bytes: &'a [u8],
    offsets: Vec<usize>,
    root: usize,
    size: usize,
}

fn rposition(haystack: &[u8], needle: &str) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|w| w == needle.as_bytes())
}

fn parse_pdf(bytes: &[u8]) -> Parsed<'_> {
    let startxref_at = rposition(bytes, "startxref\n").expect("startxref");
    let tail = std::str::from_utf8(&bytes[startxref_at..]).unwrap();
    let xref_start: usize = tail.lines().nth(1).unwrap().parse().unwrap();
    assert!(bytes[xref_start..].starts_with(b"xref\n"));

    let section = std::str::from_utf8(&bytes[xref_start..]).unwrap();
    let mut lines = section.lines().skip(1);
    let header = lines.next().unwrap();
    let count: usize = header.split(' ').nth(1).unwrap().parse().unwrap();

    let records: Vec<&str> = lines.by_ref().take(count).collect();
    assert_eq!(records[0], "0000000000 65535 f ");
    let offsets = records[1..]
        .iter()
        .map(|r| {
            assert!(r.ends_with(" 00000 n "), "{r:?}");
            r[..10].parse().unwrap()
        })
        .collect();

    let trailer_line = lines.find(|l| l.starts_with("<<")).unwrap();
    let field = |name: &str| -> usize {
        let after = trailer_line.split(name).nth(1).unwrap();
        after.split_whitespace().next().unwrap().parse().unwrap()
    };

    Parsed {
        bytes,
        offsets,
        root: field("/Root"),
        size: field("/Size"),
    }
}

impl Parsed<'_> {
    /// Text of object `id` between `id 0 obj` and `endobj`.
    fn object(&self, id: usize) -> String {
        let start = self.offsets[id - 1];
        let rest = &self.bytes[start..];
        let end = rest
            .windows(6)
            .position(|w| w == b"endobj")
            .expect("endobj");
        String::from_utf8_lossy(&rest[..end]).into_owned()
    }

    fn objects_of_type(&self, ty: &str) -> usize {
        (1..=self.offsets.len())
            .filter(|id| self.object(*id).contains(ty))
            .count()
    }
}

fn check_structure(pdf: &Parsed) {
    assert_eq!(pdf.size, pdf.offsets.len() + 1);
    for (i, offset) in pdf.offsets.iter().enumerate() {
        let expected = format!("{} 0 obj\n", i + 1);
        assert!(
            pdf.bytes[*offset..].starts_with(expected.as_bytes()),
            "object {} not at {}",
            i + 1,
            offset
        );
    }
    assert!(pdf.object(pdf.root).contains("/Type /Catalog"));
}

#[test]
fn scenario_document_renders_valid_pdf() {
    let doc = quadra::parse("# Title\n\nBody text.\n\n- item one\n- item two");
    assert_eq!(
        doc.blocks,
        vec![
            Block::heading(1, "Title"),
            Block::paragraph("Body text."),
            Block::list_item("item one"),
            Block::list_item("item two"),
        ]
    );

    let bytes = quadra::render(&doc);
    let pdf = parse_pdf(&bytes);
    check_structure(&pdf);
    assert_eq!(pdf.objects_of_type("/Type /Page "), 1);
}

#[test]
fn empty_input_is_single_blank_page() {
    let doc = quadra::parse("");
    assert!(doc.is_empty());

    let pages = quadra::layout(&doc);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].runs.is_empty());

    let bytes = quadra::render(&doc);
    let pdf = parse_pdf(&bytes);
    check_structure(&pdf);
    assert!(pdf.object(2).contains("/Count 1"));
    assert!(pdf.object(3).contains("/Length 0"));
}

#[test]
fn long_document_spans_pages() {
    let markdown: String = (0..40)
        .map(|i| format!("## Section {i}\n\nSome body text for section {i} that is long enough to wrap onto a second line at twelve points on a letter page.\n\n- point a\n- point b\n\n"))
        .collect();
    let doc = quadra::parse(&markdown);
    let pages = quadra::layout(&doc);
    assert!(pages.len() >= 2);

    let bytes = quadra::render(&doc);
    let pdf = parse_pdf(&bytes);
    check_structure(&pdf);

    // One content stream and one page object per page, plus catalog, tree, font
    assert_eq!(pdf.offsets.len(), 3 + 2 * pages.len());
    assert_eq!(pdf.objects_of_type("/Type /Page "), pages.len());
    assert_eq!(pdf.objects_of_type("stream\n"), pages.len());
    for i in 0..pages.len() {
        let page = pdf.object(4 + 2 * i);
        assert!(page.contains(&format!("/Contents {} 0 R", 3 + 2 * i)));
    }
}

#[test]
fn runs_stay_within_margins() {
    let markdown: String = (0..200).map(|i| format!("Line {i} of filler\n\n")).collect();
    let config = Config::default();
    let pages = quadra::layout_with_config(&quadra::parse(&markdown), &config);
    for page in &pages {
        for run in &page.runs {
            assert!(run.y <= config.page.top());
            assert!(run.y >= config.page.bottom());
        }
    }
}

#[test]
fn serializer_accepts_synthetic_pages() {
    let pages = vec![
        PageInstruction {
            runs: vec![TextRun {
                x: 100.0,
                y: 500.0,
                font_size: 10.0,
                content: r"price (USD) \ unit".to_string(),
            }],
        },
        PageInstruction::default(),
    ];
    let bytes = quadra::serialize(&pages);
    let pdf = parse_pdf(&bytes);
    check_structure(&pdf);
    assert!(pdf.object(3).contains(r"(price \(USD\) \\ unit) Tj"));
    assert!(pdf.object(3).contains("1 0 0 1 100 500 Tm"));
    assert!(pdf.object(5).contains("/Length 0"));
}

#[test]
fn markdown_to_pdf_matches_render() {
    let markdown = "# Heading\n\nParagraph (with parens).";
    assert_eq!(
        quadra::markdown_to_pdf(markdown),
        quadra::render(&quadra::parse(markdown))
    );
}

#[test]
fn typographic_punctuation_survives_to_content_stream() {
    let bytes =
        quadra::markdown_to_pdf("It\u{2019}s \u{201c}quoted\u{201d} \u{2014} 5\u{20ac}, 20\u{b0}C");
    let pdf = parse_pdf(&bytes);
    check_structure(&pdf);
    assert!(pdf.object(3).contains(r"(It\222s \223quoted\224 \227 5\200, 20\260C) Tj"));
}

#[test]
fn default_entry_points_match_bundled_config() {
    let doc = quadra::parse("# Title\n\nBody text.\n\n- item");
    let bundled = Config::compiled_default();
    assert_eq!(quadra::layout(&doc), quadra::layout_with_config(&doc, &bundled));
    assert_eq!(quadra::render(&doc), quadra::render_with_config(&doc, &bundled));
}
