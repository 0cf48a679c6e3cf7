//! Integration tests for structural extraction.

use docchunk::detect::HeuristicKind;
use docchunk::error::Warning;
use docchunk::model::{Block, DEFAULT_SECTION_TITLE};
use docchunk::parser::{
    parse_markdown, ExtractOptions, SourceItem, SpanGroup, SpanSource, StructureParser,
    StyledSpan,
};

fn pdf_source() -> SpanSource {
    let mut source = SpanSource::new("Thesis").with_source_type("pdf");
    source.push_group(vec![StyledSpan::new("Chapter 1").size(18.0).bold()]);
    source.push_group(vec![StyledSpan::new("Background").size(15.0).bold()]);
    source.push_group(vec![
        StyledSpan::new("The ").size(12.0),
        StyledSpan::new("ﬁrst").size(12.0).italic(),
        StyledSpan::new(" result.").size(12.0),
    ]);
    source
}

#[test]
fn test_metric_scenario() {
    let extraction = StructureParser::default().parse(&pdf_source());
    let doc = extraction.document;

    assert!(extraction.warnings.is_empty());
    assert_eq!(doc.section_count(), 1);

    let section = &doc.sections[0];
    assert_eq!(section.title, "Chapter 1");
    assert_eq!(section.level, 1);
    assert_eq!(section.blocks.len(), 2);
    assert_eq!(section.blocks[0].heading_level(), Some(2));
    assert_eq!(section.blocks[0].plain_text(), "Background");

    match &section.blocks[1] {
        Block::Paragraph { runs, .. } => {
            assert_eq!(runs.len(), 3);
            // ligatures are folded for metric sources
            assert_eq!(runs[1].text, "first");
            assert!(runs[1].italic);
            assert_eq!(runs[0].font_name.as_deref(), Some("Times New Roman"));
            assert_eq!(runs[0].font_size, Some(12.0));
        }
        other => panic!("expected paragraph, got {:?}", other),
    }
}

#[test]
fn test_style_scenario() {
    let mut source = SpanSource::new("Report").with_source_type("docx");
    for (style, text) in [
        ("Heading 1", "Introduction"),
        ("Heading 2", "Scope"),
        ("List Bullet", "alpha"),
        ("List Bullet 2", "beta"),
        ("List Number", "one"),
        ("Quote", "Said someone"),
        ("Normal", "Closing words."),
    ] {
        source.push(SourceItem::Group(SpanGroup::styled(style, text)));
    }

    let doc = StructureParser::default().parse(&source).document;
    assert_eq!(doc.section_count(), 1);
    let blocks = &doc.sections[0].blocks;
    let kinds: Vec<&str> = blocks.iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec!["heading", "list", "list", "quote", "paragraph"]);

    match &blocks[1] {
        Block::List { ordered, items } => {
            assert!(!ordered);
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].indent_level, 0);
            assert_eq!(items[1].indent_level, 1);
        }
        other => panic!("expected list, got {:?}", other),
    }
    assert!(matches!(&blocks[2], Block::List { ordered: true, items } if items.len() == 1));
}

#[test]
fn test_content_before_first_heading() {
    let doc = StructureParser::default()
        .parse(&parse_markdown("Preface text.\n\n# Chapter\n\nBody.\n"))
        .document;

    assert_eq!(doc.section_count(), 2);
    assert_eq!(doc.sections[0].title, DEFAULT_SECTION_TITLE);
    assert_eq!(doc.sections[0].blocks.len(), 1);
    assert_eq!(doc.sections[1].title, "Chapter");
}

#[test]
fn test_empty_source_warns() {
    let extraction = StructureParser::default().parse(&SpanSource::new("Nothing"));
    assert!(extraction.document.is_empty());
    assert_eq!(extraction.warnings, vec![Warning::EmptyDocument]);
}

#[test]
fn test_forced_heuristic_overrides_detection() {
    // style names are present, but the metric table ignores them
    let mut source = SpanSource::new("T");
    source.push_group(vec![StyledSpan::new("Big").size(20.0).bold().style("Normal")]);
    source.push_group(vec![StyledSpan::new("text").size(11.0).style("Heading 1")]);

    let parser = StructureParser::new(ExtractOptions::new().with_heuristic(HeuristicKind::Metric));
    let doc = parser.parse(&source).document;
    assert_eq!(doc.sections[0].title, "Big");
    assert_eq!(doc.sections[0].blocks[0].kind(), "paragraph");
}

#[test]
fn test_page_breaks_and_image_pages() {
    let mut source = SpanSource::new("T").with_source_type("pdf");
    source.push_group(vec![StyledSpan::new("Part").size(18.0).bold()]);
    source.push(SourceItem::PageBreak);
    source.push(SourceItem::Image {
        path: Some("fig1.png".into()),
        caption: Some("Figure 1".into()),
        bbox: None,
    });

    let doc = StructureParser::default().parse(&source).document;
    let blocks = &doc.sections[0].blocks;
    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        Block::Image(info) => {
            assert_eq!(info.metadata.page, Some(1));
            assert_eq!(info.caption.as_deref(), Some("Figure 1"));
        }
        other => panic!("expected image, got {:?}", other),
    }

    let parser = StructureParser::new(ExtractOptions::new().with_page_breaks(true));
    let doc = parser.parse(&source).document;
    assert_eq!(doc.sections[0].blocks[0], Block::PageBreak);
}

#[test]
fn test_parse_span_dump_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chapter.json");
    std::fs::write(
        &path,
        r#"{
            "source_type": "pdf",
            "items": [
                {"type": "group", "spans": [{"text": "Methods", "font_size": 18, "bold": true}]},
                {"type": "group", "spans": [{"text": "We measured.", "font_size": 12}]},
                {"type": "table", "rows": [["k", "v"], ["a", "1"]]}
            ]
        }"#,
    )
    .unwrap();

    let extraction = StructureParser::default().parse_file(&path).unwrap();
    let doc = extraction.document;
    assert_eq!(doc.title, "chapter");
    assert_eq!(doc.source_type.as_deref(), Some("pdf"));
    assert_eq!(doc.sections[0].title, "Methods");
    match &doc.sections[0].blocks[1] {
        Block::Table { rows } => {
            assert!(rows[0].is_header);
            assert_eq!(rows[1].plain_text(), "a | 1");
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn test_malformed_span_dump_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"items\": [").unwrap();

    let extraction = StructureParser::default().parse_file(&path).unwrap();
    assert_eq!(extraction.document.title, "broken");
    assert!(extraction.document.is_empty());
    assert!(matches!(extraction.warnings[0], Warning::MalformedInput(_)));
    assert!(extraction.warnings.contains(&Warning::EmptyDocument));
}

#[test]
fn test_missing_file_is_error() {
    let result = StructureParser::default().parse_file("no/such/file.json");
    assert!(matches!(result, Err(docchunk::Error::NotFound(_))));
}

#[test]
fn test_span_source_json_round_trip() {
    let source = pdf_source();
    let json = source.to_json().unwrap();
    assert_eq!(SpanSource::from_json(&json).unwrap(), source);
}
