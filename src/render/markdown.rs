//! Markdown target.

use super::escape::{EscapeTable, MARKDOWN_ESCAPES};
use super::markup::{ChunkFile, MarkupRenderer, MarkupTarget, RenderedItem, RenderedTable};
use super::options::RenderOptions;
use crate::error::Result;
use crate::model::{Alignment, Document, ImageInfo};

/// Markdown output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

/// Markdown renderer.
pub type MarkdownRenderer = MarkupRenderer<Markdown>;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    use super::Renderer;
    MarkupRenderer::new(Markdown).render_document(doc, options)
}

impl MarkupTarget for Markdown {
    fn name(&self) -> &'static str {
        "md"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn escapes(&self) -> EscapeTable {
        MARKDOWN_ESCAPES
    }

    fn bold(&self, text: &str) -> String {
        format!("**{}**", text)
    }

    fn italic(&self, text: &str) -> String {
        format!("*{}*", text)
    }

    fn bold_italic(&self, text: &str) -> String {
        format!("***{}***", text)
    }

    fn code(&self, raw: &str) -> String {
        format!("`{}`", raw)
    }

    fn strike(&self, text: &str) -> String {
        format!("~~{}~~", text)
    }

    fn underline(&self, text: &str) -> String {
        format!("<u>{}</u>", text)
    }

    fn section_title(&self, inline: &str, _raw_title: &str, level: u8) -> String {
        format!("{} {}\n\n", "#".repeat(level as usize), inline)
    }

    fn heading(&self, inline: &str, _raw_title: &str, level: u8) -> String {
        format!("{} {}\n\n", "#".repeat(level as usize), inline)
    }

    fn paragraph(&self, inline: &str, _alignment: Alignment) -> String {
        format!("{}\n\n", inline)
    }

    fn list(&self, ordered: bool, items: &[RenderedItem], options: &RenderOptions) -> String {
        let mut out = String::new();
        // one counter per nesting depth
        let mut counters: Vec<u32> = Vec::new();
        for item in items {
            let depth = item.indent as usize;
            counters.truncate(depth + 1);
            counters.resize(depth + 1, 0);
            counters[depth] += 1;

            out.push_str(&"  ".repeat(depth));
            if ordered {
                out.push_str(&format!("{}. ", counters[depth]));
            } else {
                out.push(options.list_marker);
                out.push(' ');
            }
            out.push_str(&item.text);
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn table(&self, table: &RenderedTable) -> String {
        let mut out = String::new();
        for (i, row) in table.rows.iter().enumerate() {
            out.push('|');
            for cell in row {
                out.push_str(&format!(" {} |", cell.replace('\n', " ").trim()));
            }
            out.push('\n');

            if i == 0 {
                out.push('|');
                out.push_str(&" --- |".repeat(table.columns));
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }

    fn quote(&self, inline: &str) -> String {
        let quoted: Vec<String> = inline.lines().map(|l| format!("> {}", l)).collect();
        format!("{}\n\n", quoted.join("\n"))
    }

    fn image(&self, image: &ImageInfo, caption: Option<&str>, options: &RenderOptions) -> String {
        let caption = caption.unwrap_or("");
        match &image.path {
            Some(path) => format!("![{}]({}{})\n\n", caption, options.image_path_prefix, path),
            None => format!("<!-- image: {} -->\n\n", caption),
        }
    }

    fn code_block(&self, lang: Option<&str>, raw: &str) -> String {
        format!("```{}\n{}\n```\n\n", lang.unwrap_or(""), raw)
    }

    fn page_break(&self) -> String {
        "---\n\n".to_string()
    }

    fn document(&self, _doc: &Document, sections: &[String], _options: &RenderOptions) -> String {
        let joined: Vec<&str> = sections.iter().map(|s| s.trim_end()).collect();
        finish(joined.join("\n\n---\n\n"))
    }

    fn chunk(&self, _chunk: &crate::model::Section, body: String, _options: &RenderOptions) -> String {
        finish(body)
    }

    fn index(&self, title: &str, files: &[ChunkFile], _options: &RenderOptions) -> String {
        let mut out = format!("# {}\n\n", title);
        for (i, file) in files.iter().enumerate() {
            out.push_str(&format!("{}. [{}]({})\n", i + 1, file.title, file.file_name));
        }
        out
    }
}

fn finish(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, ListItem, Run, Section, TableCell, TableRow};
    use crate::render::Renderer;

    fn render(section: &Section) -> String {
        MarkupRenderer::new(Markdown)
            .render_chunk(section, &RenderOptions::default())
            .unwrap()
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let mut section = Section::new("Chapter 1", 1);
        section.add_block(Block::heading("Background", 2));
        section.add_block(Block::paragraph("Hello, world!"));

        let md = render(&section);
        assert_eq!(md, "# Chapter 1\n\n## Background\n\nHello, world!\n");
    }

    #[test]
    fn test_inline_styles_and_escaping() {
        let mut section = Section::new("S", 1);
        section.add_block(Block::paragraph_runs(vec![
            Run::new("plain *star "),
            Run::bold("strong"),
            Run::new(" and ***both*** and `a_b`"),
        ]));

        let md = render(&section);
        assert!(md.contains("plain \\*star **strong** and ***both*** and `a_b`"));
    }

    #[test]
    fn test_inline_parsing_disabled_escapes_markers() {
        let mut section = Section::new("S", 1);
        section.add_block(Block::paragraph("**not bold**"));
        let md = MarkupRenderer::new(Markdown)
            .render_chunk(&section, &RenderOptions::new().with_inline_parsing(false))
            .unwrap();
        assert!(md.contains("\\*\\*not bold\\*\\*"));
    }

    #[test]
    fn test_nested_ordered_list() {
        let mut section = Section::new("S", 1);
        section.add_block(Block::List {
            ordered: true,
            items: vec![
                ListItem::new(vec![Run::new("one")], 0),
                ListItem::new(vec![Run::new("sub")], 1),
                ListItem::new(vec![Run::new("two")], 0),
            ],
        });
        let md = render(&section);
        assert!(md.contains("1. one\n  1. sub\n2. two\n"));
    }

    #[test]
    fn test_table_padded() {
        let mut section = Section::new("S", 1);
        section.add_block(Block::Table {
            rows: vec![
                TableRow::header(vec![TableCell::text("A"), TableCell::text("B")]),
                TableRow::from_strings(["1"]),
            ],
        });
        let md = render(&section);
        assert!(md.contains("| A | B |\n| --- | --- |\n| 1 |  |\n"));
    }

    #[test]
    fn test_document_joins_sections() {
        let mut doc = Document::new("T", "");
        doc.add_section(Section::new("One", 1));
        doc.add_section(Section::new("Two", 1));
        let md = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(md, "# One\n\n---\n\n# Two\n");
    }

    #[test]
    fn test_index_lists_links() {
        let files = vec![
            ChunkFile::new("chunk_001_A.md", "A"),
            ChunkFile::new("chunk_002_B.md", "B"),
        ];
        let index = Markdown.index("Doc", &files, &RenderOptions::default());
        assert_eq!(index, "# Doc\n\n1. [A](chunk_001_A.md)\n2. [B](chunk_002_B.md)\n");
    }
}
