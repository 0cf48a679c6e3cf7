//! Plain text target.
//!
//! Styling is dropped; structure survives as banners, indentation and
//! bullets so the output reads well in a terminal or a text file.

use super::escape::{EscapeTable, NO_ESCAPES};
use super::markup::{ChunkFile, MarkupRenderer, MarkupTarget, RenderedItem, RenderedTable};
use super::options::RenderOptions;
use crate::error::Result;
use crate::model::{Alignment, Document, ImageInfo, Section};

/// Width of the chapter banner rule.
const BANNER_WIDTH: usize = 60;

/// Plain text output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

/// Plain text renderer.
pub type TextRenderer = MarkupRenderer<Text>;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    use super::Renderer;
    MarkupRenderer::new(Text).render_document(doc, options)
}

impl MarkupTarget for Text {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn escapes(&self) -> EscapeTable {
        NO_ESCAPES
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn italic(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold_italic(&self, text: &str) -> String {
        text.to_string()
    }

    fn code(&self, raw: &str) -> String {
        format!("\"{}\"", raw)
    }

    fn strike(&self, text: &str) -> String {
        text.to_string()
    }

    fn section_title(&self, inline: &str, _raw_title: &str, level: u8) -> String {
        let title = inline.trim();
        match level {
            1 => {
                let rule = "=".repeat(BANNER_WIDTH);
                format!("\n{}\n{}\n{}\n\n", rule, title.to_uppercase(), rule)
            }
            2 => format!(
                "\n{}\n{}\n\n",
                title.to_uppercase(),
                "-".repeat(title.chars().count())
            ),
            3 => format!("\n    {}\n\n", title),
            _ => format!("        {}\n", title),
        }
    }

    fn heading(&self, inline: &str, raw_title: &str, level: u8) -> String {
        self.section_title(inline, raw_title, level)
    }

    fn paragraph(&self, inline: &str, _alignment: Alignment) -> String {
        format!("{}\n\n", inline)
    }

    fn list(&self, ordered: bool, items: &[RenderedItem], _options: &RenderOptions) -> String {
        let mut out = String::new();
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
                out.push_str("• ");
            }
            out.push_str(&item.text);
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn table(&self, table: &RenderedTable) -> String {
        let mut widths = vec![0usize; table.columns];
        for row in &table.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for (i, row) in table.rows.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect();
            out.push_str("    ");
            out.push_str(&cells.join("  |  "));
            out.push('\n');

            if i == 0 {
                let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
                out.push_str("    ");
                out.push_str(&rules.join("-+-"));
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }

    fn quote(&self, inline: &str) -> String {
        let indented: Vec<String> = inline.lines().map(|l| format!("    {}", l)).collect();
        format!("{}\n\n", indented.join("\n"))
    }

    fn image(&self, _image: &ImageInfo, caption: Option<&str>, _options: &RenderOptions) -> String {
        format!("[Image: {}]\n\n", caption.unwrap_or(""))
    }

    fn code_block(&self, _lang: Option<&str>, raw: &str) -> String {
        let mut out = String::from("    [Code]\n");
        for line in raw.trim_matches('\n').lines() {
            out.push_str("        ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("    [/Code]\n\n");
        out
    }

    fn page_break(&self) -> String {
        "\x0c\n".to_string()
    }

    fn document(&self, _doc: &Document, sections: &[String], _options: &RenderOptions) -> String {
        clean_whitespace(&sections.join("\n"))
    }

    fn chunk(&self, _chunk: &Section, body: String, _options: &RenderOptions) -> String {
        clean_whitespace(&body)
    }

    fn index(&self, title: &str, files: &[ChunkFile], _options: &RenderOptions) -> String {
        let mut out = format!("{}\n{}\n\n", title, "=".repeat(title.chars().count()));
        for (i, file) in files.iter().enumerate() {
            out.push_str(&format!("{}. {} ({})\n", i + 1, file.title, file.file_name));
        }
        out
    }
}

/// Strip trailing spaces and collapse runs of blank lines to one.
fn clean_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim_end_matches(|c: char| c == ' ' || c == '\t');
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    let joined = lines.join("\n");
    let trimmed = joined.trim_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Run, TableRow};
    use crate::render::Renderer;

    fn render(section: &Section) -> String {
        MarkupRenderer::new(Text)
            .render_chunk(section, &RenderOptions::default())
            .unwrap()
    }

    #[test]
    fn test_chapter_banner() {
        let section = Section::new("Overview", 1);
        let rule = "=".repeat(60);
        assert_eq!(render(&section), format!("{}\nOVERVIEW\n{}\n", rule, rule));
    }

    #[test]
    fn test_heading_levels() {
        let mut section = Section::new("Scope", 2);
        section.add_block(Block::heading("Detail", 3));
        section.add_block(Block::heading("Deep", 4));
        section.add_block(Block::paragraph("Body"));
        let text = render(&section);
        assert_eq!(text, "SCOPE\n-----\n\n    Detail\n\n        Deep\nBody\n");
    }

    #[test]
    fn test_styles_removed() {
        let mut section = Section::new("S", 3);
        section.add_block(Block::paragraph_runs(vec![
            Run::bold("Bold"),
            Run::new(" and *it* with `x` and ~~y~~ & <z>"),
        ]));
        assert!(render(&section).contains("Bold and it with \"x\" and y & <z>\n"));
    }

    #[test]
    fn test_bullets_and_code() {
        let mut section = Section::new("S", 3);
        section.add_block(Block::list(["a", "b"], false));
        section.add_block(Block::code(None, "fn main() {}\nlet x = 1;"));
        let text = render(&section);
        assert!(text.contains("• a\n• b\n"));
        assert!(text.contains("    [Code]\n        fn main() {}\n        let x = 1;\n    [/Code]\n"));
    }

    #[test]
    fn test_code_keeps_first_line_indent() {
        let mut section = Section::new("S", 3);
        section.add_block(Block::code(None, "\n    indented();\nflush();\n"));
        let text = render(&section);
        assert!(text.contains("    [Code]\n            indented();\n        flush();\n    [/Code]\n"));
    }

    #[test]
    fn test_table_alignment() {
        let mut section = Section::new("S", 3);
        section.add_block(Block::Table {
            rows: vec![
                TableRow::from_strings(["Name", "Qty"]),
                TableRow::from_strings(["Apple", "3"]),
            ],
        });
        let text = render(&section);
        assert!(text.contains("    Name   |  Qty\n    ------+----\n    Apple  |  3\n"));
    }

    #[test]
    fn test_image_caption() {
        let mut section = Section::new("S", 3);
        section.add_block(Block::Image(ImageInfo::default().caption("Chart")));
        assert!(render(&section).contains("[Image: Chart]"));
    }

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("a  \n\n\n\nb\t\n"), "a\n\nb\n");
        assert_eq!(clean_whitespace("\n\n"), "");
    }
}
