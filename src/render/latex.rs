//! LaTeX target.
//!
//! Whole documents use the `report` class with a title page and table of
//! contents. Chunks are bare bodies meant to be pulled into `main.tex` with
//! `\input`.

use super::escape::{escape_with, EscapeTable, LATEX_ESCAPES};
use super::markup::{ChunkFile, MarkupRenderer, MarkupTarget, RenderedItem, RenderedTable};
use super::options::RenderOptions;
use crate::error::Result;
use crate::model::{Alignment, Document, ImageInfo};

/// File name of the multi-file master document.
pub const MAIN_FILE_NAME: &str = "main.tex";

/// LaTeX output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latex;

/// LaTeX renderer.
pub type LatexRenderer = MarkupRenderer<Latex>;

/// Convert a document to a complete LaTeX source.
pub fn to_latex(doc: &Document, options: &RenderOptions) -> Result<String> {
    use super::Renderer;
    MarkupRenderer::new(Latex).render_document(doc, options)
}

impl Latex {
    fn preamble(&self, title: &str, author: &str, options: &RenderOptions) -> String {
        let mut out = String::new();
        out.push_str("\\documentclass[12pt,a4paper]{report}\n\n");
        out.push_str("\\usepackage[utf8]{inputenc}\n");
        out.push_str("\\usepackage[T1]{fontenc}\n");
        out.push_str("\\usepackage{times}\n");
        out.push_str("\\usepackage[a4paper,top=20mm,bottom=20mm,left=30mm,right=15mm]{geometry}\n");
        out.push_str("\\usepackage{graphicx}\n");
        out.push_str("\\usepackage[normalem]{ulem}\n");
        out.push_str("\\usepackage{hyperref}\n\n");
        out.push_str(&format!("\\title{{{}}}\n", self.escape_text(title, options)));
        out.push_str(&format!("\\author{{{}}}\n", self.escape_text(author, options)));
        out.push_str(&format!("\\date{{{}}}\n\n", options.date_or_today()));
        out.push_str("\\begin{document}\n\n");
        out.push_str("\\maketitle\n");
        out.push_str("\\tableofcontents\n\n");
        out
    }

    fn escape_text(&self, text: &str, options: &RenderOptions) -> String {
        if options.escape_special_chars {
            escape_with(text, LATEX_ESCAPES)
        } else {
            text.to_string()
        }
    }
}

impl MarkupTarget for Latex {
    fn name(&self) -> &'static str {
        "tex"
    }

    fn extension(&self) -> &'static str {
        "tex"
    }

    fn escapes(&self) -> EscapeTable {
        LATEX_ESCAPES
    }

    fn bold(&self, text: &str) -> String {
        format!("\\textbf{{{}}}", text)
    }

    fn italic(&self, text: &str) -> String {
        format!("\\textit{{{}}}", text)
    }

    fn bold_italic(&self, text: &str) -> String {
        format!("\\textbf{{\\textit{{{}}}}}", text)
    }

    fn code(&self, raw: &str) -> String {
        format!("\\texttt{{{}}}", escape_with(raw, LATEX_ESCAPES))
    }

    fn strike(&self, text: &str) -> String {
        format!("\\sout{{{}}}", text)
    }

    fn underline(&self, text: &str) -> String {
        format!("\\uline{{{}}}", text)
    }

    fn section_title(&self, inline: &str, raw_title: &str, level: u8) -> String {
        let label = self.label(raw_title);
        match level {
            1 => format!("\\chapter{{{}}}\n\\label{{ch:{}}}\n\n", inline, label),
            2 => format!("\\section{{{}}}\n\\label{{sec:{}}}\n\n", inline, label),
            3 => format!("\\subsection{{{}}}\n\\label{{sec:{}}}\n\n", inline, label),
            _ => format!("\\subsubsection{{{}}}\n\\label{{sec:{}}}\n\n", inline, label),
        }
    }

    fn heading(&self, inline: &str, _raw_title: &str, level: u8) -> String {
        match level {
            2 => format!("\\section{{{}}}\n\n", inline),
            3 => format!("\\subsection{{{}}}\n\n", inline),
            4 => format!("\\subsubsection{{{}}}\n\n", inline),
            _ => format!("\\paragraph{{{}}}\n\n", inline),
        }
    }

    fn paragraph(&self, inline: &str, alignment: Alignment) -> String {
        match alignment {
            Alignment::Center => format!("\\begin{{center}}\n{}\n\\end{{center}}\n\n", inline),
            Alignment::Right => {
                format!("\\begin{{flushright}}\n{}\n\\end{{flushright}}\n\n", inline)
            }
            _ => format!("{}\n\n", inline),
        }
    }

    fn list(&self, ordered: bool, items: &[RenderedItem], _options: &RenderOptions) -> String {
        let env = if ordered { "enumerate" } else { "itemize" };
        let mut out = String::new();
        let mut depth = 0usize;
        for item in items {
            let target = item.indent as usize + 1;
            while depth < target {
                out.push_str(&"  ".repeat(depth));
                out.push_str(&format!("\\begin{{{}}}\n", env));
                depth += 1;
            }
            while depth > target {
                depth -= 1;
                out.push_str(&"  ".repeat(depth));
                out.push_str(&format!("\\end{{{}}}\n", env));
            }
            out.push_str(&"  ".repeat(depth - 1));
            out.push_str(&format!("\\item {}\n", item.text));
        }
        while depth > 0 {
            depth -= 1;
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!("\\end{{{}}}\n", env));
        }
        out.push('\n');
        out
    }

    fn table(&self, table: &RenderedTable) -> String {
        let spec = format!("|{}", "l|".repeat(table.columns));
        let mut out = format!("\\begin{{tabular}}{{{}}}\n\\hline\n", spec);
        for row in &table.rows {
            out.push_str(&row.join(" & "));
            out.push_str(" \\\\\n\\hline\n");
        }
        out.push_str("\\end{tabular}\n\n");
        out
    }

    fn quote(&self, inline: &str) -> String {
        format!("\\begin{{quote}}\n{}\n\\end{{quote}}\n\n", inline)
    }

    fn image(&self, image: &ImageInfo, caption: Option<&str>, options: &RenderOptions) -> String {
        let Some(path) = &image.path else {
            return format!("% image: {}\n\n", caption.unwrap_or(""));
        };
        let mut out = String::from("\\begin{figure}[h]\n\\centering\n");
        out.push_str(&format!(
            "\\includegraphics[width=0.8\\textwidth]{{{}{}}}\n",
            options.image_path_prefix, path
        ));
        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            out.push_str(&format!("\\caption{{{}}}\n", caption));
        }
        out.push_str("\\end{figure}\n\n");
        out
    }

    fn code_block(&self, _lang: Option<&str>, raw: &str) -> String {
        format!("\\begin{{verbatim}}\n{}\n\\end{{verbatim}}\n\n", raw)
    }

    fn page_break(&self) -> String {
        "\\newpage\n\n".to_string()
    }

    fn document(&self, doc: &Document, sections: &[String], options: &RenderOptions) -> String {
        let mut out = self.preamble(&doc.title, &doc.author, options);
        for section in sections {
            out.push_str(section.trim_end());
            out.push_str("\n\n");
        }
        out.push_str("\\end{document}\n");
        out
    }

    fn chunk(&self, _chunk: &crate::model::Section, body: String, _options: &RenderOptions) -> String {
        format!("{}\n", body.trim_end())
    }

    fn index(&self, title: &str, files: &[ChunkFile], options: &RenderOptions) -> String {
        let mut out = self.preamble(title, "", options);
        for file in files {
            out.push_str(&format!("\\input{{{}}}\n", file.stem()));
        }
        out.push_str("\n\\end{document}\n");
        out
    }

    fn index_file_name(&self) -> String {
        MAIN_FILE_NAME.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, ListItem, Run, Section, TableRow};
    use crate::render::Renderer;

    fn options() -> RenderOptions {
        RenderOptions::new().with_date("18/10/2026")
    }

    #[test]
    fn test_preamble() {
        let mut doc = Document::new("Report & Notes", "Jo");
        doc.add_section(Section::new("Intro", 1));
        let tex = to_latex(&doc, &options()).unwrap();

        assert!(tex.starts_with("\\documentclass[12pt,a4paper]{report}"));
        assert!(tex.contains("\\title{Report \\& Notes}"));
        assert!(tex.contains("\\author{Jo}"));
        assert!(tex.contains("\\date{18/10/2026}"));
        assert!(tex.contains("\\maketitle\n\\tableofcontents"));
        assert!(tex.contains("\\chapter{Intro}\n\\label{ch:intro}"));
        assert!(tex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_section_labels_by_level() {
        let latex = Latex;
        assert_eq!(
            latex.section_title("Chương 1", "Chương 1", 1),
            "\\chapter{Chương 1}\n\\label{ch:chuong_1}\n\n"
        );
        assert!(latex
            .section_title("Scope", "Scope", 2)
            .starts_with("\\section{Scope}\n\\label{sec:scope}"));
    }

    #[test]
    fn test_heading_levels() {
        let latex = Latex;
        assert_eq!(latex.heading("A", "A", 2), "\\section{A}\n\n");
        assert_eq!(latex.heading("A", "A", 3), "\\subsection{A}\n\n");
        assert_eq!(latex.heading("A", "A", 4), "\\subsubsection{A}\n\n");
        assert_eq!(latex.heading("A", "A", 5), "\\paragraph{A}\n\n");
    }

    #[test]
    fn test_inline_and_escaping() {
        let mut section = Section::new("S", 2);
        section.add_block(Block::paragraph_runs(vec![
            Run::new("50% of ***x*** and "),
            Run::italic("y_1"),
            Run::new(" ~~old~~ `a{b}`"),
        ]));
        let tex = MarkupRenderer::new(Latex)
            .render_chunk(&section, &options())
            .unwrap();
        assert!(tex.contains(
            "50\\% of \\textbf{\\textit{x}} and \\textit{y\\_1} \\sout{old} \\texttt{a\\{b\\}}"
        ));
    }

    #[test]
    fn test_nested_list_environments() {
        let mut section = Section::new("S", 2);
        section.add_block(Block::List {
            ordered: false,
            items: vec![
                ListItem::new(vec![Run::new("a")], 0),
                ListItem::new(vec![Run::new("b")], 1),
                ListItem::new(vec![Run::new("c")], 0),
            ],
        });
        let tex = MarkupRenderer::new(Latex)
            .render_chunk(&section, &options())
            .unwrap();
        assert!(tex.contains(
            "\\begin{itemize}\n\\item a\n  \\begin{itemize}\n  \\item b\n  \\end{itemize}\n\\item c\n\\end{itemize}\n"
        ));
    }

    #[test]
    fn test_table_and_quote() {
        let mut section = Section::new("S", 2);
        section.add_block(Block::Table {
            rows: vec![TableRow::from_strings(["A", "B"]), TableRow::from_strings(["1", "2"])],
        });
        section.add_block(Block::quote("quoted"));
        let tex = MarkupRenderer::new(Latex)
            .render_chunk(&section, &options())
            .unwrap();
        assert!(tex.contains(
            "\\begin{tabular}{|l|l|}\n\\hline\nA & B \\\\\n\\hline\n1 & 2 \\\\\n\\hline\n\\end{tabular}"
        ));
        assert!(tex.contains("\\begin{quote}\nquoted\n\\end{quote}"));
    }

    #[test]
    fn test_image_and_page_break() {
        let mut section = Section::new("S", 2);
        section.add_block(Block::Image(ImageInfo::with_path("fig.png").caption("A figure")));
        section.add_block(Block::PageBreak);
        let tex = MarkupRenderer::new(Latex)
            .render_chunk(&section, &options().with_image_prefix("img/"))
            .unwrap();
        assert!(tex.contains("\\includegraphics[width=0.8\\textwidth]{img/fig.png}"));
        assert!(tex.contains("\\caption{A figure}"));
        assert!(tex.contains("\\newpage"));
    }

    #[test]
    fn test_main_file_inputs_chunks() {
        let files = vec![
            ChunkFile::new("chunk_001_Intro.tex", "Intro"),
            ChunkFile::new("chunk_002_Body.tex", "Body"),
        ];
        let renderer = MarkupRenderer::new(Latex);
        let main = renderer.render_index("Doc", &files, &options()).unwrap();
        assert_eq!(renderer.index_file_name(), "main.tex");
        assert!(main.contains("\\input{chunk_001_Intro}\n\\input{chunk_002_Body}\n"));
        assert!(main.contains("\\title{Doc}"));
    }
}
