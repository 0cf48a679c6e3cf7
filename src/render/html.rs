//! HTML target.

use super::escape::{escape_with, EscapeTable, HTML_ESCAPES};
use super::markup::{ChunkFile, MarkupRenderer, MarkupTarget, RenderedItem, RenderedTable};
use super::options::RenderOptions;
use crate::error::Result;
use crate::model::{Alignment, Document, ImageInfo, Section};

/// HTML output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

/// HTML renderer.
pub type HtmlRenderer = MarkupRenderer<Html>;

/// Convert a document to a standalone HTML page.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    use super::Renderer;
    MarkupRenderer::new(Html).render_document(doc, options)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_with(title, HTML_ESCAPES),
        body.trim_end()
    )
}

/// Percent-encode a relative link target, leaving path separators alone.
fn encode_href(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Page title for a whole document; untitled documents use the first section.
fn document_title(doc: &Document) -> &str {
    if !doc.title.trim().is_empty() {
        return &doc.title;
    }
    doc.sections
        .iter()
        .map(|s| s.title.as_str())
        .find(|t| !t.trim().is_empty())
        .unwrap_or("")
}

impl MarkupTarget for Html {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn escapes(&self) -> EscapeTable {
        HTML_ESCAPES
    }

    fn bold(&self, text: &str) -> String {
        format!("<strong>{}</strong>", text)
    }

    fn italic(&self, text: &str) -> String {
        format!("<em>{}</em>", text)
    }

    fn bold_italic(&self, text: &str) -> String {
        format!("<strong><em>{}</em></strong>", text)
    }

    fn code(&self, raw: &str) -> String {
        format!("<code>{}</code>", escape_with(raw, HTML_ESCAPES))
    }

    fn strike(&self, text: &str) -> String {
        format!("<del>{}</del>", text)
    }

    fn underline(&self, text: &str) -> String {
        format!("<u>{}</u>", text)
    }

    fn section_title(&self, inline: &str, raw_title: &str, level: u8) -> String {
        format!(
            "<h{level} id=\"{}\">{}</h{level}>\n",
            self.label(raw_title),
            inline,
            level = level
        )
    }

    fn heading(&self, inline: &str, raw_title: &str, level: u8) -> String {
        self.section_title(inline, raw_title, level)
    }

    fn paragraph(&self, inline: &str, alignment: Alignment) -> String {
        match alignment {
            Alignment::Left => format!("<p>{}</p>\n", inline),
            Alignment::Center => format!("<p style=\"text-align: center\">{}</p>\n", inline),
            Alignment::Right => format!("<p style=\"text-align: right\">{}</p>\n", inline),
            Alignment::Justify => format!("<p style=\"text-align: justify\">{}</p>\n", inline),
        }
    }

    fn list(&self, ordered: bool, items: &[RenderedItem], _options: &RenderOptions) -> String {
        let tag = if ordered { "ol" } else { "ul" };
        let mut out = String::new();
        let mut depth = 0usize;
        for (i, item) in items.iter().enumerate() {
            let target = item.indent as usize + 1;
            if depth >= target && i > 0 {
                out.push_str("</li>\n");
            }
            while depth > target {
                out.push_str(&format!("</{}>\n</li>\n", tag));
                depth -= 1;
            }
            while depth < target {
                if depth > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("<{}>\n", tag));
                depth += 1;
            }
            out.push_str(&format!("<li>{}", item.text));
        }
        if depth > 0 {
            out.push_str("</li>\n");
        }
        while depth > 0 {
            out.push_str(&format!("</{}>\n", tag));
            depth -= 1;
            if depth > 0 {
                out.push_str("</li>\n");
            }
        }
        out
    }

    fn table(&self, table: &RenderedTable) -> String {
        let mut out = String::from("<table>\n");
        let mut body = table.rows.as_slice();
        if table.has_header {
            if let Some((header, rest)) = body.split_first() {
                out.push_str("<thead>\n<tr>");
                for cell in header {
                    out.push_str(&format!("<th>{}</th>", cell));
                }
                out.push_str("</tr>\n</thead>\n");
                body = rest;
            }
        }
        out.push_str("<tbody>\n");
        for row in body {
            out.push_str("<tr>");
            for cell in row {
                out.push_str(&format!("<td>{}</td>", cell));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
        out
    }

    fn quote(&self, inline: &str) -> String {
        format!("<blockquote>{}</blockquote>\n", inline)
    }

    fn image(&self, image: &ImageInfo, caption: Option<&str>, options: &RenderOptions) -> String {
        let caption = caption.unwrap_or("");
        let Some(path) = &image.path else {
            return format!("<!-- image: {} -->\n", caption);
        };
        let src = escape_with(&format!("{}{}", options.image_path_prefix, path), HTML_ESCAPES);
        let mut out = format!("<figure>\n<img src=\"{}\" alt=\"{}\">\n", src, caption);
        if !caption.is_empty() {
            out.push_str(&format!("<figcaption>{}</figcaption>\n", caption));
        }
        out.push_str("</figure>\n");
        out
    }

    fn code_block(&self, lang: Option<&str>, raw: &str) -> String {
        let code = escape_with(raw, HTML_ESCAPES);
        match lang {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                escape_with(lang, HTML_ESCAPES),
                code
            ),
            None => format!("<pre><code>{}</code></pre>\n", code),
        }
    }

    fn page_break(&self) -> String {
        "<hr class=\"page-break\">\n".to_string()
    }

    fn document(&self, doc: &Document, sections: &[String], _options: &RenderOptions) -> String {
        let body: Vec<String> = sections
            .iter()
            .map(|s| format!("<section>\n{}</section>", s))
            .collect();
        page(document_title(doc), &body.join("\n"))
    }

    fn chunk(&self, chunk: &Section, body: String, _options: &RenderOptions) -> String {
        page(&chunk.title, &body)
    }

    fn index(&self, title: &str, files: &[ChunkFile], _options: &RenderOptions) -> String {
        let title = match files.first() {
            Some(first) if title.trim().is_empty() => first.title.as_str(),
            _ => title,
        };
        let mut body = format!("<h1>{}</h1>\n<ol>\n", escape_with(title, HTML_ESCAPES));
        for file in files {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                encode_href(&file.file_name),
                escape_with(&file.title, HTML_ESCAPES)
            ));
        }
        body.push_str("</ol>");
        page(title, &body)
    }
}
