//! Markdown line reader.
//!
//! Turns Markdown (or plain text) into a [`SpanSource`] whose groups carry
//! Word-style paragraph names, so it runs through the style-name table like
//! a `.docx` adapter's output would. Only the block constructs the document
//! model knows are recognized; this is not a CommonMark parser.

use super::spans::{SourceItem, SpanGroup, SpanSource, StyledSpan};
use crate::inline::{tokenize, FormatKind};

/// Deepest heading level mapped to a style; deeper headings clamp to it.
const MAX_STYLE_HEADING: usize = 4;

/// Parse Markdown text into a span source with source type `"markdown"`.
pub fn parse_markdown(text: &str) -> SpanSource {
    let mut source = SpanSource::default().with_source_type("markdown");
    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if let Some(lang) = trimmed.strip_prefix("```") {
            let lang = lang.trim();
            let mut code = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                code.push(lines[i]);
                i += 1;
            }
            // skip closing fence
            i += 1;
            source.push(SourceItem::Code {
                lang: (!lang.is_empty()).then(|| lang.to_string()),
                text: code.join("\n"),
            });
            continue;
        }

        if trimmed.starts_with('|') {
            let mut rows = Vec::new();
            while i < lines.len() && lines[i].trim().starts_with('|') {
                let row = lines[i].trim();
                if !is_separator_row(row) {
                    rows.push(split_table_row(row));
                }
                i += 1;
            }
            if !rows.is_empty() {
                source.push(SourceItem::Table { rows });
            }
            continue;
        }

        source.push(classify_line(line));
        i += 1;
    }

    source
}

fn classify_line(line: &str) -> SourceItem {
    let trimmed = line.trim();

    if is_thematic_break(trimmed) {
        return SourceItem::PageBreak;
    }

    if let Some((level, rest)) = heading(trimmed) {
        let style = format!("Heading {}", level.min(MAX_STYLE_HEADING));
        return group(&style, rest);
    }

    if let Some((caption, path)) = image(trimmed) {
        return SourceItem::Image {
            path: (!path.is_empty()).then(|| path.to_string()),
            caption: (!caption.is_empty()).then(|| caption.to_string()),
            bbox: None,
        };
    }

    let depth = indent_depth(line);
    if let Some(rest) = bullet(trimmed) {
        return group(&list_style("List Bullet", depth), rest);
    }
    if let Some(rest) = numbered(trimmed) {
        return group(&list_style("List Number", depth), rest);
    }

    if let Some(rest) = trimmed.strip_prefix('>') {
        return group("Quote", rest.trim());
    }

    group("Normal", trimmed)
}

fn group(style: &str, text: &str) -> SourceItem {
    let spans = tokenize(text)
        .into_iter()
        .map(|span| {
            let (text, bold, italic) = match span.kind {
                FormatKind::Plain => (span.text, false, false),
                FormatKind::Bold => (span.text, true, false),
                FormatKind::Italic => (span.text, false, true),
                FormatKind::BoldItalic => (span.text, true, true),
                FormatKind::Code => (format!("`{}`", span.text), false, false),
                FormatKind::Strikethrough => (format!("~~{}~~", span.text), false, false),
            };
            let mut styled = StyledSpan::new(text).style(style);
            styled.bold = bold;
            styled.italic = italic;
            styled
        })
        .collect();
    SourceItem::Group(SpanGroup::new(spans))
}

/// `"List Bullet"` at depth 0, `"List Bullet 2"` at depth 1.
fn list_style(base: &str, depth: usize) -> String {
    if depth == 0 {
        base.to_string()
    } else {
        format!("{} {}", base, depth + 1)
    }
}

fn indent_depth(line: &str) -> usize {
    let width: usize = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    width / 2
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim_end();
    Some((level, text))
}

fn image(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix("![")?.strip_suffix(')')?;
    let (caption, path) = inner.split_once("](")?;
    Some((caption.trim(), path.trim()))
}

fn bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

fn numbered(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

/// The text a reader sees on one Markdown line outside code fences and
/// tables: block markers removed, inline markers kept. `None` for thematic
/// breaks and blank lines.
pub(crate) fn line_content(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_thematic_break(trimmed) {
        return None;
    }
    let text = if let Some((_, rest)) = heading(trimmed) {
        rest
    } else if let Some((caption, _)) = image(trimmed) {
        caption
    } else if let Some(rest) = bullet(trimmed).or_else(|| numbered(trimmed)) {
        rest
    } else if let Some(rest) = trimmed.strip_prefix('>') {
        rest.trim()
    } else {
        trimmed
    };
    Some(text.to_string())
}

/// `---`, `***` or `___`, three or more, spaces allowed.
pub(crate) fn is_thematic_break(line: &str) -> bool {
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3
        && matches!(marks[0], '-' | '*' | '_')
        && marks.iter().all(|&c| c == marks[0])
}

/// A table row made only of pipes, dashes, colons and spaces.
pub(crate) fn is_separator_row(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Cell texts of a pipe table row, outer pipes removed.
pub(crate) fn split_table_row(line: &str) -> Vec<String> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}
