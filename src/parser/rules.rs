//! Heuristic classification tables.
//!
//! Each table is an ordered list of `(predicate, action)` rules; the first
//! rule whose predicate holds decides how a span group enters the document.
//! Both tables end in a catch-all paragraph rule.

use super::spans::SpanGroup;

/// What the extractor does with a span group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Close the current section and open a new level-1 section
    NewSection,
    /// Append a heading block at this level
    Heading(u8),
    /// Append a list item
    ListItem { ordered: bool, indent: u8 },
    /// Append a quote block
    Quote,
    /// Append a paragraph block
    Paragraph,
}

/// Font-size thresholds for the metric table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricThresholds {
    /// Minimum average size for a bold group to open a section
    pub section_min_size: f32,

    /// Minimum average size for a bold group to become a heading
    pub heading_min_size: f32,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self {
            section_min_size: 16.0,
            heading_min_size: 14.0,
        }
    }
}

/// Features of a span group that rules look at.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFeatures {
    /// Average font size over spans with a size
    pub avg_size: Option<f32>,

    /// Any span bold
    pub bold: bool,

    /// Lowercased style name, empty when absent
    pub style: String,
}

impl GroupFeatures {
    /// Compute features for a group.
    pub fn of(group: &SpanGroup) -> Self {
        Self {
            avg_size: group.average_font_size(),
            bold: group.any_bold(),
            style: group.style_name().unwrap_or_default().to_lowercase(),
        }
    }

    fn size_at_least(&self, min: f32) -> bool {
        self.avg_size.is_some_and(|s| s >= min)
    }
}

/// One classification rule.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Rule name, used in debug logs
    pub name: &'static str,
    pub predicate: fn(&GroupFeatures, &MetricThresholds) -> bool,
    pub action: fn(&GroupFeatures) -> RuleAction,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Rules for sources that only carry font metrics (PDF text).
pub const METRIC_RULES: &[Rule] = &[
    Rule {
        name: "large-bold-section",
        predicate: |f, t| f.bold && f.size_at_least(t.section_min_size),
        action: |_| RuleAction::NewSection,
    },
    Rule {
        name: "medium-bold-heading",
        predicate: |f, t| f.bold && f.size_at_least(t.heading_min_size),
        action: |_| RuleAction::Heading(2),
    },
    Rule {
        name: "paragraph",
        predicate: |_, _| true,
        action: |_| RuleAction::Paragraph,
    },
];

/// Rules for sources with named paragraph styles (Word documents).
pub const STYLE_RULES: &[Rule] = &[
    Rule {
        name: "heading-1-or-title",
        predicate: |f, _| f.style.contains("heading 1") || f.style == "title",
        action: |_| RuleAction::NewSection,
    },
    Rule {
        name: "heading-2",
        predicate: |f, _| f.style.contains("heading 2"),
        action: |_| RuleAction::Heading(2),
    },
    Rule {
        name: "heading-3",
        predicate: |f, _| f.style.contains("heading 3"),
        action: |_| RuleAction::Heading(3),
    },
    Rule {
        name: "heading-4",
        predicate: |f, _| f.style.contains("heading 4"),
        action: |_| RuleAction::Heading(4),
    },
    Rule {
        name: "list",
        predicate: |f, _| f.style.contains("list"),
        action: |f| RuleAction::ListItem {
            ordered: is_ordered_style(&f.style),
            indent: style_indent(&f.style),
        },
    },
    Rule {
        name: "quote",
        predicate: |f, _| f.style.contains("quote"),
        action: |_| RuleAction::Quote,
    },
    Rule {
        name: "paragraph",
        predicate: |_, _| true,
        action: |_| RuleAction::Paragraph,
    },
];

/// Apply the first matching rule. Returns the rule name and its action.
pub fn classify(
    rules: &[Rule],
    features: &GroupFeatures,
    thresholds: &MetricThresholds,
) -> (&'static str, RuleAction) {
    rules
        .iter()
        .find(|rule| (rule.predicate)(features, thresholds))
        .map(|rule| (rule.name, (rule.action)(features)))
        .unwrap_or(("fallback", RuleAction::Paragraph))
}

/// A list style is ordered when it names a numbering scheme.
pub fn is_ordered_style(style: &str) -> bool {
    ["number", "decimal", "ordinal"]
        .iter()
        .any(|marker| style.contains(marker))
}

/// Nesting depth from a trailing style digit: `"list bullet 2"` is depth 1.
pub fn style_indent(style: &str) -> u8 {
    style
        .trim_end()
        .rsplit(' ')
        .next()
        .and_then(|last| last.parse::<u8>().ok())
        .map(|n| n.saturating_sub(1))
        .unwrap_or(0)
}
