//! Captured feature occurrences and their source locations.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::analysis::context::AnalysisContext;

/// A position in source text: 1-based line, 0-based byte column.
///
/// This is the convention the parser reports (0-based columns); the line
/// index expects 1-based columns, so conversions apply a +1 correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// A source span. `end` is exclusive: the span covers `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: LineColumn,
    pub end: LineColumn,
}

/// One captured occurrence of a feature.
///
/// All fields are optional: a node without a resolvable location yields a
/// site with every field absent (a documented degenerate case, not a
/// failure), and lexical matches carry only `literal` and `index`.
///
/// Invariant: when `location` is present, `index` is the flat byte offset
/// of `location.start` and `literal` is exactly the source substring the
/// span covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl FeatureSite {
    /// A site produced by a raw-text match: no structured location.
    pub fn lexical(literal: impl Into<String>, index: usize) -> Self {
        Self {
            literal: Some(literal.into()),
            location: None,
            index: Some(index),
        }
    }

    /// True when the site carries no information at all.
    pub fn is_unlocated(&self) -> bool {
        self.literal.is_none() && self.location.is_none() && self.index.is_none()
    }
}

/// Span of a tree node in the crate's line/column convention.
pub fn span_of(node: Node) -> SourceSpan {
    let start = node.start_position();
    let end = node.end_position();
    SourceSpan {
        start: LineColumn {
            line: start.row + 1,
            column: start.column,
        },
        end: LineColumn {
            line: end.row + 1,
            column: end.column,
        },
    }
}

/// Capture the site of a matched node.
///
/// Start and end offsets are resolved through the context's line index
/// (columns corrected from the parser's 0-based convention to the index's
/// 1-based one). When either endpoint cannot be resolved against the
/// indexed text, the all-empty site is returned.
pub fn capture_site(ctx: &AnalysisContext<'_>, node: Node<'_>) -> FeatureSite {
    let span = span_of(node);
    let index = ctx.line_index();

    let start = index.offset(span.start.line, span.start.column + 1);
    let end = index.offset(span.end.line, span.end.column + 1);

    let (Some(start), Some(end)) = (start, end) else {
        return FeatureSite::default();
    };
    let Some(literal) = ctx.code().get(start..end) else {
        return FeatureSite::default();
    };

    FeatureSite {
        literal: Some(literal.to_string()),
        location: Some(span),
        index: Some(start),
    }
}
