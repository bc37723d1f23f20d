//! Parser boundary: Solidity source text to syntax tree.
//!
//! Parsing is delegated to tree-sitter with the Solidity grammar. The rest
//! of the crate depends on nothing about the tree beyond type-tagged,
//! position-carrying nodes reachable by a depth-first enter/exit walk, so
//! the grammar could be swapped without touching the matching engine.

use tree_sitter::{Node, Parser as TsParser, Tree};

use crate::error::Error;

/// Raw input to a `check` call: source text plus a name used only for
/// cache keying and diagnostics.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub filename: String,
    pub code: String,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            code: code.into(),
        }
    }
}

/// A parsed source file.
///
/// Immutable once produced; shared read-only by every checker run against
/// it. The source text is kept alongside the tree for node text extraction
/// and offset computation. Callers must not mutate the text after a
/// context has started indexing it.
#[derive(Debug)]
pub struct ParsedFile {
    pub filename: String,
    pub code: String,
    pub tree: Tree,
}

impl ParsedFile {
    /// Root node of the parsed tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text for a node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.code.as_bytes()).unwrap_or("")
    }
}

/// Parse Solidity source into a tree.
///
/// Fails outright on malformed source: tree-sitter recovers by inserting
/// ERROR nodes, which we treat as a parse failure rather than attempting
/// partial analysis.
pub fn parse(source: &SourceFile) -> Result<ParsedFile, Error> {
    let mut parser = TsParser::new();
    let language: tree_sitter::Language = tree_sitter_solidity::LANGUAGE.into();
    parser.set_language(&language)?;

    let tree = parser
        .parse(source.code.as_bytes(), None)
        .ok_or_else(|| Error::Parse {
            filename: source.filename.clone(),
            reason: "parser produced no tree".to_string(),
        })?;

    if tree.root_node().has_error() {
        return Err(Error::Parse {
            filename: source.filename.clone(),
            reason: "syntax error".to_string(),
        });
    }

    Ok(ParsedFile {
        filename: source.filename.clone(),
        code: source.code.clone(),
        tree,
    })
}
