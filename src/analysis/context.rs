//! Per-analysis context shared by every checker run against one file.

use std::sync::Arc;

use tree_sitter::Node;

use crate::analysis::location::{IndexerCache, LineIndex, DEFAULT_CACHE_CAPACITY};
use crate::parser::ParsedFile;

/// Everything a checker needs to inspect one parsed file.
///
/// One context is created per `check` call and discarded after; it is not
/// reused across files. The parsed tree and source text are shared
/// read-only; the only mutable state is the line-index cache, which is
/// scoped to this context's lifetime.
pub struct AnalysisContext<'p> {
    parsed: &'p ParsedFile,
    indexers: IndexerCache,
}

impl<'p> AnalysisContext<'p> {
    pub fn new(parsed: &'p ParsedFile) -> Self {
        Self::with_cache_capacity(parsed, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(parsed: &'p ParsedFile, capacity: usize) -> Self {
        Self {
            parsed,
            indexers: IndexerCache::new(capacity),
        }
    }

    pub fn filename(&self) -> &'p str {
        &self.parsed.filename
    }

    pub fn code(&self) -> &'p str {
        &self.parsed.code
    }

    pub fn root(&self) -> Node<'p> {
        self.parsed.tree.root_node()
    }

    /// Source text for a node.
    pub fn text(&self, node: Node) -> &'p str {
        node.utf8_text(self.parsed.code.as_bytes()).unwrap_or("")
    }

    /// Line index for this context's file, built on first use and cached.
    pub fn line_index(&self) -> Arc<LineIndex> {
        self.indexers
            .get_or_build(&self.parsed.filename, &self.parsed.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, SourceFile};

    #[test]
    fn line_index_is_cached_per_context() {
        let source = SourceFile::new("a.sol", "contract C {}\n");
        let parsed = parse(&source).unwrap();
        let ctx = AnalysisContext::new(&parsed);

        let first = ctx.line_index();
        let second = ctx.line_index();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn text_reads_node_source() {
        let source = SourceFile::new("a.sol", "contract C {}");
        let parsed = parse(&source).unwrap();
        let ctx = AnalysisContext::new(&parsed);
        assert_eq!(ctx.text(ctx.root()), "contract C {}");
    }
}
