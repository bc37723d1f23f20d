//! Line/column to flat-offset conversion with a bounded per-file cache.

use std::num::NonZeroUsize;
use std::sync::{Arc, RwLock};

use lru::LruCache;

/// Default number of files whose line indexes are retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Converts 1-based (line, column) positions to flat byte offsets.
///
/// Built once per source text; all lookups afterwards are O(1).
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
    /// Total length of the indexed text, in bytes.
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Flat byte offset of a 1-based (line, column) position.
    ///
    /// Returns `None` when the position falls outside the indexed text.
    /// A column one past the end of a line is accepted, so exclusive end
    /// positions resolve without special casing.
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        if line == 0 || column == 0 {
            return None;
        }
        let start = *self.line_starts.get(line - 1)?;
        let offset = start + (column - 1);
        if offset > self.len {
            return None;
        }
        Some(offset)
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Bounded least-recently-used cache of line indexes, keyed by filename.
///
/// When full, inserting a new filename evicts the least recently used
/// entry; a later lookup for the evicted file rebuilds its index
/// transparently. This bounds memory when a long-lived engine analyzes
/// many files.
pub struct IndexerCache {
    inner: RwLock<LruCache<String, Arc<LineIndex>>>,
}

impl IndexerCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Fetch the index for a file, building it from `text` on a miss.
    pub fn get_or_build(&self, filename: &str, text: &str) -> Arc<LineIndex> {
        let mut cache = self.inner.write().unwrap();
        if let Some(index) = cache.get(filename) {
            return Arc::clone(index);
        }
        let index = Arc::new(LineIndex::new(text));
        cache.put(filename.to_string(), Arc::clone(&index));
        index
    }

    /// Number of indexes currently cached.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
