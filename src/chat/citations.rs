//! Citation bindings for one rendered answer
//!
//! Answers embed inline markers like `[1]`. Each marker resolves to one
//! evidence chunk returned alongside the answer. Bindings are only valid
//! for the answer they were built from; the generation tag ties an index
//! to its originating submission so a stale index is never dereferenced.

use crate::api::types::SourceChunk;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));

/// Maps citation markers of one answer to its evidence chunks.
///
/// Markers are 1-based display ordinals: `[1]` resolves to the first
/// chunk. Anything without a matching chunk resolves to `None`, which
/// callers treat as a silent no-op.
#[derive(Debug, Clone, Default)]
pub struct CitationIndex {
    generation: u64,
    chunks: Vec<SourceChunk>,
}

impl CitationIndex {
    /// Build bindings for the answer produced by `generation`
    pub fn new(generation: u64, chunks: Vec<SourceChunk>) -> Self {
        Self { generation, chunks }
    }

    /// An index with no bindings; every resolution is a no-op
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks in ordinal order
    pub fn chunks(&self) -> &[SourceChunk] {
        &self.chunks
    }

    /// Zero-based access, for rendering source listings
    pub fn get(&self, index: usize) -> Option<&SourceChunk> {
        self.chunks.get(index)
    }

    /// Resolve a 1-based inline marker. `0` and out-of-range markers
    /// have no corresponding chunk and yield `None`.
    pub fn resolve_marker(&self, marker: usize) -> Option<&SourceChunk> {
        marker.checked_sub(1).and_then(|i| self.chunks.get(i))
    }

    /// Scan answer text for inline markers, in order of appearance
    pub fn markers_in(text: &str) -> Vec<usize> {
        MARKER_RE
            .captures_iter(text)
            .filter_map(|c| c[1].parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(book: &str, page: &str) -> SourceChunk {
        SourceChunk {
            book: book.to_string(),
            page: page.to_string(),
        }
    }

    #[test]
    fn test_marker_resolves_to_chunk() {
        let index = CitationIndex::new(1, vec![chunk("X", "5")]);
        let source = index.resolve_marker(1).unwrap();
        assert_eq!(source.book, "X");
        assert_eq!(source.page, "5");
    }

    #[test]
    fn test_unmatched_marker_is_none() {
        let index = CitationIndex::new(1, vec![chunk("X", "5")]);
        assert!(index.resolve_marker(2).is_none());
        assert!(index.resolve_marker(0).is_none());
        assert!(CitationIndex::empty().resolve_marker(1).is_none());
    }

    #[test]
    fn test_marker_scan() {
        let markers = CitationIndex::markers_in("Primero [1], luego [3]. Sin [x] ni [].");
        assert_eq!(markers, vec![1, 3]);
    }

    #[test]
    fn test_generation_tag() {
        let index = CitationIndex::new(7, vec![]);
        assert_eq!(index.generation(), 7);
        assert!(index.is_empty());
    }
}
