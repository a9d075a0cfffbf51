//! Per-session chapter catalog
//!
//! Chapter lists are fetched lazily and memoized per document for the
//! lifetime of the session, keyed by the raw server-assigned filename.
//! Entries are never invalidated except by an explicit refetch, which
//! replaces them wholesale. An empty chapter list is a valid state
//! ("no chapters found"), distinct from a fetch failure.

use crate::api::types::ChapterRef;
use crate::api::BackendClient;
use crate::core::error::Result;
use std::collections::HashMap;

/// Session cache of chapter lists, keyed by document filename
#[derive(Debug, Default)]
pub struct ChapterCatalog {
    entries: HashMap<String, Vec<ChapterRef>>,
}

impl ChapterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached chapters for a document, if fetched this session
    pub fn get(&self, filename: &str) -> Option<&[ChapterRef]> {
        self.entries.get(filename).map(Vec::as_slice)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.entries.contains_key(filename)
    }

    /// Store a freshly fetched list, replacing any previous entry.
    /// With concurrent duplicate fetches, the last response wins.
    pub fn insert(&mut self, filename: impl Into<String>, chapters: Vec<ChapterRef>) {
        self.entries.insert(filename.into(), chapters);
    }

    /// Drop one entry so the next access refetches
    pub fn invalidate(&mut self, filename: &str) {
        self.entries.remove(filename);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Memoized fetch-through: returns the cached list or fetches,
    /// stores and returns it
    pub async fn ensure(
        &mut self,
        client: &BackendClient,
        filename: &str,
    ) -> Result<&[ChapterRef]> {
        if !self.entries.contains_key(filename) {
            tracing::debug!(book = filename, "Chapter cache miss, fetching");
            let chapters = client.list_chapters(filename).await?;
            self.entries.insert(filename.to_string(), chapters);
        }
        Ok(self
            .entries
            .get(filename)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Explicit refetch, replacing the entry wholesale
    pub async fn refresh(
        &mut self,
        client: &BackendClient,
        filename: &str,
    ) -> Result<&[ChapterRef]> {
        self.invalidate(filename);
        self.ensure(client, filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(number: &str, title: &str) -> ChapterRef {
        ChapterRef {
            chapter_number: number.to_string(),
            title: title.to_string(),
            page: "1".to_string(),
        }
    }

    #[test]
    fn test_memoized_per_document() {
        let mut catalog = ChapterCatalog::new();
        assert!(catalog.get("quijote_1.pdf").is_none());

        catalog.insert("quijote_1.pdf", vec![chapter("1", "En un lugar")]);
        assert_eq!(catalog.get("quijote_1.pdf").unwrap().len(), 1);
        assert!(!catalog.contains("otro_2.pdf"));
    }

    #[test]
    fn test_empty_list_is_a_valid_cached_state() {
        let mut catalog = ChapterCatalog::new();
        catalog.insert("sin_capitulos.pdf", vec![]);

        // Cached-but-empty is distinct from never-fetched
        assert!(catalog.contains("sin_capitulos.pdf"));
        assert!(catalog.get("sin_capitulos.pdf").unwrap().is_empty());
    }

    #[test]
    fn test_last_insert_wins() {
        let mut catalog = ChapterCatalog::new();
        catalog.insert("libro.pdf", vec![chapter("1", "viejo")]);
        catalog.insert("libro.pdf", vec![chapter("1", "nuevo"), chapter("2", "más")]);

        let chapters = catalog.get("libro.pdf").unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "nuevo");
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let mut catalog = ChapterCatalog::new();
        catalog.insert("libro.pdf", vec![chapter("1", "uno")]);
        catalog.invalidate("libro.pdf");
        assert!(!catalog.contains("libro.pdf"));
    }
}
