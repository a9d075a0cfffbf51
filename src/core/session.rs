//! Session state
//!
//! All mutable UI/session state in one explicit value owned by the
//! driving loop: the document catalog, per-document chapter cache,
//! comparison selection, transcript, citation bindings and the two
//! surfaces' lifecycles. Nothing here is ambient or shared; handlers
//! interleave only at await points, so mutations between them are
//! atomic with respect to each other.

use crate::api::types::DocumentRef;
use crate::chat::{CitationIndex, Panel, QueryLifecycle, Transcript};
use crate::library::{ChapterCatalog, ComparisonSelectionSet};

/// One page-session's worth of state
pub struct SessionState {
    pub documents: Vec<DocumentRef>,
    pub chapters: ChapterCatalog,
    pub selection: ComparisonSelectionSet,
    pub transcript: Transcript,
    pub citations: CitationIndex,
    pub query: QueryLifecycle,
    pub panel: Panel,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            chapters: ChapterCatalog::new(),
            selection: ComparisonSelectionSet::new(),
            transcript: Transcript::new(),
            citations: CitationIndex::empty(),
            query: QueryLifecycle::new(),
            panel: Panel::new(),
        }
    }

    /// Replace the document catalog wholesale (after list, upload or
    /// delete)
    pub fn set_documents(&mut self, documents: Vec<DocumentRef>) {
        self.documents = documents;
    }

    /// Look up a document by its full server-assigned filename
    pub fn document(&self, filename: &str) -> Option<&DocumentRef> {
        self.documents.iter().find(|d| d.filename == filename)
    }

    /// Install fresh citation bindings, invalidating the previous ones
    pub fn bind_citations(&mut self, citations: CitationIndex) {
        self.citations = citations;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_citations_invalidate_old_bindings() {
        let mut session = SessionState::new();
        session.bind_citations(CitationIndex::new(
            1,
            vec![crate::api::types::SourceChunk {
                book: "X".to_string(),
                page: "5".to_string(),
            }],
        ));
        assert!(session.citations.resolve_marker(1).is_some());

        // A new answer with no chunks leaves nothing to dereference
        session.bind_citations(CitationIndex::new(2, vec![]));
        assert_eq!(session.citations.generation(), 2);
        assert!(session.citations.resolve_marker(1).is_none());
    }

    #[test]
    fn test_document_lookup_by_identity() {
        let mut session = SessionState::new();
        session.set_documents(vec![DocumentRef {
            filename: "quijote_9f31.pdf".to_string(),
            size: 1024,
        }]);

        assert!(session.document("quijote_9f31.pdf").is_some());
        // Lookup is by the full identity, not the display label
        assert!(session.document("quijote").is_none());
    }
}
