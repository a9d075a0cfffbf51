//! Comparison selection
//!
//! The ordered, deduplicated set of `(book, chapter)` pairs queued for a
//! multi-chapter comparison. Insertion order drives both display order
//! and the order sent to the backend. Removal is by freshly rendered
//! index; the driving loop re-renders after every mutation.

use crate::api::types::ComparisonItem;
use crate::core::error::{Error, Result};

/// Minimum number of selected chapters for a comparison
pub const MIN_COMPARE_ITEMS: usize = 2;

/// Ordered, deduplicated chapter selection awaiting comparison
#[derive(Debug, Default)]
pub struct ComparisonSelectionSet {
    items: Vec<ComparisonItem>,
}

impl ComparisonSelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ComparisonItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the compare trigger should be enabled
    pub fn can_compare(&self) -> bool {
        self.items.len() >= MIN_COMPARE_ITEMS
    }

    /// Append a pair. Blank fields and duplicates are validation errors
    /// and leave the selection unchanged.
    pub fn add(&mut self, book: impl Into<String>, chapter: impl Into<String>) -> Result<()> {
        let book = book.into();
        let chapter = chapter.into();

        if book.trim().is_empty() || chapter.trim().is_empty() {
            return Err(Error::validation("Select both a book and a chapter"));
        }

        if self
            .items
            .iter()
            .any(|item| item.book == book && item.chapter == chapter)
        {
            return Err(Error::validation("That chapter is already selected"));
        }

        self.items.push(ComparisonItem { book, chapter });
        Ok(())
    }

    /// Remove by display index. Indices shift after every removal, so
    /// callers must use the freshly rendered position.
    pub fn remove_at(&mut self, index: usize) -> Result<ComparisonItem> {
        if index >= self.items.len() {
            return Err(Error::validation(format!(
                "No selected chapter at position {}",
                index + 1
            )));
        }
        Ok(self.items.remove(index))
    }

    /// The ordered list to send, or a validation error when fewer than
    /// two chapters are selected (no network call is made)
    pub fn sources(&self) -> Result<&[ComparisonItem]> {
        if !self.can_compare() {
            return Err(Error::validation(
                "At least 2 chapters are needed for a comparison",
            ));
        }
        Ok(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut set = ComparisonSelectionSet::new();
        set.add("a.pdf", "1").unwrap();
        set.add("b.pdf", "2").unwrap();
        set.add("a.pdf", "2").unwrap();

        let chapters: Vec<_> = set
            .items()
            .iter()
            .map(|i| (i.book.as_str(), i.chapter.as_str()))
            .collect();
        assert_eq!(chapters, vec![("a.pdf", "1"), ("b.pdf", "2"), ("a.pdf", "2")]);
    }

    #[test]
    fn test_duplicate_add_leaves_set_unchanged() {
        let mut set = ComparisonSelectionSet::new();
        set.add("a.pdf", "1").unwrap();

        let err = set.add("a.pdf", "1").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(set.len(), 1);

        // Same book, different chapter is fine
        set.add("a.pdf", "2").unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut set = ComparisonSelectionSet::new();
        assert!(set.add("", "1").unwrap_err().is_validation());
        assert!(set.add("a.pdf", "  ").unwrap_err().is_validation());
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_at_excludes_ith_insertion() {
        let mut set = ComparisonSelectionSet::new();
        set.add("a.pdf", "1").unwrap();
        set.add("b.pdf", "2").unwrap();
        set.add("c.pdf", "3").unwrap();

        let removed = set.remove_at(1).unwrap();
        assert_eq!(removed.book, "b.pdf");

        let books: Vec<_> = set.items().iter().map(|i| i.book.as_str()).collect();
        assert_eq!(books, vec!["a.pdf", "c.pdf"]);

        // Indices are recomputed after removal
        assert!(set.remove_at(2).unwrap_err().is_validation());
    }

    #[test]
    fn test_compare_gate_at_two_items() {
        let mut set = ComparisonSelectionSet::new();
        assert!(!set.can_compare());
        assert!(set.sources().unwrap_err().is_validation());

        set.add("a.pdf", "1").unwrap();
        assert!(!set.can_compare());

        set.add("b.pdf", "1").unwrap();
        assert!(set.can_compare());
        assert_eq!(set.sources().unwrap().len(), 2);

        // Removing back below the threshold disables the trigger
        set.remove_at(0).unwrap();
        assert!(!set.can_compare());
    }

    #[test]
    fn test_removing_everything_empties_the_set() {
        let mut set = ComparisonSelectionSet::new();
        set.add("a.pdf", "1").unwrap();
        set.add("b.pdf", "2").unwrap();
        set.remove_at(0).unwrap();
        set.remove_at(0).unwrap();
        assert!(set.is_empty());
    }
}
