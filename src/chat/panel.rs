//! Modal presentation surface for summaries and comparisons
//!
//! The panel opens synchronously with the submission, so its busy state
//! is visible before any data can arrive. Each open hands back a
//! generation ticket; a settle carrying a stale ticket is discarded, so
//! a late response can never overwrite newer content.

use crate::chat::format::{format_text, Paragraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Empty,
    Loading,
    Text(Vec<Paragraph>),
    Error(String),
}

/// One modal surface; at most one is active per session
#[derive(Debug)]
pub struct Panel {
    title: String,
    content: PanelContent,
    generation: u64,
    open: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            content: PanelContent::Empty,
            generation: 0,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Open the panel in its loading state and return the ticket the
    /// eventual settle must present
    pub fn open(&mut self, title: impl Into<String>) -> u64 {
        self.generation += 1;
        self.title = title.into();
        self.content = PanelContent::Loading;
        self.open = true;
        self.generation
    }

    /// Settle with formatted text. Returns false (and changes nothing)
    /// when the ticket is stale.
    pub fn settle_text(&mut self, ticket: u64, raw: &str) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.content = PanelContent::Text(format_text(raw));
        true
    }

    /// Settle with an error message, under the same staleness rule
    pub fn settle_error(&mut self, ticket: u64, message: impl Into<String>) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.content = PanelContent::Error(message.into());
        true
    }

    pub fn close(&mut self) {
        self.open = false;
        self.content = PanelContent::Empty;
        self.title.clear();
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_shows_loading_before_settle() {
        let mut panel = Panel::new();
        let ticket = panel.open("Resumen: quijote - Capítulo 3");

        assert!(panel.is_open());
        assert_eq!(*panel.content(), PanelContent::Loading);

        assert!(panel.settle_text(ticket, "El capítulo presenta..."));
        assert!(matches!(panel.content(), PanelContent::Text(_)));
    }

    #[test]
    fn test_stale_settle_is_discarded() {
        let mut panel = Panel::new();
        let first = panel.open("Resumen A");
        let second = panel.open("Resumen B");

        // The late response from the first request must not win
        assert!(!panel.settle_text(first, "viejo"));
        assert_eq!(*panel.content(), PanelContent::Loading);

        assert!(panel.settle_text(second, "nuevo"));
        match panel.content() {
            PanelContent::Text(paragraphs) => assert_eq!(paragraphs[0].lines, vec!["nuevo"]),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_stale_error_is_discarded_too() {
        let mut panel = Panel::new();
        let first = panel.open("Comparación");
        panel.open("Comparación");

        assert!(!panel.settle_error(first, "timeout"));
        assert_eq!(*panel.content(), PanelContent::Loading);
    }

    #[test]
    fn test_close_clears_content() {
        let mut panel = Panel::new();
        let ticket = panel.open("Resumen");
        panel.settle_text(ticket, "texto");
        panel.close();

        assert!(!panel.is_open());
        assert_eq!(*panel.content(), PanelContent::Empty);
    }
}
