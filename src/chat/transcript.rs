//! Conversation transcript
//!
//! Ordered entries of one chat session. A submission appends the user's
//! text plus a pending placeholder; settling replaces the placeholder
//! with either the rendered answer or a distinguishable error entry.

use crate::chat::format::Paragraph;
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub enum Entry {
    /// The user's literal input
    User { text: String },
    /// Awaiting-response placeholder
    Pending,
    /// A rendered answer; `generation` ties it to its citation bindings
    Assistant {
        paragraphs: Vec<Paragraph>,
        generation: u64,
    },
    /// A settled failure, rendered in place of an answer
    Error { message: String },
    /// Out-of-band note (e.g. a processed upload)
    Note { text: String },
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub at: DateTime<Local>,
    pub entry: Entry,
}

/// The session transcript
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.entry, Entry::Pending))
    }

    /// Append the user's text and the awaiting-response placeholder
    pub fn begin_exchange(&mut self, text: impl Into<String>) {
        self.push(Entry::User { text: text.into() });
        self.push(Entry::Pending);
    }

    /// Replace the placeholder with a rendered answer
    pub fn settle_answer(&mut self, paragraphs: Vec<Paragraph>, generation: u64) {
        self.remove_pending();
        self.push(Entry::Assistant {
            paragraphs,
            generation,
        });
    }

    /// Replace the placeholder with an error entry
    pub fn settle_error(&mut self, message: impl Into<String>) {
        self.remove_pending();
        self.push(Entry::Error {
            message: message.into(),
        });
    }

    /// Append an out-of-band note
    pub fn push_note(&mut self, text: impl Into<String>) {
        self.push(Entry::Note { text: text.into() });
    }

    fn push(&mut self, entry: Entry) {
        self.entries.push(TranscriptEntry {
            at: Local::now(),
            entry,
        });
    }

    fn remove_pending(&mut self) {
        if let Some(idx) = self
            .entries
            .iter()
            .rposition(|e| matches!(e.entry, Entry::Pending))
        {
            self.entries.remove(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::format::format_text;

    #[test]
    fn test_exchange_appends_user_and_placeholder() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("¿Quién es el protagonista?");

        assert_eq!(transcript.len(), 2);
        assert!(transcript.has_pending());
        assert!(matches!(transcript.entries()[0].entry, Entry::User { .. }));
    }

    #[test]
    fn test_answer_replaces_placeholder() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("pregunta");
        transcript.settle_answer(format_text("respuesta"), 1);

        assert_eq!(transcript.len(), 2);
        assert!(!transcript.has_pending());
        assert!(matches!(
            transcript.entries()[1].entry,
            Entry::Assistant { .. }
        ));
    }

    #[test]
    fn test_error_replaces_placeholder() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("pregunta");
        transcript.settle_error("backend unavailable");

        assert_eq!(transcript.len(), 2);
        assert!(!transcript.has_pending());
        match &transcript.entries()[1].entry {
            Entry::Error { message } => assert_eq!(message, "backend unavailable"),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_settle_without_placeholder_still_appends() {
        let mut transcript = Transcript::new();
        transcript.settle_error("late settle");
        assert_eq!(transcript.len(), 1);
    }
}
