//! User-visible notifications
//!
//! Fire-and-forget notices over a broadcast channel. Every component that
//! issues a request emits here on both success and failure; subscribers
//! (the terminal renderer) decide how to show them. Emitting never blocks
//! and never fails, even with no subscribers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notice severity, in escalating order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One user-visible message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Broadcasts notices to all subscribers
#[derive(Clone)]
pub struct NotificationService {
    sender: broadcast::Sender<Notice>,
}

impl NotificationService {
    /// Create a new service with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit a notice to all subscribers.
    /// Returns the number of receivers that saw it.
    pub fn emit(&self, severity: Severity, message: impl Into<String>) -> usize {
        let notice = Notice {
            severity,
            message: message.into(),
        };
        // send() errors when there are no receivers, which is fine
        self.sender.send(notice).unwrap_or(0)
    }

    /// Subscribe to notices
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    // ==========================================================================
    // CONVENIENCE METHODS
    // ==========================================================================

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(Severity::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(Severity::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message);
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notice_delivery() {
        let notices = NotificationService::new(16);
        let mut rx = notices.subscribe();

        notices.success("Documento eliminado");

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.message, "Documento eliminado");
    }

    #[test]
    fn test_emit_without_subscribers() {
        let notices = NotificationService::new(16);
        // Must not panic or block with nobody listening
        assert_eq!(notices.emit(Severity::Error, "lost"), 0);
    }
}
