//! Upload life cycle
//!
//! `Idle → Validating → Transferring → Succeeded | Failed`. The declared
//! type is checked against the backend's allow-list before any network
//! traffic. Progress is a monotonically non-decreasing percentage and is
//! display-only. On success the server-returned filename, not the local
//! one, becomes the document's identity.

use crate::api::types::DocumentRef;
use crate::api::BackendClient;
use crate::core::error::{Error, Result};
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Formats the backend accepts
pub const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Declared MIME type for a local file, by extension
pub fn declared_mime(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "txt" | "text" => Some("text/plain"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

/// Monotone progress percentage; late or reordered observations can
/// never make the displayed value go backwards
#[derive(Debug, Default)]
pub struct ProgressGauge {
    percent: AtomicU8,
}

impl ProgressGauge {
    pub fn observe(&self, percent: u8) -> u8 {
        let clamped = percent.min(100);
        let previous = self.percent.fetch_max(clamped, Ordering::Relaxed);
        previous.max(clamped)
    }

    pub fn current(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    Transferring,
    Succeeded(DocumentRef),
    Failed(String),
}

/// Outcome of a settled upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Identity for all subsequent references: the server-assigned name
    pub document: DocumentRef,
    /// The backend's own status message, shown verbatim
    pub message: String,
}

/// State machine for one file transfer
pub struct UploadLifecycle {
    state: UploadState,
    progress: Arc<ProgressGauge>,
}

impl UploadLifecycle {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
            progress: Arc::new(ProgressGauge::default()),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress.current()
    }

    /// Check the declared type against the allow-list. A mismatch fails
    /// the transfer without contacting the backend.
    pub fn validate(&mut self, declared: Option<&str>) -> Result<&'static str> {
        self.state = UploadState::Validating;

        let accepted = declared.and_then(|mime| {
            ALLOWED_MIME_TYPES
                .iter()
                .find(|allowed| **allowed == mime)
                .copied()
        });

        match accepted {
            Some(mime) => Ok(mime),
            None => {
                let err =
                    Error::validation("Unsupported format. Only PDF, TXT, DOC and DOCX are allowed.");
                self.state = UploadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Validate and transfer one file, settling the machine on every
    /// exit path
    pub async fn run<F>(
        &mut self,
        client: &BackendClient,
        path: &Path,
        mut on_progress: F,
    ) -> Result<UploadOutcome>
    where
        F: FnMut(u8) + Send + Sync + 'static,
    {
        let mime = self.validate(declared_mime(path))?;

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = Error::from(e);
                self.state = UploadState::Failed(err.to_string());
                return Err(err);
            }
        };
        let size = bytes.len() as u64;
        let original_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");

        self.state = UploadState::Transferring;
        let gauge = Arc::clone(&self.progress);
        let result = client
            .upload(original_name, bytes, mime, move |percent| {
                on_progress(gauge.observe(percent));
            })
            .await;

        match result {
            Ok(response) => {
                let document = DocumentRef {
                    filename: response.filename,
                    size,
                };
                self.state = UploadState::Succeeded(document.clone());
                Ok(UploadOutcome {
                    document,
                    message: response.message,
                })
            }
            Err(e) => {
                self.state = UploadState::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

impl Default for UploadLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_declared_mime_by_extension() {
        assert_eq!(
            declared_mime(&PathBuf::from("libro.PDF")),
            Some("application/pdf")
        );
        assert_eq!(declared_mime(&PathBuf::from("notas.txt")), Some("text/plain"));
        assert_eq!(declared_mime(&PathBuf::from("foto.png")), None);
        assert_eq!(declared_mime(&PathBuf::from("sin_extension")), None);
    }

    #[test]
    fn test_disallowed_type_fails_before_any_request() {
        let mut upload = UploadLifecycle::new();
        let err = upload.validate(Some("image/png")).unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(upload.state(), UploadState::Failed(_)));
    }

    #[test]
    fn test_allowed_type_passes_validation() {
        let mut upload = UploadLifecycle::new();
        let mime = upload.validate(Some("application/pdf")).unwrap();
        assert_eq!(mime, "application/pdf");
        assert_eq!(*upload.state(), UploadState::Validating);
    }

    #[test]
    fn test_progress_gauge_is_monotone() {
        let gauge = ProgressGauge::default();
        assert_eq!(gauge.observe(10), 10);
        assert_eq!(gauge.observe(40), 40);
        // A late lower observation never moves the gauge backwards
        assert_eq!(gauge.observe(25), 40);
        assert_eq!(gauge.observe(100), 100);
        // Values above 100 are clamped
        assert_eq!(gauge.observe(120), 100);
        assert_eq!(gauge.current(), 100);
    }

    #[tokio::test]
    async fn test_png_file_rejected_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imagen.png");
        std::fs::write(&path, b"not really a png").unwrap();

        // Nothing listens here; validation must fail first
        let client = BackendClient::new("http://127.0.0.1:9");
        let mut upload = UploadLifecycle::new();

        let err = upload.run(&client, &path, |_| {}).await.unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(upload.state(), UploadState::Failed(_)));
        assert_eq!(upload.progress_percent(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_settles_as_failed() {
        let client = BackendClient::new("http://localhost:5000");
        let mut upload = UploadLifecycle::new();

        let err = upload
            .run(&client, &PathBuf::from("/nonexistent/libro.pdf"), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(matches!(upload.state(), UploadState::Failed(_)));
    }
}
