//! Error types for Tome

use thiserror::Error;

/// Result type alias using Tome's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Tome error types
///
/// Every request-issuing component absorbs these at its own boundary;
/// nothing past a settle ever sees them.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected client-side, before any network call
    #[error("{message}")]
    Validation { message: String },

    /// Network-level failure, no usable response
    #[error("{message}")]
    Transport { message: String },

    /// Non-2xx status, or a 2xx body missing required fields
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Prompt error: {message}")]
    Prompt { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// Server error carrying the backend's own message when one was
    /// parseable, else a status-coded generic.
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => format!("Request failed with HTTP {}", status),
        };
        Error::Server { status, message }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// True for errors rejected before any network traffic
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_uses_backend_message() {
        let err = Error::server(500, Some("index unavailable".to_string()));
        assert_eq!(err.to_string(), "index unavailable");
    }

    #[test]
    fn test_server_error_falls_back_to_status() {
        let err = Error::server(502, None);
        assert_eq!(err.to_string(), "Request failed with HTTP 502");

        let err = Error::server(404, Some("   ".to_string()));
        assert_eq!(err.to_string(), "Request failed with HTTP 404");
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::validation("empty query").is_validation());
        assert!(!Error::transport("connection refused").is_validation());
    }
}
