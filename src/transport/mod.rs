//! Transport boundary: one GET per call, JSON in, typed failure out.
//!
//! The catalog core never talks to reqwest directly; it holds an
//! `Arc<dyn Transport>` so tests can script responses and so a different
//! HTTP stack can be plugged in without touching the store.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod http;
#[cfg(test)]
pub mod scripted;

pub use http::HttpTransport;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// No response: connect failure, timeout, or the body could not be read.
    #[error("{0}")]
    Network(String),
    /// The catalog answered with a non-success status.
    #[error("{}", remote_text(.status, .message))]
    Remote { status: u16, message: Option<String> },
    /// Success status but the body is not JSON.
    #[error("invalid JSON payload: {0}")]
    Decode(String),
}

fn remote_text(status: &u16, message: &Option<String>) -> String {
    match message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => format!("request failed with status code {status}"),
    }
}

impl TransportError {
    /// Text suitable for the user-facing error slot, `None` when the failure
    /// carried nothing readable.
    pub fn user_message(&self) -> Option<String> {
        let text = match self {
            TransportError::Network(m) | TransportError::Decode(m) if m.trim().is_empty() => {
                return None;
            }
            other => other.to_string(),
        };
        Some(text)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET for `path` (relative to the transport's base URL).
    async fn get(&self, path: &str) -> Result<Value, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_prefers_body_message() {
        let err = TransportError::Remote {
            status: 404,
            message: Some("Product with id '999' not found".into()),
        };
        assert_eq!(err.to_string(), "Product with id '999' not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn remote_without_message_names_status() {
        let err = TransportError::Remote { status: 500, message: Some("  ".into()) };
        assert_eq!(err.to_string(), "request failed with status code 500");
        assert_eq!(
            err.user_message().as_deref(),
            Some("request failed with status code 500")
        );
    }

    #[test]
    fn blank_network_failure_has_no_user_message() {
        assert_eq!(TransportError::Network(String::new()).user_message(), None);
        assert_eq!(
            TransportError::Network("connection refused".into()).user_message().as_deref(),
            Some("connection refused")
        );
    }
}
