use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A single request failed (network failure, remote status, missing id).
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// One category of a group fan-out failed; the whole group is discarded.
    #[error("category {slug}: {source}")]
    Aggregate {
        slug: String,
        #[source]
        source: TransportError,
    },
    #[error("unexpected payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog group has no category slugs")]
    EmptyGroup,
    /// Product ids start at 1.
    #[error("invalid product id {0}")]
    InvalidProductId(u64),
}

impl CatalogError {
    /// Text for the store's error slot; `None` means "use the fallback".
    ///
    /// A failed category reports the underlying transport text only, so a
    /// group failure reads the same as a single failed request.
    pub fn user_message(&self) -> Option<String> {
        match self {
            CatalogError::Transport(err) | CatalogError::Aggregate { source: err, .. } => {
                err.user_message()
            }
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_message_is_the_transport_text() {
        let err = CatalogError::Aggregate {
            slug: "mens-shoes".into(),
            source: TransportError::Network("connection reset".into()),
        };
        assert_eq!(err.user_message().as_deref(), Some("connection reset"));
        assert_eq!(err.to_string(), "category mens-shoes: connection reset");
    }

    #[test]
    fn empty_transport_text_falls_back() {
        let err = CatalogError::from(TransportError::Network(" ".into()));
        assert_eq!(err.user_message(), None);
    }
}
