//! Error types for docbridge.

use thiserror::Error;

/// Shim error types.
///
/// The first four variants are the contract with callers: `Parse` and
/// `UnsupportedPredicate` fail before any network traffic, `Network` and
/// `Remote` report a failed round-trip to the store.
#[derive(Error, Debug)]
pub enum Error {
    /// The statement's operation or collection could not be classified,
    /// or the invoked method does not match the statement kind.
    #[error("Statement not supported: {0}")]
    Parse(String),

    /// The WHERE clause uses a predicate shape the shim does not translate.
    ///
    /// Returned instead of silently matching every document; callers must
    /// migrate to a supported shape (`field = ?` or `field IN (...)`).
    #[error("Unsupported predicate: {0}")]
    UnsupportedPredicate(String),

    /// Transport-level failure or timeout reaching the document store.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The store responded with a non-2xx status.
    #[error("Remote error ({status}): {body}")]
    Remote {
        /// HTTP status code returned by the store.
        status: u16,
        /// Response body text, kept verbatim for diagnostics.
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for shim operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Parse("no collection in 'TRUNCATE x'".to_string());
        assert_eq!(
            err.to_string(),
            "Statement not supported: no collection in 'TRUNCATE x'"
        );
    }

    #[test]
    fn test_remote_error_carries_status_and_body() {
        let err = Error::Remote {
            status: 500,
            body: "internal error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
