//! Error types for the `xtb-relay` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, RelayError>`.
//!
//! [`RelayError`] covers:
//! - **WebSocket errors** — Connection, TLS and protocol failures
//! - **JSON errors** — Login serialization and strict-mode payload failures
//! - **I/O errors** — Reading operator input or writing output lines
//! - **URL errors** — Malformed endpoint passed on the command line

/// All possible errors produced by the session relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A WebSocket-level error (handshake, TLS, abrupt close).
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Failed to serialize or deserialize a JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error parsing the endpoint URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RelayError>;
