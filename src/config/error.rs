//! Error types and result aliases.
//!
//! Defines the core `SessionError` enumeration and common `Result` type.
//! None of these reach callers of the token codec, which only ever see
//! a missing token or a `false` verification.

use thiserror::Error;

/// Session subsystem errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// HMAC refused the secret key.
    ///
    /// HMAC-SHA256 accepts keys of any length, so this is unreachable in
    /// practice; it exists because `Mac::new_from_slice` is fallible.
    #[error("invalid signing key")]
    InvalidKey,

    /// Listener or connection I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;
