//! Error types for the completion client.

use thiserror::Error;

/// Errors from a completion call. All of them are treated as a routing
/// decision by the caller (fall back to pattern extraction), never as a
/// pipeline failure.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered but carried no usable choice.
    #[error("empty response from completion API")]
    EmptyResponse,
}

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, CompletionError>;
