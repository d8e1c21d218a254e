//! Error types for the kasbon-core library.
//!
//! The `analyze` entry point itself is total: every failure mode inside the
//! pipeline degrades to a valid lower-confidence record. The errors here
//! exist for the model-assisted path, where a failure is a routing decision
//! back to pattern extraction.

use thiserror::Error;

/// Failure of the model-assisted extraction attempt.
#[derive(Error, Debug)]
pub enum ModelExtractError {
    /// The completion call itself failed (transport, timeout, API error).
    #[error("completion call failed: {0}")]
    Completion(#[from] kasbon_llm::CompletionError),

    /// The model answered, but no record could be recovered from the
    /// response after all repair attempts.
    #[error("model response could not be parsed as a record")]
    UnparseableResponse,
}
