//! Completion-client capability for kasbon.
//!
//! The extraction engine treats the language model as an optional,
//! possibly-unavailable collaborator behind a narrow trait. This crate
//! provides that trait, its error taxonomy, and an OpenAI-compatible
//! HTTP backend.

pub mod client;
pub mod error;

pub use client::{CompletionClient, OpenAiClient};
pub use error::CompletionError;
