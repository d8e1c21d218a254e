//! Model-assisted extraction.
//!
//! When a completion client is configured, the raw document text is sent to
//! the model with a schema-bearing system prompt and the answer is parsed
//! back into an [`ExtractedRecord`]. Any failure along the way is reported
//! as a [`ModelExtractError`] and the caller falls back to pattern
//! extraction; the model path never degrades a result below what the
//! patterns alone would produce.

mod parse;
mod prompt;
mod summarize;

pub use parse::parse_response;
pub use prompt::{SYSTEM_PROMPT, user_prompt};
pub use summarize::{MAX_PROMPT_CHARS, summarize};

use kasbon_llm::CompletionClient;

use crate::error::ModelExtractError;
use crate::models::ExtractedRecord;
use crate::score::score;

/// Runs one model extraction attempt over `text`.
///
/// A single request is made; there is no retry. The model's own confidence
/// is ignored and the record is re-scored with the same checklist used for
/// pattern extraction, so confidence stays comparable across both paths.
pub fn extract_with_model(
    client: &dyn CompletionClient,
    text: &str,
) -> Result<ExtractedRecord, ModelExtractError> {
    let condensed = summarize(text);
    let response = client.complete(SYSTEM_PROMPT, &user_prompt(&condensed))?;

    let mut record = parse_response(&response).ok_or(ModelExtractError::UnparseableResponse)?;
    record.confidence = score(&record);
    tracing::debug!(confidence = record.confidence, "model extraction succeeded");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasbon_llm::CompletionError;

    struct CannedClient(&'static str);

    impl CompletionClient for CannedClient {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, CompletionError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingClient;

    impl CompletionClient for FailingClient {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, CompletionError> {
            Err(CompletionError::EmptyResponse)
        }
    }

    #[test]
    fn rescores_model_output() {
        let response = r#"{
            "transaction": {"date": "2025-08-22", "time": "12:55"},
            "financial": {"total_amount": 43.85}
        }"#;
        let record = extract_with_model(&CannedClient(response), "irrelevant").unwrap();
        // date + time + total resolved: 70 + 3 * 5
        assert_eq!(record.confidence, 85);
    }

    #[test]
    fn unparseable_response_is_an_error() {
        let result = extract_with_model(&CannedClient("no json here"), "text");
        assert!(matches!(result, Err(ModelExtractError::UnparseableResponse)));
    }

    #[test]
    fn completion_failure_propagates() {
        let result = extract_with_model(&FailingClient, "text");
        assert!(matches!(result, Err(ModelExtractError::Completion(_))));
    }
}
