//! Defensive parsing of model responses.
//!
//! Models ignore formatting instructions often enough that a strict parse
//! would waste most successful completions. Recovery runs in three stages:
//! the raw response, the contents of a markdown code fence, and finally the
//! first balanced JSON object found anywhere in the text.

use crate::models::ExtractedRecord;

/// Attempts to recover an [`ExtractedRecord`] from a model response.
///
/// Returns `None` only when every repair stage fails. Field-level problems
/// inside an otherwise valid object do not fail the parse; unrepresentable
/// values deserialize to `Unknown`.
pub fn parse_response(response: &str) -> Option<ExtractedRecord> {
    let trimmed = response.trim();

    if let Ok(record) = serde_json::from_str::<ExtractedRecord>(trimmed) {
        return Some(record);
    }

    if let Some(fenced) = strip_code_fence(trimmed) {
        if let Ok(record) = serde_json::from_str::<ExtractedRecord>(fenced) {
            return Some(record);
        }
    }

    let candidate = extract_json_object(trimmed)?;
    match serde_json::from_str::<ExtractedRecord>(&candidate) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(error = %err, "model response unparseable after repair");
            None
        }
    }
}

/// Returns the body of a ```json ... ``` (or bare ```) fence, if present.
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Extracts the first balanced `{...}` span and normalizes it.
///
/// Control characters inside the span are replaced with spaces, since OCR
/// text quoted in notes can smuggle raw newlines into string literals. A
/// response cut off mid-object gets its open braces closed so that the
/// fields received up to the cut still parse.
fn extract_json_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let span = &text[start..];

    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;
    for (idx, ch) in span.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    end = Some(idx + 1);
                    break;
                }
            }
            _ => {}
        }
    }

    let mut candidate: String = match end {
        Some(end) => span[..end].to_string(),
        // Truncated response: close whatever is still open.
        None => {
            let mut repaired = span.trim_end().trim_end_matches(',').to_string();
            if in_string {
                repaired.push('"');
            }
            for _ in 0..depth {
                repaired.push('}');
            }
            repaired
        }
    };

    candidate = candidate
        .chars()
        .map(|ch| if ch.is_control() && ch != '\n' && ch != '\t' { ' ' } else { ch })
        .collect();
    Some(candidate)
}
