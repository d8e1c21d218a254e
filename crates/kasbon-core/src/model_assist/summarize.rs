//! Prompt-size control for long documents.
//!
//! Completion APIs bill and limit by token, so very long inputs (multi-page
//! invoices, OCR dumps with repeated headers) are reduced to the lines that
//! carry extractable fields before they are sent out.

/// Documents at or under this length are sent verbatim.
pub const MAX_PROMPT_CHARS: usize = 12_000;

/// Keywords that mark a line as likely to carry a field of interest.
const KEY_LINE_MARKERS: &[&str] = &[
    "totaal",
    "total",
    "subtotaal",
    "btw",
    "vat",
    "datum",
    "date",
    "factuur",
    "invoice",
    "bonus",
    "voordeel",
    "koopzegels",
    "statiegeld",
    "emballage",
    "pin",
    "contant",
    "betaald",
    "kvk",
    "iban",
    "kassa",
    "filiaal",
    "terminal",
    "transactie",
    "klant",
    "bonuskaart",
    "air miles",
    "%",
    "€",
    "eur",
];

/// Reduces `text` to at most [`MAX_PROMPT_CHARS`] characters.
///
/// Short documents pass through untouched. Long ones are filtered to lines
/// containing a known field marker; if even the filtered form is too long,
/// or the filter matched nothing, the head and tail of the document are
/// kept instead, since receipts put identity at the top and totals at the
/// bottom.
pub fn summarize(text: &str) -> String {
    if text.chars().count() <= MAX_PROMPT_CHARS {
        return text.to_string();
    }

    let key_lines: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            KEY_LINE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .collect();
    let filtered = key_lines.join("\n");

    if !filtered.is_empty() && filtered.chars().count() <= MAX_PROMPT_CHARS {
        tracing::debug!(
            kept = key_lines.len(),
            "summarized long document to key lines"
        );
        return filtered;
    }

    head_and_tail(text)
}

/// Keeps the first and last halves of the allowed length, joined by a cut
/// marker.
fn head_and_tail(text: &str) -> String {
    let half = MAX_PROMPT_CHARS / 2;
    let chars: Vec<char> = text.chars().collect();
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    tracing::debug!("summarized long document to head and tail");
    format!("{head}\n[...]\n{tail}")
}
