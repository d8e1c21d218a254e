//! Top-level document analysis pipeline.
//!
//! `ReceiptAnalyzer` wires the stages together: classify, attempt the
//! model-assisted extractor when a client is configured, fall back to
//! pattern extraction, then validate and score. `analyze` is total; any
//! input yields a record, with unreadable input bottoming out at the base
//! confidence with every field unknown.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use kasbon_llm::{CompletionClient, OpenAiClient};

use crate::classify::{DocumentKind, classify};
use crate::extract::extract_record;
use crate::model_assist::extract_with_model;
use crate::models::{ExtractedRecord, Field, PaymentMethod};
use crate::score::score;

/// Analysis pipeline with an optional model-assisted extraction stage.
pub struct ReceiptAnalyzer {
    model: Option<Box<dyn CompletionClient>>,
}

impl ReceiptAnalyzer {
    /// Pattern-extraction only, no model stage.
    pub fn new() -> Self {
        ReceiptAnalyzer { model: None }
    }

    /// Analyzer that tries `client` before falling back to patterns.
    pub fn with_model(client: Box<dyn CompletionClient>) -> Self {
        ReceiptAnalyzer {
            model: Some(client),
        }
    }

    /// Build from the `KASBON_LLM_*` environment variables. Missing
    /// credentials give a pattern-only analyzer.
    pub fn from_env() -> Self {
        match OpenAiClient::from_env() {
            Some(client) => {
                debug!(model = client.model(), "model-assisted extraction enabled");
                Self::with_model(Box::new(client))
            }
            None => Self::new(),
        }
    }

    /// Whether a completion client is configured.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Extract a record from raw document text.
    pub fn analyze(&self, text: &str) -> ExtractedRecord {
        let classification = classify(text);
        debug!(
            kind = ?classification.kind,
            subtype = %classification.subtype,
            language = ?classification.language,
            "classified document"
        );

        let mut record = match &self.model {
            Some(client) => match extract_with_model(client.as_ref(), text) {
                Ok(record) => {
                    debug!("using model-assisted extraction result");
                    record
                }
                Err(err) => {
                    warn!(error = %err, "model extraction failed, using patterns");
                    let mut record = extract_record(text, &classification);
                    record.note("model extraction failed, pattern fallback used");
                    record
                }
            },
            None => extract_record(text, &classification),
        };

        if classification.kind == DocumentKind::ProfessionalInvoice {
            record.note(format!("classified as invoice ({})", classification.subtype));
        }

        validate(&mut record);
        record.confidence = score(&record);
        record
    }
}

impl Default for ReceiptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cross-field repairs applied to every record before scoring.
fn validate(record: &mut ExtractedRecord) {
    // Sign normalization holds regardless of which path produced the
    // record; a negative grand total means a refund.
    if let Some(total) = record.financial.total_amount.value().copied() {
        if total.is_sign_negative() {
            record.financial.total_amount = Field::Known(total.abs());
            record.note("negative total normalized to absolute (refund)");
        }
    }

    let financial = &mut record.financial;

    // A printed tax total wins; otherwise derive it from the per-rate rows.
    if financial.tax_total.is_unknown() && !financial.tax.is_empty() {
        let sum: Decimal = financial.tax.values().sum();
        financial.tax_total = Field::Known(sum);
    }

    // Dutch receipts rarely print a currency; EUR is the safe default once
    // any amount was read.
    if financial.currency.is_unknown() && financial.total_amount.is_known() {
        financial.currency = Field::Known("EUR".to_string());
    }

    // Method from the largest payment when no method line matched.
    if financial.payment_method.is_unknown() && !financial.payment_amounts.is_empty() {
        let largest = financial
            .payment_amounts
            .iter()
            .max_by_key(|(_, amount)| **amount)
            .map(|(label, _)| PaymentMethod::parse(label));
        if let Some(method) = largest {
            financial.payment_method = Field::Known(method);
        }
    }

    if record.effective_item_count() == 0 && record.financial.total_amount.is_unknown() {
        record.note("no items or totals recognized");
    }
}
