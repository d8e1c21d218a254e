//! Field extraction for Dutch retail receipts and professional invoices.
//!
//! The pipeline classifies the document, extracts fields with layout-aware
//! regex profiles (optionally preceded by a model-assisted attempt), and
//! scores the result. The whole engine is synchronous and total: any text
//! in, one [`ExtractedRecord`] out.
//!
//! ```no_run
//! use kasbon_core::ReceiptAnalyzer;
//!
//! let analyzer = ReceiptAnalyzer::from_env();
//! let record = analyzer.analyze("SUBTOTAAL: 36,45\nTOTAAL: 43,85\nPINNEN 43,85");
//! println!("{}", serde_json::to_string_pretty(&record).unwrap());
//! ```

pub mod analyze;
pub mod classify;
pub mod error;
pub mod extract;
pub mod model_assist;
pub mod models;
pub mod score;

pub use analyze::ReceiptAnalyzer;
pub use classify::{DocumentClassification, DocumentKind, Language, classify};
pub use error::ModelExtractError;
pub use models::{
    ExtractedRecord, Field, FieldGroup, LineItem, PaymentMethod, supported_field_groups,
};
pub use score::{BASE_SCORE, FIELD_INCREMENT, MAX_SCORE};
