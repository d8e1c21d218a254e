//! Rule-based field extractors.
//!
//! Each extractor is a pure, total function over the raw text: malformed
//! input degrades to the unknown sentinel for that field, never to a crash.

pub mod amounts;
pub mod company;
pub mod datetime;
pub mod discounts;
pub mod identifiers;
pub mod items;
pub mod patterns;
pub mod payment;
pub mod profile;
pub mod tax;

pub use amounts::{ReceiptTotals, extract_totals, parse_amount};
pub use profile::{PatternProfile, select_profile};

use tracing::debug;

use crate::classify::DocumentClassification;
use crate::models::ExtractedRecord;

/// Run all field extractors against the profile selected for the
/// classification and assemble a record. Confidence is left at zero; the
/// caller scores and validates the result.
pub fn extract_record(text: &str, classification: &DocumentClassification) -> ExtractedRecord {
    let profile = select_profile(classification);
    debug!(profile = profile.name, "running pattern extraction");

    let totals = amounts::extract_totals(text, profile);
    let dt = datetime::extract_datetime(text);
    let tax = tax::extract_tax(text, profile);
    let discounts = discounts::extract_discounts(text, profile);
    let payments = payment::extract_payments(text, profile);
    let ids = identifiers::extract_identifiers(text, profile);

    let mut record = ExtractedRecord::default();

    record.company = company::extract_company(text, classification);

    record.transaction.date = dt.date;
    record.transaction.time = dt.time;
    record.transaction.invoice_number = ids.invoice_number;
    record.transaction.store_id = ids.store_id;
    record.transaction.transaction_id = ids.transaction_id;
    record.transaction.terminal_id = ids.terminal_id;
    record.transaction.merchant_id = ids.merchant_id;

    record.financial.subtotal_before_discount = totals.subtotal_before;
    record.financial.subtotal_after_discount = totals.subtotal_after;
    record.financial.total_amount = totals.grand_total;
    record.financial.tax = tax.per_rate;
    record.financial.tax_total = tax.total;
    record.financial.discount_amount = discounts.deposit_return.clone();
    record.financial.loyalty_discount_amount = discounts.effective_loyalty_discount();
    record.financial.stamp_amount = discounts.stamps;
    record.financial.payment_method = payments.method;
    record.financial.payment_amounts = payments.amounts;

    record.loyalty = ids.loyalty;
    record.items = items::extract_items(text, profile);
    record.item_count = totals.item_count;

    if totals.negative_total {
        record.note("negative total normalized to absolute (refund)");
    }

    record
}
