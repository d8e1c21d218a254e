//! Confidence scoring.
//!
//! A pure function of which field groups resolved: fixed base, fixed
//! per-group increment, capped at 100. Confidence only ever accumulates;
//! nothing in the pipeline decreases it once assigned.

use crate::models::ExtractedRecord;

/// Score every record starts from.
pub const BASE_SCORE: u8 = 70;
/// Increment per resolved field group.
pub const FIELD_INCREMENT: u8 = 5;
/// Ceiling.
pub const MAX_SCORE: u8 = 100;

/// Tax rates counted as the reduced ("low") bracket.
const LOW_TAX_RATES: &[&str] = &["0%", "6%", "9%"];

/// Compute the confidence score for a record.
pub fn score(record: &ExtractedRecord) -> u8 {
    let financial = &record.financial;
    let transaction = &record.transaction;

    let checklist = [
        transaction.date.is_known(),
        transaction.time.is_known(),
        financial.subtotal_before_discount.is_known(),
        financial.subtotal_after_discount.is_known(),
        financial
            .tax
            .keys()
            .any(|rate| LOW_TAX_RATES.contains(&rate.as_str())),
        financial
            .tax
            .keys()
            .any(|rate| !LOW_TAX_RATES.contains(&rate.as_str())),
        financial.discount_amount.is_known(),
        financial.loyalty_discount_amount.is_known(),
        financial.stamp_amount.is_known(),
        financial.total_amount.is_known(),
        !financial.payment_amounts.is_empty(),
        record.item_count.is_known(),
        transaction.store_id.is_known(),
        transaction.transaction_id.is_known(),
        transaction.terminal_id.is_known(),
        transaction.merchant_id.is_known(),
        record.loyalty.card_number.is_known(),
        record.loyalty.miles_number.is_known(),
    ];

    let found = checklist.iter().filter(|&&hit| hit).count() as u32;
    let raw = BASE_SCORE as u32 + found * FIELD_INCREMENT as u32;
    raw.min(MAX_SCORE as u32) as u8
}
