//! Monetary amount parsing and totals extraction.
//!
//! SUBTOTAAL and TOTAAL labels repeat on a receipt (pre/post-discount
//! subtotal, per-tax-rate rows, grand total), so totals are resolved by
//! scanning line by line and tracking occurrence order rather than taking
//! the first global match.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::profile::PatternProfile;
use crate::models::Field;

/// Upper bound on a plausible single-document amount.
const MAX_PLAUSIBLE_AMOUNT: i64 = 100_000;

/// Totals resolved from one document.
#[derive(Debug, Clone, Default)]
pub struct ReceiptTotals {
    pub subtotal_before: Field<Decimal>,
    pub subtotal_after: Field<Decimal>,
    pub grand_total: Field<Decimal>,
    /// Item count printed on the subtotal line ("21 SUBTOTAAL").
    pub item_count: Field<u32>,
    /// The grand total was printed with a minus sign (refund).
    pub negative_total: bool,
}

/// Parse an amount written with a comma decimal separator ("43,85"),
/// tolerating dots, currency symbols, and surrounding noise.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let negative = cleaned.starts_with('-');
    let digits = cleaned.trim_start_matches('-');

    let normalized = if digits.contains(',') && !digits.contains('.') {
        digits.replace(',', ".")
    } else if digits.contains(',') && digits.contains('.') {
        // Whichever separator comes last is the decimal one.
        match (digits.rfind(','), digits.rfind('.')) {
            (Some(c), Some(d)) if c > d => digits.replace('.', "").replace(',', "."),
            _ => digits.replace(',', ""),
        }
    } else {
        digits.to_string()
    };

    let value = Decimal::from_str(&normalized).ok()?;
    if value.abs() > Decimal::from(MAX_PLAUSIBLE_AMOUNT) {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Extract subtotals, grand total, and the printed item count.
pub fn extract_totals(text: &str, profile: &PatternProfile) -> ReceiptTotals {
    let mut result = ReceiptTotals::default();

    // Subtotal occurrences in print order: (printed count, amount).
    let mut subtotals: Vec<(Option<u32>, Decimal)> = Vec::new();
    // Grand-total candidates in print order.
    let mut total_candidates: Vec<Decimal> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = profile.subtotal.iter().find_map(|re| re.captures(line)) {
            let count = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
            if let Some(amount) = caps.get(2).and_then(|m| parse_amount(m.as_str())) {
                subtotals.push((count, amount));
            }
            continue;
        }

        if let Some(caps) = profile.grand_total.iter().find_map(|re| re.captures(line)) {
            if let Some(amount) = caps.get(1).and_then(|m| parse_amount(m.as_str())) {
                total_candidates.push(amount);
            }
        }
    }

    // First occurrence is the pre-discount subtotal; a later occurrence
    // qualifies as the post-discount subtotal only if it did not grow.
    if let Some(&(count, before)) = subtotals.first() {
        result.subtotal_before = Field::Known(before);
        if let Some(count) = count {
            result.item_count = Field::Known(count);
        }
        result.subtotal_after = subtotals
            .iter()
            .skip(1)
            .find(|(_, amount)| *amount <= before)
            .map(|(count, amount)| {
                if result.item_count.is_unknown() {
                    if let Some(count) = count {
                        result.item_count = Field::Known(*count);
                    }
                }
                *amount
            })
            .into();
    }

    // A candidate is accepted as the grand total only if it is at least the
    // known secondary total; this guards against picking up the TOTAAL row
    // of the tax section.
    let secondary = result
        .subtotal_after
        .value()
        .or(result.subtotal_before.value())
        .copied();
    let chosen = match secondary {
        Some(floor) => total_candidates
            .iter()
            .find(|c| c.abs() >= floor)
            .or_else(|| total_candidates.iter().max_by_key(|c| c.abs()))
            .copied(),
        None => total_candidates.first().copied(),
    };

    if let Some(raw) = chosen {
        // A negative grand total means a refund; the sign is tracked
        // separately, never folded into the total itself.
        result.negative_total = raw.is_sign_negative();
        result.grand_total = Field::Known(raw.abs());
    }

    debug!(
        subtotal_occurrences = subtotals.len(),
        total_candidates = total_candidates.len(),
        grand_total = ?result.grand_total,
        "resolved totals"
    );

    result
}
