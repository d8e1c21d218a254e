//! Tax breakdown extraction.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::amounts::parse_amount;
use super::profile::PatternProfile;
use crate::models::Field;

/// Extracted tax information.
#[derive(Debug, Clone, Default)]
pub struct TaxBreakdown {
    /// Tax amount per rate label, e.g. `"9%" -> 2.88`.
    pub per_rate: BTreeMap<String, Decimal>,
    /// Printed combined tax total, when present.
    pub total: Field<Decimal>,
}

/// Extract the per-rate tax breakdown and the printed tax total.
///
/// Receipt tax rows carry the taxed base followed by the tax amount
/// ("9%: 31,98 2,88"); the tax amount is the second number. Invoice-style
/// single-amount rows ("BTW 21%: 210,00") are tried afterwards and never
/// overwrite a rate already resolved from a full row.
pub fn extract_tax(text: &str, profile: &PatternProfile) -> TaxBreakdown {
    let mut result = TaxBreakdown::default();

    for line in text.lines() {
        if let Some(caps) = profile.tax_row.iter().find_map(|re| re.captures(line)) {
            let rate = format!("{}%", &caps[1]);
            if let Some(tax) = caps.get(3).and_then(|m| parse_amount(m.as_str())) {
                result.per_rate.entry(rate).or_insert(tax);
                continue;
            }
        }

        if let Some(caps) = profile.tax_amount_row.iter().find_map(|re| re.captures(line)) {
            let rate = format!("{}%", &caps[1]);
            if let Some(tax) = caps.get(2).and_then(|m| parse_amount(m.as_str())) {
                result.per_rate.entry(rate).or_insert(tax);
            }
        }
    }

    result.total = profile
        .tax_total
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1).and_then(|m| parse_amount(m.as_str())))
        .into();

    result
}
