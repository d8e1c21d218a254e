//! Store/transaction identifier and masked loyalty-number extraction.

use super::profile::PatternProfile;
use crate::models::{Field, LoyaltyInfo};

/// Extracted identifier fields.
#[derive(Debug, Clone, Default)]
pub struct Identifiers {
    pub store_id: Field<String>,
    pub transaction_id: Field<String>,
    pub terminal_id: Field<String>,
    pub merchant_id: Field<String>,
    pub invoice_number: Field<String>,
    pub loyalty: LoyaltyInfo,
}

/// Extract identifier fields. Label-based, case-insensitive, tolerant of a
/// missing colon or space; loyalty numbers are re-masked on the way out.
pub fn extract_identifiers(text: &str, profile: &PatternProfile) -> Identifiers {
    Identifiers {
        store_id: resolve(&profile.store_id, text),
        transaction_id: resolve(&profile.transaction_id, text),
        terminal_id: resolve(&profile.terminal_id, text),
        merchant_id: resolve(&profile.merchant_id, text),
        invoice_number: resolve(&profile.invoice_number, text),
        loyalty: LoyaltyInfo {
            card_number: resolve(&profile.loyalty_card, text).map(mask_number),
            miles_number: resolve(&profile.miles, text).map(mask_number),
        },
    }
}

fn resolve(patterns: &[&'static regex::Regex], text: &str) -> Field<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .into()
}

/// Replace all but the last four characters with `x`, whatever the source
/// printed.
fn mask_number(number: String) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= 4 {
        return number;
    }
    let keep = chars.len() - 4;
    let mut masked: String = "x".repeat(keep);
    masked.extend(&chars[keep..]);
    masked
}
