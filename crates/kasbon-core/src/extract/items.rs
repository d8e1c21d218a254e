//! Line-item parsing.
//!
//! Item parsing is lossy by design: lines are matched against a denylist of
//! non-item vocabulary first, and a quantity-name-price match is accepted
//! only when the name and price pass sanity bounds. The printed item count
//! on the subtotal line remains authoritative over `items.len()`.

use rust_decimal::Decimal;

use super::amounts::parse_amount;
use super::profile::PatternProfile;
use crate::models::{Field, LineItem};

/// Minimum plausible item-name length.
const MIN_NAME_LEN: usize = 3;
/// Upper bound on a plausible single-line price.
const MAX_ITEM_PRICE: i64 = 1000;

/// Vocabulary that disqualifies a line from being a product line.
const NON_ITEM_KEYWORDS: &[&str] = &[
    "subtotaal",
    "totaal",
    "bonuskaart",
    "koopzegels",
    "zegels",
    "pinnen",
    "contant",
    "maestro",
    "creditcard",
    "cadeaukaart",
    "betaald",
    "btw",
    "voordeel",
    "korting",
    "filiaal",
    "kassa",
    "terminal",
    "transactie",
    "merchant",
    "emballage",
    "statiegeld",
    "wisselgeld",
    "airmiles",
    "air miles",
    "datum",
    "factuur",
    "aantal",
    "kvk",
    "iban",
    "www",
    "@",
];

/// Parse product lines from the document text.
pub fn extract_items(text: &str, profile: &PatternProfile) -> Vec<LineItem> {
    let mut items: Vec<LineItem> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // A bonus line belongs to the item printed above it.
        if let Some(caps) = profile.bonus_line.iter().find_map(|re| re.captures(line)) {
            if let Some(amount) = caps.get(1).and_then(|m| parse_amount(m.as_str())) {
                if let Some(last) = items.last_mut() {
                    last.bonus = true;
                    last.bonus_amount = Field::Known(amount.abs());
                }
                continue;
            }
        }

        let lowered = line.to_lowercase();
        if lowered.contains('%') || NON_ITEM_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }

        let Some(caps) = profile.item_line.iter().find_map(|re| re.captures(line)) else {
            continue;
        };

        let quantity: u32 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .filter(|&q| q > 0)
            .unwrap_or(1);
        let name = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        let Some(price) = caps.get(3).and_then(|m| parse_amount(m.as_str())) else {
            continue;
        };

        if name.len() < MIN_NAME_LEN
            || name.chars().filter(|c| c.is_alphabetic()).count() < 2
            || price <= Decimal::ZERO
            || price >= Decimal::from(MAX_ITEM_PRICE)
        {
            continue;
        }

        let quantity = Decimal::from(quantity);
        items.push(LineItem {
            name: name.to_string(),
            quantity,
            unit_price: Field::Known((price / quantity).round_dp(2)),
            total_price: price,
            bonus: false,
            bonus_amount: Field::Unknown,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::profile::RECEIPT_PROFILE;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parses_spaced_product_lines() {
        let text = "AH HALFVOLLE MELK 1,19\n2 PAPRIKA ROOD 3,98\nSUBTOTAAL: 5,17";
        let items = extract_items(text, &RECEIPT_PROFILE);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "AH HALFVOLLE MELK");
        assert_eq!(items[0].total_price, dec("1.19"));
        assert_eq!(items[1].quantity, dec("2"));
        assert_eq!(items[1].unit_price, Field::Known(dec("1.99")));
    }

    #[test]
    fn parses_compressed_product_lines() {
        let items = extract_items("AHHALFVOLLEMELK1,19", &RECEIPT_PROFILE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "AHHALFVOLLEMELK");
        assert_eq!(items[0].total_price, dec("1.19"));
    }

    #[test]
    fn bonus_line_attaches_to_previous_item() {
        let text = "AH ROOMBOTER 2,49\nBONUS AH ROOMBOTER -0,75";
        let items = extract_items(text, &RECEIPT_PROFILE);

        assert_eq!(items.len(), 1);
        assert!(items[0].bonus);
        assert_eq!(items[0].bonus_amount, Field::Known(dec("0.75")));
    }

    #[test]
    fn non_item_vocabulary_is_skipped() {
        let text = "SUBTOTAAL: 40,24\nPINNEN: 43,85\nBONUSKAART: 1234\n9%: 31,98 2,88";
        assert!(extract_items(text, &RECEIPT_PROFILE).is_empty());
    }

    #[test]
    fn implausible_lines_are_rejected() {
        // Too-short name, free line, and out-of-bound price.
        let text = "X 1,00\nGRATIS ARTIKEL 0,00\nTV BEUGEL 9999,99";
        assert!(extract_items(text, &RECEIPT_PROFILE).is_empty());
    }
}
