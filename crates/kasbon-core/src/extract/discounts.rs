//! Discount, loyalty-advantage, and stamp extraction.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::parse_amount;
use super::profile::PatternProfile;
use crate::models::Field;

/// Extracted discount/loyalty amounts. All values are absolute; the minus
/// signs printed on the source lines carry the refund meaning, not the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct Discounts {
    /// Sum of itemized bonus lines.
    pub bonus_line_sum: Field<Decimal>,
    /// Printed "UW VOORDEEL"-style total advantage.
    pub loyalty_total: Field<Decimal>,
    /// Koopzegels stamp amount.
    pub stamps: Field<Decimal>,
    /// Deposit/return amount (emballage, statiegeld), when negative.
    pub deposit_return: Field<Decimal>,
}

impl Discounts {
    /// The authoritative loyalty discount: the printed total when present,
    /// the itemized sum otherwise. Itemized parsing is lossy; the printed
    /// total is not.
    pub fn effective_loyalty_discount(&self) -> Field<Decimal> {
        self.loyalty_total.clone().or(self.bonus_line_sum.clone())
    }
}

/// Extract bonus/discount amounts from the document.
pub fn extract_discounts(text: &str, profile: &PatternProfile) -> Discounts {
    let mut result = Discounts::default();

    let mut bonus_sum = Decimal::ZERO;
    let mut bonus_lines = 0u32;
    let mut deposit_sum = Decimal::ZERO;

    for line in text.lines() {
        if let Some(caps) = profile.bonus_line.iter().find_map(|re| re.captures(line)) {
            if let Some(amount) = caps.get(1).and_then(|m| parse_amount(m.as_str())) {
                bonus_sum += amount.abs();
                bonus_lines += 1;
                continue;
            }
        }

        if let Some(caps) = profile.deposit_line.iter().find_map(|re| re.captures(line)) {
            if let Some(amount) = caps.get(1).and_then(|m| parse_amount(m.as_str())) {
                if amount.is_sign_negative() {
                    deposit_sum += amount.abs();
                }
            }
        }
    }

    if bonus_lines > 0 {
        result.bonus_line_sum = Field::Known(bonus_sum);
    }
    if deposit_sum > Decimal::ZERO {
        result.deposit_return = Field::Known(deposit_sum);
    }

    result.loyalty_total = profile
        .loyalty_total
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1).and_then(|m| parse_amount(m.as_str())))
        .map(|d| d.abs())
        .into();

    result.stamps = profile
        .stamps
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1).and_then(|m| parse_amount(m.as_str())))
        .map(|d| d.abs())
        .into();

    debug!(bonus_lines, ?result.loyalty_total, ?result.stamps, "resolved discounts");
    result
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
    fn printed_total_beats_itemized_sum() {
        let text = "BONUS AH MELK -0,75\nBONUS KAAS -1,05\nUW VOORDEEL: 3,79";
        let discounts = extract_discounts(text, &RECEIPT_PROFILE);

        assert_eq!(discounts.bonus_line_sum, Field::Known(dec("1.80")));
        assert_eq!(discounts.loyalty_total, Field::Known(dec("3.79")));
        assert_eq!(
            discounts.effective_loyalty_discount(),
            Field::Known(dec("3.79"))
        );
    }

    #[test]
    fn itemized_sum_used_when_no_printed_total() {
        let text = "BONUS AH MELK -0,75\nBONUS KAAS -1,05";
        let discounts = extract_discounts(text, &RECEIPT_PROFILE);
        assert_eq!(
            discounts.effective_loyalty_discount(),
            Field::Known(dec("1.80"))
        );
    }

    #[test]
    fn koopzegels_amount() {
        let discounts = extract_discounts("74 KOOPZEGELS PREMIUM: 7,40", &RECEIPT_PROFILE);
        assert_eq!(discounts.stamps, Field::Known(dec("7.40")));
    }

    #[test]
    fn compressed_voordeel_and_koopzegels() {
        let discounts =
            extract_discounts("UWVOORDEEL:3,79\n74KOOPZEGELSPREMIUM:7,40", &RECEIPT_PROFILE);
        assert_eq!(discounts.loyalty_total, Field::Known(dec("3.79")));
        assert_eq!(discounts.stamps, Field::Known(dec("7.40")));
    }

    #[test]
    fn negative_deposit_lines_accumulate() {
        let text = "EMBALLAGE -0,25\nSTATIEGELD -1,50";
        let discounts = extract_discounts(text, &RECEIPT_PROFILE);
        assert_eq!(discounts.deposit_return, Field::Known(dec("1.75")));
    }
}
