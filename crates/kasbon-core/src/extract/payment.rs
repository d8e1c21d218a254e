//! Payment method and per-method amount extraction.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::amounts::parse_amount;
use super::profile::PatternProfile;
use crate::models::{Field, PaymentMethod};

/// Extracted payment information.
#[derive(Debug, Clone, Default)]
pub struct Payments {
    /// Amount paid per canonical method label.
    pub amounts: BTreeMap<String, Decimal>,
    /// Method of the largest amount.
    pub method: Field<PaymentMethod>,
}

/// Extract payment lines ("PINNEN: 43,85"). A method appearing on multiple
/// lines accumulates; split payments across methods each get their own
/// entry.
pub fn extract_payments(text: &str, profile: &PatternProfile) -> Payments {
    let mut result = Payments::default();

    for line in text.lines() {
        let Some(caps) = profile.payment.iter().find_map(|re| re.captures(line)) else {
            continue;
        };
        let method = PaymentMethod::parse(&caps[1]);
        let Some(amount) = caps.get(2).and_then(|m| parse_amount(m.as_str())) else {
            continue;
        };
        *result.amounts.entry(method.label()).or_insert(Decimal::ZERO) += amount.abs();
    }

    result.method = result
        .amounts
        .iter()
        .max_by_key(|(_, amount)| **amount)
        .map(|(label, _)| PaymentMethod::parse(label))
        .into();

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
    fn single_pin_payment() {
        let payments = extract_payments("PINNEN: 43,85", &RECEIPT_PROFILE);
        assert_eq!(payments.amounts.get("PIN"), Some(&dec("43.85")));
        assert_eq!(payments.method, Field::Known(PaymentMethod::Pin));
    }

    #[test]
    fn split_payment_keeps_both_methods() {
        let payments = extract_payments("CONTANT: 10,00\nPINNEN: 33,85", &RECEIPT_PROFILE);
        assert_eq!(payments.amounts.get("CASH"), Some(&dec("10.00")));
        assert_eq!(payments.amounts.get("PIN"), Some(&dec("33.85")));
        // Largest amount decides the headline method.
        assert_eq!(payments.method, Field::Known(PaymentMethod::Pin));
    }

    #[test]
    fn compressed_payment_line() {
        let payments = extract_payments("PINNEN:43,85", &RECEIPT_PROFILE);
        assert_eq!(payments.amounts.get("PIN"), Some(&dec("43.85")));
    }

    #[test]
    fn no_payment_lines() {
        let payments = extract_payments("TOTAAL: 10,00", &RECEIPT_PROFILE);
        assert!(payments.amounts.is_empty());
        assert!(payments.method.is_unknown());
    }
}
