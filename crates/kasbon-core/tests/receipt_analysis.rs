//! End-to-end tests for the analysis pipeline.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

use kasbon_core::{
    BASE_SCORE, DocumentKind, ExtractedRecord, Field, PaymentMethod, ReceiptAnalyzer, classify,
};
use kasbon_llm::{CompletionClient, CompletionError};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reference supermarket receipt, normal spacing.
const AH_RECEIPT: &str = "\
ALBERT HEIJN
FILIAAL 1427
KASSA: 5
BONUSKAART: 2620123456789
AIR MILES NR: xxxxxx1234
AH HALFVOLLE MELK 1,19
2 PAPRIKA ROOD 3,98
AH ROOMBOTER 2,49
BONUS AH ROOMBOTER -0,75
21 SUBTOTAAL: 40,24
UW VOORDEEL: 3,79
SUBTOTAAL: 36,45
74 KOOPZEGELS PREMIUM: 7,40
TOTAAL: 43,85
PINNEN: 43,85
9%: 31,98 2,88
21%: 1,31 0,28
22/08/2025 12:55
TERMINAL: NM6LKD
MERCHANT: 1333175
TRANSACTIE: 02A471
";

/// The same receipt with all spaces stripped inside each line, simulating
/// a text source that lost its whitespace.
fn compressed(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn reference_receipt_end_to_end() {
    let record = ReceiptAnalyzer::new().analyze(AH_RECEIPT);

    assert_eq!(record.company.name, Field::Known("ALBERT HEIJN".to_string()));
    assert_eq!(
        record.transaction.date,
        Field::Known(NaiveDate::from_ymd_opt(2025, 8, 22).unwrap())
    );
    assert_eq!(record.transaction.time, Field::Known("12:55".to_string()));
    assert_eq!(record.transaction.store_id, Field::Known("1427".to_string()));
    assert_eq!(
        record.transaction.transaction_id,
        Field::Known("02A471".to_string())
    );
    assert_eq!(
        record.transaction.terminal_id,
        Field::Known("NM6LKD".to_string())
    );
    assert_eq!(
        record.transaction.merchant_id,
        Field::Known("1333175".to_string())
    );

    assert_eq!(
        record.financial.subtotal_before_discount,
        Field::Known(dec("40.24"))
    );
    assert_eq!(
        record.financial.subtotal_after_discount,
        Field::Known(dec("36.45"))
    );
    assert_eq!(record.financial.total_amount, Field::Known(dec("43.85")));
    assert_eq!(record.financial.tax.get("9%"), Some(&dec("2.88")));
    assert_eq!(record.financial.tax.get("21%"), Some(&dec("0.28")));
    assert_eq!(record.financial.tax_total, Field::Known(dec("3.16")));
    assert_eq!(
        record.financial.loyalty_discount_amount,
        Field::Known(dec("3.79"))
    );
    assert_eq!(record.financial.stamp_amount, Field::Known(dec("7.40")));
    assert_eq!(
        record.financial.payment_amounts.get("PIN"),
        Some(&dec("43.85"))
    );
    assert_eq!(
        record.financial.payment_method,
        Field::Known(PaymentMethod::Pin)
    );
    assert_eq!(record.financial.currency, Field::Known("EUR".to_string()));

    // Printed count on the subtotal line wins over the parsed line count.
    assert_eq!(record.item_count, Field::Known(21));
    assert_eq!(record.effective_item_count(), 21);
    assert!(record.items.len() >= 3);

    assert_eq!(
        record.loyalty.card_number,
        Field::Known("xxxxxxxxx6789".to_string())
    );
    assert_eq!(
        record.loyalty.miles_number,
        Field::Known("xxxxxx1234".to_string())
    );
}

#[test]
fn analysis_is_deterministic() {
    let analyzer = ReceiptAnalyzer::new();
    let first = analyzer.analyze(AH_RECEIPT);
    let second = analyzer.analyze(AH_RECEIPT);
    assert_eq!(first, second);
}

#[test]
fn numeric_fields_survive_whitespace_loss() {
    let analyzer = ReceiptAnalyzer::new();
    let spaced = analyzer.analyze(AH_RECEIPT);
    let squashed = analyzer.analyze(&compressed(AH_RECEIPT));

    assert_eq!(spaced.financial.total_amount, squashed.financial.total_amount);
    assert_eq!(
        spaced.financial.subtotal_before_discount,
        squashed.financial.subtotal_before_discount
    );
    assert_eq!(
        spaced.financial.subtotal_after_discount,
        squashed.financial.subtotal_after_discount
    );
    assert_eq!(spaced.financial.tax, squashed.financial.tax);
    assert_eq!(
        spaced.financial.loyalty_discount_amount,
        squashed.financial.loyalty_discount_amount
    );
    assert_eq!(spaced.financial.stamp_amount, squashed.financial.stamp_amount);
    assert_eq!(
        spaced.financial.payment_amounts,
        squashed.financial.payment_amounts
    );
    assert_eq!(spaced.item_count, squashed.item_count);
}

#[test]
fn comma_decimals_normalize_to_dot_values() {
    let record = ReceiptAnalyzer::new().analyze("TOTAAL: 43,85");
    assert_eq!(record.financial.total_amount, Field::Known(dec("43.85")));
}

#[test]
fn total_is_never_negative() {
    let record = ReceiptAnalyzer::new().analyze("TOTAAL: -12,50");
    assert_eq!(record.financial.total_amount, Field::Known(dec("12.50")));
    assert!(record.notes.contains("refund"));
}

#[test]
fn confidence_never_decreases_as_fields_resolve() {
    let analyzer = ReceiptAnalyzer::new();
    let base = analyzer.analyze("TOTAAL: 43,85").confidence;
    let with_payment = analyzer.analyze("TOTAAL: 43,85\nPINNEN: 43,85").confidence;
    let with_date = analyzer
        .analyze("TOTAAL: 43,85\nPINNEN: 43,85\n22/08/2025 12:55")
        .confidence;

    assert!(with_payment >= base);
    assert!(with_date >= with_payment);
}

#[test]
fn empty_input_degrades_gracefully() {
    let record = ReceiptAnalyzer::new().analyze("");

    assert_eq!(record.confidence, BASE_SCORE);
    assert!(record.company.name.is_unknown());
    assert!(record.transaction.date.is_unknown());
    assert!(record.financial.total_amount.is_unknown());
    assert!(record.financial.tax.is_empty());
    assert!(record.items.is_empty());
}

#[test]
fn invoice_labels_outweigh_receipt_vocabulary() {
    let text = "\
Factuur
Factuurdatum: 01-08-2025
Btw-nummer: NL123456789B01
Totaal te betalen: 1.210,00
";
    let classification = classify(text);
    assert_eq!(classification.kind, DocumentKind::ProfessionalInvoice);

    let record = ReceiptAnalyzer::new().analyze(text);
    assert_eq!(record.financial.total_amount, Field::Known(dec("1210.00")));
    assert_eq!(record.company.tax_id, Field::Known("NL123456789B01".to_string()));
}

struct CannedClient(&'static str);

impl CompletionClient for CannedClient {
    fn complete(&self, _system: &str, _user: &str) -> Result<String, CompletionError> {
        Ok(self.0.to_string())
    }
}

#[test]
fn fenced_model_output_is_repaired_and_used() {
    let response = "```json\n{\"financial\": {\"total_amount\": 43.85}, \"item_count\": 21}\n```";
    let record = ReceiptAnalyzer::with_model(Box::new(CannedClient(response))).analyze("whatever");

    assert_eq!(record.financial.total_amount, Field::Known(dec("43.85")));
    assert_eq!(record.item_count, Field::Known(21));
}

#[test]
fn unusable_model_output_falls_back_to_patterns() {
    let chatty = ReceiptAnalyzer::with_model(Box::new(CannedClient("I could not read that.")));
    let record = chatty.analyze(AH_RECEIPT);
    let pattern_record = ReceiptAnalyzer::new().analyze(AH_RECEIPT);

    assert_eq!(
        record.financial.total_amount,
        pattern_record.financial.total_amount
    );
    assert_eq!(record.financial.tax, pattern_record.financial.tax);
    assert!(record.notes.contains("pattern fallback"));
}
