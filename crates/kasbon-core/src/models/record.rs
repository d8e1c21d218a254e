//! Canonical extracted-record model.
//!
//! One `ExtractedRecord` is built fresh per incoming document, handed to the
//! persistence collaborator, and discarded. Field groups mirror the fixed
//! spreadsheet columns the persistence layer builds, which is why every leaf
//! is a [`Field`] rather than a bare `Option`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::field::Field;

/// Company/merchant identification block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: Field<String>,
    pub address: Field<String>,
    pub phone: Field<String>,
    pub email: Field<String>,
    pub website: Field<String>,
    /// BTW (Dutch VAT) number.
    pub tax_id: Field<String>,
    /// KvK (chamber of commerce) number.
    pub registration_id: Field<String>,
    pub iban: Field<String>,
}

/// Transaction identification block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionInfo {
    /// ISO-8601 date.
    pub date: Field<NaiveDate>,
    /// `HH:MM`.
    pub time: Field<String>,
    pub invoice_number: Field<String>,
    /// Store/branch number ("FILIAAL 1427").
    pub store_id: Field<String>,
    pub transaction_id: Field<String>,
    pub terminal_id: Field<String>,
    pub merchant_id: Field<String>,
}

/// Monetary totals, tax breakdown, and discount/loyalty amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInfo {
    pub subtotal_before_discount: Field<Decimal>,
    pub subtotal_after_discount: Field<Decimal>,
    pub total_amount: Field<Decimal>,
    pub currency: Field<String>,
    /// Tax amount per rate label, e.g. `"9%" -> 2.88`.
    pub tax: BTreeMap<String, Decimal>,
    /// Combined tax total; derived from `tax` when not printed.
    pub tax_total: Field<Decimal>,
    pub discount_amount: Field<Decimal>,
    /// Printed "UW VOORDEEL"-style loyalty advantage.
    pub loyalty_discount_amount: Field<Decimal>,
    /// Koopzegels-style stamp reward amount.
    pub stamp_amount: Field<Decimal>,
    pub payment_method: Field<PaymentMethod>,
    /// Amount paid per canonical method label, e.g. `"PIN" -> 43.85`.
    pub payment_amounts: BTreeMap<String, Decimal>,
}

/// Masked loyalty identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyInfo {
    pub card_number: Field<String>,
    pub miles_number: Field<String>,
}

/// A single parsed product line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Field<Decimal>,
    pub total_price: Decimal,
    /// Whether the line belongs to a bonus/discount promotion.
    pub bonus: bool,
    pub bonus_amount: Field<Decimal>,
}

/// Payment method on a till receipt.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentMethod {
    /// Debit card terminal payment (pinnen).
    Pin,
    /// Cash (contant).
    Cash,
    /// Credit card.
    Card,
    /// Other method with description.
    Other(String),
}

impl PaymentMethod {
    /// Parse a payment method from receipt vocabulary.
    pub fn parse(s: &str) -> Self {
        let s = s.trim().to_lowercase();

        if s.contains("pin") || s.contains("maestro") || s.contains("vpay") {
            PaymentMethod::Pin
        } else if s.contains("contant") || s.contains("cash") || s.contains("gepast") {
            PaymentMethod::Cash
        } else if s.contains("credit") || s.contains("card") || s.contains("visa") {
            PaymentMethod::Card
        } else {
            PaymentMethod::Other(s)
        }
    }

    /// Canonical label used as the key in `payment_amounts`.
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Pin => "PIN".to_string(),
            PaymentMethod::Cash => "CASH".to_string(),
            PaymentMethod::Card => "CARD".to_string(),
            PaymentMethod::Other(s) => s.to_uppercase(),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    /// Accepts any label vocabulary ("PIN", "pinnen", "Maestro") by
    /// routing through [`PaymentMethod::parse`], so model output written
    /// with the canonical uppercase labels deserializes too.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(PaymentMethod::parse(&label))
    }
}

/// The canonical output of the extraction engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    pub company: CompanyInfo,
    pub transaction: TransactionInfo,
    pub financial: FinancialInfo,
    pub loyalty: LoyaltyInfo,
    /// Parsed product lines. Lossy; `item_count` wins when both are known.
    pub items: Vec<LineItem>,
    /// Item count as printed on the document (e.g. "21 SUBTOTAAL").
    pub item_count: Field<u32>,
    /// Confidence score, 0-100.
    pub confidence: u8,
    /// Diagnostic trail of what was and was not found. Model output may
    /// deliver this as a list of remarks; either form deserializes.
    #[serde(deserialize_with = "notes_or_list")]
    pub notes: String,
}

fn notes_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    })
}

impl ExtractedRecord {
    /// Append one entry to the diagnostic trail.
    pub fn note(&mut self, entry: impl AsRef<str>) {
        if !self.notes.is_empty() {
            self.notes.push_str("; ");
        }
        self.notes.push_str(entry.as_ref());
    }

    /// Effective number of items: the printed count when present, the
    /// parsed line count otherwise.
    pub fn effective_item_count(&self) -> u32 {
        match self.item_count {
            Field::Known(n) => n,
            Field::Unknown => self.items.len() as u32,
        }
    }

    /// Project the record onto the fixed column order of
    /// [`supported_field_groups`].
    pub fn to_row(&self) -> Vec<String> {
        let tax_cell = |rate: &str| {
            self.financial
                .tax
                .get(rate)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        };
        let payment_cell = |method: &str| {
            self.financial
                .payment_amounts
                .get(method)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        };

        vec![
            self.company.name.to_cell(),
            self.company.address.to_cell(),
            self.company.phone.to_cell(),
            self.company.email.to_cell(),
            self.company.website.to_cell(),
            self.company.tax_id.to_cell(),
            self.company.registration_id.to_cell(),
            self.company.iban.to_cell(),
            self.transaction.date.to_cell(),
            self.transaction.time.to_cell(),
            self.transaction.invoice_number.to_cell(),
            self.transaction.store_id.to_cell(),
            self.transaction.transaction_id.to_cell(),
            self.transaction.terminal_id.to_cell(),
            self.transaction.merchant_id.to_cell(),
            self.financial.subtotal_before_discount.to_cell(),
            self.financial.subtotal_after_discount.to_cell(),
            self.financial.total_amount.to_cell(),
            self.financial.currency.to_cell(),
            tax_cell("9%"),
            tax_cell("21%"),
            self.financial.tax_total.to_cell(),
            self.financial.discount_amount.to_cell(),
            self.financial.loyalty_discount_amount.to_cell(),
            self.financial.stamp_amount.to_cell(),
            self.financial.payment_method.to_cell(),
            payment_cell("PIN"),
            payment_cell("CASH"),
            self.loyalty.card_number.to_cell(),
            self.loyalty.miles_number.to_cell(),
            self.item_count.to_cell(),
            self.items.len().to_string(),
            self.confidence.to_string(),
            self.notes.clone(),
        ]
    }
}

/// One recognized field group and the columns it contributes.
#[derive(Debug, Clone, Serialize)]
pub struct FieldGroup {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Structured listing of the field groups the engine recognizes. The
/// persistence layer uses this to build fixed-width spreadsheet columns;
/// the order matches [`ExtractedRecord::to_row`].
pub fn supported_field_groups() -> Vec<FieldGroup> {
    vec![
        FieldGroup {
            name: "company",
            columns: &[
                "name",
                "address",
                "phone",
                "email",
                "website",
                "tax_id",
                "registration_id",
                "iban",
            ],
        },
        FieldGroup {
            name: "transaction",
            columns: &[
                "date",
                "time",
                "invoice_number",
                "store_id",
                "transaction_id",
                "terminal_id",
                "merchant_id",
            ],
        },
        FieldGroup {
            name: "financial",
            columns: &[
                "subtotal_before_discount",
                "subtotal_after_discount",
                "total_amount",
                "currency",
                "tax_9",
                "tax_21",
                "tax_total",
                "discount_amount",
                "loyalty_discount_amount",
                "stamp_amount",
                "payment_method",
                "paid_by_pin",
                "paid_by_cash",
            ],
        },
        FieldGroup {
            name: "loyalty",
            columns: &["card_number", "miles_number"],
        },
        FieldGroup {
            name: "items",
            columns: &["item_count", "parsed_item_count"],
        },
        FieldGroup {
            name: "meta",
            columns: &["confidence", "notes"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn payment_method_parsing() {
        assert_eq!(PaymentMethod::parse("PINNEN"), PaymentMethod::Pin);
        assert_eq!(PaymentMethod::parse("Maestro"), PaymentMethod::Pin);
        assert_eq!(PaymentMethod::parse("CONTANT"), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::parse("Creditcard"), PaymentMethod::Card);
        assert_eq!(
            PaymentMethod::parse("Cadeaukaart"),
            PaymentMethod::Other("cadeaukaart".to_string())
        );
    }

    #[test]
    fn payment_method_json_uses_canonical_labels() {
        let json = serde_json::to_value(PaymentMethod::Pin).unwrap();
        assert_eq!(json, "PIN");

        let from_canonical: PaymentMethod = serde_json::from_str("\"PIN\"").unwrap();
        assert_eq!(from_canonical, PaymentMethod::Pin);

        let from_receipt_vocab: PaymentMethod = serde_json::from_str("\"PINNEN\"").unwrap();
        assert_eq!(from_receipt_vocab, PaymentMethod::Pin);

        let other: PaymentMethod = serde_json::from_str("\"CADEAUKAART\"").unwrap();
        assert_eq!(other, PaymentMethod::Other("cadeaukaart".to_string()));
    }

    #[test]
    fn notes_deserialize_from_string_or_list() {
        let record: ExtractedRecord =
            serde_json::from_str(r#"{"notes": ["clean receipt", "one bonus line"]}"#).unwrap();
        assert_eq!(record.notes, "clean receipt; one bonus line");

        let record: ExtractedRecord = serde_json::from_str(r#"{"notes": "plain"}"#).unwrap();
        assert_eq!(record.notes, "plain");
    }

    #[test]
    fn row_width_matches_field_group_listing() {
        let total_columns: usize = supported_field_groups()
            .iter()
            .map(|g| g.columns.len())
            .sum();
        assert_eq!(ExtractedRecord::default().to_row().len(), total_columns);
    }

    #[test]
    fn printed_item_count_wins_over_parsed() {
        let mut record = ExtractedRecord::default();
        record.items.push(LineItem {
            name: "HALFVOLLE MELK".to_string(),
            quantity: Decimal::ONE,
            total_price: Decimal::from_str("1.19").unwrap(),
            ..Default::default()
        });
        assert_eq!(record.effective_item_count(), 1);

        record.item_count = Field::Known(21);
        assert_eq!(record.effective_item_count(), 21);
    }

    #[test]
    fn empty_record_serializes_with_sentinels() {
        let json = serde_json::to_value(ExtractedRecord::default()).unwrap();
        assert_eq!(json["financial"]["total_amount"], "unknown");
        assert_eq!(json["transaction"]["date"], "unknown");
        assert_eq!(json["confidence"], 0);
    }

    #[test]
    fn record_roundtrips_through_json() {
        let mut record = ExtractedRecord::default();
        record.financial.total_amount = Field::Known(Decimal::from_str("43.85").unwrap());
        record
            .financial
            .tax
            .insert("9%".to_string(), Decimal::from_str("2.88").unwrap());
        record.transaction.date =
            Field::Known(NaiveDate::from_ymd_opt(2025, 8, 22).unwrap());

        let json = serde_json::to_string(&record).unwrap();
        let back: ExtractedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
