//! Document classification: receipt vs. professional invoice, merchant
//! subtype, and language.
//!
//! Two independent indicator sets are scored against the text. Invoice
//! indicators are rarer and stronger signals, hence the asymmetric
//! thresholds.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Invoice indicator matches required to classify as a professional invoice.
const INVOICE_MIN_INDICATORS: usize = 2;
/// Receipt indicator matches required to classify as a till receipt.
const RECEIPT_MIN_INDICATORS: usize = 3;

/// Kind of document the extraction profile targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Receipt,
    ProfessionalInvoice,
    Unknown,
}

/// Dominant language of the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Nl,
    En,
    Mixed,
}

/// Classification of one document; created once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentClassification {
    pub kind: DocumentKind,
    /// Merchant or category guess; "general" when nothing matched.
    pub subtype: String,
    pub language: Language,
}

lazy_static! {
    /// Due-date labels, VAT/registration labels, invoice headers,
    /// supplier/customer labels.
    static ref INVOICE_INDICATORS: Vec<Regex> = [
        r"(?i)factuurdatum",
        r"(?i)factuurnummer",
        r"(?i)factuuradres",
        r"(?i)vervaldatum",
        r"(?i)btw[-\s]?nummer",
        r"(?i)kvk[-\s]?(?:nummer)?\b",
        r"(?i)betalingstermijn",
        r"(?i)debiteur",
        r"(?i)leverancier",
        r"(?i)invoice\s*(?:no\.?|number|date)",
        r"(?i)due\s+date",
        r"(?i)vat\s*(?:no\.?|number|reg)",
        r"(?i)payment\s+terms",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Till/subtotal/loyalty/payment-terminal vocabulary.
    static ref RECEIPT_INDICATORS: Vec<Regex> = [
        r"(?i)subtotaal",
        r"(?i)\btotaal\b",
        r"(?i)\bkass?a\b",
        r"(?i)kassabon",
        r"(?i)bonuskaart",
        r"(?i)koopzegels",
        r"(?i)pinnen",
        r"(?i)contant",
        r"(?i)betaald",
        r"(?i)filiaal",
        r"(?i)terminal",
        r"(?i)transactie",
        r"(?i)uw\s*voordeel",
        r"(?i)air\s*miles",
        r"(?i)statiegeld",
        r"(?i)emballage",
        r"(?i)wisselgeld",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Known merchant names for subtype detection, matched case-insensitively;
/// the longest matching name wins.
const KNOWN_MERCHANTS: &[&str] = &[
    "albert heijn",
    "jumbo",
    "lidl",
    "aldi",
    "plus",
    "dirk van den broek",
    "dirk",
    "coop",
    "spar",
    "hema",
    "action",
    "kruidvat",
    "etos",
    "blokker",
    "gall & gall",
    "praxis",
    "gamma",
    "mediamarkt",
];

const DUTCH_STOPWORDS: &[&str] = &["de", "het", "een", "en", "van", "voor", "met", "niet", "uw"];
const ENGLISH_STOPWORDS: &[&str] = &["the", "a", "an", "and", "of", "for", "with", "not", "your"];

/// Classify a document text. Total function: always returns a best-effort
/// classification, defaulting to unknown/general/mixed.
pub fn classify(text: &str) -> DocumentClassification {
    let invoice_hits = count_indicators(&INVOICE_INDICATORS, text);
    let receipt_hits = count_indicators(&RECEIPT_INDICATORS, text);

    let kind = if invoice_hits >= INVOICE_MIN_INDICATORS {
        DocumentKind::ProfessionalInvoice
    } else if receipt_hits >= RECEIPT_MIN_INDICATORS {
        DocumentKind::Receipt
    } else {
        DocumentKind::Unknown
    };

    let subtype = detect_merchant(text);
    let language = detect_language(text);

    debug!(
        ?kind,
        subtype = %subtype,
        ?language,
        invoice_hits,
        receipt_hits,
        "classified document"
    );

    DocumentClassification {
        kind,
        subtype,
        language,
    }
}

fn count_indicators(indicators: &[Regex], text: &str) -> usize {
    indicators.iter().filter(|re| re.is_match(text)).count()
}

fn detect_merchant(text: &str) -> String {
    let lowered = text.to_lowercase();

    KNOWN_MERCHANTS
        .iter()
        .filter(|name| lowered.contains(*name))
        .max_by_key(|name| name.len())
        .map(|name| name.to_string())
        .unwrap_or_else(|| "general".to_string())
}

fn detect_language(text: &str) -> Language {
    let mut dutch = 0usize;
    let mut english = 0usize;

    for token in text.split_whitespace() {
        let token: String = token
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();
        if token.is_empty() {
            continue;
        }
        if DUTCH_STOPWORDS.contains(&token.as_str()) {
            dutch += 1;
        }
        if ENGLISH_STOPWORDS.contains(&token.as_str()) {
            english += 1;
        }
    }

    if dutch > english {
        Language::Nl
    } else if english > dutch {
        Language::En
    } else {
        Language::Mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_vocabulary_classifies_as_receipt() {
        let text = "ALBERT HEIJN\nFILIAAL 1427\nSUBTOTAAL: 40,24\nPINNEN: 43,85\nBONUSKAART";
        let classification = classify(text);
        assert_eq!(classification.kind, DocumentKind::Receipt);
        assert_eq!(classification.subtype, "albert heijn");
    }

    #[test]
    fn invoice_labels_beat_receipt_vocabulary() {
        // "totaal" alone also hits the receipt set; invoice indicators are
        // checked first.
        let text = "Factuurdatum: 01-08-2025\nBtw-nummer: NL123456789B01\nTotaal: 100,00";
        let classification = classify(text);
        assert_eq!(classification.kind, DocumentKind::ProfessionalInvoice);
    }

    #[test]
    fn empty_text_gives_defaults() {
        let classification = classify("");
        assert_eq!(classification.kind, DocumentKind::Unknown);
        assert_eq!(classification.subtype, "general");
        assert_eq!(classification.language, Language::Mixed);
    }

    #[test]
    fn language_majority_vote() {
        assert_eq!(
            classify("de kassa en de bon van uw winkel met korting").language,
            Language::Nl
        );
        assert_eq!(
            classify("the total of your purchase and the receipt for the order").language,
            Language::En
        );
    }

    #[test]
    fn longest_merchant_name_wins() {
        // "dirk" is a prefix of "dirk van den broek"; the longer match is
        // the more specific one.
        let c = classify("DIRK VAN DEN BROEK\nSUBTOTAAL");
        assert_eq!(c.subtype, "dirk van den broek");
    }
}
