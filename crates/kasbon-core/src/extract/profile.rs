//! Per-document-type pattern profiles.
//!
//! A profile is a data table mapping each field group to an ordered list of
//! candidate patterns; extractors consume these through a generic
//! first-match resolver instead of branching per merchant.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::*;
use crate::classify::{DocumentClassification, DocumentKind};

/// Ordered pattern lists for one extraction profile.
pub struct PatternProfile {
    pub name: &'static str,
    /// Capture 1 = optional printed item count, capture 2 = amount.
    pub subtotal: Vec<&'static Regex>,
    /// Capture 1 = amount.
    pub grand_total: Vec<&'static Regex>,
    pub loyalty_total: Vec<&'static Regex>,
    pub stamps: Vec<&'static Regex>,
    pub bonus_line: Vec<&'static Regex>,
    pub deposit_line: Vec<&'static Regex>,
    /// Capture 1 = rate, 2 = taxed base, 3 = tax amount.
    pub tax_row: Vec<&'static Regex>,
    /// Capture 1 = rate, 2 = tax amount.
    pub tax_amount_row: Vec<&'static Regex>,
    pub tax_total: Vec<&'static Regex>,
    /// Capture 1 = method label, 2 = amount.
    pub payment: Vec<&'static Regex>,
    pub store_id: Vec<&'static Regex>,
    pub transaction_id: Vec<&'static Regex>,
    pub terminal_id: Vec<&'static Regex>,
    pub merchant_id: Vec<&'static Regex>,
    pub loyalty_card: Vec<&'static Regex>,
    pub miles: Vec<&'static Regex>,
    pub invoice_number: Vec<&'static Regex>,
    /// Capture 1 = optional quantity, 2 = name, 3 = price.
    pub item_line: Vec<&'static Regex>,
}

lazy_static! {
    /// Generic till receipt.
    pub static ref RECEIPT_PROFILE: PatternProfile = PatternProfile {
        name: "receipt",
        subtotal: vec![&SUBTOTAL_SPACED, &SUBTOTAL_COMPRESSED],
        grand_total: vec![&TOTAL_SPACED, &TOTAL_COMPRESSED],
        loyalty_total: vec![&VOORDEEL_SPACED, &VOORDEEL_COMPRESSED],
        stamps: vec![&KOOPZEGELS_SPACED, &KOOPZEGELS_COMPRESSED],
        bonus_line: vec![&BONUS_LINE_SPACED, &BONUS_LINE_COMPRESSED],
        deposit_line: vec![&DEPOSIT_SPACED, &DEPOSIT_COMPRESSED],
        tax_row: vec![&TAX_ROW_SPACED, &TAX_ROW_COMPRESSED],
        tax_amount_row: vec![&INVOICE_TAX],
        tax_total: vec![&TAX_TOTAL_SPACED, &TAX_TOTAL_COMPRESSED],
        payment: vec![&PAYMENT_SPACED, &PAYMENT_COMPRESSED],
        store_id: vec![&STORE_ID_SPACED, &STORE_ID_COMPRESSED],
        transaction_id: vec![&TRANSACTION_ID],
        terminal_id: vec![&TERMINAL_ID],
        merchant_id: vec![&MERCHANT_ID],
        loyalty_card: vec![&LOYALTY_CARD_SPACED, &LOYALTY_CARD_COMPRESSED],
        miles: vec![&MILES_NUMBER],
        invoice_number: vec![&INVOICE_NUMBER_NL, &INVOICE_NUMBER_EN],
        item_line: vec![&ITEM_LINE_SPACED, &ITEM_LINE_COMPRESSED],
    };

    /// Professional invoice: invoice-total labels take precedence over the
    /// bare TOTAAL label, and single-amount BTW lines are expected.
    pub static ref INVOICE_PROFILE: PatternProfile = PatternProfile {
        name: "professional_invoice",
        subtotal: vec![&SUBTOTAL_SPACED, &SUBTOTAL_COMPRESSED],
        grand_total: vec![
            &INVOICE_TOTAL_SPACED,
            &INVOICE_TOTAL_COMPRESSED,
            &TOTAL_SPACED,
            &TOTAL_COMPRESSED,
        ],
        loyalty_total: vec![],
        stamps: vec![],
        bonus_line: vec![],
        deposit_line: vec![],
        tax_row: vec![&TAX_ROW_SPACED, &TAX_ROW_COMPRESSED],
        tax_amount_row: vec![&INVOICE_TAX],
        tax_total: vec![&TAX_TOTAL_SPACED, &TAX_TOTAL_COMPRESSED],
        payment: vec![&PAYMENT_SPACED, &PAYMENT_COMPRESSED],
        store_id: vec![],
        transaction_id: vec![&TRANSACTION_ID],
        terminal_id: vec![],
        merchant_id: vec![],
        loyalty_card: vec![],
        miles: vec![],
        invoice_number: vec![&INVOICE_NUMBER_NL, &INVOICE_NUMBER_EN],
        item_line: vec![&ITEM_LINE_SPACED, &ITEM_LINE_COMPRESSED],
    };
}

/// Select the pattern profile for a classification. Unknown documents get
/// the receipt profile as a best effort; its patterns are the superset.
pub fn select_profile(classification: &DocumentClassification) -> &'static PatternProfile {
    match classification.kind {
        DocumentKind::ProfessionalInvoice => &INVOICE_PROFILE,
        DocumentKind::Receipt | DocumentKind::Unknown => &RECEIPT_PROFILE,
    }
}
