//! Company/merchant information extraction.

use super::patterns::{BTW_NUMBER, EMAIL, IBAN_NL, KVK_NUMBER, PHONE_NL, POSTAL_LINE_NL, WEBSITE};
use crate::classify::DocumentClassification;
use crate::models::{CompanyInfo, Field};

/// Line lengths outside this range are not plausible company names.
const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 40;

/// Extract the company block.
///
/// The name is the first plausible line of the document, falling back to
/// the merchant subtype the classifier detected; the address is the line
/// carrying a Dutch postal code.
pub fn extract_company(text: &str, classification: &DocumentClassification) -> CompanyInfo {
    let name = first_plausible_name(text)
        .or_else(|| match classification.subtype.as_str() {
            "general" => None,
            subtype => Some(subtype.to_uppercase()),
        })
        .into();

    let address = POSTAL_LINE_NL
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .into();

    CompanyInfo {
        name,
        address,
        phone: PHONE_NL.find(text).map(|m| m.as_str().to_string()).into(),
        email: EMAIL.find(text).map(|m| m.as_str().to_string()).into(),
        website: WEBSITE.find(text).map(|m| m.as_str().to_string()).into(),
        tax_id: BTW_NUMBER
            .captures(text)
            .map(|caps| caps[1].replace(' ', "").to_uppercase())
            .into(),
        registration_id: KVK_NUMBER
            .captures(text)
            .map(|caps| caps[1].to_string())
            .into(),
        iban: IBAN_NL
            .captures(text)
            .map(|caps| caps[1].replace(' ', "").to_uppercase())
            .into(),
    }
}

fn first_plausible_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| {
            (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&line.len())
                && line.chars().any(|c| c.is_alphabetic())
                && !line.chars().any(|c| c.is_ascii_digit())
        })
        .map(str::to_string)
}
