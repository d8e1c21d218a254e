//! Regex patterns for Dutch receipt and invoice extraction.
//!
//! Every labeled numeric field carries at least two variants: one assuming
//! normal spacing ("SUBTOTAAL: 40,24") and one assuming the upstream text
//! source stripped whitespace ("SUBTOTAAL40,24"). Profiles consume these as
//! ordered lists, spaced variant first.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Subtotal lines, optionally prefixed with the printed item count
    // ("21 SUBTOTAAL: 40,24"). Capture 1 = count, capture 2 = amount.
    pub static ref SUBTOTAL_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:(\d{1,3})\s+)?SUBTOTAAL\s*:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    pub static ref SUBTOTAL_COMPRESSED: Regex = Regex::new(
        r"(?i)(\d{1,3})?SUBTOTAAL:?(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    // Grand total. The compressed variant must not pick up SUBTOTAAL, hence
    // the non-letter guard before the label.
    pub static ref TOTAL_SPACED: Regex = Regex::new(
        r"(?im)^\s*TOTAAL\s*:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    pub static ref TOTAL_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:^|[^A-Za-z])TOTAAL:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    // Professional-invoice totals. Invoice amounts can carry a thousands
    // separator ("1.210,00"), receipt amounts never do.
    pub static ref INVOICE_TOTAL_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:totaal\s*te\s*betalen|te\s*betalen|totaalbedrag|total\s*due|amount\s*due)\s*:?\s*(?:€\s*)?(-?\d{1,3}(?:[.,]\d{3})*[.,]\d{2})"
    ).unwrap();

    pub static ref INVOICE_TOTAL_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:totaal\s*te\s*betalen|totaalbedrag|total\s*due|amount\s*due):?\s*(?:€\s*)?(-?\d{1,3}(?:[.,]\d{3})*[.,]\d{2})"
    ).unwrap();

    // Printed loyalty advantage total ("UW VOORDEEL: 3,79").
    pub static ref VOORDEEL_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:UW|TOTAAL)\s+VOORDEEL\s*:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    pub static ref VOORDEEL_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:UW|TOTAAL)\s*VOORDEEL:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    // Koopzegels stamp reward ("74 KOOPZEGELS PREMIUM: 7,40").
    pub static ref KOOPZEGELS_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:\d{1,4}\s+)?KOOPZEGELS(?:\s+PREMIUM)?\s*:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    pub static ref KOOPZEGELS_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:\d{1,4})?KOOPZEGELS(?:\s*PREMIUM)?:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    // Itemized bonus/discount lines; source prints these with a minus sign.
    pub static ref BONUS_LINE_SPACED: Regex = Regex::new(
        r"(?im)^.*\bBONUS\b.*?(-\d{1,4}[.,]\d{2})\s*$"
    ).unwrap();

    pub static ref BONUS_LINE_COMPRESSED: Regex = Regex::new(
        r"(?i)BONUS[^\n]*?(-\d{1,4}[.,]\d{2})"
    ).unwrap();

    // Deposit/return lines.
    pub static ref DEPOSIT_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:EMBALLAGE|STATIEGELD)\b.*?(-?\d{1,4}[.,]\d{2})\s*$"
    ).unwrap();

    pub static ref DEPOSIT_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:EMBALLAGE|STATIEGELD):?\s*(-?\d{1,4}[.,]\d{2})"
    ).unwrap();

    // Per-rate tax rows ("9%: 31,98 2,88" = rate, taxed base, tax amount).
    // The fixed two-decimal tail keeps the compressed form ("9%:31,982,88")
    // unambiguous.
    pub static ref TAX_ROW_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:BTW\s*)?(\d{1,2})\s*%\s*:?\s*(\d{1,5}[.,]\d{2})\s+(\d{1,5}[.,]\d{2})"
    ).unwrap();

    pub static ref TAX_ROW_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:BTW)?(\d{1,2})%:?\s*(\d{1,5}[.,]\d{2})\s*(\d{1,5}[.,]\d{2})"
    ).unwrap();

    // Invoice-style single-amount tax lines ("BTW 21%: 210,00").
    pub static ref INVOICE_TAX: Regex = Regex::new(
        r"(?i)BTW\s*(\d{1,2})\s*%\s*:?\s*(?:€\s*)?(\d{1,3}(?:[.,]\d{3})*[.,]\d{2})"
    ).unwrap();

    // Combined tax total.
    pub static ref TAX_TOTAL_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:BTW\s+TOTAAL|TOTAAL\s+BTW|TOTAL\s+VAT)\s*:?\s*(\d{1,6}[.,]\d{2})"
    ).unwrap();

    pub static ref TAX_TOTAL_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:BTW\s*TOTAAL|TOTAAL\s*BTW|TOTAL\s*VAT):?\s*(\d{1,6}[.,]\d{2})"
    ).unwrap();

    // Payment lines. Capture 1 = method label, capture 2 = amount.
    pub static ref PAYMENT_SPACED: Regex = Regex::new(
        r"(?im)^\s*(PINNEN|CONTANT|MAESTRO|VPAY|CREDITCARD|CADEAUKAART|GEPAST)\s*:?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    pub static ref PAYMENT_COMPRESSED: Regex = Regex::new(
        r"(?i)(PINNEN|CONTANT|MAESTRO|VPAY|CREDITCARD|CADEAUKAART|GEPAST):?\s*(-?\d{1,5}[.,]\d{2})"
    ).unwrap();

    // Store / transaction identifiers. Label-based, tolerant of a missing
    // colon or space.
    pub static ref STORE_ID_SPACED: Regex = Regex::new(
        r"(?im)^\s*(?:FILIAAL|WINKEL)\s*:?\s*(\d{2,6})"
    ).unwrap();

    pub static ref STORE_ID_COMPRESSED: Regex = Regex::new(
        r"(?i)(?:FILIAAL|WINKEL):?(\d{2,6})"
    ).unwrap();

    pub static ref TRANSACTION_ID: Regex = Regex::new(
        r"(?i)TRANSACTIE(?:\s*(?:NR\.?|NUMMER))?\s*:?\s*([A-Z0-9]{4,20})"
    ).unwrap();

    pub static ref TERMINAL_ID: Regex = Regex::new(
        r"(?i)(?:TERM(?:INAL)?(?:\s*ID)?|POI)\s*:?\s*([A-Z0-9]{4,16})"
    ).unwrap();

    pub static ref MERCHANT_ID: Regex = Regex::new(
        r"(?i)MERCHANT(?:\s*ID)?\s*:?\s*([A-Z0-9]{4,16})"
    ).unwrap();

    // Masked loyalty numbers.
    pub static ref LOYALTY_CARD_SPACED: Regex = Regex::new(
        r"(?im)^\s*BONUSKAART\s*:?\s*([0-9Xx*]{4,19})"
    ).unwrap();

    pub static ref LOYALTY_CARD_COMPRESSED: Regex = Regex::new(
        r"(?i)BONUSKAART:?([0-9Xx*]{4,19})"
    ).unwrap();

    pub static ref MILES_NUMBER: Regex = Regex::new(
        r"(?i)AIR\s*MILES\s*(?:NR\.?)?\s*:?\s*([0-9Xx*]{4,19})"
    ).unwrap();

    // Invoice numbers.
    pub static ref INVOICE_NUMBER_NL: Regex = Regex::new(
        r"(?i)factuur(?:nummer|nr\.?)\s*:?\s*([A-Za-z0-9/_-]{3,24})"
    ).unwrap();

    pub static ref INVOICE_NUMBER_EN: Regex = Regex::new(
        r"(?i)invoice\s*(?:no\.?|number)\s*:?\s*([A-Za-z0-9/_-]{3,24})"
    ).unwrap();

    // Dates. The year group deliberately has no trailing boundary so a time
    // glued to the date in compressed text ("22/08/202512:55") still parses.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[-/.](\d{1,2})[-/.](20\d{2})"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(20\d{2})[-/.](\d{1,2})[-/.](\d{1,2})"
    ).unwrap();

    pub static ref DATE_DMY_SHORT: Regex = Regex::new(
        r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{2})\b"
    ).unwrap();

    pub static ref DATE_DUTCH_LONG: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+(januari|februari|maart|april|mei|juni|juli|augustus|september|oktober|november|december)\s+(20\d{2})"
    ).unwrap();

    pub static ref LABELED_INVOICE_DATE: Regex = Regex::new(
        r"(?i)factuurdatum\s*:?\s*([^\n]+)"
    ).unwrap();

    pub static ref LABELED_DATE: Regex = Regex::new(
        r"(?i)\bdatum\s*:?\s*([^\n]+)"
    ).unwrap();

    // Time of day. No leading boundary: in compressed text the hour can be
    // glued to the preceding year digits.
    pub static ref TIME_HM: Regex = Regex::new(
        r"(\d{1,2}):(\d{2})(?::\d{2})?\b"
    ).unwrap();

    // Company info.
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    pub static ref WEBSITE: Regex = Regex::new(
        r"(?i)\b(?:https?://)?www\.[a-z0-9-]+(?:\.[a-z]{2,})+\b"
    ).unwrap();

    pub static ref PHONE_NL: Regex = Regex::new(
        r"(?:\+31[\s-]?|\b0)\d{1,3}[\s-]?\d{6,8}\b"
    ).unwrap();

    pub static ref POSTAL_LINE_NL: Regex = Regex::new(
        r"(?m)^.*\b\d{4}\s?[A-Z]{2}\b.*$"
    ).unwrap();

    pub static ref BTW_NUMBER: Regex = Regex::new(
        r"(?i)\b(NL\s?\d{9}\s?B\s?\d{2})\b"
    ).unwrap();

    pub static ref KVK_NUMBER: Regex = Regex::new(
        r"(?i)KvK\s*(?:nr\.?|nummer)?\s*:?\s*(\d{8})\b"
    ).unwrap();

    pub static ref IBAN_NL: Regex = Regex::new(
        r"(?i)\b(NL\d{2}\s?[A-Z]{4}\s?\d{4}\s?\d{4}\s?\d{2})\b"
    ).unwrap();

    // Product lines. Spaced: optional quantity, name, trailing price with
    // optional tax-class letter. Compressed: same with whitespace gone.
    pub static ref ITEM_LINE_SPACED: Regex = Regex::new(
        r"(?i)^(?:(\d{1,2})\s+)?(.+?)\s+(-?\d{1,4}[.,]\d{2})\s*[AB]?\s*$"
    ).unwrap();

    pub static ref ITEM_LINE_COMPRESSED: Regex = Regex::new(
        r"(?i)^(\d{1,2})?([A-Za-z][A-Za-z .'&%-]{2,}?)(-?\d{1,4}[.,]\d{2})$"
    ).unwrap();
}
