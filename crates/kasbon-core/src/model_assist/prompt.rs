//! System prompt for the model-assisted extractor.
//!
//! The schema embedded here mirrors the serde representation of
//! [`ExtractedRecord`](crate::models::ExtractedRecord) exactly, so a
//! well-formed model response deserializes without any mapping step.

/// Instructions sent as the system message of every completion request.
pub const SYSTEM_PROMPT: &str = r#"You extract structured data from Dutch retail receipts and invoices.

You receive the raw text of one document. Reply with a single JSON object
matching this schema and nothing else. No markdown fences, no commentary.

{
  "company": {
    "name": "string or \"unknown\"",
    "address": "string or \"unknown\"",
    "phone": "string or \"unknown\"",
    "email": "string or \"unknown\"",
    "website": "string or \"unknown\"",
    "tax_id": "BTW number or \"unknown\"",
    "registration_id": "KvK number or \"unknown\"",
    "iban": "string or \"unknown\""
  },
  "transaction": {
    "date": "YYYY-MM-DD or \"unknown\"",
    "time": "HH:MM or \"unknown\"",
    "invoice_number": "string or \"unknown\"",
    "store_id": "string or \"unknown\"",
    "transaction_id": "string or \"unknown\"",
    "terminal_id": "string or \"unknown\"",
    "merchant_id": "string or \"unknown\""
  },
  "financial": {
    "subtotal_before_discount": "number or \"unknown\"",
    "subtotal_after_discount": "number or \"unknown\"",
    "total_amount": "number or \"unknown\"",
    "currency": "ISO code, e.g. \"EUR\", or \"unknown\"",
    "tax": { "9%": 2.88, "21%": 0.28 },
    "tax_total": "number or \"unknown\"",
    "discount_amount": "number or \"unknown\"",
    "loyalty_discount_amount": "number or \"unknown\"",
    "stamp_amount": "number or \"unknown\"",
    "payment_method": "PIN, CASH, CARD, or the printed label",
    "payment_amounts": { "PIN": 43.85 }
  },
  "loyalty": {
    "card_number": "string or \"unknown\"",
    "miles_number": "string or \"unknown\""
  },
  "items": [
    {
      "name": "string",
      "quantity": 1,
      "unit_price": "number or \"unknown\"",
      "total_price": "number or \"unknown\"",
      "bonus": false,
      "bonus_amount": "number or \"unknown\""
    }
  ],
  "item_count": "number of line items, or \"unknown\"",
  "notes": ["short remarks about anything unusual"]
}

Rules:
- Use the string "unknown" for any field that is not present in the text.
  Never guess and never invent values.
- Amounts use a dot as the decimal separator and carry no currency symbol.
- Dutch receipts write amounts with a comma; convert "36,45" to 36.45.
- Tax keys are the printed rate with a percent sign, like "9%" and "21%".
- If the document is unreadable or not a receipt or invoice, still return
  the schema with every field "unknown" and explain in notes, including a
  short excerpt of the raw text.
- Reply with the JSON object only."#;

/// Builds the user message for one document.
pub fn user_prompt(text: &str) -> String {
    format!("Extract the fields from this document:\n\n{text}")
}
