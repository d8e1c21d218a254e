//! Data models for the extraction engine.

pub mod field;
pub mod record;

pub use field::Field;
pub use record::{
    CompanyInfo, ExtractedRecord, FieldGroup, FinancialInfo, LineItem, LoyaltyInfo,
    PaymentMethod, TransactionInfo, supported_field_groups,
};
