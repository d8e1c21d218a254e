//! CLI subcommands.

pub mod analyze;
pub mod batch;
pub mod fields;
