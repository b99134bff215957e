//! Double-entry posting logic.
//!
//! This module implements the core journal functionality:
//! - Domain types for journal entry creation
//! - Business rule validation (balance, sides, amounts)
//! - Account code resolution
//! - Error types for posting operations

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use service::{AccountInfo, LedgerService};
pub use types::{
    AccountType, EntryKind, EntrySide, EntryTotals, LineInput, PostEntryInput, ResolvedLine,
};
pub use validation::validate_lines;
