//! Error types for posting operations.

use bursar_shared::types::{EntryId, Money};
use thiserror::Error;

/// Errors that can occur during journal posting.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry must have at least one line.
    #[error("Entry must have at least one line")]
    NoLines,

    /// Entry is not balanced (debits != credits).
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Money,
        /// Total credit amount.
        credit: Money,
    },

    /// Line amount must be positive.
    #[error("Line {line_no} amount must be positive")]
    NonPositiveAmount {
        /// The offending line number.
        line_no: u32,
    },

    /// A line carries both a debit and a credit amount.
    #[error("Line {line_no} has both debit and credit set")]
    BothSidesSet {
        /// The offending line number.
        line_no: u32,
    },

    /// A line carries neither a debit nor a credit amount.
    #[error("Line {line_no} has neither debit nor credit set")]
    NoSideSet {
        /// The offending line number.
        line_no: u32,
    },

    // ========== Account Errors ==========
    /// Account code not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    // ========== Entry State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Entry is already voided.
    #[error("Journal entry {0} is already voided")]
    AlreadyVoided(EntryId),

    // ========== Storage Errors ==========
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoLines => "NO_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::BothSidesSet { .. } => "BOTH_SIDES_SET",
            Self::NoSideSet { .. } => "NO_SIDE_SET",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AlreadyVoided(_) => "ALREADY_VOIDED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}
