//! Credit ledger errors.

use bursar_shared::types::{CreditTxId, Money};
use thiserror::Error;

use super::types::CreditTxType;

/// Errors from credit ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditError {
    /// Credit amounts must be positive.
    #[error("Credit amount must be positive")]
    NonPositiveAmount,

    /// Allocation was requested with no credit balance to apply.
    #[error("No credit balance to apply")]
    NoBalance,

    /// Allocation was requested with no outstanding invoices to pay.
    #[error("No outstanding invoices to apply credit to")]
    NoOutstandingInvoices,

    /// The referenced credit transaction does not exist.
    #[error("Credit transaction not found: {0}")]
    NotFound(CreditTxId),

    /// Only received credit can be reversed.
    #[error("Cannot reverse a {0} transaction; only received credit is reversible")]
    NotReversible(CreditTxType),

    /// The row already has a refund recorded against it.
    #[error("Credit transaction already reversed: {0}")]
    AlreadyReversed(CreditTxId),

    /// The remaining balance no longer covers the reversal.
    #[error("Credit balance {available} does not cover reversal of {requested}")]
    InsufficientBalance {
        /// The subject's current derived balance.
        available: Money,
        /// The amount the reversal would remove.
        requested: Money,
    },
}

impl CreditError {
    /// Stable machine-readable code for each variant.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "CREDIT_NON_POSITIVE",
            Self::NoBalance => "CREDIT_NO_BALANCE",
            Self::NoOutstandingInvoices => "CREDIT_NO_INVOICES",
            Self::NotFound(_) => "CREDIT_NOT_FOUND",
            Self::NotReversible(_) => "CREDIT_NOT_REVERSIBLE",
            Self::AlreadyReversed(_) => "CREDIT_ALREADY_REVERSED",
            Self::InsufficientBalance { .. } => "CREDIT_INSUFFICIENT_BALANCE",
        }
    }
}
