//! Allocation errors.

use bursar_shared::types::Money;
use thiserror::Error;

use super::types::InvoiceStatus;

/// Errors from planning or validating an allocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// The amount to apply must be positive.
    #[error("Amount to apply must be positive")]
    NonPositiveAmount,

    /// The targeted invoice belongs to a different account holder.
    #[error("Invoice belongs to a different student")]
    WrongSubject,

    /// The targeted invoice cannot receive payments in its current status.
    #[error("Invoice is {0} and cannot receive payments")]
    NotAllocatable(InvoiceStatus),

    /// The targeted amount exceeds what the invoice still owes.
    #[error("Amount {requested} exceeds outstanding balance {outstanding}")]
    ExceedsOutstanding {
        /// The requested application amount.
        requested: Money,
        /// The invoice's outstanding balance.
        outstanding: Money,
    },
}

impl AllocationError {
    /// Stable machine-readable code for each variant.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "ALLOC_NON_POSITIVE",
            Self::WrongSubject => "ALLOC_WRONG_SUBJECT",
            Self::NotAllocatable(_) => "ALLOC_NOT_ALLOCATABLE",
            Self::ExceedsOutstanding { .. } => "ALLOC_EXCEEDS_OUTSTANDING",
        }
    }
}
