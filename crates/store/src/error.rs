//! Operation-level errors.
//!
//! `OpError` is the store's single error type: it wraps the core engines'
//! errors and adds the storage-layer failures (missing rows, constraint
//! violations, injected faults). Validation and state-conflict variants
//! are rejected before any write; a `Storage` fault aborts and rolls back
//! the whole transaction.

use bursar_shared::types::{CreditTxId, EntryId, InvoiceId, PaymentId, ReceiptId, SubjectId};
use thiserror::Error;

use bursar_core::allocation::AllocationError;
use bursar_core::credit::CreditError;
use bursar_core::ledger::LedgerError;
use bursar_core::workflow::WorkflowError;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum OpError {
    /// Posting validation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Allocation validation failed.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Credit ledger operation failed.
    #[error(transparent)]
    Credit(#[from] CreditError),

    /// Void/approval transition failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// An account with this code already exists.
    #[error("Account code already in use: {0}")]
    AccountCodeTaken(String),

    /// The referenced subject does not exist.
    #[error("Subject not found: {0}")]
    SubjectNotFound(SubjectId),

    /// The referenced journal entry does not exist.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(EntryId),

    /// The referenced invoice does not exist.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// The referenced payment does not exist.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// The referenced receipt does not exist.
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(ReceiptId),

    /// The referenced credit transaction does not exist.
    #[error("Credit transaction not found: {0}")]
    CreditTxNotFound(CreditTxId),

    /// The payment is already voided.
    #[error("Payment already voided: {0}")]
    PaymentAlreadyVoided(PaymentId),

    /// An invoice needs at least one item.
    #[error("Invoice must have at least one item")]
    EmptyInvoiceItems,

    /// Invoice item amounts must be positive.
    #[error("Invoice item amounts must be positive")]
    NonPositiveInvoiceItem,

    /// The due date cannot precede the invoice date.
    #[error("Due date cannot be before the invoice date")]
    DueDateBeforeInvoiceDate,

    /// Only unpaid invoices can be cancelled.
    #[error("Invoice {0} has payments applied and cannot be cancelled")]
    InvoiceHasPayments(InvoiceId),

    /// The invoice is already cancelled.
    #[error("Invoice already cancelled: {0}")]
    InvoiceAlreadyCancelled(InvoiceId),

    /// A storage-layer fault; the transaction was rolled back.
    #[error("Storage fault: {0}")]
    Storage(String),
}

impl OpError {
    /// Stable machine-readable code for the API boundary.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.error_code(),
            Self::Allocation(e) => e.error_code(),
            Self::Credit(e) => e.error_code(),
            Self::Workflow(e) => e.error_code(),
            Self::AccountCodeTaken(_) => "ACCOUNT_CODE_TAKEN",
            Self::SubjectNotFound(_) => "SUBJECT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            Self::ReceiptNotFound(_) => "RECEIPT_NOT_FOUND",
            Self::CreditTxNotFound(_) => "CREDIT_TX_NOT_FOUND",
            Self::PaymentAlreadyVoided(_) => "PAYMENT_ALREADY_VOIDED",
            Self::EmptyInvoiceItems => "INVOICE_NO_ITEMS",
            Self::NonPositiveInvoiceItem => "INVOICE_NON_POSITIVE_ITEM",
            Self::DueDateBeforeInvoiceDate => "INVOICE_DUE_BEFORE_DATE",
            Self::InvoiceHasPayments(_) => "INVOICE_HAS_PAYMENTS",
            Self::InvoiceAlreadyCancelled(_) => "INVOICE_ALREADY_CANCELLED",
            Self::Storage(_) => "STORAGE_FAULT",
        }
    }

    /// True for expected business failures, false for storage faults.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
