//! Fingerprint types for replay detection.

use bursar_shared::types::{FeeCategoryId, Money, SubjectId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a payment was tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash over the counter.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Cheque deposit.
    Cheque,
    /// Mobile money transfer.
    MobileMoney,
}

impl PaymentMethod {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
            Self::MobileMoney => "mobile_money",
        }
    }

    /// Whether the tendered funds land in the cash drawer or the bank.
    #[must_use]
    pub const fn is_cash(self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fields that identify a payment for fuzzy replay matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFingerprint {
    /// The paying subject.
    pub subject_id: SubjectId,
    /// The payment amount.
    pub amount: Money,
    /// The payment date.
    pub payment_date: NaiveDate,
    /// The payment method.
    pub method: PaymentMethod,
    /// The external reference (bank/cheque number), if any.
    pub reference: Option<String>,
    /// The user who recorded it.
    pub created_by: UserId,
    /// When the row was created; only rows inside the replay window match.
    pub created_at: DateTime<Utc>,
}

/// One normalized invoice item, ready for order-independent comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemFingerprint {
    /// The fee category.
    pub category_id: FeeCategoryId,
    /// The item amount.
    pub amount: Money,
    /// The trimmed description.
    pub description: String,
}

/// The fields that identify an invoice for fuzzy replay matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFingerprint {
    /// The billed subject.
    pub subject_id: SubjectId,
    /// The invoice total.
    pub total: Money,
    /// The invoice date.
    pub invoice_date: NaiveDate,
    /// The user who created it.
    pub created_by: UserId,
    /// Normalized, sorted item set.
    pub items: Vec<ItemFingerprint>,
    /// When the row was created; only rows inside the replay window match.
    pub created_at: DateTime<Utc>,
}
