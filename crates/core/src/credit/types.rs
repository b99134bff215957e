//! Credit ledger domain types.

use bursar_shared::types::{CreditTxId, InvoiceId, Money, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit transaction type, fixing the sign of its balance effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTxType {
    /// Credit granted to the subject (+).
    Received,
    /// Credit consumed by invoice allocation (−).
    Applied,
    /// Credit refunded or reversed out (−).
    Refunded,
}

impl CreditTxType {
    /// The sign this type applies to its amount when folding a balance.
    #[must_use]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Received => 1,
            Self::Applied | Self::Refunded => -1,
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "credit_received",
            Self::Applied => "credit_applied",
            Self::Refunded => "credit_refunded",
        }
    }
}

impl fmt::Display for CreditTxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a subject's credit ledger, as read for folding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditTxSnapshot {
    /// The transaction ID.
    pub id: CreditTxId,
    /// The subject whose balance it affects.
    pub subject_id: SubjectId,
    /// The transaction type.
    pub tx_type: CreditTxType,
    /// Positive magnitude; the sign comes from `tx_type`.
    pub amount: Money,
    /// The invoice an application targeted, if any.
    pub invoice_id: Option<InvoiceId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the row was appended.
    pub created_at: DateTime<Utc>,
}

impl CreditTxSnapshot {
    /// The signed balance effect of this row.
    #[must_use]
    pub fn signed_effect(&self) -> Money {
        Money::from_minor(self.amount.minor() * self.tx_type.sign())
    }
}
