//! Invoice and allocation domain types.

use bursar_shared::types::{InvoiceId, Money, SubjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invoice lifecycle status, derived from cumulative payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created, nothing paid yet.
    Pending,
    /// Issued and awaiting payment; allocatable like `Pending`.
    Outstanding,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Cancelled before any payment; excluded from allocation.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if payments may still be applied to the invoice.
    #[must_use]
    pub const fn is_allocatable(self) -> bool {
        matches!(self, Self::Pending | Self::Outstanding | Self::Partial)
    }

    /// Derives the status after a change to `amount_paid`.
    ///
    /// Boundary rule: paid >= total ⇒ Paid; 0 < paid < total ⇒ Partial;
    /// paid == 0 ⇒ the current (Pending/Outstanding) status is kept.
    #[must_use]
    pub fn derive(current: Self, amount_paid: Money, total: Money) -> Self {
        if amount_paid >= total && total.is_positive() {
            Self::Paid
        } else if amount_paid.is_positive() {
            Self::Partial
        } else {
            match current {
                Self::Partial | Self::Paid => Self::Pending,
                other => other,
            }
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Outstanding => "outstanding",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The invoice facts the allocation engine needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSnapshot {
    /// The invoice ID.
    pub id: InvoiceId,
    /// The account holder the invoice bills.
    pub subject_id: SubjectId,
    /// The invoice date.
    pub invoice_date: NaiveDate,
    /// The due date.
    pub due_date: NaiveDate,
    /// The original billed amount.
    pub total: Money,
    /// Cumulative amount paid so far.
    pub amount_paid: Money,
    /// Current status.
    pub status: InvoiceStatus,
}

impl InvoiceSnapshot {
    /// The amount still owed.
    #[must_use]
    pub fn outstanding(&self) -> Money {
        self.total - self.amount_paid
    }

    /// Returns true if the due date has passed as of `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }
}

/// One planned application of money to one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAllocation {
    /// The target invoice.
    pub invoice_id: InvoiceId,
    /// The amount applied to it.
    pub amount: Money,
    /// The invoice's `amount_paid` after this allocation.
    pub new_amount_paid: Money,
    /// The invoice's status after this allocation.
    pub new_status: InvoiceStatus,
}

/// The full plan for applying one payment or credit balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Per-invoice allocations, in application order.
    pub allocations: Vec<PlannedAllocation>,
    /// Total applied across invoices.
    pub applied_total: Money,
    /// Amount left over after all invoices were satisfied.
    pub remainder: Money,
}
