//! Stored row types.
//!
//! These are the durable schema: plain structs held in [`crate::store::Tables`].
//! Monetary columns are `Money` (integer minor units), timestamps UTC.

use bursar_shared::types::{
    AccountId, AllocationId, CreditTxId, EntryId, FeeCategoryId, InvoiceId, LineId, Money,
    PaymentId, ReceiptId, SubjectId, TermId, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};

use bursar_core::allocation::{InvoiceSnapshot, InvoiceStatus};
use bursar_core::credit::{CreditTxSnapshot, CreditTxType};
use bursar_core::idempotency::PaymentMethod;
use bursar_core::ledger::{AccountInfo, AccountType, EntryKind};
use bursar_core::workflow::ApprovalStatus;

/// A chart-of-accounts row. Soft-deactivated, never deleted.
#[derive(Debug, Clone)]
pub struct AccountRow {
    /// The account ID.
    pub id: AccountId,
    /// Unique stable code; the identifier used everywhere.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification; fixes the normal balance side.
    pub account_type: AccountType,
    /// Inactive accounts reject new postings.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AccountRow {
    /// The facts the posting validator needs.
    #[must_use]
    pub fn info(&self) -> AccountInfo {
        AccountInfo {
            id: self.id,
            code: self.code.clone(),
            account_type: self.account_type,
            is_active: self.is_active,
        }
    }
}

/// An account holder (student), carrying the credit balance cache.
#[derive(Debug, Clone)]
pub struct SubjectRow {
    /// The subject ID.
    pub id: SubjectId,
    /// Display name.
    pub name: String,
    /// Write-through cache of the credit ledger fold. Never read for
    /// allocation decisions.
    pub credit_balance: Money,
}

/// A journal entry header. Immutable once created except for the
/// void/approval columns.
#[derive(Debug, Clone)]
pub struct JournalEntryRow {
    /// The entry ID.
    pub id: EntryId,
    /// Unique reference, `JE-<seq>`.
    pub reference: String,
    /// The entry date.
    pub entry_date: NaiveDate,
    /// Entry category.
    pub kind: EntryKind,
    /// Free-text description.
    pub description: String,
    /// Optional linked subject.
    pub subject_id: Option<SubjectId>,
    /// Optional linked term.
    pub term_id: Option<TermId>,
    /// Posted entries count toward reports.
    pub is_posted: bool,
    /// Voided entries are flagged, never deleted.
    pub is_voided: bool,
    /// Why the entry was voided.
    pub void_reason: Option<String>,
    /// Who voided it.
    pub voided_by: Option<UserId>,
    /// When it was voided.
    pub voided_at: Option<DateTime<Utc>>,
    /// Review state for deferred voids.
    pub approval_status: ApprovalStatus,
    /// The reason given when a void was deferred for review.
    pub pending_void_reason: Option<String>,
    /// Who requested the deferred void.
    pub pending_void_by: Option<UserId>,
    /// Reviewer notes from approve/reject.
    pub review_notes: Option<String>,
    /// Who created the entry.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A journal entry line. Exactly one of debit/credit is positive.
#[derive(Debug, Clone)]
pub struct JournalLineRow {
    /// The line ID.
    pub id: LineId,
    /// The owning entry.
    pub entry_id: EntryId,
    /// The posted account.
    pub account_id: AccountId,
    /// Debit amount (zero if the line credits).
    pub debit: Money,
    /// Credit amount (zero if the line debits).
    pub credit: Money,
    /// Stable ordering within the entry.
    pub line_no: u32,
    /// Free-text description.
    pub description: Option<String>,
}

/// One billed item on an invoice. Fixed at creation.
#[derive(Debug, Clone)]
pub struct InvoiceItemRow {
    /// The fee category.
    pub category_id: FeeCategoryId,
    /// Item description.
    pub description: String,
    /// Item amount.
    pub amount: Money,
}

/// An invoice row. Mutated only by allocation and cancellation.
#[derive(Debug, Clone)]
pub struct InvoiceRow {
    /// The invoice ID.
    pub id: InvoiceId,
    /// Unique number, `INV-<seq>`.
    pub number: String,
    /// The billed subject.
    pub subject_id: SubjectId,
    /// The academic term.
    pub term_id: TermId,
    /// The invoice date.
    pub invoice_date: NaiveDate,
    /// The due date.
    pub due_date: NaiveDate,
    /// Original billed amount; immutable.
    pub total: Money,
    /// Cumulative amount paid.
    pub amount_paid: Money,
    /// Derived status.
    pub status: InvoiceStatus,
    /// The billed items.
    pub items: Vec<InvoiceItemRow>,
    /// The companion revenue-recognition entry.
    pub entry_id: Option<EntryId>,
    /// Who created the invoice.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl InvoiceRow {
    /// The facts the allocation engine needs.
    #[must_use]
    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot {
            id: self.id,
            subject_id: self.subject_id,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            total: self.total,
            amount_paid: self.amount_paid,
            status: self.status,
        }
    }
}

/// Which way the money moved. Fee collection records inbound rows;
/// outbound is reserved for disbursements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentDirection {
    /// Money received from the subject.
    Inbound,
    /// Money paid out to the subject.
    Outbound,
}

/// A payment row, linking the tendered money to its GL entry and receipt.
#[derive(Debug, Clone)]
pub struct PaymentRow {
    /// The payment ID.
    pub id: PaymentId,
    /// The paying subject.
    pub subject_id: SubjectId,
    /// The payment amount.
    pub amount: Money,
    /// The payment date.
    pub payment_date: NaiveDate,
    /// Which way the money moved.
    pub direction: PaymentDirection,
    /// How the payment was tendered.
    pub method: PaymentMethod,
    /// External reference (bank transaction or cheque number).
    pub reference: Option<String>,
    /// Caller-supplied idempotency key, truncated; unique among
    /// non-voided payments.
    pub idempotency_key: Option<String>,
    /// The invoice a targeted payment aimed at.
    pub invoice_id: Option<InvoiceId>,
    /// The companion GL entry.
    pub entry_id: EntryId,
    /// The issued receipt.
    pub receipt_id: ReceiptId,
    /// Voided in lockstep with the GL entry.
    pub is_voided: bool,
    /// Who recorded the payment.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A receipt row, 1:1 with a payment.
#[derive(Debug, Clone)]
pub struct ReceiptRow {
    /// The receipt ID.
    pub id: ReceiptId,
    /// Unique number, `RCT-<seq>`.
    pub number: String,
    /// The receipted payment.
    pub payment_id: PaymentId,
    /// The receipted amount.
    pub amount: Money,
    /// How many times the receipt has been printed.
    pub print_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An append-only credit ledger row.
#[derive(Debug, Clone)]
pub struct CreditTxRow {
    /// The transaction ID.
    pub id: CreditTxId,
    /// The subject whose balance it affects.
    pub subject_id: SubjectId,
    /// The transaction type; fixes the sign.
    pub tx_type: CreditTxType,
    /// Positive magnitude.
    pub amount: Money,
    /// The invoice an application targeted.
    pub invoice_id: Option<InvoiceId>,
    /// The payment whose remainder produced this row.
    pub payment_id: Option<PaymentId>,
    /// For `Refunded` rows, the `Received` row being reversed. At most
    /// one refund may point at any given row.
    pub reverses: Option<CreditTxId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Who created the row.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CreditTxRow {
    /// The facts the balance fold needs.
    #[must_use]
    pub fn snapshot(&self) -> CreditTxSnapshot {
        CreditTxSnapshot {
            id: self.id,
            subject_id: self.subject_id,
            tx_type: self.tx_type,
            amount: self.amount,
            invoice_id: self.invoice_id,
            notes: self.notes.clone(),
            created_at: self.created_at,
        }
    }
}

/// What produced an allocation: a direct payment or a credit application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationSource {
    /// A recorded payment.
    Payment(PaymentId),
    /// An applied credit transaction.
    Credit(CreditTxId),
}

/// The exact split of one payment/credit event across invoices; used to
/// reverse allocations precisely when voiding.
#[derive(Debug, Clone)]
pub struct AllocationRow {
    /// The allocation ID.
    pub id: AllocationId,
    /// The funding event.
    pub source: AllocationSource,
    /// The target invoice.
    pub invoice_id: InvoiceId,
    /// The applied amount.
    pub amount: Money,
    /// Set when the funding payment is voided. Reversed rows are kept
    /// for the audit trail and ignored by any later unwind.
    pub is_reversed: bool,
}
