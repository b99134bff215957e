//! Credit ledger operations.

use bursar_shared::types::{AllocationId, CreditTxId, Money, SubjectId, UserId};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use bursar_core::allocation::{AllocationService, OverdueFirst};
use bursar_core::credit::{CreditError, CreditService, CreditTxType};
use bursar_core::ledger::{EntryKind, EntrySide, LineInput, PostEntryInput};

use crate::error::OpError;
use crate::rows::{AllocationRow, AllocationSource, CreditTxRow};
use crate::store::{LedgerStore, Tables};

use super::payments::AllocationLine;
use super::posting::post_entry_on;

/// Outcome of granting credit.
#[derive(Debug, Clone, Serialize)]
pub struct AddCreditOutcome {
    /// The appended `Received` row.
    pub credit_tx_id: CreditTxId,
    /// The subject's balance after the grant.
    pub new_balance: Money,
    /// The companion GL entry's reference.
    pub entry_reference: String,
}

/// Outcome of applying a subject's credit balance.
#[derive(Debug, Clone, Serialize)]
pub struct CreditApplicationOutcome {
    /// Total credit applied across invoices.
    pub total_applied: Money,
    /// How many invoices received an application.
    pub invoices_affected: usize,
    /// Per-invoice applications, in priority order.
    pub allocations: Vec<AllocationLine>,
    /// The consolidated GL entry's reference.
    pub entry_reference: String,
    /// The subject's balance after application.
    pub remaining_balance: Money,
}

/// Outcome of reversing a received credit.
#[derive(Debug, Clone, Serialize)]
pub struct ReverseCreditOutcome {
    /// The appended `Refunded` row.
    pub refund_tx_id: CreditTxId,
    /// The subject's balance after the reversal.
    pub new_balance: Money,
    /// The companion GL entry's reference.
    pub entry_reference: String,
}

impl LedgerStore {
    /// The subject's authoritative credit balance: the fold over the
    /// append-only ledger, never the cache column.
    pub fn credit_balance(&self, subject_id: SubjectId) -> Result<Money, OpError> {
        self.read(|tables| {
            if !tables.subjects.contains_key(&subject_id) {
                return Err(OpError::SubjectNotFound(subject_id));
            }
            Ok(derived_balance(tables, subject_id))
        })
    }

    /// Grants credit: appends a `Received` row, syncs the cache, and posts
    /// the companion GL entry (funds arrived) in one transaction.
    pub fn add_credit(
        &mut self,
        subject_id: SubjectId,
        amount: Money,
        notes: Option<String>,
        actor: UserId,
    ) -> Result<AddCreditOutcome, OpError> {
        self.transaction("add_credit", move |tables, config| {
            CreditService::validate_grant(amount)?;
            if !tables.subjects.contains_key(&subject_id) {
                return Err(OpError::SubjectNotFound(subject_id));
            }

            let credit_tx_id = CreditTxId::new();
            tables.credit_txs.insert(
                credit_tx_id,
                CreditTxRow {
                    id: credit_tx_id,
                    subject_id,
                    tx_type: CreditTxType::Received,
                    amount,
                    invoice_id: None,
                    payment_id: None,
                    reverses: None,
                    notes,
                    created_by: actor,
                    created_at: Utc::now(),
                },
            );

            let entry_input = PostEntryInput {
                entry_date: Utc::now().date_naive(),
                kind: EntryKind::Adjustment,
                description: "Credit received".to_string(),
                subject_id: Some(subject_id),
                term_id: None,
                lines: vec![
                    LineInput {
                        account_code: config.chart.cash.clone(),
                        side: EntrySide::Debit,
                        amount,
                        description: None,
                    },
                    LineInput {
                        account_code: config.chart.student_credit.clone(),
                        side: EntrySide::Credit,
                        amount,
                        description: None,
                    },
                ],
                created_by: actor,
            };
            let (_, entry_reference, _) = post_entry_on(tables, &entry_input)?;

            let new_balance = derived_balance(tables, subject_id);
            if let Some(subject) = tables.subjects.get_mut(&subject_id) {
                subject.credit_balance = new_balance;
            }
            Ok(AddCreditOutcome {
                credit_tx_id,
                new_balance,
                entry_reference,
            })
        })
    }

    /// Applies the subject's entire credit balance across outstanding
    /// invoices, overdue first as of `as_of`, then ascending due date.
    ///
    /// Writes one `Applied` row per invoice touched and a single
    /// consolidated GL entry for the total, dated `as_of`, in one
    /// transaction.
    pub fn apply_credit(
        &mut self,
        subject_id: SubjectId,
        as_of: NaiveDate,
        actor: UserId,
    ) -> Result<CreditApplicationOutcome, OpError> {
        self.transaction("apply_credit", move |tables, config| {
            if !tables.subjects.contains_key(&subject_id) {
                return Err(OpError::SubjectNotFound(subject_id));
            }
            let snapshots: Vec<_> = tables
                .credit_rows_of(subject_id)
                .into_iter()
                .map(CreditTxRow::snapshot)
                .collect();
            let balance = CreditService::allocatable_balance(&snapshots)?;

            let invoices: Vec<_> = tables
                .invoices
                .values()
                .filter(|i| {
                    i.subject_id == subject_id
                        && i.status.is_allocatable()
                        && i.snapshot().outstanding().is_positive()
                })
                .map(crate::rows::InvoiceRow::snapshot)
                .collect();
            if invoices.is_empty() {
                return Err(OpError::Credit(CreditError::NoOutstandingInvoices));
            }

            let plan = AllocationService::plan(invoices, balance, &OverdueFirst, as_of)?;

            let mut allocation_lines = Vec::with_capacity(plan.allocations.len());
            for alloc in &plan.allocations {
                let applied_id = CreditTxId::new();
                let invoice_number = {
                    let invoice = tables
                        .invoices
                        .get_mut(&alloc.invoice_id)
                        .ok_or(OpError::InvoiceNotFound(alloc.invoice_id))?;
                    invoice.amount_paid = alloc.new_amount_paid;
                    invoice.status = alloc.new_status;
                    invoice.number.clone()
                };
                tables.credit_txs.insert(
                    applied_id,
                    CreditTxRow {
                        id: applied_id,
                        subject_id,
                        tx_type: CreditTxType::Applied,
                        amount: alloc.amount,
                        invoice_id: Some(alloc.invoice_id),
                        payment_id: None,
                        reverses: None,
                        notes: Some(format!("Applied to {invoice_number}")),
                        created_by: actor,
                        created_at: Utc::now(),
                    },
                );
                tables.allocations.push(AllocationRow {
                    id: AllocationId::new(),
                    source: AllocationSource::Credit(applied_id),
                    invoice_id: alloc.invoice_id,
                    amount: alloc.amount,
                    is_reversed: false,
                });
                tracing::debug!(
                    invoice = %invoice_number,
                    amount = %alloc.amount,
                    "credit applied"
                );
                allocation_lines.push(AllocationLine {
                    invoice_id: alloc.invoice_id,
                    invoice_number,
                    amount: alloc.amount,
                    new_status: alloc.new_status,
                });
            }

            // One consolidated GL entry for the applied total.
            let entry_input = PostEntryInput {
                entry_date: as_of,
                kind: EntryKind::CreditApplied,
                description: format!(
                    "Credit balance applied across {} invoice(s)",
                    allocation_lines.len()
                ),
                subject_id: Some(subject_id),
                term_id: None,
                lines: vec![
                    LineInput {
                        account_code: config.chart.accounts_receivable.clone(),
                        side: EntrySide::Debit,
                        amount: plan.applied_total,
                        description: None,
                    },
                    LineInput {
                        account_code: config.chart.student_credit.clone(),
                        side: EntrySide::Credit,
                        amount: plan.applied_total,
                        description: None,
                    },
                ],
                created_by: actor,
            };
            let (_, entry_reference, _) = post_entry_on(tables, &entry_input)?;

            let remaining_balance = derived_balance(tables, subject_id);
            if let Some(subject) = tables.subjects.get_mut(&subject_id) {
                subject.credit_balance = remaining_balance;
            }
            Ok(CreditApplicationOutcome {
                total_applied: plan.applied_total,
                invoices_affected: allocation_lines.len(),
                allocations: allocation_lines,
                entry_reference,
                remaining_balance,
            })
        })
    }

    /// Reverses a received credit: appends a `Refunded` row of the same
    /// amount and posts the refund GL entry. The original row is untouched.
    ///
    /// A row can be reversed at most once, and only while the subject's
    /// derived balance still covers it; credit already consumed by
    /// invoice applications cannot be refunded.
    pub fn reverse_credit(
        &mut self,
        credit_tx_id: CreditTxId,
        reason: &str,
        actor: UserId,
    ) -> Result<ReverseCreditOutcome, OpError> {
        let reason = reason.to_string();
        self.transaction("reverse_credit", move |tables, config| {
            let original = tables
                .credit_txs
                .get(&credit_tx_id)
                .cloned()
                .ok_or(OpError::CreditTxNotFound(credit_tx_id))?;
            let already_reversed = tables
                .credit_txs
                .values()
                .any(|c| c.reverses == Some(credit_tx_id));
            let available = derived_balance(tables, original.subject_id);
            CreditService::validate_reversal(&original.snapshot(), available, already_reversed)?;

            let refund_tx_id = CreditTxId::new();
            tables.credit_txs.insert(
                refund_tx_id,
                CreditTxRow {
                    id: refund_tx_id,
                    subject_id: original.subject_id,
                    tx_type: CreditTxType::Refunded,
                    amount: original.amount,
                    invoice_id: None,
                    payment_id: None,
                    reverses: Some(credit_tx_id),
                    notes: Some(reason),
                    created_by: actor,
                    created_at: Utc::now(),
                },
            );

            let entry_input = PostEntryInput {
                entry_date: Utc::now().date_naive(),
                kind: EntryKind::Refund,
                description: "Credit refunded".to_string(),
                subject_id: Some(original.subject_id),
                term_id: None,
                lines: vec![
                    LineInput {
                        account_code: config.chart.student_credit.clone(),
                        side: EntrySide::Debit,
                        amount: original.amount,
                        description: None,
                    },
                    LineInput {
                        account_code: config.chart.cash.clone(),
                        side: EntrySide::Credit,
                        amount: original.amount,
                        description: None,
                    },
                ],
                created_by: actor,
            };
            let (_, entry_reference, _) = post_entry_on(tables, &entry_input)?;

            let new_balance = derived_balance(tables, original.subject_id);
            if let Some(subject) = tables.subjects.get_mut(&original.subject_id) {
                subject.credit_balance = new_balance;
            }
            Ok(ReverseCreditOutcome {
                refund_tx_id,
                new_balance,
                entry_reference,
            })
        })
    }
}

/// The fold over a subject's credit rows. Single definition of "balance"
/// for reads and cache sync alike.
pub(crate) fn derived_balance(tables: &Tables, subject_id: SubjectId) -> Money {
    let snapshots: Vec<_> = tables
        .credit_rows_of(subject_id)
        .into_iter()
        .map(CreditTxRow::snapshot)
        .collect();
    CreditService::balance(&snapshots)
}
