//! Payment recording, voiding, and receipts.

use bursar_shared::types::{
    AllocationId, CreditTxId, InvoiceId, Money, PaymentId, ReceiptId, SubjectId, UserId,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use bursar_core::allocation::{AllocationService, DueDateFifo, InvoiceStatus};
use bursar_core::credit::CreditTxType;
use bursar_core::idempotency::{IdempotencyService, PaymentFingerprint, PaymentMethod};
use bursar_core::ledger::{EntryKind, EntrySide, LineInput, PostEntryInput};
use bursar_core::workflow::WorkflowError;

use crate::error::OpError;
use crate::rows::{
    AllocationRow, AllocationSource, CreditTxRow, PaymentDirection, PaymentRow, ReceiptRow,
};
use crate::store::{LedgerStore, Tables};

use super::credit::derived_balance;
use super::posting::{apply_void_on, post_entry_on};

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// The paying subject.
    pub subject_id: SubjectId,
    /// The payment amount.
    pub amount: Money,
    /// The payment date.
    pub payment_date: NaiveDate,
    /// How the payment was tendered.
    pub method: PaymentMethod,
    /// External reference (bank transaction or cheque number).
    pub reference: Option<String>,
    /// Target one invoice instead of FIFO across all outstanding ones.
    pub invoice_id: Option<InvoiceId>,
    /// Optional caller-supplied idempotency key.
    pub idempotency_key: Option<String>,
    /// The user recording the payment.
    pub created_by: UserId,
}

/// One invoice's share of a recorded payment or applied credit.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationLine {
    /// The target invoice.
    pub invoice_id: InvoiceId,
    /// Its invoice number.
    pub invoice_number: String,
    /// The amount applied to it.
    pub amount: Money,
    /// Its status after the application.
    pub new_status: InvoiceStatus,
}

/// Outcome of recording a payment.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOutcome {
    /// The payment row's ID.
    pub payment_id: PaymentId,
    /// The issued (or original, on replay) receipt number.
    pub receipt_number: String,
    /// The companion GL entry's reference.
    pub entry_reference: String,
    /// Per-invoice applications; empty on replay.
    pub allocations: Vec<AllocationLine>,
    /// Remainder recorded as received credit.
    pub credited_remainder: Money,
    /// True if the request duplicated an earlier payment.
    pub replayed: bool,
}

/// Outcome of voiding a payment.
#[derive(Debug, Clone, Serialize)]
pub struct VoidPaymentOutcome {
    /// The GL reversal entry's reference.
    pub reversal_reference: String,
    /// Allocations that were unwound, invoice by invoice.
    pub reversed_allocations: Vec<AllocationLine>,
    /// Remainder credit refunded back out, if any.
    pub refunded_credit: Money,
}

/// Receipt details, returned by reprinting.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptInfo {
    /// The receipt number.
    pub number: String,
    /// The receipted amount.
    pub amount: Money,
    /// Print count after this reprint.
    pub print_count: u32,
}

impl LedgerStore {
    /// Records a payment: idempotency guard, invoice allocation, remainder
    /// credit, companion GL posting, and receipt, in one transaction.
    ///
    /// A detected replay returns the original identifiers with
    /// `replayed: true` and writes nothing.
    pub fn record_payment(&mut self, input: RecordPaymentInput) -> Result<PaymentOutcome, OpError> {
        self.transaction("record_payment", move |tables, config| {
            if !tables.subjects.contains_key(&input.subject_id) {
                return Err(OpError::SubjectNotFound(input.subject_id));
            }

            // Idempotency guard, explicit key first.
            let key = input
                .idempotency_key
                .as_deref()
                .and_then(|k| IdempotencyService::normalize_key(k, config.idempotency.key_max_len));
            if let Some(key) = &key {
                // Voided payments release their key for a corrected retry.
                let prior = tables
                    .payments
                    .values()
                    .find(|p| !p.is_voided && p.idempotency_key.as_deref() == Some(key.as_str()))
                    .map(|p| p.id);
                if let Some(prior_id) = prior {
                    tracing::warn!(payment = %prior_id, "replay detected by idempotency key");
                    return replay_outcome(tables, prior_id);
                }
            } else if let Some(prior_id) = find_fuzzy_replay(tables, &input, config) {
                tracing::warn!(payment = %prior_id, "replay detected by fingerprint");
                return replay_outcome(tables, prior_id);
            }

            // Allocation plan.
            let plan = if let Some(invoice_id) = input.invoice_id {
                let snapshot = tables
                    .invoices
                    .get(&invoice_id)
                    .map(crate::rows::InvoiceRow::snapshot)
                    .ok_or(OpError::InvoiceNotFound(invoice_id))?;
                AllocationService::validate_target(&snapshot, input.subject_id, input.amount)?;
                AllocationService::plan(
                    vec![snapshot],
                    input.amount,
                    &DueDateFifo,
                    input.payment_date,
                )?
            } else {
                let snapshots: Vec<_> = tables
                    .invoices
                    .values()
                    .filter(|i| i.subject_id == input.subject_id && i.status.is_allocatable())
                    .map(crate::rows::InvoiceRow::snapshot)
                    .collect();
                AllocationService::plan(snapshots, input.amount, &DueDateFifo, input.payment_date)?
            };

            let payment_id = PaymentId::new();
            let allocations =
                apply_plan_allocations(tables, &plan.allocations, AllocationSource::Payment(payment_id))?;

            // Unapplied remainder becomes explicit received credit.
            if plan.remainder.is_positive() {
                let credit_id = CreditTxId::new();
                tables.credit_txs.insert(
                    credit_id,
                    CreditTxRow {
                        id: credit_id,
                        subject_id: input.subject_id,
                        tx_type: CreditTxType::Received,
                        amount: plan.remainder,
                        invoice_id: None,
                        payment_id: Some(payment_id),
                        reverses: None,
                        notes: Some("Unapplied payment remainder".to_string()),
                        created_by: input.created_by,
                        created_at: Utc::now(),
                    },
                );
                if let Some(subject) = tables.subjects.get_mut(&input.subject_id) {
                    subject.credit_balance += plan.remainder;
                }
            }

            // Companion GL entry: debit cash/bank, credit receivables, full amount.
            let funds_code = if input.method.is_cash() {
                config.chart.cash.clone()
            } else {
                config.chart.bank.clone()
            };
            let entry_input = PostEntryInput {
                entry_date: input.payment_date,
                kind: EntryKind::FeePayment,
                description: format!("Fee payment via {}", input.method),
                subject_id: Some(input.subject_id),
                term_id: None,
                lines: vec![
                    LineInput {
                        account_code: funds_code,
                        side: EntrySide::Debit,
                        amount: input.amount,
                        description: None,
                    },
                    LineInput {
                        account_code: config.chart.accounts_receivable.clone(),
                        side: EntrySide::Credit,
                        amount: input.amount,
                        description: None,
                    },
                ],
                created_by: input.created_by,
            };
            let (entry_id, entry_reference, _) = post_entry_on(tables, &entry_input)?;

            let receipt_id = ReceiptId::new();
            let receipt_number = tables.next_receipt_number();
            tables.receipts.insert(
                receipt_id,
                ReceiptRow {
                    id: receipt_id,
                    number: receipt_number.clone(),
                    payment_id,
                    amount: input.amount,
                    print_count: 0,
                    created_at: Utc::now(),
                },
            );
            tables.payments.insert(
                payment_id,
                PaymentRow {
                    id: payment_id,
                    subject_id: input.subject_id,
                    amount: input.amount,
                    payment_date: input.payment_date,
                    direction: PaymentDirection::Inbound,
                    method: input.method,
                    reference: input.reference,
                    idempotency_key: key,
                    invoice_id: input.invoice_id,
                    entry_id,
                    receipt_id,
                    is_voided: false,
                    created_by: input.created_by,
                    created_at: Utc::now(),
                },
            );

            Ok(PaymentOutcome {
                payment_id,
                receipt_number,
                entry_reference,
                allocations,
                credited_remainder: plan.remainder,
                replayed: false,
            })
        })
    }

    /// Voids a payment: unwinds each allocation exactly, refunds whatever
    /// part of the remainder credit is still unconsumed, voids the
    /// companion GL entry, and flags the payment row, in one transaction.
    ///
    /// Remainder credit that was already applied to invoices stays
    /// applied; only the portion the derived balance still covers is
    /// refunded, so the balance never folds below zero.
    pub fn void_payment(
        &mut self,
        payment_id: PaymentId,
        reason: &str,
        actor: UserId,
    ) -> Result<VoidPaymentOutcome, OpError> {
        let reason = reason.to_string();
        self.transaction("void_payment", move |tables, _| {
            if reason.trim().is_empty() {
                return Err(OpError::Workflow(WorkflowError::VoidReasonRequired));
            }
            let payment = tables
                .payments
                .get(&payment_id)
                .cloned()
                .ok_or(OpError::PaymentNotFound(payment_id))?;
            if payment.is_voided {
                return Err(OpError::PaymentAlreadyVoided(payment_id));
            }

            let reversed = unwind_allocations(tables, AllocationSource::Payment(payment_id))?;

            // Remainder credit granted by this payment is refunded back
            // out, capped at what the subject's balance still covers.
            let remainder_row = tables
                .credit_txs
                .values()
                .find(|c| {
                    c.payment_id == Some(payment_id) && c.tx_type == CreditTxType::Received
                })
                .cloned();
            let refunded_credit = if let Some(row) = remainder_row {
                let already_reversed = tables
                    .credit_txs
                    .values()
                    .any(|c| c.reverses == Some(row.id));
                let refund = if already_reversed {
                    Money::ZERO
                } else {
                    row.amount.min(derived_balance(tables, row.subject_id))
                };
                if refund.is_positive() {
                    let refund_id = CreditTxId::new();
                    tables.credit_txs.insert(
                        refund_id,
                        CreditTxRow {
                            id: refund_id,
                            subject_id: row.subject_id,
                            tx_type: CreditTxType::Refunded,
                            amount: refund,
                            invoice_id: None,
                            payment_id: Some(payment_id),
                            reverses: Some(row.id),
                            notes: Some(format!("Void of payment: {reason}")),
                            created_by: actor,
                            created_at: Utc::now(),
                        },
                    );
                    let new_balance = derived_balance(tables, row.subject_id);
                    if let Some(subject) = tables.subjects.get_mut(&row.subject_id) {
                        subject.credit_balance = new_balance;
                    }
                    refund
                } else {
                    Money::ZERO
                }
            } else {
                Money::ZERO
            };

            let reversal_reference =
                apply_void_on(tables, payment.entry_id, &reason, actor, Utc::now())?;
            if let Some(row) = tables.payments.get_mut(&payment_id) {
                row.is_voided = true;
            }

            Ok(VoidPaymentOutcome {
                reversal_reference,
                reversed_allocations: reversed,
                refunded_credit,
            })
        })
    }

    /// Reprints a receipt, bumping its print counter.
    pub fn reprint_receipt(&mut self, receipt_id: ReceiptId) -> Result<ReceiptInfo, OpError> {
        self.transaction("reprint_receipt", move |tables, _| {
            let receipt = tables
                .receipts
                .get_mut(&receipt_id)
                .ok_or(OpError::ReceiptNotFound(receipt_id))?;
            receipt.print_count += 1;
            Ok(ReceiptInfo {
                number: receipt.number.clone(),
                amount: receipt.amount,
                print_count: receipt.print_count,
            })
        })
    }
}

/// Applies a core allocation plan to the invoice table and records the
/// split rows. Shared by payments and credit application.
pub(crate) fn apply_plan_allocations(
    tables: &mut Tables,
    allocations: &[bursar_core::allocation::PlannedAllocation],
    source: AllocationSource,
) -> Result<Vec<AllocationLine>, OpError> {
    let mut lines = Vec::with_capacity(allocations.len());
    for alloc in allocations {
        let invoice = tables
            .invoices
            .get_mut(&alloc.invoice_id)
            .ok_or(OpError::InvoiceNotFound(alloc.invoice_id))?;
        invoice.amount_paid = alloc.new_amount_paid;
        invoice.status = alloc.new_status;
        tracing::debug!(
            invoice = %invoice.number,
            amount = %alloc.amount,
            status = %alloc.new_status,
            "allocated"
        );
        lines.push(AllocationLine {
            invoice_id: alloc.invoice_id,
            invoice_number: invoice.number.clone(),
            amount: alloc.amount,
            new_status: alloc.new_status,
        });
        tables.allocations.push(AllocationRow {
            id: AllocationId::new(),
            source,
            invoice_id: alloc.invoice_id,
            amount: alloc.amount,
            is_reversed: false,
        });
    }
    Ok(lines)
}

fn unwind_allocations(
    tables: &mut Tables,
    source: AllocationSource,
) -> Result<Vec<AllocationLine>, OpError> {
    // Rows are flagged, never deleted; the split survives for audit.
    let mut mine = Vec::new();
    for alloc in tables
        .allocations
        .iter_mut()
        .filter(|a| a.source == source && !a.is_reversed)
    {
        alloc.is_reversed = true;
        mine.push((alloc.invoice_id, alloc.amount));
    }

    let mut lines = Vec::with_capacity(mine.len());
    for (invoice_id, amount) in mine {
        let invoice = tables
            .invoices
            .get_mut(&invoice_id)
            .ok_or(OpError::InvoiceNotFound(invoice_id))?;
        invoice.amount_paid -= amount;
        invoice.status =
            InvoiceStatus::derive(invoice.status, invoice.amount_paid, invoice.total);
        lines.push(AllocationLine {
            invoice_id,
            invoice_number: invoice.number.clone(),
            amount,
            new_status: invoice.status,
        });
    }
    Ok(lines)
}

fn find_fuzzy_replay(
    tables: &Tables,
    input: &RecordPaymentInput,
    config: &bursar_shared::config::LedgerConfig,
) -> Option<PaymentId> {
    let now = Utc::now();
    let window = Duration::seconds(config.idempotency.replay_window_secs);
    let request = PaymentFingerprint {
        subject_id: input.subject_id,
        amount: input.amount,
        payment_date: input.payment_date,
        method: input.method,
        reference: input.reference.clone(),
        created_by: input.created_by,
        created_at: now,
    };
    tables
        .payments
        .values()
        .filter(|p| !p.is_voided)
        .find(|p| {
            let candidate = PaymentFingerprint {
                subject_id: p.subject_id,
                amount: p.amount,
                payment_date: p.payment_date,
                method: p.method,
                reference: p.reference.clone(),
                created_by: p.created_by,
                created_at: p.created_at,
            };
            IdempotencyService::find_payment_replay(
                &request,
                std::iter::once(&candidate),
                window,
                now,
            )
            .is_some()
        })
        .map(|p| p.id)
}

fn replay_outcome(tables: &Tables, payment_id: PaymentId) -> Result<PaymentOutcome, OpError> {
    let payment = tables
        .payments
        .get(&payment_id)
        .ok_or(OpError::PaymentNotFound(payment_id))?;
    let receipt_number = tables
        .receipts
        .get(&payment.receipt_id)
        .map(|r| r.number.clone())
        .ok_or(OpError::ReceiptNotFound(payment.receipt_id))?;
    let entry_reference = tables
        .entries
        .get(&payment.entry_id)
        .map(|e| e.reference.clone())
        .ok_or(OpError::EntryNotFound(payment.entry_id))?;
    Ok(PaymentOutcome {
        payment_id,
        receipt_number,
        entry_reference,
        allocations: Vec::new(),
        credited_remainder: Money::ZERO,
        replayed: true,
    })
}
