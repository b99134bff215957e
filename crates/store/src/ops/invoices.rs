//! Invoice creation and cancellation.

use bursar_shared::types::{FeeCategoryId, InvoiceId, Money, SubjectId, TermId, UserId};
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use bursar_core::allocation::InvoiceStatus;
use bursar_core::idempotency::{IdempotencyService, InvoiceFingerprint, ItemFingerprint};
use bursar_core::ledger::{EntryKind, EntrySide, LineInput, PostEntryInput};
use bursar_core::workflow::WorkflowError;

use crate::error::OpError;
use crate::rows::{InvoiceItemRow, InvoiceRow};
use crate::store::{LedgerStore, Tables};

use super::posting::apply_void_on;
use super::posting::post_entry_on;

/// One item to bill.
#[derive(Debug, Clone)]
pub struct InvoiceItemInput {
    /// The fee category.
    pub category_id: FeeCategoryId,
    /// Item description.
    pub description: String,
    /// Item amount.
    pub amount: Money,
}

/// Input for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// The billed subject.
    pub subject_id: SubjectId,
    /// The academic term.
    pub term_id: TermId,
    /// The invoice date.
    pub invoice_date: NaiveDate,
    /// The due date; must not precede the invoice date.
    pub due_date: NaiveDate,
    /// The items to bill.
    pub items: Vec<InvoiceItemInput>,
    /// The user creating the invoice.
    pub created_by: UserId,
}

/// Outcome of creating an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceOutcome {
    /// The invoice ID.
    pub invoice_id: InvoiceId,
    /// The assigned (or original, on replay) invoice number.
    pub number: String,
    /// The billed total.
    pub total: Money,
    /// True if the request duplicated an earlier invoice.
    pub replayed: bool,
}

/// Outcome of cancelling an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct CancelInvoiceOutcome {
    /// The cancelled invoice's number.
    pub number: String,
    /// The revenue reversal entry's reference, if one was posted.
    pub reversal_reference: Option<String>,
}

impl LedgerStore {
    /// Creates an invoice: validates items and dates, fuzzy-guards against
    /// duplicates, posts the revenue-recognition GL entry, and assigns the
    /// next invoice number, in one transaction.
    pub fn create_invoice(&mut self, input: CreateInvoiceInput) -> Result<InvoiceOutcome, OpError> {
        self.transaction("create_invoice", move |tables, config| {
            if !tables.subjects.contains_key(&input.subject_id) {
                return Err(OpError::SubjectNotFound(input.subject_id));
            }
            if input.items.is_empty() {
                return Err(OpError::EmptyInvoiceItems);
            }
            if input.items.iter().any(|i| !i.amount.is_positive()) {
                return Err(OpError::NonPositiveInvoiceItem);
            }
            if input.due_date < input.invoice_date {
                return Err(OpError::DueDateBeforeInvoiceDate);
            }
            let total: Money = input.items.iter().map(|i| i.amount).sum();

            if let Some(prior_id) = find_fuzzy_replay(tables, &input, total, config) {
                let prior = tables
                    .invoices
                    .get(&prior_id)
                    .ok_or(OpError::InvoiceNotFound(prior_id))?;
                tracing::warn!(invoice = %prior.number, "replay detected by fingerprint");
                return Ok(InvoiceOutcome {
                    invoice_id: prior.id,
                    number: prior.number.clone(),
                    total: prior.total,
                    replayed: true,
                });
            }

            let number = tables.next_invoice_number();

            // Revenue recognized at issuance: receivable up, fee revenue up.
            let entry_input = PostEntryInput {
                entry_date: input.invoice_date,
                kind: EntryKind::Invoice,
                description: format!("Invoice {number} issued"),
                subject_id: Some(input.subject_id),
                term_id: Some(input.term_id),
                lines: vec![
                    LineInput {
                        account_code: config.chart.accounts_receivable.clone(),
                        side: EntrySide::Debit,
                        amount: total,
                        description: None,
                    },
                    LineInput {
                        account_code: config.chart.fee_revenue.clone(),
                        side: EntrySide::Credit,
                        amount: total,
                        description: None,
                    },
                ],
                created_by: input.created_by,
            };
            let (entry_id, _, _) = post_entry_on(tables, &entry_input)?;

            let invoice_id = InvoiceId::new();
            tables.invoices.insert(
                invoice_id,
                InvoiceRow {
                    id: invoice_id,
                    number: number.clone(),
                    subject_id: input.subject_id,
                    term_id: input.term_id,
                    invoice_date: input.invoice_date,
                    due_date: input.due_date,
                    total,
                    amount_paid: Money::ZERO,
                    status: InvoiceStatus::Pending,
                    items: input
                        .items
                        .iter()
                        .map(|i| InvoiceItemRow {
                            category_id: i.category_id,
                            description: i.description.clone(),
                            amount: i.amount,
                        })
                        .collect(),
                    entry_id: Some(entry_id),
                    created_by: input.created_by,
                    created_at: Utc::now(),
                },
            );
            Ok(InvoiceOutcome {
                invoice_id,
                number,
                total,
                replayed: false,
            })
        })
    }

    /// Cancels an invoice nothing has been paid against, voiding its
    /// revenue-recognition entry. Cancelled invoices never receive
    /// allocations.
    pub fn cancel_invoice(
        &mut self,
        invoice_id: InvoiceId,
        reason: &str,
        actor: UserId,
    ) -> Result<CancelInvoiceOutcome, OpError> {
        let reason = reason.to_string();
        self.transaction("cancel_invoice", move |tables, _| {
            if reason.trim().is_empty() {
                return Err(OpError::Workflow(WorkflowError::VoidReasonRequired));
            }
            let (number, status, amount_paid, entry_id) = {
                let invoice = tables
                    .invoices
                    .get(&invoice_id)
                    .ok_or(OpError::InvoiceNotFound(invoice_id))?;
                (
                    invoice.number.clone(),
                    invoice.status,
                    invoice.amount_paid,
                    invoice.entry_id,
                )
            };
            if status == InvoiceStatus::Cancelled {
                return Err(OpError::InvoiceAlreadyCancelled(invoice_id));
            }
            if amount_paid.is_positive() {
                return Err(OpError::InvoiceHasPayments(invoice_id));
            }

            let reversal_reference = match entry_id {
                Some(entry_id) => {
                    Some(apply_void_on(tables, entry_id, &reason, actor, Utc::now())?)
                }
                None => None,
            };
            if let Some(invoice) = tables.invoices.get_mut(&invoice_id) {
                invoice.status = InvoiceStatus::Cancelled;
            }
            Ok(CancelInvoiceOutcome {
                number,
                reversal_reference,
            })
        })
    }
}

fn find_fuzzy_replay(
    tables: &Tables,
    input: &CreateInvoiceInput,
    total: Money,
    config: &bursar_shared::config::LedgerConfig,
) -> Option<InvoiceId> {
    let now = Utc::now();
    let window = Duration::seconds(config.idempotency.replay_window_secs);
    let request = InvoiceFingerprint {
        subject_id: input.subject_id,
        total,
        invoice_date: input.invoice_date,
        created_by: input.created_by,
        items: input.items.iter().map(item_fingerprint).collect(),
        created_at: now,
    };
    tables
        .invoices
        .values()
        .filter(|i| i.status != InvoiceStatus::Cancelled)
        .find(|i| {
            let candidate = InvoiceFingerprint {
                subject_id: i.subject_id,
                total: i.total,
                invoice_date: i.invoice_date,
                created_by: i.created_by,
                items: i
                    .items
                    .iter()
                    .map(|item| ItemFingerprint {
                        category_id: item.category_id,
                        amount: item.amount,
                        description: item.description.clone(),
                    })
                    .collect(),
                created_at: i.created_at,
            };
            IdempotencyService::find_invoice_replay(
                &request,
                std::iter::once(&candidate),
                window,
                now,
            )
            .is_some()
        })
        .map(|i| i.id)
}

fn item_fingerprint(item: &InvoiceItemInput) -> ItemFingerprint {
    ItemFingerprint {
        category_id: item.category_id,
        amount: item.amount,
        description: item.description.clone(),
    }
}
