//! Posting engine operations: post, void, approve, reject.

use bursar_shared::types::{EntryId, LineId, Money, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

use bursar_core::ledger::{LedgerError, LedgerService, PostEntryInput, ResolvedLine};
use bursar_core::workflow::{
    ApprovalPolicy, ApprovalStatus, ReversalService, ReviewAction, VoidAction, WorkflowService,
};

use crate::error::OpError;
use crate::rows::{JournalEntryRow, JournalLineRow};
use crate::store::{LedgerStore, Tables};

/// Outcome of posting a journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct PostedEntry {
    /// The new entry's ID.
    pub entry_id: EntryId,
    /// The assigned reference.
    pub reference: String,
    /// Total posted per side (equal by construction).
    pub total: Money,
}

/// Outcome of a void request.
#[derive(Debug, Clone, Serialize)]
pub struct VoidOutcome {
    /// True if an approval rule deferred the void for review.
    pub requires_approval: bool,
    /// The reversal entry's reference, when the void was applied.
    pub reversal_reference: Option<String>,
}

/// Outcome of reviewing a pending void.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    /// The entry's approval status after the review.
    pub status: ApprovalStatus,
    /// The reversal entry's reference, when the review applied the void.
    pub reversal_reference: Option<String>,
}

/// Validates, resolves, and writes one journal entry with its lines.
///
/// Shared by every flow that posts: direct posting, payment and credit
/// companion entries, and invoice issuance.
pub(crate) fn post_entry_on(
    tables: &mut Tables,
    input: &PostEntryInput,
) -> Result<(EntryId, String, Money), OpError> {
    let (resolved, totals) = LedgerService::validate_and_resolve(input, |code| {
        tables
            .account_by_code(code)
            .map(crate::rows::AccountRow::info)
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    })?;

    let entry_id = EntryId::new();
    let reference = tables.next_entry_reference();
    tables.entries.insert(
        entry_id,
        JournalEntryRow {
            id: entry_id,
            reference: reference.clone(),
            entry_date: input.entry_date,
            kind: input.kind,
            description: input.description.clone(),
            subject_id: input.subject_id,
            term_id: input.term_id,
            is_posted: true,
            is_voided: false,
            void_reason: None,
            voided_by: None,
            voided_at: None,
            approval_status: ApprovalStatus::Approved,
            pending_void_reason: None,
            pending_void_by: None,
            review_notes: None,
            created_by: input.created_by,
            created_at: Utc::now(),
        },
    );
    write_lines(tables, entry_id, &resolved);
    Ok((entry_id, reference, totals.debit))
}

/// Flags an entry voided and posts its reversal. Returns the reversal's
/// reference. The caller has already decided the void applies.
pub(crate) fn apply_void_on(
    tables: &mut Tables,
    entry_id: EntryId,
    reason: &str,
    actor: UserId,
    voided_at: DateTime<Utc>,
) -> Result<String, OpError> {
    let (reference, subject_id, term_id, original_lines) = {
        let entry = tables
            .entries
            .get(&entry_id)
            .ok_or(OpError::EntryNotFound(entry_id))?;
        if entry.is_voided {
            return Err(OpError::Ledger(LedgerError::AlreadyVoided(entry_id)));
        }
        (
            entry.reference.clone(),
            entry.subject_id,
            entry.term_id,
            resolved_lines_of(tables, entry_id),
        )
    };

    let draft = ReversalService::build(&reference, &original_lines, voided_at.date_naive(), reason);
    if !ReversalService::is_balanced(&draft.lines) {
        return Err(OpError::Storage(format!(
            "stored lines of {reference} are unbalanced"
        )));
    }

    let reversal_id = EntryId::new();
    let reversal_reference = tables.next_entry_reference();
    tables.entries.insert(
        reversal_id,
        JournalEntryRow {
            id: reversal_id,
            reference: reversal_reference.clone(),
            entry_date: draft.entry_date,
            kind: draft.kind,
            description: draft.description,
            subject_id,
            term_id,
            is_posted: true,
            is_voided: false,
            void_reason: None,
            voided_by: None,
            voided_at: None,
            approval_status: ApprovalStatus::Approved,
            pending_void_reason: None,
            pending_void_by: None,
            review_notes: None,
            created_by: actor,
            created_at: voided_at,
        },
    );
    write_lines(tables, reversal_id, &draft.lines);

    if let Some(entry) = tables.entries.get_mut(&entry_id) {
        entry.is_voided = true;
        entry.void_reason = Some(reason.to_string());
        entry.voided_by = Some(actor);
        entry.voided_at = Some(voided_at);
    }
    Ok(reversal_reference)
}

fn write_lines(tables: &mut Tables, entry_id: EntryId, lines: &[ResolvedLine]) {
    for line in lines {
        tables.lines.push(JournalLineRow {
            id: LineId::new(),
            entry_id,
            account_id: line.account_id,
            debit: line.debit,
            credit: line.credit,
            line_no: line.line_no,
            description: line.description.clone(),
        });
    }
}

fn resolved_lines_of(tables: &Tables, entry_id: EntryId) -> Vec<ResolvedLine> {
    tables
        .lines_of(entry_id)
        .into_iter()
        .map(|l| ResolvedLine {
            account_id: l.account_id,
            debit: l.debit,
            credit: l.credit,
            line_no: l.line_no,
            description: l.description.clone(),
        })
        .collect()
}

impl LedgerStore {
    /// Posts a journal entry.
    ///
    /// Rejects empty line sets, non-positive amounts, unknown or inactive
    /// accounts, and unbalanced totals; nothing is written on rejection.
    pub fn post_entry(&mut self, input: PostEntryInput) -> Result<PostedEntry, OpError> {
        self.transaction("post_entry", move |tables, _| {
            let (entry_id, reference, total) = post_entry_on(tables, &input)?;
            Ok(PostedEntry {
                entry_id,
                reference,
                total,
            })
        })
    }

    /// Requests a void of a posted entry.
    ///
    /// If an approval rule matches the entry's kind, amount, and age, the
    /// entry is parked `Pending` and no reversal is posted yet. Otherwise
    /// the entry is flagged voided and the reversal entry is created, all
    /// in one transaction.
    pub fn void_entry(
        &mut self,
        entry_id: EntryId,
        reason: &str,
        actor: UserId,
    ) -> Result<VoidOutcome, OpError> {
        let reason = reason.to_string();
        self.transaction("void_entry", move |tables, _| {
            let (is_voided, kind, entry_date) = {
                let entry = tables
                    .entries
                    .get(&entry_id)
                    .ok_or(OpError::EntryNotFound(entry_id))?;
                (entry.is_voided, entry.kind, entry.entry_date)
            };
            let amount: Money = tables.lines_of(entry_id).iter().map(|l| l.debit).sum();
            let age_days = (Utc::now().date_naive() - entry_date).num_days();
            let requires_review =
                ApprovalPolicy::requires_review(&tables.approval_rules, kind, amount, age_days);

            match WorkflowService::request_void(is_voided, requires_review, actor, reason)? {
                VoidAction::Apply {
                    voided_by,
                    voided_at,
                    reason,
                } => {
                    let reversal = apply_void_on(tables, entry_id, &reason, voided_by, voided_at)?;
                    Ok(VoidOutcome {
                        requires_approval: false,
                        reversal_reference: Some(reversal),
                    })
                }
                VoidAction::Defer {
                    requested_by,
                    reason,
                    ..
                } => {
                    if let Some(entry) = tables.entries.get_mut(&entry_id) {
                        entry.approval_status = ApprovalStatus::Pending;
                        entry.pending_void_reason = Some(reason);
                        entry.pending_void_by = Some(requested_by);
                    }
                    tracing::info!(entry = %entry_id, "void deferred for review");
                    Ok(VoidOutcome {
                        requires_approval: true,
                        reversal_reference: None,
                    })
                }
            }
        })
    }

    /// Approves a pending void: the deferred void is applied and the
    /// reversal posted. Approving an `Approved` entry is a no-op.
    pub fn approve_void(
        &mut self,
        entry_id: EntryId,
        approver: UserId,
        notes: Option<String>,
    ) -> Result<ReviewOutcome, OpError> {
        self.transaction("approve_void", move |tables, _| {
            let status = tables
                .entries
                .get(&entry_id)
                .map(|e| e.approval_status)
                .ok_or(OpError::EntryNotFound(entry_id))?;

            match WorkflowService::approve(status, approver, notes)? {
                ReviewAction::NoOp => Ok(ReviewOutcome {
                    status: ApprovalStatus::Approved,
                    reversal_reference: None,
                }),
                ReviewAction::Approve {
                    approved_by,
                    approved_at,
                    notes,
                } => {
                    let (reason, requested_by) = {
                        let entry = tables
                            .entries
                            .get(&entry_id)
                            .ok_or(OpError::EntryNotFound(entry_id))?;
                        let reason = entry.pending_void_reason.clone().ok_or_else(|| {
                            OpError::Storage("pending void has no recorded reason".to_string())
                        })?;
                        (reason, entry.pending_void_by.unwrap_or(approved_by))
                    };
                    let reversal =
                        apply_void_on(tables, entry_id, &reason, requested_by, approved_at)?;
                    if let Some(entry) = tables.entries.get_mut(&entry_id) {
                        entry.approval_status = ApprovalStatus::Approved;
                        entry.review_notes = notes;
                    }
                    Ok(ReviewOutcome {
                        status: ApprovalStatus::Approved,
                        reversal_reference: Some(reversal),
                    })
                }
                ReviewAction::Reject { .. } => {
                    Err(OpError::Storage("approve produced a reject action".to_string()))
                }
            }
        })
    }

    /// Rejects a pending void: the entry stands, the reviewer's reason is
    /// recorded as `"Rejected: <notes>"`.
    pub fn reject_void(
        &mut self,
        entry_id: EntryId,
        reviewer: UserId,
        notes: &str,
    ) -> Result<ReviewOutcome, OpError> {
        let notes = notes.to_string();
        self.transaction("reject_void", move |tables, _| {
            let status = tables
                .entries
                .get(&entry_id)
                .map(|e| e.approval_status)
                .ok_or(OpError::EntryNotFound(entry_id))?;

            match WorkflowService::reject(status, reviewer, &notes)? {
                ReviewAction::Reject { reason, .. } => {
                    if let Some(entry) = tables.entries.get_mut(&entry_id) {
                        entry.approval_status = ApprovalStatus::Rejected;
                        entry.review_notes = Some(reason);
                        entry.pending_void_reason = None;
                        entry.pending_void_by = None;
                    }
                    Ok(ReviewOutcome {
                        status: ApprovalStatus::Rejected,
                        reversal_reference: None,
                    })
                }
                _ => Err(OpError::Storage("reject produced a non-reject action".to_string())),
            }
        })
    }
}
