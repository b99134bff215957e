//! Workflow service for void/approval state transitions.
//!
//! Stateless: callers pass the entry's current flags and receive the
//! action to persist, with audit fields stamped.

use bursar_shared::types::UserId;
use chrono::Utc;

use super::error::WorkflowError;
use super::types::{ApprovalStatus, ReviewAction, VoidAction};

/// Stateless service for void/approval transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Request a void of a posted entry.
    ///
    /// # Arguments
    /// * `is_voided` - whether the entry is already voided
    /// * `requires_review` - the approval policy's verdict for this entry
    /// * `actor` - the user requesting the void
    /// * `reason` - the void reason (required)
    ///
    /// # Returns
    /// * `Ok(VoidAction::Apply)` - void now and post the reversal
    /// * `Ok(VoidAction::Defer)` - park the entry pending review
    /// * `Err` - already voided, or empty reason
    pub fn request_void(
        is_voided: bool,
        requires_review: bool,
        actor: UserId,
        reason: String,
    ) -> Result<VoidAction, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::VoidReasonRequired);
        }
        if is_voided {
            return Err(WorkflowError::AlreadyVoided);
        }

        if requires_review {
            Ok(VoidAction::Defer {
                requested_by: actor,
                requested_at: Utc::now(),
                reason,
            })
        } else {
            Ok(VoidAction::Apply {
                voided_by: actor,
                voided_at: Utc::now(),
                reason,
            })
        }
    }

    /// Approve a pending void.
    ///
    /// `Approved` entries are a no-op; only `Pending` entries transition.
    pub fn approve(
        current: ApprovalStatus,
        approver: UserId,
        notes: Option<String>,
    ) -> Result<ReviewAction, WorkflowError> {
        match current {
            ApprovalStatus::Approved => Ok(ReviewAction::NoOp),
            ApprovalStatus::Pending => Ok(ReviewAction::Approve {
                approved_by: approver,
                approved_at: Utc::now(),
                notes,
            }),
            ApprovalStatus::Rejected => Err(WorkflowError::InvalidTransition {
                from: current,
                to: ApprovalStatus::Approved,
            }),
        }
    }

    /// Reject a pending void.
    ///
    /// Requires a non-empty note; the recorded reason is
    /// `"Rejected: <notes>"`.
    pub fn reject(
        current: ApprovalStatus,
        reviewer: UserId,
        notes: &str,
    ) -> Result<ReviewAction, WorkflowError> {
        if notes.trim().is_empty() {
            return Err(WorkflowError::RejectionNotesRequired);
        }

        match current {
            ApprovalStatus::Pending => Ok(ReviewAction::Reject {
                rejected_by: reviewer,
                rejected_at: Utc::now(),
                reason: format!("Rejected: {notes}"),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current,
                to: ApprovalStatus::Rejected,
            }),
        }
    }
}
