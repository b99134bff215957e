//! Workflow error types.

use thiserror::Error;

use super::types::ApprovalStatus;

/// Errors that can occur during void/approval workflow transitions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The requested transition is not valid for the current status.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        /// The current approval status.
        from: ApprovalStatus,
        /// The attempted target status.
        to: ApprovalStatus,
    },

    /// Entry is already voided.
    #[error("Entry is already voided")]
    AlreadyVoided,

    /// A void reason is required.
    #[error("Void reason is required")]
    VoidReasonRequired,

    /// Rejection requires a non-empty note.
    #[error("Rejection notes are required")]
    RejectionNotesRequired,
}

impl WorkflowError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AlreadyVoided => "ALREADY_VOIDED",
            Self::VoidReasonRequired => "VOID_REASON_REQUIRED",
            Self::RejectionNotesRequired => "REJECTION_NOTES_REQUIRED",
        }
    }
}
