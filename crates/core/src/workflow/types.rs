//! Workflow domain types for the void/approval lifecycle.

use bursar_shared::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of a journal entry.
///
/// Entries are created `Approved` unless a void matching an approval rule
/// moves them to `Pending` for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Entry stands; no review outstanding.
    Approved,
    /// A void is awaiting review.
    Pending,
    /// The review rejected the void request; the entry stands.
    Rejected,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approved" => Some(Self::Approved),
            "pending" => Some(Self::Pending),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of requesting a void on a posted entry.
#[derive(Debug, Clone)]
pub enum VoidAction {
    /// Apply the void now: flag the original and post the reversal.
    Apply {
        /// The user voiding the entry.
        voided_by: UserId,
        /// When the void was applied.
        voided_at: DateTime<Utc>,
        /// The reason for voiding.
        reason: String,
    },
    /// An approval rule matched; park the entry pending review.
    Defer {
        /// The user who requested the void.
        requested_by: UserId,
        /// When the void was requested.
        requested_at: DateTime<Utc>,
        /// The reason given for the void request.
        reason: String,
    },
}

impl VoidAction {
    /// Returns true if the void was deferred for approval.
    #[must_use]
    pub const fn requires_approval(&self) -> bool {
        matches!(self, Self::Defer { .. })
    }
}

/// Outcome of reviewing a pending void.
#[derive(Debug, Clone)]
pub enum ReviewAction {
    /// The entry was already approved; nothing to do.
    NoOp,
    /// Approve the pending void: apply it and stamp the reviewer.
    Approve {
        /// The reviewing user.
        approved_by: UserId,
        /// When the review happened.
        approved_at: DateTime<Utc>,
        /// Optional reviewer notes.
        notes: Option<String>,
    },
    /// Reject the pending void: the entry stands, with the reviewer's
    /// reason recorded.
    Reject {
        /// The reviewing user.
        rejected_by: UserId,
        /// When the review happened.
        rejected_at: DateTime<Utc>,
        /// The recorded rejection reason (`"Rejected: <notes>"`).
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in [
            ApprovalStatus::Approved,
            ApprovalStatus::Pending,
            ApprovalStatus::Rejected,
        ] {
            assert_eq!(ApprovalStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ApprovalStatus::parse("bogus"), None);
    }

    #[test]
    fn test_void_action_requires_approval() {
        let apply = VoidAction::Apply {
            voided_by: UserId::new(),
            voided_at: Utc::now(),
            reason: "dup".into(),
        };
        let defer = VoidAction::Defer {
            requested_by: UserId::new(),
            requested_at: Utc::now(),
            reason: "dup".into(),
        };
        assert!(!apply.requires_approval());
        assert!(defer.requires_approval());
    }
}
