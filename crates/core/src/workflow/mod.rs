//! Void and approval workflow for posted journal entries.
//!
//! Entries are never edited or deleted; the only correction mechanism is a
//! void, which flags the original and posts a reversing entry. Voids that
//! match an approval rule are deferred for review instead of applied
//! immediately.

pub mod approval;
pub mod error;
pub mod reversal;
pub mod service;
pub mod types;

#[cfg(test)]
mod approval_props;

pub use approval::{ApprovalPolicy, ApprovalRule};
pub use error::WorkflowError;
pub use reversal::{ReversalDraft, ReversalService};
pub use service::WorkflowService;
pub use types::{ApprovalStatus, ReviewAction, VoidAction};
