//! Reversal construction for voided entries.
//!
//! Voiding never deletes: the original entry is flagged and a new
//! `VoidReversal` entry is posted whose lines are the originals with
//! debit and credit swapped.

use bursar_shared::types::Money;
use chrono::NaiveDate;

use crate::ledger::types::{EntryKind, ResolvedLine};

/// A reversal entry ready for posting.
#[derive(Debug, Clone)]
pub struct ReversalDraft {
    /// Always `EntryKind::VoidReversal`.
    pub kind: EntryKind,
    /// Dated at void time, not at the original entry date.
    pub entry_date: NaiveDate,
    /// Description referencing the original entry's reference.
    pub description: String,
    /// The original lines with debit/credit swapped.
    pub lines: Vec<ResolvedLine>,
}

/// Stateless service for building reversal entries.
pub struct ReversalService;

impl ReversalService {
    /// Build the reversal for a voided entry.
    ///
    /// Line numbers and descriptions are preserved; only the sides swap.
    #[must_use]
    pub fn build(
        original_reference: &str,
        original_lines: &[ResolvedLine],
        void_date: NaiveDate,
        reason: &str,
    ) -> ReversalDraft {
        ReversalDraft {
            kind: EntryKind::VoidReversal,
            entry_date: void_date,
            description: format!("Reversal of {original_reference}. Reason: {reason}"),
            lines: original_lines.iter().map(ResolvedLine::swapped).collect(),
        }
    }

    /// Validate that the lines to reverse are balanced.
    ///
    /// Always true for posted entries; checked anyway before building.
    #[must_use]
    pub fn is_balanced(lines: &[ResolvedLine]) -> bool {
        let debit: Money = lines.iter().map(|l| l.debit).sum();
        let credit: Money = lines.iter().map(|l| l.credit).sum();
        debit == credit
    }
}
