//! Approval rules for gating voids behind review.
//!
//! The policy is an explicit, pure function over the rule set and the
//! entry's kind, amount, and age. Nothing here touches storage; the store
//! layer loads the rules and passes them in.

use bursar_shared::types::{Money, RuleId};

use crate::ledger::types::EntryKind;

/// An approval rule that routes matching voids to review.
///
/// A rule matches when the entry's kind is listed (an empty list matches
/// every kind), the entry amount falls inside the rule's range, and the
/// entry is at least `min_age_days` old. When several rules match, the one
/// with the lowest priority value decides.
#[derive(Debug, Clone)]
pub struct ApprovalRule {
    /// Unique identifier for the rule.
    pub id: RuleId,
    /// Human-readable name for the rule.
    pub name: String,
    /// Entry kinds this rule applies to (empty = all).
    pub kinds: Vec<EntryKind>,
    /// Minimum amount for this rule to apply (inclusive, None = no minimum).
    pub min_amount: Option<Money>,
    /// Maximum amount for this rule to apply (inclusive, None = no maximum).
    pub max_amount: Option<Money>,
    /// Minimum entry age in days for this rule to apply (None = any age).
    pub min_age_days: Option<i64>,
    /// Priority for rule selection (lower = higher priority).
    pub priority: i16,
    /// Whether matching voids require review before they take effect.
    pub requires_review: bool,
}

impl ApprovalRule {
    fn matches(&self, kind: EntryKind, amount: Money, age_days: i64) -> bool {
        let kind_ok = self.kinds.is_empty() || self.kinds.contains(&kind);
        let above_min = self.min_amount.is_none_or(|min| amount >= min);
        let below_max = self.max_amount.is_none_or(|max| amount <= max);
        let old_enough = self.min_age_days.is_none_or(|min| age_days >= min);
        kind_ok && above_min && below_max && old_enough
    }
}

/// Stateless policy evaluating approval rules.
pub struct ApprovalPolicy;

impl ApprovalPolicy {
    /// Returns true if voiding an entry of the given kind, amount, and age
    /// must be deferred for review.
    #[must_use]
    pub fn requires_review(
        rules: &[ApprovalRule],
        kind: EntryKind,
        amount: Money,
        age_days: i64,
    ) -> bool {
        let mut applicable: Vec<_> = rules
            .iter()
            .filter(|r| r.matches(kind, amount, age_days))
            .collect();

        // Lowest priority value wins.
        applicable.sort_by_key(|r| r.priority);
        applicable.first().is_some_and(|r| r.requires_review)
    }
}
