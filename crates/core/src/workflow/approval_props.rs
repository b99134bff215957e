//! Property tests for approval policy evaluation.

use bursar_shared::types::{Money, RuleId};
use proptest::prelude::*;

use super::approval::{ApprovalPolicy, ApprovalRule};
use crate::ledger::types::EntryKind;

fn any_kind() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        Just(EntryKind::FeePayment),
        Just(EntryKind::Invoice),
        Just(EntryKind::Scholarship),
        Just(EntryKind::CreditApplied),
        Just(EntryKind::Adjustment),
        Just(EntryKind::Refund),
    ]
}

fn any_rule() -> impl Strategy<Value = ApprovalRule> {
    (
        prop::collection::vec(any_kind(), 0..3),
        prop::option::of(0i64..1_000_000),
        prop::option::of(0i64..1_000_000),
        prop::option::of(0i64..365),
        -5i16..5,
        any::<bool>(),
    )
        .prop_map(
            |(kinds, min_amount, max_amount, min_age, priority, requires_review)| ApprovalRule {
                id: RuleId::new(),
                name: "generated".to_string(),
                kinds,
                min_amount: min_amount.map(Money::from_minor),
                max_amount: max_amount.map(Money::from_minor),
                min_age_days: min_age,
                priority,
                requires_review,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The policy is a pure function: same inputs, same verdict.
    #[test]
    fn prop_policy_deterministic(
        rules in prop::collection::vec(any_rule(), 0..6),
        kind in any_kind(),
        amount in 0i64..2_000_000,
        age in 0i64..400,
    ) {
        let a = ApprovalPolicy::requires_review(&rules, kind, Money::from_minor(amount), age);
        let b = ApprovalPolicy::requires_review(&rules, kind, Money::from_minor(amount), age);
        prop_assert_eq!(a, b);
    }

    /// With no matching rules the verdict is always "no review".
    #[test]
    fn prop_empty_rules_never_review(
        kind in any_kind(),
        amount in 0i64..2_000_000,
        age in 0i64..400,
    ) {
        prop_assert!(!ApprovalPolicy::requires_review(&[], kind, Money::from_minor(amount), age));
    }

    /// A single catch-all reviewing rule always reviews.
    #[test]
    fn prop_catch_all_rule_always_reviews(
        kind in any_kind(),
        amount in 0i64..2_000_000,
        age in 0i64..400,
    ) {
        let rule = ApprovalRule {
            id: RuleId::new(),
            name: "catch-all".to_string(),
            kinds: vec![],
            min_amount: None,
            max_amount: None,
            min_age_days: None,
            priority: 0,
            requires_review: true,
        };
        prop_assert!(ApprovalPolicy::requires_review(
            &[rule],
            kind,
            Money::from_minor(amount),
            age,
        ));
    }
}
