//! Property tests for journal entry validation.

use bursar_shared::types::{AccountId, Money};
use proptest::prelude::*;

use super::error::LedgerError;
use super::types::ResolvedLine;
use super::validation::validate_lines;

/// Strategy for positive minor-unit amounts.
fn amount_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000
}

fn debit_line(line_no: u32, amount: i64) -> ResolvedLine {
    ResolvedLine {
        account_id: AccountId::new(),
        debit: Money::from_minor(amount),
        credit: Money::ZERO,
        line_no,
        description: None,
    }
}

fn credit_line(line_no: u32, amount: i64) -> ResolvedLine {
    ResolvedLine {
        account_id: AccountId::new(),
        debit: Money::ZERO,
        credit: Money::from_minor(amount),
        line_no,
        description: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Mirrored debit/credit amounts always validate, and the reported
    /// totals equal the generated sums.
    #[test]
    fn prop_mirrored_amounts_validate(amounts in prop::collection::vec(amount_strategy(), 1..12)) {
        let mut lines = Vec::new();
        let mut line_no = 0u32;
        for &a in &amounts {
            line_no += 1;
            lines.push(debit_line(line_no, a));
            line_no += 1;
            lines.push(credit_line(line_no, a));
        }

        let totals = validate_lines(&lines).unwrap();
        let expected: Money = amounts.iter().map(|&a| Money::from_minor(a)).sum();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, expected);
        prop_assert_eq!(totals.credit, expected);
    }

    /// Shifting any single line's amount breaks the balance and is rejected.
    #[test]
    fn prop_skewed_amounts_rejected(
        amounts in prop::collection::vec(amount_strategy(), 1..8),
        skew in 1i64..1_000,
    ) {
        let mut lines = Vec::new();
        let mut line_no = 0u32;
        for &a in &amounts {
            line_no += 1;
            lines.push(debit_line(line_no, a));
            line_no += 1;
            lines.push(credit_line(line_no, a));
        }
        // Skew the first debit so totals can no longer match.
        lines[0].debit = lines[0].debit + Money::from_minor(skew);

        prop_assert!(
            matches!(validate_lines(&lines), Err(LedgerError::Unbalanced { .. })),
            "expected Unbalanced error"
        );
    }

    /// A reversal (every line swapped) of a valid entry is itself valid.
    #[test]
    fn prop_swapped_lines_stay_balanced(amounts in prop::collection::vec(amount_strategy(), 1..12)) {
        let mut lines = Vec::new();
        let mut line_no = 0u32;
        for &a in &amounts {
            line_no += 1;
            lines.push(debit_line(line_no, a));
            line_no += 1;
            lines.push(credit_line(line_no, a));
        }

        let swapped: Vec<ResolvedLine> = lines.iter().map(ResolvedLine::swapped).collect();
        let original = validate_lines(&lines).unwrap();
        let reversed = validate_lines(&swapped).unwrap();
        prop_assert_eq!(original.debit, reversed.credit);
        prop_assert_eq!(original.credit, reversed.debit);
    }
}
