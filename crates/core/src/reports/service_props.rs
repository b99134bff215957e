//! Property tests for report aggregation.

use bursar_shared::types::Money;
use chrono::NaiveDate;
use proptest::prelude::*;

use super::service::ReportsService;
use super::types::AccountActivity;
use crate::ledger::types::AccountType;

const TYPES: [AccountType; 5] = [
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Equity,
    AccountType::Revenue,
    AccountType::Expense,
];

/// A fixed five-account chart, one account per type.
fn chart() -> Vec<AccountActivity> {
    TYPES
        .iter()
        .enumerate()
        .map(|(i, &account_type)| AccountActivity {
            code: format!("{}000", i + 1),
            name: account_type.as_str().to_string(),
            account_type,
            debit_total: Money::ZERO,
            credit_total: Money::ZERO,
        })
        .collect()
}

/// (debit account index, credit account index, amount) triples, each
/// standing in for one balanced two-line journal entry.
fn any_postings() -> impl Strategy<Value = Vec<(usize, usize, i64)>> {
    prop::collection::vec((0usize..5, 0usize..5, 1i64..1_000_000), 0..30)
}

fn aggregate(postings: &[(usize, usize, i64)]) -> Vec<AccountActivity> {
    let mut activities = chart();
    for &(debit_idx, credit_idx, amount) in postings {
        activities[debit_idx].debit_total += Money::from_minor(amount);
        activities[credit_idx].credit_total += Money::from_minor(amount);
    }
    activities
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Books built from balanced entries always satisfy the accounting
    /// equation: assets == liabilities + equity + net income.
    #[test]
    fn prop_balanced_postings_balance_the_sheet(postings in any_postings()) {
        let sheet = ReportsService::balance_sheet(&aggregate(&postings), as_of());
        prop_assert!(sheet.is_balanced);
        prop_assert_eq!(
            sheet.total_assets,
            sheet.total_liabilities + sheet.total_equity + sheet.net_income
        );
    }

    /// The trial balance of balanced books has matching columns.
    #[test]
    fn prop_balanced_postings_balance_the_trial(postings in any_postings()) {
        let tb = ReportsService::trial_balance(&aggregate(&postings), as_of());
        prop_assert!(tb.is_balanced);
        prop_assert_eq!(tb.total_debit, tb.total_credit);
    }

    /// Omitting zero-balance accounts never changes the totals: listed
    /// line balances sum to the section total whenever no listed account
    /// nets to zero, and the totals always reflect every account.
    #[test]
    fn prop_listing_omission_preserves_totals(postings in any_postings()) {
        let activities = aggregate(&postings);
        let sheet = ReportsService::balance_sheet(&activities, as_of());

        let listed_assets: Money = sheet.assets.iter().map(|l| l.balance).sum();
        prop_assert_eq!(listed_assets, sheet.total_assets);
        let listed_liabilities: Money = sheet.liabilities.iter().map(|l| l.balance).sum();
        prop_assert_eq!(listed_liabilities, sheet.total_liabilities);
        let listed_equity: Money = sheet.equity.iter().map(|l| l.balance).sum();
        prop_assert_eq!(listed_equity, sheet.total_equity);
    }
}
