//! Report construction.

use bursar_shared::types::Money;
use chrono::NaiveDate;

use super::types::{
    AccountActivity, AccountBalanceLine, BalanceSheet, TrialBalance, TrialBalanceRow,
};
use crate::ledger::types::AccountType;

/// Stateless report builder.
pub struct ReportsService;

impl ReportsService {
    /// Builds a balance sheet from per-account activity totals.
    ///
    /// Zero-balance accounts are omitted from the section listings but
    /// still count (as zero) toward section totals, so totals and the
    /// balanced check are unaffected by the omission. Net income is
    /// revenue minus expense over the same date filter, and the balanced
    /// check is exact integer equality.
    #[must_use]
    pub fn balance_sheet(activities: &[AccountActivity], as_of: NaiveDate) -> BalanceSheet {
        let (assets, total_assets) = Self::section(activities, AccountType::Asset);
        let (liabilities, total_liabilities) = Self::section(activities, AccountType::Liability);
        let (equity, total_equity) = Self::section(activities, AccountType::Equity);

        let revenue = Self::type_total(activities, AccountType::Revenue);
        let expense = Self::type_total(activities, AccountType::Expense);
        let net_income = revenue - expense;

        BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            net_income,
            is_balanced: total_assets == total_liabilities + total_equity + net_income,
        }
    }

    /// Builds a trial balance from per-account activity totals.
    ///
    /// Each non-zero balance lands in the column matching its sign under
    /// the account's normal-side convention; a negative balance flips to
    /// the opposite column.
    #[must_use]
    pub fn trial_balance(activities: &[AccountActivity], as_of: NaiveDate) -> TrialBalance {
        let mut rows: Vec<TrialBalanceRow> = activities
            .iter()
            .filter(|a| !a.balance().is_zero())
            .map(|a| {
                let balance = a.balance();
                let debit_leaning = matches!(
                    a.account_type,
                    AccountType::Asset | AccountType::Expense
                ) == balance.is_positive();
                let magnitude = if balance.is_positive() { balance } else { -balance };
                TrialBalanceRow {
                    code: a.code.clone(),
                    name: a.name.clone(),
                    debit: if debit_leaning { magnitude } else { Money::ZERO },
                    credit: if debit_leaning { Money::ZERO } else { magnitude },
                }
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Money = rows.iter().map(|r| r.debit).sum();
        let total_credit: Money = rows.iter().map(|r| r.credit).sum();
        TrialBalance {
            as_of,
            is_balanced: total_debit == total_credit,
            rows,
            total_debit,
            total_credit,
        }
    }

    fn section(
        activities: &[AccountActivity],
        account_type: AccountType,
    ) -> (Vec<AccountBalanceLine>, Money) {
        let mut lines = Vec::new();
        let mut total = Money::ZERO;
        for activity in activities.iter().filter(|a| a.account_type == account_type) {
            let balance = activity.balance();
            total += balance;
            if !balance.is_zero() {
                lines.push(AccountBalanceLine {
                    code: activity.code.clone(),
                    name: activity.name.clone(),
                    balance,
                });
            }
        }
        lines.sort_by(|a, b| a.code.cmp(&b.code));
        (lines, total)
    }

    fn type_total(activities: &[AccountActivity], account_type: AccountType) -> Money {
        activities
            .iter()
            .filter(|a| a.account_type == account_type)
            .map(AccountActivity::balance)
            .sum()
    }
}
