//! Report input and output types.

use bursar_shared::types::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::types::AccountType;

/// Per-account activity totals, aggregated by storage over posted,
/// non-voided lines up to the report date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActivity {
    /// The account code.
    pub code: String,
    /// The display name.
    pub name: String,
    /// The account type.
    pub account_type: AccountType,
    /// Sum of debit amounts.
    pub debit_total: Money,
    /// Sum of credit amounts.
    pub credit_total: Money,
}

impl AccountActivity {
    /// The signed balance under the account's normal-side convention.
    #[must_use]
    pub fn balance(&self) -> Money {
        self.account_type.balance(self.debit_total, self.credit_total)
    }
}

/// One account's line on a balance sheet section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceLine {
    /// The account code.
    pub code: String,
    /// The display name.
    pub name: String,
    /// The signed balance.
    pub balance: Money,
}

/// A point-in-time balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// The report date; lines after it are excluded.
    pub as_of: NaiveDate,
    /// Asset accounts with non-zero balances.
    pub assets: Vec<AccountBalanceLine>,
    /// Liability accounts with non-zero balances.
    pub liabilities: Vec<AccountBalanceLine>,
    /// Equity accounts with non-zero balances.
    pub equity: Vec<AccountBalanceLine>,
    /// Total of all asset balances, zero-balance accounts included.
    pub total_assets: Money,
    /// Total of all liability balances.
    pub total_liabilities: Money,
    /// Total of all equity balances.
    pub total_equity: Money,
    /// Revenue minus expense over the same date filter.
    pub net_income: Money,
    /// True iff assets == liabilities + equity + net income, exactly.
    pub is_balanced: bool,
}

/// One account's row on a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account code.
    pub code: String,
    /// The display name.
    pub name: String,
    /// The balance, shown on the debit column if debit-leaning.
    pub debit: Money,
    /// The balance, shown on the credit column if credit-leaning.
    pub credit: Money,
}

/// A trial balance as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// The report date.
    pub as_of: NaiveDate,
    /// Rows for accounts with non-zero balances, ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Money,
    /// Sum of the credit column.
    pub total_credit: Money,
    /// True iff the two columns match exactly.
    pub is_balanced: bool,
}
