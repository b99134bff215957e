//! Reporting reads.
//!
//! Aggregates posted, non-voided journal lines dated on or before the
//! report date into per-account activity, then hands the arithmetic to
//! the core report builder. Void reversals are excluded together with
//! the voided entries they neutralize, so a voided posting contributes
//! nothing rather than minus-once.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use bursar_shared::types::{AccountId, Money};

use bursar_core::ledger::EntryKind;
use bursar_core::reports::{AccountActivity, BalanceSheet, ReportsService, TrialBalance};

use crate::store::{LedgerStore, Tables};

impl LedgerStore {
    /// The balance sheet as of a date.
    ///
    /// Zero-balance accounts are omitted from the listings but counted in
    /// totals; `is_balanced` is exact integer equality of assets against
    /// liabilities + equity + net income.
    pub fn balance_sheet(&self, as_of: NaiveDate) -> BalanceSheet {
        self.read(|tables| ReportsService::balance_sheet(&activities(tables, as_of), as_of))
    }

    /// The trial balance as of a date.
    pub fn trial_balance(&self, as_of: NaiveDate) -> TrialBalance {
        self.read(|tables| ReportsService::trial_balance(&activities(tables, as_of), as_of))
    }
}

fn activities(tables: &Tables, as_of: NaiveDate) -> Vec<AccountActivity> {
    let mut totals: BTreeMap<AccountId, (Money, Money)> = tables
        .accounts
        .keys()
        .map(|&id| (id, (Money::ZERO, Money::ZERO)))
        .collect();

    for line in &tables.lines {
        let Some(entry) = tables.entries.get(&line.entry_id) else {
            continue;
        };
        if !entry.is_posted
            || entry.is_voided
            || entry.kind == EntryKind::VoidReversal
            || entry.entry_date > as_of
        {
            continue;
        }
        if let Some((debit, credit)) = totals.get_mut(&line.account_id) {
            *debit += line.debit;
            *credit += line.credit;
        }
    }

    tables
        .accounts
        .values()
        .filter_map(|account| {
            let &(debit_total, credit_total) = totals.get(&account.id)?;
            Some(AccountActivity {
                code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type,
                debit_total,
                credit_total,
            })
        })
        .collect()
}
