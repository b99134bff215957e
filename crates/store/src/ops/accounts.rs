//! Chart-of-accounts and subject maintenance.

use bursar_shared::types::{AccountId, Money, SubjectId};
use chrono::Utc;

use bursar_core::ledger::{AccountType, LedgerError};

use crate::error::OpError;
use crate::rows::{AccountRow, SubjectRow};
use crate::store::LedgerStore;

impl LedgerStore {
    /// Creates a chart-of-accounts entry. Codes are unique.
    pub fn create_account(
        &mut self,
        code: &str,
        name: &str,
        account_type: AccountType,
    ) -> Result<AccountId, OpError> {
        let code = code.trim().to_string();
        let name = name.trim().to_string();
        self.transaction("create_account", move |tables, _| {
            if tables.account_by_code(&code).is_some() {
                return Err(OpError::AccountCodeTaken(code));
            }
            let row = AccountRow {
                id: AccountId::new(),
                code,
                name,
                account_type,
                is_active: true,
                created_at: Utc::now(),
            };
            let id = row.id;
            tables.accounts.insert(id, row);
            Ok(id)
        })
    }

    /// Soft-deactivates an account. Postings against it are rejected
    /// from then on; existing lines are untouched.
    pub fn deactivate_account(&mut self, code: &str) -> Result<(), OpError> {
        let code = code.trim().to_string();
        self.transaction("deactivate_account", move |tables, _| {
            let id = tables
                .account_by_code(&code)
                .map(|a| a.id)
                .ok_or(OpError::Ledger(LedgerError::AccountNotFound(code)))?;
            if let Some(account) = tables.accounts.get_mut(&id) {
                account.is_active = false;
            }
            Ok(())
        })
    }

    /// Registers an account holder with an empty credit ledger.
    pub fn register_subject(&mut self, name: &str) -> Result<SubjectId, OpError> {
        let name = name.trim().to_string();
        self.transaction("register_subject", move |tables, _| {
            let row = SubjectRow {
                id: SubjectId::new(),
                name,
                credit_balance: Money::ZERO,
            };
            let id = row.id;
            tables.subjects.insert(id, row);
            Ok(id)
        })
    }
}
