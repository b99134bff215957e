//! The embedded table set and its transaction discipline.
//!
//! Single-writer, transaction-per-request: every public operation runs a
//! closure against a staged copy of all tables. `Ok` swaps the staged
//! state in; `Err` discards it. Nothing partial is ever observable, and
//! a failure anywhere in an operation rolls back every write it staged.

use std::collections::BTreeMap;

use bursar_shared::config::LedgerConfig;
use bursar_shared::types::{
    AccountId, CreditTxId, EntryId, InvoiceId, PaymentId, ReceiptId, SubjectId,
};

use bursar_core::workflow::ApprovalRule;

use crate::error::OpError;
use crate::rows::{
    AccountRow, AllocationRow, CreditTxRow, InvoiceRow, JournalEntryRow, JournalLineRow,
    PaymentRow, ReceiptRow, SubjectRow,
};

/// Every stored table, plus the reference sequences.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// Chart of accounts.
    pub accounts: BTreeMap<AccountId, AccountRow>,
    /// Account holders.
    pub subjects: BTreeMap<SubjectId, SubjectRow>,
    /// Journal entry headers.
    pub entries: BTreeMap<EntryId, JournalEntryRow>,
    /// Journal entry lines.
    pub lines: Vec<JournalLineRow>,
    /// Invoices.
    pub invoices: BTreeMap<InvoiceId, InvoiceRow>,
    /// Payments.
    pub payments: BTreeMap<PaymentId, PaymentRow>,
    /// Receipts.
    pub receipts: BTreeMap<ReceiptId, ReceiptRow>,
    /// Append-only credit ledger.
    pub credit_txs: BTreeMap<CreditTxId, CreditTxRow>,
    /// Allocation splits.
    pub allocations: Vec<AllocationRow>,
    /// Approval rules for the void workflow.
    pub approval_rules: Vec<ApprovalRule>,
    /// Journal entry reference sequence.
    pub entry_seq: u64,
    /// Invoice number sequence.
    pub invoice_seq: u64,
    /// Receipt number sequence.
    pub receipt_seq: u64,
}

impl Tables {
    /// Looks up an account by its unique code.
    #[must_use]
    pub fn account_by_code(&self, code: &str) -> Option<&AccountRow> {
        self.accounts.values().find(|a| a.code == code)
    }

    /// Issues the next journal entry reference.
    pub fn next_entry_reference(&mut self) -> String {
        self.entry_seq += 1;
        format!("JE-{}", self.entry_seq)
    }

    /// Issues the next invoice number.
    pub fn next_invoice_number(&mut self) -> String {
        self.invoice_seq += 1;
        format!("INV-{}", self.invoice_seq)
    }

    /// Issues the next receipt number.
    pub fn next_receipt_number(&mut self) -> String {
        self.receipt_seq += 1;
        format!("RCT-{}", self.receipt_seq)
    }

    /// The lines of one entry, in line-number order.
    #[must_use]
    pub fn lines_of(&self, entry_id: EntryId) -> Vec<&JournalLineRow> {
        let mut lines: Vec<_> = self.lines.iter().filter(|l| l.entry_id == entry_id).collect();
        lines.sort_by_key(|l| l.line_no);
        lines
    }

    /// A subject's credit ledger rows, oldest first.
    #[must_use]
    pub fn credit_rows_of(&self, subject_id: SubjectId) -> Vec<&CreditTxRow> {
        // BTreeMap over v7 ids iterates in creation order already.
        self.credit_txs
            .values()
            .filter(|r| r.subject_id == subject_id)
            .collect()
    }
}

/// The embedded single-writer ledger store.
///
/// Holds the committed [`Tables`] and the loaded configuration. All
/// mutations go through [`LedgerStore::transaction`].
#[derive(Debug)]
pub struct LedgerStore {
    tables: Tables,
    config: LedgerConfig,
}

impl LedgerStore {
    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            tables: Tables::default(),
            config,
        }
    }

    /// Creates an empty store with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LedgerConfig::default())
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Runs `op` atomically.
    ///
    /// The closure receives a staged copy of the tables; on `Ok` the copy
    /// replaces the committed state, on `Err` it is dropped and the error
    /// propagates with the committed state untouched.
    pub fn transaction<T>(
        &mut self,
        op_name: &'static str,
        op: impl FnOnce(&mut Tables, &LedgerConfig) -> Result<T, OpError>,
    ) -> Result<T, OpError> {
        let mut staged = self.tables.clone();
        match op(&mut staged, &self.config) {
            Ok(value) => {
                self.tables = staged;
                tracing::info!(op = op_name, "committed");
                Ok(value)
            }
            Err(err) => {
                if err.is_expected() {
                    tracing::debug!(op = op_name, error = %err, "rejected");
                } else {
                    tracing::warn!(op = op_name, error = %err, "rolled back");
                }
                Err(err)
            }
        }
    }

    /// Runs a read-only query against the committed state.
    pub fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> T {
        query(&self.tables)
    }

    /// Replaces the approval rule set.
    pub fn set_approval_rules(&mut self, rules: Vec<ApprovalRule>) {
        self.tables.approval_rules = rules;
    }
}
