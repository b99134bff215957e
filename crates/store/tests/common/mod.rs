//! Shared fixtures for store integration tests.

use bursar_shared::config::LedgerConfig;
use bursar_shared::types::{FeeCategoryId, Money, SubjectId, UserId};
use chrono::NaiveDate;

use bursar_core::ledger::AccountType;
use bursar_store::ops::{CreateInvoiceInput, InvoiceItemInput, InvoiceOutcome};
use bursar_store::LedgerStore;

/// A store with the full default chart created.
pub fn seeded_store() -> LedgerStore {
    let mut store = LedgerStore::with_defaults();
    seed_chart(&mut store);
    store
}

/// A seeded store with fuzzy replay detection disabled, for tests that
/// record several similar events back to back.
pub fn seeded_store_no_replay() -> LedgerStore {
    let mut config = LedgerConfig::default();
    config.idempotency.replay_window_secs = 0;
    let mut store = LedgerStore::new(config);
    seed_chart(&mut store);
    store
}

pub fn seed_chart(store: &mut LedgerStore) {
    store.create_account("1000", "Cash", AccountType::Asset).unwrap();
    store.create_account("1010", "Bank", AccountType::Asset).unwrap();
    store
        .create_account("1100", "Accounts receivable", AccountType::Asset)
        .unwrap();
    store
        .create_account("2100", "Student credit balances", AccountType::Liability)
        .unwrap();
    store.create_account("4000", "Fee revenue", AccountType::Revenue).unwrap();
}

pub fn money(v: i64) -> Money {
    Money::from_minor(v)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Creates a single-item tuition invoice and returns its outcome.
pub fn tuition_invoice(
    store: &mut LedgerStore,
    subject_id: SubjectId,
    total: i64,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
    created_by: UserId,
) -> InvoiceOutcome {
    store
        .create_invoice(CreateInvoiceInput {
            subject_id,
            term_id: bursar_shared::types::TermId::new(),
            invoice_date,
            due_date,
            items: vec![InvoiceItemInput {
                category_id: FeeCategoryId::new(),
                description: "Tuition".to_string(),
                amount: Money::from_minor(total),
            }],
            created_by,
        })
        .unwrap()
}
