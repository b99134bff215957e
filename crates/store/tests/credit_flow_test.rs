//! Credit ledger operations against the embedded store.

mod common;

use bursar_shared::types::UserId;

use bursar_core::allocation::InvoiceStatus;
use bursar_core::credit::{CreditError, CreditTxType};
use bursar_store::OpError;

use common::{date, money, seeded_store, tuition_invoice};

#[test]
fn test_credit_applies_across_invoices_fifo() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Amina").unwrap();
    // Past due dates, ascending: both overdue as of the application date.
    let first = tuition_invoice(
        &mut store,
        student,
        50_000,
        date(2026, 1, 1),
        date(2026, 1, 31),
        bursar,
    );
    let second = tuition_invoice(
        &mut store,
        student,
        30_000,
        date(2026, 1, 2),
        date(2026, 2, 28),
        bursar,
    );

    store
        .add_credit(student, money(70_000), Some("Scholarship grant".to_string()), bursar)
        .unwrap();
    let outcome = store.apply_credit(student, date(2026, 3, 1), bursar).unwrap();

    assert_eq!(outcome.total_applied, money(70_000));
    assert_eq!(outcome.invoices_affected, 2);
    assert_eq!(outcome.allocations[0].invoice_id, first.invoice_id);
    assert_eq!(outcome.allocations[0].amount, money(50_000));
    assert_eq!(outcome.allocations[0].new_status, InvoiceStatus::Paid);
    assert_eq!(outcome.allocations[1].invoice_id, second.invoice_id);
    assert_eq!(outcome.allocations[1].amount, money(20_000));
    assert_eq!(outcome.allocations[1].new_status, InvoiceStatus::Partial);
    assert!(outcome.remaining_balance.is_zero());
    assert_eq!(store.credit_balance(student).unwrap(), money(0));
}

#[test]
fn test_overdue_invoices_served_before_future_ones() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Bashir").unwrap();
    // Due after the application date, created first.
    let future = tuition_invoice(
        &mut store,
        student,
        40_000,
        date(2026, 1, 1),
        date(2030, 1, 31),
        bursar,
    );
    // Overdue as of the application date, created second.
    let overdue = tuition_invoice(
        &mut store,
        student,
        40_000,
        date(2026, 1, 2),
        date(2026, 1, 31),
        bursar,
    );

    store.add_credit(student, money(10_000), None, bursar).unwrap();
    let outcome = store.apply_credit(student, date(2026, 6, 1), bursar).unwrap();

    assert_eq!(outcome.invoices_affected, 1);
    assert_eq!(outcome.allocations[0].invoice_id, overdue.invoice_id);
    let untouched = store.read(|t| t.invoices[&future.invoice_id].amount_paid);
    assert!(untouched.is_zero());
}

#[test]
fn test_apply_credit_without_balance_fails() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Chidi").unwrap();
    tuition_invoice(
        &mut store,
        student,
        50_000,
        date(2026, 1, 1),
        date(2026, 1, 31),
        bursar,
    );

    assert!(matches!(
        store.apply_credit(student, date(2026, 3, 1), bursar),
        Err(OpError::Credit(CreditError::NoBalance))
    ));
}

#[test]
fn test_apply_credit_without_invoices_fails_and_keeps_balance() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Dayo").unwrap();
    store.add_credit(student, money(30_000), None, bursar).unwrap();

    assert!(matches!(
        store.apply_credit(student, date(2026, 3, 1), bursar),
        Err(OpError::Credit(CreditError::NoOutstandingInvoices))
    ));
    assert_eq!(store.credit_balance(student).unwrap(), money(30_000));
}

#[test]
fn test_add_credit_rejects_non_positive() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Esi").unwrap();

    assert!(matches!(
        store.add_credit(student, money(0), None, bursar),
        Err(OpError::Credit(CreditError::NonPositiveAmount))
    ));
    assert!(matches!(
        store.add_credit(student, money(-100), None, bursar),
        Err(OpError::Credit(CreditError::NonPositiveAmount))
    ));
}

#[test]
fn test_reverse_credit_appends_refund_row() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Femi").unwrap();
    let granted = store.add_credit(student, money(20_000), None, bursar).unwrap();

    let reversed = store
        .reverse_credit(granted.credit_tx_id, "Entered twice", bursar)
        .unwrap();
    assert!(reversed.new_balance.is_zero());
    assert_eq!(store.credit_balance(student).unwrap(), money(0));

    // The original row is untouched; a Refunded row was appended.
    let rows = store.read(|t| {
        t.credit_rows_of(student)
            .into_iter()
            .map(|r| (r.tx_type, r.amount))
            .collect::<Vec<_>>()
    });
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], (CreditTxType::Received, money(20_000)));
    assert_eq!(rows[1], (CreditTxType::Refunded, money(20_000)));
}

#[test]
fn test_applied_credit_is_not_reversible() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Goma").unwrap();
    tuition_invoice(
        &mut store,
        student,
        50_000,
        date(2026, 1, 1),
        date(2026, 1, 31),
        bursar,
    );
    store.add_credit(student, money(10_000), None, bursar).unwrap();
    store.apply_credit(student, date(2026, 3, 1), bursar).unwrap();

    let applied_id = store.read(|t| {
        t.credit_rows_of(student)
            .into_iter()
            .find(|r| r.tx_type == CreditTxType::Applied)
            .map(|r| r.id)
            .unwrap()
    });
    assert!(matches!(
        store.reverse_credit(applied_id, "nope", bursar),
        Err(OpError::Credit(CreditError::NotReversible(_)))
    ));
}

#[test]
fn test_received_row_reversed_only_once() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Idris").unwrap();
    let granted = store.add_credit(student, money(10_000), None, bursar).unwrap();

    store
        .reverse_credit(granted.credit_tx_id, "Entered twice", bursar)
        .unwrap();
    assert!(matches!(
        store.reverse_credit(granted.credit_tx_id, "Entered twice", bursar),
        Err(OpError::Credit(CreditError::AlreadyReversed(id))) if id == granted.credit_tx_id
    ));

    // Exactly one refund row; the balance stayed at zero.
    let refunds = store.read(|t| {
        t.credit_rows_of(student)
            .into_iter()
            .filter(|r| r.tx_type == CreditTxType::Refunded)
            .count()
    });
    assert_eq!(refunds, 1);
    assert_eq!(store.credit_balance(student).unwrap(), money(0));
}

#[test]
fn test_reversal_rejected_once_credit_is_applied() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Jamila").unwrap();
    tuition_invoice(
        &mut store,
        student,
        10_000,
        date(2026, 1, 1),
        date(2026, 1, 31),
        bursar,
    );
    let granted = store.add_credit(student, money(10_000), None, bursar).unwrap();
    store.apply_credit(student, date(2026, 3, 1), bursar).unwrap();

    // The received funds now live on the invoice; there is nothing left
    // to hand back.
    assert!(matches!(
        store.reverse_credit(granted.credit_tx_id, "refund please", bursar),
        Err(OpError::Credit(CreditError::InsufficientBalance { .. }))
    ));
    assert_eq!(store.credit_balance(student).unwrap(), money(0));
}

#[test]
fn test_cache_column_tracks_derived_balance() {
    let mut store = seeded_store();
    let bursar = UserId::new();
    let student = store.register_subject("Hawa").unwrap();
    tuition_invoice(
        &mut store,
        student,
        50_000,
        date(2026, 1, 1),
        date(2026, 1, 31),
        bursar,
    );

    store.add_credit(student, money(70_000), None, bursar).unwrap();
    assert_eq!(store.read(|t| t.subjects[&student].credit_balance), money(70_000));

    store.apply_credit(student, date(2026, 3, 1), bursar).unwrap();
    let derived = store.credit_balance(student).unwrap();
    let cached = store.read(|t| t.subjects[&student].credit_balance);
    assert_eq!(derived, cached);
    assert_eq!(derived, money(20_000));
}
