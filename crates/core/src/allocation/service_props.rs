//! Property tests for the allocation planner.

use bursar_shared::types::{InvoiceId, Money, SubjectId};
use chrono::NaiveDate;
use proptest::prelude::*;

use super::service::AllocationService;
use super::strategy::{AllocationOrder, DueDateFifo, OverdueFirst};
use super::types::{InvoiceSnapshot, InvoiceStatus};

fn any_invoice() -> impl Strategy<Value = InvoiceSnapshot> {
    (1u32..=28, 1u32..=12, 1i64..500_000, 0i64..500_000).prop_map(|(day, month, total, paid)| {
        let paid = paid.min(total);
        let status = if paid == 0 {
            InvoiceStatus::Pending
        } else if paid < total {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Paid
        };
        InvoiceSnapshot {
            id: InvoiceId::new(),
            subject_id: SubjectId::new(),
            invoice_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
            total: Money::from_minor(total),
            amount_paid: Money::from_minor(paid),
            status,
        }
    })
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applied total is exactly min(amount, total outstanding) and the
    /// remainder accounts for the rest.
    #[test]
    fn prop_conservation_of_money(
        invoices in prop::collection::vec(any_invoice(), 0..8),
        amount in 1i64..2_000_000,
    ) {
        let outstanding_sum: i64 = invoices
            .iter()
            .filter(|i| i.status.is_allocatable())
            .map(|i| i.outstanding().minor())
            .sum();

        let amount = Money::from_minor(amount);
        let plan = AllocationService::plan(invoices, amount, &DueDateFifo, today()).unwrap();

        prop_assert_eq!(plan.applied_total + plan.remainder, amount);
        prop_assert_eq!(
            plan.applied_total,
            amount.min(Money::from_minor(outstanding_sum))
        );
        let allocated: Money = plan.allocations.iter().map(|a| a.amount).sum();
        prop_assert_eq!(allocated, plan.applied_total);
    }

    /// Every allocation is positive and never exceeds the invoice's
    /// outstanding balance; the derived status matches the new paid total.
    #[test]
    fn prop_allocations_within_bounds(
        invoices in prop::collection::vec(any_invoice(), 1..8),
        amount in 1i64..2_000_000,
    ) {
        let by_id: std::collections::HashMap<_, _> =
            invoices.iter().map(|i| (i.id, i.clone())).collect();
        let plan = AllocationService::plan(
            invoices,
            Money::from_minor(amount),
            &DueDateFifo,
            today(),
        )
        .unwrap();

        for alloc in &plan.allocations {
            let invoice = &by_id[&alloc.invoice_id];
            prop_assert!(alloc.amount.is_positive());
            prop_assert!(alloc.amount <= invoice.outstanding());
            prop_assert_eq!(alloc.new_amount_paid, invoice.amount_paid + alloc.amount);
            prop_assert!(alloc.new_amount_paid <= invoice.total);
            if alloc.new_amount_paid == invoice.total {
                prop_assert_eq!(alloc.new_status, InvoiceStatus::Paid);
            } else {
                prop_assert_eq!(alloc.new_status, InvoiceStatus::Partial);
            }
        }
    }

    /// FIFO plans visit invoices in ascending due-date order.
    #[test]
    fn prop_fifo_allocates_in_due_order(
        invoices in prop::collection::vec(any_invoice(), 1..8),
        amount in 1i64..2_000_000,
    ) {
        let by_id: std::collections::HashMap<_, _> =
            invoices.iter().map(|i| (i.id, i.clone())).collect();
        let plan = AllocationService::plan(
            invoices,
            Money::from_minor(amount),
            &DueDateFifo,
            today(),
        )
        .unwrap();

        for pair in plan.allocations.windows(2) {
            let a = &by_id[&pair[0].invoice_id];
            let b = &by_id[&pair[1].invoice_id];
            prop_assert!(a.due_date <= b.due_date);
        }
    }

    /// The overdue-first strategy never allocates to a future-dated
    /// invoice while an overdue one still has an outstanding balance.
    #[test]
    fn prop_overdue_served_before_future(
        invoices in prop::collection::vec(any_invoice(), 1..8),
        amount in 1i64..2_000_000,
    ) {
        let by_id: std::collections::HashMap<_, _> =
            invoices.iter().map(|i| (i.id, i.clone())).collect();
        let plan = AllocationService::plan(
            invoices,
            Money::from_minor(amount),
            &OverdueFirst,
            today(),
        )
        .unwrap();

        let mut seen_future = false;
        for alloc in &plan.allocations {
            let invoice = &by_id[&alloc.invoice_id];
            if invoice.is_overdue(today()) {
                prop_assert!(!seen_future);
            } else {
                seen_future = true;
            }
        }
    }

    /// Both strategies apply the same total; only the order differs.
    #[test]
    fn prop_strategies_apply_same_total(
        invoices in prop::collection::vec(any_invoice(), 0..8),
        amount in 1i64..2_000_000,
    ) {
        let amount = Money::from_minor(amount);
        let fifo =
            AllocationService::plan(invoices.clone(), amount, &DueDateFifo, today()).unwrap();
        let overdue =
            AllocationService::plan(invoices, amount, &OverdueFirst, today()).unwrap();
        prop_assert_eq!(fifo.applied_total, overdue.applied_total);
        prop_assert_eq!(fifo.remainder, overdue.remainder);
    }

    /// Sorting is idempotent for both strategies.
    #[test]
    fn prop_sort_idempotent(mut invoices in prop::collection::vec(any_invoice(), 0..8)) {
        DueDateFifo.sort(&mut invoices, today());
        let once: Vec<_> = invoices.iter().map(|i| i.id).collect();
        DueDateFifo.sort(&mut invoices, today());
        let twice: Vec<_> = invoices.iter().map(|i| i.id).collect();
        prop_assert_eq!(once, twice);
    }
}
