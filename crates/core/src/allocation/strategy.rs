//! Invoice ordering strategies.
//!
//! The engine walks invoices in strategy order, so the strategy alone
//! decides which invoices are satisfied first.

use chrono::NaiveDate;

use super::types::InvoiceSnapshot;

/// Orders outstanding invoices for allocation.
pub trait AllocationOrder {
    /// Strategy name, for logs and audit notes.
    fn name(&self) -> &'static str;

    /// Sorts invoices into application order.
    fn sort(&self, invoices: &mut [InvoiceSnapshot], today: NaiveDate);
}

/// Oldest due date first; ties broken by oldest invoice date, then lowest
/// id (ids are time-ordered, so this is creation order).
///
/// Used for direct payments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DueDateFifo;

impl AllocationOrder for DueDateFifo {
    fn name(&self) -> &'static str {
        "due_date_fifo"
    }

    fn sort(&self, invoices: &mut [InvoiceSnapshot], _today: NaiveDate) {
        invoices.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.invoice_date.cmp(&b.invoice_date))
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

/// Overdue invoices first (due date passed as of `today`), then ascending
/// due date with the same tie-breaks as [`DueDateFifo`].
///
/// Used for credit balance application.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverdueFirst;

impl AllocationOrder for OverdueFirst {
    fn name(&self) -> &'static str {
        "overdue_first"
    }

    fn sort(&self, invoices: &mut [InvoiceSnapshot], today: NaiveDate) {
        invoices.sort_by(|a, b| {
            // false < true, so overdue (true) must compare smaller: invert.
            b.is_overdue(today)
                .cmp(&a.is_overdue(today))
                .then_with(|| a.due_date.cmp(&b.due_date))
                .then_with(|| a.invoice_date.cmp(&b.invoice_date))
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::types::InvoiceStatus;
    use bursar_shared::types::{InvoiceId, Money, SubjectId};

    fn invoice(due: (i32, u32, u32), dated: (i32, u32, u32)) -> InvoiceSnapshot {
        InvoiceSnapshot {
            id: InvoiceId::new(),
            subject_id: SubjectId::new(),
            invoice_date: NaiveDate::from_ymd_opt(dated.0, dated.1, dated.2).unwrap(),
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            total: Money::from_minor(10_000),
            amount_paid: Money::ZERO,
            status: InvoiceStatus::Pending,
        }
    }

    #[test]
    fn test_fifo_orders_by_due_date() {
        let a = invoice((2026, 3, 1), (2026, 1, 1));
        let b = invoice((2026, 1, 15), (2026, 1, 2));
        let c = invoice((2026, 2, 1), (2026, 1, 3));
        let mut invoices = vec![a.clone(), b.clone(), c.clone()];

        DueDateFifo.sort(&mut invoices, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        assert_eq!(invoices[0].id, b.id);
        assert_eq!(invoices[1].id, c.id);
        assert_eq!(invoices[2].id, a.id);
    }

    #[test]
    fn test_fifo_tie_breaks_on_invoice_date_then_id() {
        let a = invoice((2026, 2, 1), (2026, 1, 5));
        let b = invoice((2026, 2, 1), (2026, 1, 2));
        let c = invoice((2026, 2, 1), (2026, 1, 2));
        let mut invoices = vec![a.clone(), c.clone(), b.clone()];

        DueDateFifo.sort(&mut invoices, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        assert_eq!(invoices[2].id, a.id);
        // b was created before c, so its v7 id is lower.
        assert_eq!(invoices[0].id, b.id);
        assert_eq!(invoices[1].id, c.id);
    }

    #[test]
    fn test_overdue_first_promotes_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        let future = invoice((2026, 3, 1), (2026, 1, 1));
        let overdue_late = invoice((2026, 2, 10), (2026, 1, 2));
        let overdue_early = invoice((2026, 1, 31), (2026, 1, 3));
        let mut invoices = vec![future.clone(), overdue_late.clone(), overdue_early.clone()];

        OverdueFirst.sort(&mut invoices, today);
        assert_eq!(invoices[0].id, overdue_early.id);
        assert_eq!(invoices[1].id, overdue_late.id);
        assert_eq!(invoices[2].id, future.id);
    }

    #[test]
    fn test_overdue_first_without_overdue_matches_fifo() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let a = invoice((2026, 3, 1), (2026, 1, 1));
        let b = invoice((2026, 2, 1), (2026, 1, 2));
        let mut fifo = vec![a.clone(), b.clone()];
        let mut overdue = vec![a, b];

        DueDateFifo.sort(&mut fifo, today);
        OverdueFirst.sort(&mut overdue, today);
        let fifo_ids: Vec<_> = fifo.iter().map(|i| i.id).collect();
        let overdue_ids: Vec<_> = overdue.iter().map(|i| i.id).collect();
        assert_eq!(fifo_ids, overdue_ids);
    }
}
