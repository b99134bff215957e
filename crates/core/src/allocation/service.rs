//! Allocation planning engine.

use bursar_shared::types::{Money, SubjectId};
use chrono::NaiveDate;

use super::error::AllocationError;
use super::strategy::AllocationOrder;
use super::types::{AllocationPlan, InvoiceSnapshot, InvoiceStatus, PlannedAllocation};

/// Stateless allocation planner.
///
/// Takes a snapshot of the account holder's invoices and an amount, and
/// produces the allocations and remainder without touching storage. The
/// caller persists the plan inside its own transaction.
pub struct AllocationService;

impl AllocationService {
    /// Plans the application of `amount` across `invoices`.
    ///
    /// Invoices that are not allocatable are skipped. The rest are walked
    /// in the order `strategy` dictates; each receives the lesser of the
    /// remaining amount and its outstanding balance. Whatever is left when
    /// every invoice is satisfied becomes the plan's remainder.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NonPositiveAmount`] if `amount` is zero
    /// or negative.
    pub fn plan<S: AllocationOrder>(
        mut invoices: Vec<InvoiceSnapshot>,
        amount: Money,
        strategy: &S,
        today: NaiveDate,
    ) -> Result<AllocationPlan, AllocationError> {
        if !amount.is_positive() {
            return Err(AllocationError::NonPositiveAmount);
        }

        invoices.retain(|inv| inv.status.is_allocatable() && inv.outstanding().is_positive());
        strategy.sort(&mut invoices, today);

        let mut remaining = amount;
        let mut allocations = Vec::new();
        for invoice in &invoices {
            if remaining.is_zero() {
                break;
            }
            let slice = remaining.min(invoice.outstanding());
            let new_amount_paid = invoice.amount_paid + slice;
            allocations.push(PlannedAllocation {
                invoice_id: invoice.id,
                amount: slice,
                new_amount_paid,
                new_status: InvoiceStatus::derive(invoice.status, new_amount_paid, invoice.total),
            });
            remaining -= slice;
        }

        Ok(AllocationPlan {
            applied_total: amount - remaining,
            remainder: remaining,
            allocations,
        })
    }

    /// Validates a payment targeted at one specific invoice.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts, invoices billed to a different
    /// account holder, invoices that cannot receive payments, and amounts
    /// above the outstanding balance (targeted payments never overpay).
    pub fn validate_target(
        invoice: &InvoiceSnapshot,
        subject_id: SubjectId,
        amount: Money,
    ) -> Result<(), AllocationError> {
        if !amount.is_positive() {
            return Err(AllocationError::NonPositiveAmount);
        }
        if invoice.subject_id != subject_id {
            return Err(AllocationError::WrongSubject);
        }
        if !invoice.status.is_allocatable() {
            return Err(AllocationError::NotAllocatable(invoice.status));
        }
        let outstanding = invoice.outstanding();
        if amount > outstanding {
            return Err(AllocationError::ExceedsOutstanding {
                requested: amount,
                outstanding,
            });
        }
        Ok(())
    }
}
