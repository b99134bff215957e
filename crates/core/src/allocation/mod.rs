//! Payment-to-invoice allocation.
//!
//! Applies an amount across outstanding invoices in strategy-defined
//! priority order and derives each invoice's status from cumulative
//! payment. The ordering is a trait so alternative priorities can be
//! added without touching the engine.

pub mod error;
pub mod service;
pub mod strategy;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::AllocationError;
pub use service::AllocationService;
pub use strategy::{AllocationOrder, DueDateFifo, OverdueFirst};
pub use types::{AllocationPlan, InvoiceSnapshot, InvoiceStatus, PlannedAllocation};
