//! Financial report aggregation.
//!
//! Reports are pure folds over posted, non-voided journal lines dated
//! on or before the report date. Storage supplies per-account debit and
//! credit totals; everything after that is arithmetic.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ReportsService;
pub use types::{AccountActivity, AccountBalanceLine, BalanceSheet, TrialBalance, TrialBalanceRow};
