//! Core ledger logic for Bursar.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! All domain types, validation rules, state machines, and allocation
//! algorithms live here; persistence facts are injected as closures or
//! plain snapshot structs.
//!
//! # Modules
//!
//! - `ledger` - Double-entry posting validation and resolution
//! - `workflow` - Void/approval state machine and reversal construction
//! - `allocation` - Payment-to-invoice allocation strategies
//! - `credit` - Append-only student credit ledger
//! - `idempotency` - Duplicate request detection
//! - `reports` - Balance sheet and trial balance computation

pub mod allocation;
pub mod credit;
pub mod idempotency;
pub mod ledger;
pub mod reports;
pub mod workflow;
