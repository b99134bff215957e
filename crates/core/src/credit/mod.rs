//! Student credit ledger.
//!
//! Credit is an append-only ledger of signed-effect transactions; the
//! authoritative balance is always the fold of a subject's rows. Any
//! denormalized balance column is a cache kept in sync inside the same
//! atomic operation, never read for correctness-critical decisions.

pub mod error;
pub mod service;
pub mod types;

pub use error::CreditError;
pub use service::CreditService;
pub use types::{CreditTxSnapshot, CreditTxType};
