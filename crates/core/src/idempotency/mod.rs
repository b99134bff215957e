//! Duplicate request detection.
//!
//! Two strategies, checked in order: an explicit caller-supplied key
//! matched exactly against stored rows, then a fuzzy fingerprint match
//! against rows created within a short trailing window. A detected
//! replay returns the original result and writes nothing.

pub mod service;
pub mod types;

pub use service::IdempotencyService;
pub use types::{InvoiceFingerprint, ItemFingerprint, PaymentFingerprint, PaymentMethod};
