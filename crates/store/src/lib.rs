//! Embedded ledger store for Bursar.
//!
//! Owns the durable schema and executes every public operation inside one
//! atomic transaction against an in-memory, single-writer table set. This
//! crate is the system's in-process API: the IPC layer (out of scope)
//! calls the operations on [`LedgerStore`] and serializes the outcomes
//! through [`ApiResponse`].
//!
//! # Modules
//!
//! - `rows` - The stored row types (the schema)
//! - `store` - `Tables`, `LedgerStore`, and the transaction discipline
//! - `ops` - The public operations, one module per engine
//! - `response` - The API-boundary result envelope

pub mod error;
pub mod ops;
pub mod response;
pub mod rows;
pub mod store;

pub use error::OpError;
pub use response::ApiResponse;
pub use store::LedgerStore;
