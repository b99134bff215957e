//! Shared types, errors, and configuration for Bursar.
//!
//! This crate provides common types used across all other crates:
//! - Integer minor-unit money type (no floating point, ever)
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - Tracing initialization

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::LedgerConfig;
pub use error::{AppError, AppResult};
