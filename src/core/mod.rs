//! Core types and error handling for wincat.
//!
//! - [`CatalogError`]: strongly-typed failures surfaced by the builder and the store
//! - [`ErrorContext`]: error plus user-facing suggestion and details
//! - [`user_friendly_error`]: converts an `anyhow::Error` for CLI display

pub mod error;

pub use error::{CatalogError, ErrorContext, user_friendly_error};
