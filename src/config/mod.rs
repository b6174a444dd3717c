//! Configuration for wincat.
//!
//! There is a single user-level TOML file; see [`global`] for its location
//! and keys. Command-line flags override what it says.

pub mod global;

pub use global::{Config, expand_path};
