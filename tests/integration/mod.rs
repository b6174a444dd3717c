//! Integration test suite for wincat
//!
//! End-to-end tests that run the `wincat` binary against manifest trees
//! built in temporary directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: Building the index from a manifest tree
//! - **search**: `search`, `list`, `show`, and `browse` over a built index
//! - **errors**: Missing trees, missing or damaged indexes, bad config

#[path = "../common/mod.rs"]
mod common;

mod build;
mod errors;
mod search;
