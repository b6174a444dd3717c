//! wincat - catalog and search for Windows package manifests
//!
//! wincat reads a large tree of winget-style package manifests (one
//! directory per package version, several `*.yaml` files per version),
//! collapses it into one compact JSON index with a single entry per package,
//! and serves ranked, paginated search over that index.
//!
//! # Architecture Overview
//!
//! Building and querying are separate phases joined by the JSON artifact:
//!
//! 1. [`catalog::CatalogBuilder`] walks the tree, keeps candidate files,
//!    extracts a fixed field set from each ([`manifest`]), and resolves
//!    duplicates per identifier by version ([`version`]), then writes the
//!    sorted snapshot with [`catalog::save_catalog`].
//! 2. [`catalog::CatalogStore`] loads the artifact and publishes it as an
//!    immutable snapshot that readers query concurrently.
//! 3. [`search::rank`] orders matches by a fixed tier table;
//!    [`search::Session`] discloses browse or search results a page at a time.
//!
//! # Core Modules
//!
//! - [`catalog`] - Catalog entries, the builder, artifact IO, and the published store
//! - [`manifest`] - Field extraction and role classification for single manifest files
//! - [`version`] - Component-wise version comparison
//! - [`search`] - Relevance ranking and incremental result disclosure
//! - [`core`] - Error types and user-facing error reporting
//!
//! # Supporting Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - User configuration (`~/.wincat/config.toml`)
//! - [`constants`] - Shared defaults
//! - [`utils`] - Atomic file writes and progress indicators
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wincat::catalog::{BuildOptions, CatalogBuilder, CatalogStore};
//!
//! # fn example() -> anyhow::Result<()> {
//! let output = CatalogBuilder::new(BuildOptions::default())
//!     .build(Path::new("data/winget-pkgs/manifests"))?;
//! println!("{} packages", output.report.packages);
//!
//! let store = CatalogStore::with_catalog(output.catalog);
//! for entry in store.search("visual code", 5, 0)?.items {
//!     println!("{} {}", entry.identifier, entry.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod manifest;
pub mod search;
pub mod utils;
pub mod version;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
