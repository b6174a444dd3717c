//! Test utilities for wincat
//!
//! Helpers for unit and integration tests: one-time logging setup and
//! fixtures that lay out manifest trees the way the public manifest
//! repository does.
//!
//! # Example
//!
//! ```rust,no_run
//! use wincat::test_utils::ManifestTree;
//!
//! # fn example() -> anyhow::Result<()> {
//! let tree = ManifestTree::new()?;
//! tree.add_package("Valve.Steam", "2.10.91.91", "Steam")?;
//! assert!(tree.root().join("v/Valve/Steam/2.10.91.91").is_dir());
//! # Ok(())
//! # }
//! ```

pub mod fixtures;

pub use fixtures::{ManifestFixture, ManifestTree};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with
/// neither, tests run without logging.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
