//! Utilities shared by the library and the CLI.
//!
//! - [`fs`] - atomic writes for the catalog artifact
//! - [`progress`] - spinners for long-running builds

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir};
pub use progress::ProgressBar;
