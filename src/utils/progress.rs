//! Progress indicators for long-running operations.
//!
//! A thin wrapper over `indicatif` so catalog builds can show a spinner in
//! interactive use while staying silent in scripts, CI, and tests.
//!
//! Progress is disabled when:
//! - the `WINCAT_NO_PROGRESS` environment variable is set
//! - the caller asks for a hidden bar (`--no-progress`, `--quiet`)
//!
//! # Examples
//!
//! ```rust,no_run
//! use wincat::utils::progress::ProgressBar;
//!
//! let spinner = ProgressBar::new_spinner();
//! spinner.set_message("Scanning manifests");
//! // ... work ...
//! spinner.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

use crate::constants::NO_PROGRESS_ENV_VAR;

fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV_VAR).is_some()
}

/// Spinner that renders nothing when progress is disabled.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a ticking spinner for work of unknown length.
    pub fn new_spinner() -> Self {
        if is_progress_disabled() {
            return Self::hidden();
        }
        let bar = IndicatifBar::new_spinner();
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            inner: bar,
        }
    }

    /// A bar that never draws.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_accepts_updates() {
        let bar = ProgressBar::hidden();
        assert!(bar.is_hidden());
        bar.set_message("working");
        bar.finish_and_clear();
    }
}
