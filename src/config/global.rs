//! User configuration for wincat.
//!
//! Settings live in a TOML file at `~/.wincat/config.toml`
//! (`%LOCALAPPDATA%\wincat\config.toml` on Windows). Set `WINCAT_CONFIG` to
//! point somewhere else, or pass `--config` on the command line. A missing
//! file is not an error: every key has a default.
//!
//! # File Format
//!
//! ```toml
//! manifests_dir = "~/src/winget-pkgs/manifests"
//! index_path = "$XDG_DATA_HOME/wincat/index.json"
//! page_size = 5
//! default_limit = 50
//! max_limit = 200
//! preferred_locale = "en-us"
//! ```
//!
//! Path values are expanded with `~` and `$VAR` substitution when resolved.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_INDEX_PATH, DEFAULT_MANIFESTS_DIR, DEFAULT_PAGE_SIZE,
    DEFAULT_PREFERRED_LOCALE, DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT,
};
use crate::core::CatalogError;

/// User-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the manifest tree to catalog.
    pub manifests_dir: String,

    /// Where the JSON catalog artifact is written and read.
    pub index_path: String,

    /// Entries revealed per page when browsing.
    pub page_size: usize,

    /// Result count when a query gives none.
    pub default_limit: usize,

    /// Upper bound on any requested result count.
    pub max_limit: usize,

    /// Locale code whose `*.locale.<code>.yaml` files are read.
    pub preferred_locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifests_dir: DEFAULT_MANIFESTS_DIR.to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            default_limit: DEFAULT_QUERY_LIMIT,
            max_limit: MAX_QUERY_LIMIT,
            preferred_locale: DEFAULT_PREFERRED_LOCALE.to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, or defaults if nothing is there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the settings are out of range.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from `path` if given (it must exist), otherwise as [`load`](Self::load).
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    /// Load from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// `WINCAT_CONFIG` if set, otherwise the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("wincat")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".wincat")
        };

        Ok(config_dir.join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.page_size == 0 {
            return Err(config_error("page_size must be at least 1"));
        }
        if self.max_limit == 0 {
            return Err(config_error("max_limit must be at least 1"));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(config_error(format!(
                "default_limit must be between 1 and max_limit ({})",
                self.max_limit
            )));
        }
        if self.preferred_locale.trim().is_empty() {
            return Err(config_error("preferred_locale must not be empty"));
        }
        Ok(())
    }

    /// [`manifests_dir`](Self::manifests_dir) with `~` and variables expanded.
    pub fn manifests_path(&self) -> Result<PathBuf> {
        expand_path(&self.manifests_dir)
    }

    /// [`index_path`](Self::index_path) with `~` and variables expanded.
    pub fn index_file(&self) -> Result<PathBuf> {
        expand_path(&self.index_path)
    }
}

fn config_error(message: impl Into<String>) -> CatalogError {
    CatalogError::ConfigError {
        message: message.into(),
    }
}

/// Expands `~` and `$VAR`/`${VAR}` in a configured path.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Failed to expand path '{raw}'"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
