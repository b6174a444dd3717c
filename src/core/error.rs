//! Error handling for wincat
//!
//! This module provides the error taxonomy used by the catalog builder, the
//! catalog store, and the command-line front end, plus user-friendly error
//! reporting for the CLI.
//!
//! # Architecture
//!
//! - [`CatalogError`] - Enumerated error types for every failure the core surfaces
//! - [`ErrorContext`] - Wrapper that adds user-facing suggestions and details
//!
//! # Propagation
//!
//! - Per-file extraction failures ([`CatalogError::MalformedRecord`]) never escape
//!   the builder's traversal; they are counted in the build report and skipped.
//! - Traversal-level failures ([`CatalogError::SourceUnavailable`]) abort a build
//!   and propagate to the caller.
//! - A query issued before any catalog was loaded fails with
//!   [`CatalogError::NoCatalogLoaded`], which is distinct from "zero results".
//!
//! Use [`user_friendly_error`] to turn any `anyhow::Error` into an
//! [`ErrorContext`] that can be printed with colours.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wincat::core::{CatalogError, ErrorContext, user_friendly_error};
//!
//! let error = CatalogError::NoCatalogLoaded;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for wincat operations.
///
/// ## Sources
/// - [`SourceUnavailable`] - manifest root or catalog artifact missing or unreadable
/// - [`MalformedRecord`] - a single manifest failed extraction (recovered locally)
/// - [`MalformedCatalog`] - catalog artifact exists but cannot be parsed
///
/// ## Queries
/// - [`NoCatalogLoaded`] - query issued before any catalog was published
///
/// ## Ambient
/// - [`ConfigError`] - configuration file problems
/// - [`Io`] / [`Json`] - wrapped standard errors
/// - [`Other`] - everything without a dedicated variant
///
/// [`SourceUnavailable`]: CatalogError::SourceUnavailable
/// [`MalformedRecord`]: CatalogError::MalformedRecord
/// [`MalformedCatalog`]: CatalogError::MalformedCatalog
/// [`NoCatalogLoaded`]: CatalogError::NoCatalogLoaded
/// [`ConfigError`]: CatalogError::ConfigError
/// [`Io`]: CatalogError::Io
/// [`Json`]: CatalogError::Json
/// [`Other`]: CatalogError::Other
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The manifest root or the catalog artifact is missing or unreadable.
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable {
        /// Path that could not be read.
        path: String,
        /// Why it could not be read.
        reason: String,
    },

    /// A single manifest file could not be extracted.
    #[error("Malformed manifest {path}: {reason}")]
    MalformedRecord {
        /// Path of the offending manifest.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The catalog artifact exists but is not a valid catalog document.
    #[error("Malformed catalog {path}: {reason}")]
    MalformedCatalog {
        /// Path of the artifact.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// No catalog has been built or loaded yet.
    #[error("No catalog loaded")]
    NoCatalogLoaded,

    /// Configuration file problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else, with its cause chain.
    #[error("{message}")]
    Other {
        /// Message including causes.
        message: String,
    },
}

impl CatalogError {
    /// Builds a [`CatalogError::SourceUnavailable`] from a path and any displayable reason.
    pub fn source_unavailable(path: impl AsRef<std::path::Path>, reason: impl fmt::Display) -> Self {
        Self::SourceUnavailable {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Builds a [`CatalogError::MalformedRecord`] from a path and any displayable reason.
    pub fn malformed_record(path: impl AsRef<std::path::Path>, reason: impl fmt::Display) -> Self {
        Self::MalformedRecord {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Pairs a [`CatalogError`] with an optional suggestion (what the user can do)
/// and optional details (why it happened).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error.
    pub error: CatalogError,
    /// Optional suggestion for resolving the error.
    pub suggestion: Option<String>,
    /// Optional additional details about the error.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new context without suggestion or details.
    #[must_use]
    pub const fn new(error: CatalogError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Adds a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Adds details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Prints the error to stderr with terminal colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Converts any error into an [`ErrorContext`] with suggestions.
///
/// Known [`CatalogError`] variants get tailored advice. Other errors are
/// wrapped with the full `anyhow` chain as the message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Look through the whole chain: `.with_context` layers wrap the typed error
    for cause in error.chain() {
        if let Some(catalog_error) = cause.downcast_ref::<CatalogError>() {
            return create_error_context(catalog_error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(CatalogError::SourceUnavailable {
            path: "unknown".to_string(),
            reason: io_error.to_string(),
        })
        .with_suggestion("Check file ownership and permissions on the manifest tree and index path");
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CatalogError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your wincat config file");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CatalogError::Other {
        message,
    })
}

fn create_error_context(error: &CatalogError) -> ErrorContext {
    match error {
        CatalogError::SourceUnavailable { path, reason } => {
            ErrorContext::new(CatalogError::SourceUnavailable {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_suggestion(
                "Check that the manifest tree exists (set manifests_dir in the config or pass --manifests)",
            )
            .with_details("The manifest tree is synchronized by an external step; wincat only reads it")
        }
        CatalogError::MalformedRecord { path, reason } => {
            ErrorContext::new(CatalogError::MalformedRecord {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_details("Malformed manifests are skipped during builds")
        }
        CatalogError::MalformedCatalog { path, reason } => {
            ErrorContext::new(CatalogError::MalformedCatalog {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_suggestion("Rebuild the index with 'wincat build'")
        }
        CatalogError::NoCatalogLoaded => ErrorContext::new(CatalogError::NoCatalogLoaded)
            .with_suggestion("Build the index first with 'wincat build'")
            .with_details("Queries need a catalog artifact produced by a previous build"),
        CatalogError::ConfigError { message } => ErrorContext::new(CatalogError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Check your wincat config file (WINCAT_CONFIG or ~/.wincat/config.toml)"),
        CatalogError::Io(e) => ErrorContext::new(CatalogError::Io(std::io::Error::new(
            e.kind(),
            e.to_string(),
        ))),
        CatalogError::Json(e) => ErrorContext::new(CatalogError::Other {
            message: format!("JSON error: {e}"),
        }),
        CatalogError::Other { message } => ErrorContext::new(CatalogError::Other {
            message: message.clone(),
        }),
    }
}
