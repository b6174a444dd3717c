//! Command-line interface for wincat.
//!
//! Every command is a thin collaborator over the library: it resolves
//! settings from the config file and global flags, calls into
//! [`catalog`](crate::catalog) or [`search`](crate::search), and formats the
//! result.
//!
//! # Available Commands
//!
//! - `build` - Walk the manifest tree and write the JSON index
//! - `search` - Ranked search over the index
//! - `list` - Catalog order, one window at a time
//! - `show` - One package by identifier
//! - `status` - Whether an index is available, its size and build time
//! - `browse` - Interactive paging through browse and search results
//!
//! # Examples
//!
//! ```bash
//! wincat build --manifests ~/src/winget-pkgs/manifests
//! wincat search "visual code" --limit 10
//! wincat list --offset 50 --format json
//! wincat --index ./index.json show Valve.Steam
//! ```
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` control logging (`RUST_LOG` wins when set)
//! - `--config` selects the config file (see [`Config`])
//! - `--index` overrides the artifact location for every command
//! - `--no-progress` hides the build spinner

mod browse;
mod build;
mod common;
mod list;
mod search;
mod show;
mod status;

pub use common::{CliContext, OutputFormat};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Runtime settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive commands without parsing
/// arguments or touching process-wide state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging unless `RUST_LOG` is set.
    pub log_level: Option<String>,

    /// Hide progress indicators.
    pub no_progress: bool,

    /// Explicit config file.
    pub config_path: Option<PathBuf>,

    /// Explicit index location.
    pub index_path: Option<PathBuf>,

    /// Suppress informational output.
    pub quiet: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the global tracing subscriber. Safe to call more than once.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Catalog and search for a tree of Windows package manifests.
#[derive(Parser)]
#[command(
    name = "wincat",
    about = "Catalog and search Windows package manifests",
    version,
    long_about = "wincat turns a winget-style manifest tree into a compact JSON index and serves ranked, paginated search over it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only errors and requested output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the config file (default: ~/.wincat/config.toml or $WINCAT_CONFIG)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the index artifact, overriding the config
    #[arg(long, global = true, value_name = "FILE")]
    index: Option<PathBuf>,

    /// Disable progress indicators
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a manifest tree
    Build(build::BuildCommand),

    /// Search the index
    Search(search::SearchCommand),

    /// List the index in identifier order
    List(list::ListCommand),

    /// Show one package
    Show(show::ShowCommand),

    /// Report whether an index is available
    Status(status::StatusCommand),

    /// Page through results interactively
    Browse(browse::BrowseCommand),
}

impl Cli {
    /// Runs the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Runs the parsed command with explicit runtime settings.
    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        cli_config.init_logging();

        let config = Config::load_with_optional(cli_config.config_path.clone()).await?;
        let ctx = CliContext::new(config, &cli_config);

        match self.command {
            Commands::Build(cmd) => cmd.execute(&ctx).await,
            Commands::Search(cmd) => cmd.execute(&ctx),
            Commands::List(cmd) => cmd.execute(&ctx),
            Commands::Show(cmd) => cmd.execute(&ctx),
            Commands::Status(cmd) => cmd.execute(&ctx),
            Commands::Browse(cmd) => cmd.execute(&ctx).await,
        }
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
            index_path: self.index.clone(),
            quiet: self.quiet,
        }
    }
}
