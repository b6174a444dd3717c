//! Shared state and output helpers for CLI commands.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::CliConfig;
use crate::catalog::{CatalogEntry, CatalogStore, Page};
use crate::config::Config;
use crate::core::CatalogError;

/// How query results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, coloured columns
    #[default]
    Table,
    /// The page as pretty-printed JSON
    Json,
}

/// Settings every command sees: the loaded config plus global flag overrides.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: Config,
    pub index_override: Option<PathBuf>,
    pub show_progress: bool,
    pub quiet: bool,
}

impl CliContext {
    pub fn new(config: Config, cli_config: &CliConfig) -> Self {
        Self {
            config,
            index_override: cli_config.index_path.clone(),
            show_progress: !cli_config.no_progress,
            quiet: cli_config.quiet,
        }
    }

    /// `--index` if given, otherwise the configured index path.
    pub fn index_path(&self) -> Result<PathBuf> {
        match &self.index_override {
            Some(path) => Ok(path.clone()),
            None => self.config.index_file(),
        }
    }

    /// Requested result count, or the configured default.
    pub fn limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.default_limit)
    }

    /// A store with the index loaded.
    ///
    /// A missing index is reported as [`CatalogError::NoCatalogLoaded`]; a
    /// present but unparsable one keeps its own error.
    pub fn open_store(&self) -> Result<CatalogStore> {
        let path = self.index_path()?;
        let store = CatalogStore::new().with_max_limit(self.config.max_limit);

        match store.load(&path) {
            Ok(_) => Ok(store),
            Err(CatalogError::SourceUnavailable {
                ..
            }) => Err(anyhow::Error::new(CatalogError::NoCatalogLoaded))
                .with_context(|| format!("No index at {}", path.display())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Prints one window of results.
pub fn print_page(page: &Page, offset: usize, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(page)?);
        }
        OutputFormat::Table => {
            if page.items.is_empty() {
                if page.total > 0 {
                    println!("No packages past offset {offset} ({} total).", page.total);
                } else {
                    println!("No packages found.");
                }
                return Ok(());
            }

            print_table_header();
            for entry in &page.items {
                print_table_row(entry);
            }
            println!();
            println!(
                "{}",
                format!(
                    "Showing {}-{} of {}",
                    offset + 1,
                    offset + page.items.len(),
                    page.total
                )
                .dimmed()
            );
        }
    }
    Ok(())
}

/// Prints every field of one entry.
pub fn print_entry(entry: &CatalogEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
        OutputFormat::Table => {
            println!("{}", entry.display_name().bold());
            print_field("Identifier", &entry.identifier);
            print_field("Version", &entry.version);
            print_field("Publisher", &entry.publisher);
            print_field("Moniker", &entry.moniker);
            print_field("Tags", &entry.tags.join(", "));
            print_field("Description", &entry.description);
        }
    }
    Ok(())
}

fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {:<12} {}", format!("{label}:").cyan(), value);
    }
}

fn print_table_header() {
    println!(
        "{:<40} {:<30} {:<16} {}",
        "Identifier".cyan().bold(),
        "Name".cyan().bold(),
        "Version".cyan().bold(),
        "Publisher".cyan().bold()
    );
    println!("{}", "-".repeat(100).bright_black());
}

fn print_table_row(entry: &CatalogEntry) {
    println!(
        "{:<40} {:<30} {:<16} {}",
        truncate(&entry.identifier, 40),
        truncate(&entry.name, 30),
        truncate(&entry.version, 16),
        entry.publisher
    );
}

/// Shortens `value` to at most `width` characters, marking the cut.
pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
