//! `wincat build`: manifest tree to JSON index.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::CliContext;
use crate::catalog::{BuildOptions, BuildOutput, BuildReport, CatalogBuilder, save_catalog};

#[derive(Args)]
pub struct BuildCommand {
    /// Root of the manifest tree (default: manifests_dir from the config)
    #[arg(short, long, value_name = "DIR")]
    manifests: Option<PathBuf>,

    /// Where to write the index (default: --index or index_path from the config)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Stop after this many distinct packages
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Locale whose locale manifests are read (default: preferred_locale from the config)
    #[arg(long, value_name = "CODE")]
    locale: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

impl BuildCommand {
    pub async fn execute(self, ctx: &CliContext) -> Result<()> {
        let root = match self.manifests {
            Some(path) => path,
            None => ctx.config.manifests_path()?,
        };
        let output = match self.output {
            Some(path) => path,
            None => ctx.index_path()?,
        };

        let options = BuildOptions {
            limit: self.limit,
            preferred_locale: self.locale.unwrap_or_else(|| ctx.config.preferred_locale.clone()),
            show_progress: ctx.show_progress,
        };
        let builder = CatalogBuilder::new(options);

        // Traversal is blocking file IO
        let walk_root = root.clone();
        let BuildOutput {
            catalog,
            report,
        } = tokio::task::spawn_blocking(move || builder.build(&walk_root))
            .await
            .context("Catalog build task panicked")?
            .with_context(|| format!("Failed to build catalog from {}", root.display()))?;

        save_catalog(&catalog, &output, self.pretty)
            .with_context(|| format!("Failed to write index to {}", output.display()))?;

        if !ctx.quiet {
            print_report(&report, &output);
        }
        Ok(())
    }
}

fn print_report(report: &BuildReport, output: &Path) {
    println!(
        "{} Indexed {} packages from {} files in {:.2}s",
        "✓".green().bold(),
        report.packages,
        report.files_visited,
        report.elapsed.as_secs_f64()
    );
    println!("  {} {}", "Index:".cyan(), output.display());

    let skipped = report.files_ignored + report.malformed + report.missing_identifier;
    if skipped > 0 || report.unreadable_entries > 0 {
        println!(
            "  {} {} ignored, {} malformed, {} without identifier, {} unreadable entries",
            "Skipped:".cyan(),
            report.files_ignored,
            report.malformed,
            report.missing_identifier,
            report.unreadable_entries
        );
    }
    if report.truncated {
        println!("{}", "  Stopped early at the requested package limit".yellow());
    }
}
