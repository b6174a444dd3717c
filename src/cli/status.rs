//! `wincat status`: readiness of the index.
//!
//! Never fails because the index is missing or unreadable; that is reported
//! as `ready: false`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::CliContext;
use super::common::OutputFormat;
use crate::catalog::{CatalogStore, StoreStatus};

/// Store status plus why the index could not be loaded, if it could not.
#[derive(Debug, Serialize)]
struct StatusReport {
    #[serde(flatten)]
    status: StoreStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Args)]
pub struct StatusCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl StatusCommand {
    pub fn execute(self, ctx: &CliContext) -> Result<()> {
        let path = ctx.index_path()?;
        let store = CatalogStore::new();
        // Failure leaves the store empty; the error becomes the reason
        let reason = store.load(&path).err().map(|e| e.to_string());
        let report = StatusReport {
            status: store.status(),
            reason,
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print_status(&report, &path.display().to_string()),
        }
        Ok(())
    }
}

fn print_status(report: &StatusReport, index: &str) {
    let status = &report.status;
    println!("  {:<10} {}", "Index:".cyan(), index);
    if status.ready {
        println!("  {:<10} {}", "Ready:".cyan(), "yes".green());
        println!("  {:<10} {}", "Packages:".cyan(), status.total);
        if let Some(generated_at) = status.generated_at {
            println!("  {:<10} {}", "Built:".cyan(), generated_at.to_rfc3339());
        }
    } else {
        println!("  {:<10} {}", "Ready:".cyan(), "no".red());
        if let Some(reason) = &report.reason {
            println!("  {:<10} {}", "Reason:".cyan(), reason);
        }
        println!("{}", "  Run 'wincat build' to create the index".dimmed());
    }
}
