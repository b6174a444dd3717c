//! `wincat show`: one package by identifier.

use anyhow::{Result, anyhow};
use clap::Args;

use super::CliContext;
use super::common::{OutputFormat, print_entry};

#[derive(Args)]
pub struct ShowCommand {
    /// Package identifier (case-insensitive)
    identifier: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ShowCommand {
    pub fn execute(self, ctx: &CliContext) -> Result<()> {
        let store = ctx.open_store()?;
        let entry = store
            .find(&self.identifier)?
            .ok_or_else(|| anyhow!("Package '{}' is not in the index", self.identifier))?;
        print_entry(&entry, self.format)
    }
}
