//! `wincat list`: the catalog in identifier order.

use anyhow::Result;
use clap::Args;

use super::CliContext;
use super::common::{OutputFormat, print_page};

#[derive(Args)]
pub struct ListCommand {
    /// Maximum entries to show (capped by max_limit)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Skip this many entries
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListCommand {
    pub fn execute(self, ctx: &CliContext) -> Result<()> {
        let store = ctx.open_store()?;
        let page = store.list(ctx.limit(self.limit), self.offset)?;
        print_page(&page, self.offset, self.format)
    }
}
