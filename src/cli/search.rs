//! `wincat search`: ranked results, one window at a time.

use anyhow::Result;
use clap::Args;

use super::CliContext;
use super::common::{OutputFormat, print_page};

#[derive(Args)]
pub struct SearchCommand {
    /// Search text; several words must all appear in the name, identifier or moniker
    #[arg(required = true)]
    query: Vec<String>,

    /// Maximum results to show (capped by max_limit)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Skip this many ranked results
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl SearchCommand {
    pub fn execute(self, ctx: &CliContext) -> Result<()> {
        let store = ctx.open_store()?;
        let query = self.query.join(" ");

        let page = store.search(&query, ctx.limit(self.limit), self.offset)?;
        print_page(&page, self.offset, self.format)
    }
}
