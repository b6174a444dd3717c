//! `wincat browse`: interactive paging over one catalog snapshot.
//!
//! Each input line is one command:
//!
//! - empty line: show the next page
//! - `/text`: search for `text` (a bare `/` returns to browsing)
//! - `q` or end of input: quit

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::CliContext;
use crate::search::Session;

#[derive(Args)]
pub struct BrowseCommand {
    /// Start with this search instead of catalog order
    query: Vec<String>,

    /// Entries per page (default: page_size from the config)
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,
}

impl BrowseCommand {
    pub async fn execute(self, ctx: &CliContext) -> Result<()> {
        let store = ctx.open_store()?;
        let page_size = self.page_size.unwrap_or(ctx.config.page_size);

        let session = Session::new(store.snapshot()?, page_size).with_query(&self.query.join(" "));
        let reader = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();

        run(session, reader, &mut stdout).await?;
        Ok(())
    }
}

/// Drives `session` from `input` until quit, writing to `out`.
pub(crate) async fn run<R, W>(mut session: Session, input: R, out: &mut W) -> Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut shown = render(&session, 0, out)?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }

        if let Some(query) = line.strip_prefix('/') {
            session = session.with_query(query);
            shown = render(&session, 0, out)?;
        } else if session.has_more() {
            session = session.show_more();
            shown = render(&session, shown, out)?;
        } else {
            writeln!(out, "{}", "No more results.".dimmed())?;
            prompt(&session, out)?;
        }
    }

    Ok(session)
}

/// Writes entries past `already_shown` and returns the new visible count.
fn render<W: Write>(session: &Session, already_shown: usize, out: &mut W) -> Result<usize> {
    let visible = session.visible();

    if already_shown == 0 {
        match session.query() {
            Some(query) => writeln!(out, "{} {} matches for '{}'", "»".cyan(), session.total(), query)?,
            None => writeln!(out, "{} {} packages", "»".cyan(), session.total())?,
        }
        if visible.is_empty() {
            writeln!(out, "No packages found.")?;
        }
    }

    for (n, entry) in visible.iter().enumerate().skip(already_shown) {
        writeln!(
            out,
            "{:>4}. {} {} {}",
            n + 1,
            entry.identifier.bold(),
            entry.display_name(),
            entry.version.dimmed()
        )?;
    }

    prompt(session, out)?;
    Ok(visible.len())
}

fn prompt<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let more = if session.has_more() { "[Enter] more, " } else { "" };
    write!(out, "{}", format!("{more}/text to search, q to quit> ").green())?;
    out.flush()?;
    Ok(())
}
