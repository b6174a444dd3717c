//! wincat CLI entry point
//!
//! Parses arguments, runs the command, and prints errors with suggestions.
//!
//! - `build` - Build the JSON index from a manifest tree
//! - `search` - Ranked search over the index
//! - `list` - Identifier-ordered listing
//! - `show` - One package
//! - `status` - Index readiness
//! - `browse` - Interactive paging

use anyhow::Result;
use clap::Parser;
use wincat::cli;
use wincat::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
