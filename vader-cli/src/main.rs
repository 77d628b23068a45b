//! Binary crate for the `vader` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive menus and the retry prompt
//! - Wiring providers to the box presenters on stdout

use clap::Parser;

mod cli;
mod interactive;
mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default so log lines don't interleave with the boxes.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
