//! Binary crate for the `weatherwiz` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive home loop (search, recent cities, settings)
//! - Human-friendly rendering of weather snapshots

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod recent;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
