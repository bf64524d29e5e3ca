//! Binary crate for the `weatherview` terminal widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Drawing the live view and the one-shot text output

use clap::Parser;

mod app;
mod cli;
mod logging;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
