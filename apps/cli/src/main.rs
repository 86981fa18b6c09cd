//! itmo-advisor CLI: curriculum scraping, extraction, and the advisor bot.
//!
//! `discover` → `extract` build `curricula.json`; `serve` runs the bot on it.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
