//! Multimodal Retriever - Entry Point

// Force-link mmr-providers to ensure linkme registrations are included
extern crate mmr_providers;

use clap::Parser;
use mmr::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    cli.run(&mut stdout).await
}
