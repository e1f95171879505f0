use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod pipeline;
pub mod session;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Catalogue → image → rendu → exports ou terminal
    pipeline::run(&cli)
}
