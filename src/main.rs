use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kvma_jobs::cli::Cli;
use kvma_jobs::config::{Credentials, Settings};
use kvma_jobs::dispatcher;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    settings.validate()?;

    let credentials = Credentials::from_env()?;

    dispatcher::run(&settings, &credentials)?;
    Ok(())
}
