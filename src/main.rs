#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use anyhow::{Context, Result};
use clap::Parser;
use gradecraft::Config;
use gradecraft::cli::Cli;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_init()?,
    };

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.logging.max_level()?
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()
        .context("setting default subscriber failed")?;

    tracing::debug!(config = %config.config_path.display(), "config loaded");
    gradecraft::app::dispatch::dispatch(cli, config).await
}
