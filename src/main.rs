#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::{Context, Result};
use clap::Parser;

mod app;
mod cli;

use cli::commands::Cli;
use uxaudit::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Both ring and aws-lc-rs may be linked; pick one explicitly for rustls.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    uxaudit::observability::init_tracing(cli.verbose)
        .context("Failed to install tracing subscriber")?;

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_overrides();
    config.validate()?;

    app::dispatch::dispatch(cli, config).await
}
