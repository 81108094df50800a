//! Binary crate for the `weather-server` HTTP backend.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Serving the JSON API over HTTP

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod routes;
mod state;

const DEFAULT_LOG_FILTER: &str = "info,weather_server=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
