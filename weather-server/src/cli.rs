use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{Config, provider_from_config};

use crate::{routes, state::AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "AccuWeather proxy backend")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to listen on, e.g. "0.0.0.0:8000". Overrides `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Interactively store the API key and location key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Configure => configure(&path),
            Command::Serve { bind } => serve(&path, bind).await,
        }
    }
}

fn configure(path: &std::path::Path) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;

    let api_key = Password::new("AccuWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let location_key = Text::new("Location key:")
        .with_default(&config.accuweather.location_key)
        .prompt()
        .context("Failed to read location key")?;

    config.accuweather.api_key = Some(api_key.trim().to_string());
    config.accuweather.location_key = location_key.trim().to_string();
    config.save_to(path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn serve(path: &std::path::Path, bind: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;
    config.apply_env();

    let provider = provider_from_config(&config)?;
    let state = AppState::new(
        Arc::from(provider),
        config.accuweather.location_key.clone(),
        config.cache_ttl(),
    );
    let app = routes::router(state);

    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        location_key = %config.accuweather.location_key,
        base_url = %config.accuweather.base_url,
        "weather server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("weather server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
