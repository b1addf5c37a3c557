mod api;
mod app;
mod cli;
mod config;
mod logging;
mod models;
mod navigation;
mod pages;
mod tui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::api::{LastFmClient, StatsApi};
use crate::navigation::Route;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let config = config::AppConfig::load(&args)?;
    config.validate()?;
    config.ensure_filesystem()?;

    let _logger = logging::init(&config)?;

    let start = Route::parse(&args.route)
        .with_context(|| format!("Unknown route: {}", args.route))?;
    log::info!("Starting at {start}");

    let (msg_tx, msg_rx) = tokio::sync::mpsc::unbounded_channel();

    let client: Arc<dyn StatsApi> = Arc::new(LastFmClient::new(&config)?);
    let controller = tui::AppController::new(client, config.limits(), msg_tx);

    let app = tui::App::new(controller, msg_rx, start);
    let result = tui::run(app).await;

    if let Err(err) = &result {
        log::error!("Terminal loop exited with error: {err:#}");
    }
    logging::log_shutdown();
    result
}
