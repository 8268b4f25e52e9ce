// main.rs - Conway's Game of Life in a window: paint cells, Space to run

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, anyhow};
use eframe::egui;
use log::info;

mod app;
mod config;
mod input;
mod render;
mod session;

use app::GridApp;
use config::Config;

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = checked(Config::from_env())?;

    let (cols, rows) = config.grid_dims();
    info!(
        "{}x{} px viewport, {} px cells -> {cols}x{rows} grid",
        config.width, config.height, config.cell_size,
    );

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32, config.height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GridApp::new(config, seed))),
    )
    .map_err(|e| anyhow!("could not open the window: {e}"))?;

    info!("window closed");
    Ok(())
}

fn checked(config: Config) -> anyhow::Result<Config> {
    config.validate().context("invalid viewport configuration")?;
    Ok(config)
}
