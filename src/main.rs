//! Weekly Trends - Interactive Weekly Stock Dashboard
//!
//! Loads a pre-computed weekly price table and lets the user pick a ticker,
//! fields and a week range, chart them, and download the slice as CSV.

mod charts;
mod commands;
mod config;
mod data;
mod gui;
mod view;

use anyhow::{anyhow, Context};
use clap::Parser;
use config::{Cli, Command};
use data::{Dataset, DatasetLoader};
use eframe::egui;
use gui::WeeklyTrendsApp;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use view::ExportMode;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // No dashboard without data: abort before any view is served.
    let dataset = DatasetLoader::load(&cli.data)
        .with_context(|| format!("Failed to load weekly data from {}", cli.data.display()))?;

    match cli.command.clone().unwrap_or_default() {
        Command::Gui => run_gui(Arc::new(dataset), cli.export_mode),
        Command::Render(args) => commands::run_render(&dataset, &args, &mut std::io::stdout()),
        Command::Tickers => commands::run_tickers(&dataset, &mut std::io::stdout()),
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run_gui(dataset: Arc<Dataset>, export_mode: ExportMode) -> anyhow::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Weekly Stock Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Weekly Stock Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(WeeklyTrendsApp::new(cc, dataset, export_mode)))),
    )
    .map_err(|e| anyhow!("Dashboard window failed: {e}"))
}
