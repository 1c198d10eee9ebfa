// src/main.rs
use anyhow::Result;
use clap::Parser;
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use hyrox_dashboard::cli::Cli;
use hyrox_dashboard::state::AppState;
use hyrox_dashboard::{DashboardApp, Settings};

fn init_logging(fallback_filter: &str) {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&Settings::default().log_filter);
            error!("Failed to load settings: {:#}", e);
            return Err(e);
        }
    };
    if let Some(path) = cli.dataset {
        settings.dataset_path = Some(path);
    }

    init_logging(&settings.log_filter);
    info!(dataset = ?settings.dataset_path, "Starting dashboard");

    let mut state = AppState::new(settings.clone());
    if let Some(path) = &settings.dataset_path {
        if let Err(e) = state.open_dataset(path) {
            state.error_message = Some(format!("Error loading dataset: {}", e));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title("Event Results Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "hyrox-dashboard",
        options,
        Box::new(|_cc| Box::new(DashboardApp::new(state))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
