mod app;
mod color;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::TvDashboardApp;
use eframe::egui;
use tv_dashboard::data::loader::load_file;
use tv_dashboard::state::DashboardState;

const DATA_ENV: &str = "TV_DASHBOARD_DATA";
const DEFAULT_DATA: &str = "data/tv_data.csv";

/// First positional argument, then `$TV_DASHBOARD_DATA`, then the default.
fn dataset_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = dataset_path();
    let catalog = load_file(&path).context("startup catalog could not be loaded")?;
    let state = DashboardState::new(catalog);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TV Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(TvDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI terminated: {e}"))
}
