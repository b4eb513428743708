mod app;
mod color;
mod config;
mod data;
mod session;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::MeteorDashApp;
use config::DashboardConfig;
use data::loader::load_file;
use eframe::egui;
use session::Session;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = DashboardConfig::load().context("loading configuration")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = Some(PathBuf::from(path));
    }

    let mut state = AppState::from_config(&config);
    if let Some(path) = &config.data_path {
        let table = load_file(path).with_context(|| format!("loading {}", path.display()))?;
        state.set_session(Session::new(table));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Meteorite Landings – Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(MeteorDashApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
