mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::DashboardApp;
use eframe::egui;

/// Campaign file, relative to the working directory.
const DATA_PATH: &str = "sfmc_email_campaign_sample.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SFMC Email Campaign Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(Path::new(DATA_PATH))))),
    )
}
