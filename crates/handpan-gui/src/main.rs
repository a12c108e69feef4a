mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod worker;

use std::path::PathBuf;

use handpan_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use tracing::warn;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = AppConfig::load(&config_path).unwrap_or_else(|e| {
        warn!("Cannot load {}: {e}, using defaults", config_path.display());
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.viewer.window_width, config.viewer.window_height])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Handpan"),
        ..Default::default()
    };

    eframe::run_native(
        "Handpan",
        options,
        Box::new(|cc| Ok(Box::new(app::HandpanApp::new(&cc.egui_ctx, config)))),
    )
}
