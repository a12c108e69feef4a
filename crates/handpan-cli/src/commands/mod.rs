pub mod cameras;
pub mod config;
pub mod list;
pub mod replay;
pub mod track;

use std::path::Path;

use anyhow::{Context, Result};
use handpan_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use handpan_core::dispatch::{Effect, Viewer};
use handpan_core::gesture::GestureCommand;
use handpan_core::io::probe_size;
use tracing::warn;

/// Load the config given on the command line, or `handpan.toml` from the working directory.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    AppConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Apply a gesture to a headless viewer, probing image headers instead of decoding.
pub fn apply_to_viewer(viewer: &mut Viewer, command: GestureCommand) {
    if let Effect::ShowImage(path) = viewer.apply(command.into()) {
        match probe_size(&path) {
            Ok(size) => viewer.show_image(size),
            Err(e) => {
                warn!("Cannot read {}: {e}", path.display());
                viewer.clear_image();
            }
        }
    }
}

/// Build a headless viewer over `folder` and show its first image.
pub fn open_viewer(config: &AppConfig, folder: &Path) -> Result<Viewer> {
    let mut viewer = Viewer::from_config(config);
    let effect = viewer
        .open_folder(folder)
        .with_context(|| format!("Failed to read folder {}", folder.display()))?;
    if let Effect::ShowImage(path) = effect {
        viewer.show_image(probe_size(&path)?);
    }
    Ok(viewer)
}
