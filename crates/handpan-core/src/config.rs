use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{
    DEFAULT_CAMERA_INDEX, DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_WIDTH,
    DEFAULT_DETECTION_CONFIDENCE, DEFAULT_DETECTOR_FRAME_TIMEOUT_MS,
    DEFAULT_DETECTOR_STARTUP_TIMEOUT_MS, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    DEFAULT_ZOOM_DEAD_ZONE, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::error::Result;
use crate::library::ExtensionFilter;

/// File name looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "handpan.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub detector: DetectorConfig,
    pub gestures: GestureConfig,
    pub viewer: ViewerConfig,
    pub library: ExtensionFilter,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    /// Requested capture size; the device may pick the closest mode it supports.
    pub width: u32,
    pub height: u32,
    /// Mirror the debug preview so it reads like a mirror.
    pub mirror_preview: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_CAMERA_INDEX,
            width: DEFAULT_CAPTURE_WIDTH,
            height: DEFAULT_CAPTURE_HEIGHT,
            mirror_preview: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Executable of the landmark detector process.
    pub program: String,
    /// Arguments passed before `--confidence`.
    pub args: Vec<String>,
    /// Hands detected below this score are dropped.
    pub confidence: f32,
    pub frame_timeout_ms: u64,
    pub startup_timeout_ms: u64,
    /// Play back a recorded session instead of running the detector process.
    pub replay: Option<PathBuf>,
    /// Start the recording over instead of stopping at its end.
    pub replay_loop: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            program: "python3".into(),
            args: vec!["scripts/hand_detect.py".into()],
            confidence: DEFAULT_DETECTION_CONFIDENCE,
            frame_timeout_ms: DEFAULT_DETECTOR_FRAME_TIMEOUT_MS,
            startup_timeout_ms: DEFAULT_DETECTOR_STARTUP_TIMEOUT_MS,
            replay: None,
            replay_loop: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch deltas with a magnitude strictly below this are ignored.
    pub zoom_dead_zone: i32,
    /// Start the gesture loop together with the window.
    pub enabled_on_start: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            zoom_dead_zone: DEFAULT_ZOOM_DEAD_ZONE,
            enabled_on_start: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
