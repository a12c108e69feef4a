use std::path::PathBuf;

use handpan_core::config::AppConfig;
use handpan_core::gesture::{GestureCommand, HandObservation};
use image::RgbImage;

/// Sent from the UI thread to the gesture worker.
pub enum GestureControl {
    /// Stop the loop and let the thread exit.
    Stop,
    /// Start or stop sending camera frames for the debug window.
    SetPreview(bool),
}

/// Sent from the gesture worker back to the UI thread.
pub enum GestureEvent {
    Started {
        source: String,
    },
    Command(GestureCommand),
    /// Only sent while the camera window is open.
    Preview {
        frame: RgbImage,
        hands: Vec<HandObservation>,
    },
    Log {
        message: String,
    },
    Error {
        message: String,
    },
    /// The worker thread is about to exit.
    Stopped {
        frames: u64,
    },
}

/// Results of file dialogs, which run on helper threads.
pub enum DialogResult {
    FolderPicked { path: PathBuf },
    ConfigImported { path: PathBuf, config: AppConfig },
    Log { message: String },
}
