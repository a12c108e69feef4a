use std::path::PathBuf;

use handpan_core::gesture::GestureCommand;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Folder the image list was loaded from.
    pub folder: Option<PathBuf>,

    /// The gesture thread is running (or starting up).
    pub gestures_running: bool,
    /// Camera and detector names reported by the worker once started.
    pub gesture_source: Option<String>,
    pub last_gesture: Option<GestureCommand>,

    pub show_camera: bool,
    pub show_about: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn gesture_status(&self) -> String {
        match (self.gestures_running, &self.gesture_source) {
            (true, Some(source)) => format!("Gestures: {source}"),
            (true, None) => "Gestures: starting...".into(),
            (false, _) => "Gestures: off".into(),
        }
    }
}
