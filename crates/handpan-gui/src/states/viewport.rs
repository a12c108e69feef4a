use std::path::PathBuf;

use handpan_core::geometry::Point2;

/// Texture and labels for the image on screen. Geometry lives in the core `Viewport`.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub current_path: Option<PathBuf>,
    /// Image pixel under the last click, `None` when the click missed the image.
    pub last_click: Option<Point2>,
}

impl ViewportState {
    pub fn clear(&mut self) {
        self.texture = None;
        self.current_path = None;
        self.last_click = None;
    }

    pub fn viewing_label(&self) -> String {
        self.current_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
