use handpan_core::gesture::HandObservation;
use image::RgbImage;

use crate::convert::frame_to_color_image;

/// Latest frame from the gesture worker, for the camera debug window.
#[derive(Default)]
pub struct CameraState {
    pub texture: Option<egui::TextureHandle>,
    /// Kept unmirrored for snapshots.
    pub frame: Option<RgbImage>,
    pub hands: Vec<HandObservation>,
    pub mirrored: bool,
    pub frames_seen: u64,
}

impl CameraState {
    pub fn update(
        &mut self,
        ctx: &egui::Context,
        frame: RgbImage,
        hands: Vec<HandObservation>,
        mirror: bool,
    ) {
        let image = frame_to_color_image(&frame, mirror);
        match self.texture {
            Some(ref mut texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("camera", image, egui::TextureOptions::LINEAR));
            }
        }
        self.frame = Some(frame);
        self.hands = hands;
        self.mirrored = mirror;
        self.frames_seen += 1;
    }

    pub fn frame_size(&self) -> Option<egui::Vec2> {
        self.frame
            .as_ref()
            .map(|f| egui::vec2(f.width() as f32, f.height() as f32))
    }
}
