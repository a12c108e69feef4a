use image::{RgbImage, RgbaImage};

/// Convert a decoded RGBA8 image to an egui ColorImage.
pub fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}

/// Convert a camera frame, optionally flipped left to right so it reads like a mirror.
pub fn frame_to_color_image(frame: &RgbImage, mirror: bool) -> egui::ColorImage {
    let size = [frame.width() as usize, frame.height() as usize];
    if mirror {
        let flipped = image::imageops::flip_horizontal(frame);
        egui::ColorImage::from_rgb(size, flipped.as_raw())
    } else {
        egui::ColorImage::from_rgb(size, frame.as_raw())
    }
}
