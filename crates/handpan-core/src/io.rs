use std::path::Path;

use image::{RgbImage, RgbaImage};

use crate::error::Result;
use crate::viewport::Size2;

/// Decode an image file into RGBA8 for display.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    Ok(img.to_rgba8())
}

/// Pixel size of a decoded image as the viewport expects it.
pub fn image_size(img: &RgbaImage) -> Size2 {
    let (w, h) = img.dimensions();
    Size2::new(w as f32, h as f32)
}

/// Read only the header of an image file to get its pixel size.
pub fn probe_size(path: &Path) -> Result<Size2> {
    let (w, h) = image::image_dimensions(path)?;
    Ok(Size2::new(w as f32, h as f32))
}

/// Save a captured camera frame (e.g. to attach to a bug report).
pub fn save_frame(frame: &RgbImage, path: &Path) -> Result<()> {
    frame.save(path)?;
    Ok(())
}
