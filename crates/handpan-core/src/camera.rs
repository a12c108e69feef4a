use image::RgbImage;

use crate::error::Result;

/// Anything that produces camera-like RGB frames.
pub trait FrameSource {
    fn name(&self) -> String;
    fn capture(&mut self) -> Result<RgbImage>;
}

/// Black frames of a fixed size. Drives the gesture loop when hands come from a recording.
pub struct BlankFrameSource {
    width: u32,
    height: u32,
}

impl BlankFrameSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FrameSource for BlankFrameSource {
    fn name(&self) -> String {
        format!("Blank {}x{}", self.width, self.height)
    }

    fn capture(&mut self) -> Result<RgbImage> {
        Ok(RgbImage::new(self.width, self.height))
    }
}

#[cfg(feature = "camera")]
pub use native::{list_cameras, CameraInfo, CameraSource};

#[cfg(feature = "camera")]
mod native {
    use image::RgbImage;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{
        ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat,
        RequestedFormatType, Resolution,
    };
    use nokhwa::Camera;
    use tracing::info;

    use super::FrameSource;
    use crate::error::{HandpanError, Result};

    const REQUESTED_FPS: u32 = 30;

    fn camera_error(e: impl std::fmt::Display) -> HandpanError {
        HandpanError::Camera(e.to_string())
    }

    /// A system camera opened through nokhwa.
    pub struct CameraSource {
        camera: Camera,
    }

    impl CameraSource {
        /// Open camera `index`, asking for the mode closest to `width`x`height`.
        pub fn open(index: u32, width: u32, height: u32) -> Result<Self> {
            let format = CameraFormat::new(
                Resolution::new(width, height),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            );
            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));
            let mut camera =
                Camera::new(CameraIndex::Index(index), requested).map_err(camera_error)?;
            camera.open_stream().map_err(camera_error)?;

            info!(
                name = %camera.info().human_name(),
                format = %camera.camera_format(),
                "opened camera"
            );
            Ok(Self { camera })
        }

        pub fn width(&self) -> u32 {
            self.camera.resolution().width()
        }

        pub fn height(&self) -> u32 {
            self.camera.resolution().height()
        }
    }

    impl FrameSource for CameraSource {
        fn name(&self) -> String {
            self.camera.info().human_name()
        }

        fn capture(&mut self) -> Result<RgbImage> {
            let frame = self.camera.frame().map_err(camera_error)?;
            let decoded = frame.decode_image::<RgbFormat>().map_err(camera_error)?;
            let (w, h) = decoded.dimensions();
            RgbImage::from_raw(w, h, decoded.into_raw())
                .ok_or_else(|| HandpanError::Camera("frame buffer size mismatch".into()))
        }
    }

    /// A camera as reported by the OS.
    #[derive(Clone, Debug)]
    pub struct CameraInfo {
        pub index: String,
        pub name: String,
        pub description: String,
    }

    pub fn list_cameras() -> Result<Vec<CameraInfo>> {
        let cameras = nokhwa::query(ApiBackend::Auto).map_err(camera_error)?;
        Ok(cameras
            .into_iter()
            .map(|cam| CameraInfo {
                index: cam.index().to_string(),
                name: cam.human_name(),
                description: cam.description().to_string(),
            })
            .collect())
    }
}
