pub mod record;
pub mod replay;
pub mod subprocess;

use image::RgbImage;

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::gesture::HandObservation;

pub use record::{FrameRecord, HandRecord};
pub use replay::{ReplayDetector, SessionRecorder};
pub use subprocess::SubprocessDetector;

/// Finds hands in a camera frame.
///
/// Implementations return validated observations only. Hands below the confidence threshold
/// are dropped; a malformed hand or a detector-side error fails the frame.
pub trait HandDetector {
    fn name(&self) -> String;
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<HandObservation>>;
}

/// Build the detector the config asks for: a recording when `replay` is set, otherwise the
/// detector process.
pub fn create_detector(config: &DetectorConfig) -> Result<Box<dyn HandDetector>> {
    match &config.replay {
        Some(path) => Ok(Box::new(
            ReplayDetector::open(path, config.confidence)?.looping(config.replay_loop),
        )),
        None => Ok(Box::new(SubprocessDetector::spawn(config)?)),
    }
}
