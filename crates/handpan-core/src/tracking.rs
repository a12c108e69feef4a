use image::RgbImage;
use tracing::{debug, warn};

use crate::camera::{BlankFrameSource, FrameSource};
use crate::config::{AppConfig, CameraConfig};
use crate::detector::{create_detector, HandDetector};
use crate::error::{HandpanError, Result};
use crate::gesture::{GestureClassifier, GestureCommand, GestureState, HandObservation};

/// Everything one iteration of the gesture loop produced.
#[derive(Debug, Default)]
pub struct FrameOutcome {
    /// `None` when the camera failed to deliver a frame.
    pub frame: Option<RgbImage>,
    pub hands: Vec<HandObservation>,
    pub command: Option<GestureCommand>,
}

/// Camera → detector → classifier, one frame per [`GestureLoop::step`].
pub struct GestureLoop {
    source: Box<dyn FrameSource>,
    detector: Box<dyn HandDetector>,
    classifier: GestureClassifier,
    state: GestureState,
    frames: u64,
}

impl GestureLoop {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn HandDetector>,
        classifier: GestureClassifier,
    ) -> Self {
        Self {
            source,
            detector,
            classifier,
            state: GestureState::default(),
            frames: 0,
        }
    }

    /// Build the loop the config describes.
    ///
    /// With `detector.replay` set, the recording supplies the hands and blank frames stand in
    /// for the camera, so no device is opened.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source: Box<dyn FrameSource> = if config.detector.replay.is_some() {
            Box::new(BlankFrameSource::new(config.camera.width, config.camera.height))
        } else {
            open_camera(&config.camera)?
        };
        let detector = create_detector(&config.detector)?;
        let classifier = GestureClassifier::new(config.gestures.zoom_dead_zone);
        Ok(Self::new(source, detector, classifier))
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn describe(&self) -> String {
        format!("{} / {}", self.source.name(), self.detector.name())
    }

    /// Run one iteration.
    ///
    /// A camera or detector failure is logged and yields an outcome without a command; the
    /// gesture state is left untouched so a held pose survives a dropped frame. Only an
    /// exhausted recording is returned as an error, since no later frame can succeed.
    pub fn step(&mut self) -> Result<FrameOutcome> {
        let frame = match self.source.capture() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Ignoring empty camera frame: {e}");
                return Ok(FrameOutcome::default());
            }
        };
        self.frames += 1;

        let hands = match self.detector.detect(&frame) {
            Ok(hands) => hands,
            Err(e @ HandpanError::ReplayExhausted { .. }) => return Err(e),
            Err(e) => {
                warn!("Skipping frame {}: {e}", self.frames);
                return Ok(FrameOutcome {
                    frame: Some(frame),
                    ..Default::default()
                });
            }
        };

        let (command, state) = self.classifier.classify(&hands, &self.state);
        if state != self.state {
            debug!(?state, "gesture state");
        }
        self.state = state;

        Ok(FrameOutcome {
            frame: Some(frame),
            hands,
            command,
        })
    }
}

#[cfg(feature = "camera")]
fn open_camera(config: &CameraConfig) -> Result<Box<dyn FrameSource>> {
    let camera = crate::camera::CameraSource::open(config.index, config.width, config.height)?;
    Ok(Box::new(camera))
}

#[cfg(not(feature = "camera"))]
fn open_camera(_config: &CameraConfig) -> Result<Box<dyn FrameSource>> {
    Err(HandpanError::Camera(
        "built without camera support; enable the `camera` feature or set detector.replay".into(),
    ))
}
