use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandpanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Malformed detector record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Detector did not answer within {millis} ms")]
    DetectorTimeout { millis: u64 },

    #[error("Replay finished after {frames} frames")]
    ReplayExhausted { frames: usize },

    #[error("Invalid hand observation: {0}")]
    InvalidObservation(String),

    #[error("Camera error: {0}")]
    Camera(String),
}

pub type Result<T> = std::result::Result<T, HandpanError>;
