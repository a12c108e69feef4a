/// Scale multiplier applied for one zoom-in step.
pub const ZOOM_IN_FACTOR: f32 = 1.25;

/// Scale multiplier applied for one zoom-out step.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// Pinch deltas whose magnitude is strictly below this are treated as sensor noise.
pub const DEFAULT_ZOOM_DEAD_ZONE: i32 = 5;

/// Detection confidence below which a hand is discarded.
pub const DEFAULT_DETECTION_CONFIDENCE: f32 = 0.8;

/// Default system camera.
pub const DEFAULT_CAMERA_INDEX: u32 = 0;

/// Requested capture size. Devices may pick the closest mode they support.
pub const DEFAULT_CAPTURE_WIDTH: u32 = 800;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 800;

/// How long a single detector round trip may take before the frame is skipped.
pub const DEFAULT_DETECTOR_FRAME_TIMEOUT_MS: u64 = 2_000;

/// Model loading in the detector process can be slow on first start.
pub const DEFAULT_DETECTOR_STARTUP_TIMEOUT_MS: u64 = 30_000;

/// Line the detector process prints once it is ready to accept frames.
pub const DETECTOR_READY_SIGNAL: &str = "READY";

/// Extensions picked up when scanning an image folder.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 5] = ["png", "xpm", "jpg", "bmp", "gif"];

/// Number of landmarks per hand (MediaPipe hand model convention).
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Default window size of the viewer.
pub const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;
