mod camera;
mod ui;
mod viewport;

pub use camera::CameraState;
pub use ui::UIState;
pub use viewport::ViewportState;
