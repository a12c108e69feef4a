use std::cmp::Ordering;

use tracing::debug;

use crate::consts::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::geometry::Point2;

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size2 {
    pub width: f32,
    pub height: f32,
}

impl Size2 {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and strictly positive.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in viewport coordinates (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Whether pointer drags pan the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    NoDrag,
    Pan,
}

/// Coarse state of the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Empty,
    /// Zoom level 0: the whole image is visible.
    Fitted,
    Zoomed,
}

/// The mutable view state of a single displayed image.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Number of net zoom-in steps above the fitted view. Never negative.
    pub zoom_level: i32,
    /// Offset of the image center from the viewport center.
    pub pan_offset: Point2,
    pub has_image: bool,
    pub image_size: Option<Size2>,
    /// Screen pixels per image pixel.
    pub scale: f32,
    pub drag_mode: DragMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_level: 0,
            pan_offset: Point2::ZERO,
            has_image: false,
            image_size: None,
            scale: 1.0,
            drag_mode: DragMode::NoDrag,
        }
    }
}

/// Zoom/pan state machine for the on-screen image.
///
/// All operations only mutate the [`ViewState`]; none perform I/O. Operations that can be
/// no-ops return whether the view actually changed so callers know when to repaint.
#[derive(Clone, Debug)]
pub struct Viewport {
    state: ViewState,
    viewport_size: Size2,
    zoom_in_factor: f32,
    zoom_out_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size2::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT))
    }
}

impl Viewport {
    pub fn new(viewport_size: Size2) -> Self {
        Self::with_factors(viewport_size, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR)
    }

    pub fn with_factors(viewport_size: Size2, zoom_in_factor: f32, zoom_out_factor: f32) -> Self {
        Self {
            state: ViewState::default(),
            viewport_size,
            zoom_in_factor,
            zoom_out_factor,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn viewport_size(&self) -> Size2 {
        self.viewport_size
    }

    pub fn has_image(&self) -> bool {
        self.state.has_image
    }

    pub fn phase(&self) -> ViewPhase {
        if !self.state.has_image {
            ViewPhase::Empty
        } else if self.state.zoom_level == 0 {
            ViewPhase::Fitted
        } else {
            ViewPhase::Zoomed
        }
    }

    /// Show a new image of the given pixel size, or clear the canvas with `None`.
    ///
    /// A size without area counts as no image.
    pub fn set_image(&mut self, image_size: Option<Size2>) {
        self.state.zoom_level = 0;
        match image_size.filter(Size2::has_area) {
            Some(size) => {
                self.state.has_image = true;
                self.state.image_size = Some(size);
                self.state.drag_mode = DragMode::Pan;
            }
            None => {
                self.state.has_image = false;
                self.state.image_size = None;
                self.state.drag_mode = DragMode::NoDrag;
            }
        }
        self.fit_to_window();
    }

    /// Reset to zoom level 0 with the image scaled to fit the viewport and centered.
    pub fn fit_to_window(&mut self) {
        self.state.zoom_level = 0;
        self.state.pan_offset = Point2::ZERO;
        self.state.scale = match self.state.image_size {
            Some(image) if self.viewport_size.has_area() => (self.viewport_size.width
                / image.width)
                .min(self.viewport_size.height / image.height),
            _ => 1.0,
        };
    }

    /// Record a new viewport size. A fitted view is re-fitted so it keeps showing the whole
    /// image; a zoomed view keeps its scale and pan.
    pub fn resize(&mut self, viewport_size: Size2) -> bool {
        if viewport_size == self.viewport_size {
            return false;
        }
        self.viewport_size = viewport_size;
        if self.phase() == ViewPhase::Fitted {
            self.fit_to_window();
        }
        true
    }

    /// Step the zoom level by one in the direction of `delta`. Zero is a no-op.
    pub fn change_zoom(&mut self, delta: i32) -> bool {
        self.change_zoom_at(delta, None)
    }

    /// Like [`Viewport::change_zoom`], keeping the image point under `anchor` (viewport
    /// coordinates) in place while zoomed in.
    pub fn change_zoom_at(&mut self, delta: i32, anchor: Option<Point2>) -> bool {
        if !self.state.has_image || delta == 0 {
            return false;
        }

        let factor = if delta > 0 {
            self.state.zoom_level += 1;
            self.zoom_in_factor
        } else {
            self.state.zoom_level -= 1;
            self.zoom_out_factor
        };

        match self.state.zoom_level.cmp(&0) {
            Ordering::Greater => {
                if let Some(anchor) = anchor {
                    let center = self.viewport_center() + self.state.pan_offset;
                    let rel = anchor - center;
                    self.state.pan_offset = self.state.pan_offset
                        + Point2::new(rel.x * (1.0 - factor), rel.y * (1.0 - factor));
                }
                self.state.scale *= factor;
                debug!(zoom = self.state.zoom_level, scale = self.state.scale, "zoom");
                true
            }
            Ordering::Equal => {
                self.fit_to_window();
                debug!("zoom back to fit");
                true
            }
            Ordering::Less => {
                self.state.zoom_level = 0;
                false
            }
        }
    }

    /// Move the image by `(dx, dy)` screen pixels. Panning past the image edges is allowed.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        if !self.state.has_image {
            return false;
        }
        self.state.pan_offset = self.state.pan_offset + Point2::new(dx, dy);
        true
    }

    /// Flip between pointer-drag panning and no dragging. Has no effect without an image.
    pub fn toggle_drag_mode(&mut self) -> DragMode {
        self.state.drag_mode = match self.state.drag_mode {
            DragMode::Pan => DragMode::NoDrag,
            DragMode::NoDrag if self.state.has_image => DragMode::Pan,
            DragMode::NoDrag => DragMode::NoDrag,
        };
        self.state.drag_mode
    }

    /// On-screen rectangle covered by the image.
    pub fn image_rect(&self) -> Option<Rect> {
        let image = self.state.image_size?;
        let width = image.width * self.state.scale;
        let height = image.height * self.state.scale;
        let center = self.viewport_center() + self.state.pan_offset;
        Some(Rect {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        })
    }

    /// Map a viewport point to image pixel coordinates. `None` outside the image.
    pub fn screen_to_image(&self, point: Point2) -> Option<Point2> {
        let rect = self.image_rect()?;
        let image = self.state.image_size?;
        let x = (point.x - rect.x) / self.state.scale;
        let y = (point.y - rect.y) / self.state.scale;
        if x < 0.0 || y < 0.0 || x >= image.width || y >= image.height {
            return None;
        }
        Some(Point2::new(x, y))
    }

    fn viewport_center(&self) -> Point2 {
        Point2::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }
}
