use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::AppConfig;
use crate::error::Result;
use crate::geometry::Point2;
use crate::gesture::GestureCommand;
use crate::library::ImageList;
use crate::viewport::{Size2, Viewport};

/// Every intent the viewer understands, whichever input produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerCommand {
    NextImage,
    PreviousImage,
    /// Zoom one step in the direction of `delta`, optionally around a viewport point.
    ZoomBy { delta: i32, anchor: Option<Point2> },
    PanBy { dx: f32, dy: f32 },
    FitToWindow,
    ToggleDragMode,
    /// A held gesture was released. Does not touch the view.
    GestureReleased,
}

impl From<GestureCommand> for ViewerCommand {
    fn from(cmd: GestureCommand) -> Self {
        match cmd {
            GestureCommand::AdvanceNext => Self::NextImage,
            GestureCommand::AdvancePrevious => Self::PreviousImage,
            GestureCommand::Reset => Self::GestureReleased,
            GestureCommand::ZoomBy(delta) => Self::ZoomBy {
                delta,
                anchor: None,
            },
            GestureCommand::PanBy { dx, dy } => Self::PanBy { dx, dy },
        }
    }
}

/// What the caller has to do after a command was applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    /// View state changed; repaint.
    ViewChanged,
    /// The current image changed; decode it and hand its size to [`Viewer::show_image`].
    ShowImage(PathBuf),
}

/// Routes commands from mouse, keyboard, buttons and gestures into one viewport and one
/// image list.
#[derive(Clone, Debug, Default)]
pub struct Viewer {
    viewport: Viewport,
    images: ImageList,
}

impl Viewer {
    pub fn new(viewport: Viewport, images: ImageList) -> Self {
        Self { viewport, images }
    }

    /// A viewer sized and tuned from the `[viewer]` and `[library]` config sections.
    pub fn from_config(config: &AppConfig) -> Self {
        let viewport = Viewport::with_factors(
            Size2::new(config.viewer.window_width, config.viewer.window_height),
            config.viewer.zoom_in_factor,
            config.viewer.zoom_out_factor,
        );
        Self::new(viewport, ImageList::new(config.library.clone()))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn apply(&mut self, command: ViewerCommand) -> Effect {
        debug!(?command, "apply");
        match command {
            ViewerCommand::NextImage => show(self.images.next()),
            ViewerCommand::PreviousImage => show(self.images.previous()),
            ViewerCommand::ZoomBy { delta, anchor } => {
                changed(self.viewport.change_zoom_at(delta, anchor))
            }
            ViewerCommand::PanBy { dx, dy } => changed(self.viewport.pan_by(dx, dy)),
            ViewerCommand::FitToWindow => {
                if !self.viewport.has_image() {
                    return Effect::None;
                }
                self.viewport.fit_to_window();
                Effect::ViewChanged
            }
            ViewerCommand::ToggleDragMode => {
                let before = self.viewport.state().drag_mode;
                changed(self.viewport.toggle_drag_mode() != before)
            }
            ViewerCommand::GestureReleased => Effect::None,
        }
    }

    /// Load a folder. Returns the image to show when the folder held any.
    pub fn open_folder(&mut self, dir: &Path) -> Result<Effect> {
        if self.images.load_folder(dir)? == 0 {
            return Ok(Effect::None);
        }
        Ok(show(self.images.current()))
    }

    /// Display a decoded image of the given pixel size.
    pub fn show_image(&mut self, size: Size2) {
        self.viewport.set_image(Some(size));
    }

    /// Blank the canvas, e.g. after a decode failure.
    pub fn clear_image(&mut self) {
        self.viewport.set_image(None);
    }

    pub fn resize(&mut self, size: Size2) -> bool {
        self.viewport.resize(size)
    }
}

fn show(path: Option<&Path>) -> Effect {
    match path {
        Some(path) => Effect::ShowImage(path.to_path_buf()),
        None => Effect::None,
    }
}

fn changed(did_change: bool) -> Effect {
    if did_change {
        Effect::ViewChanged
    } else {
        Effect::None
    }
}
