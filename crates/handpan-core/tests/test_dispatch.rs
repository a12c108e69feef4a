use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use tempfile::TempDir;

use handpan_core::dispatch::{Effect, Viewer, ViewerCommand};
use handpan_core::geometry::Point2;
use handpan_core::gesture::GestureCommand;
use handpan_core::library::{ExtensionFilter, ImageList};
use handpan_core::viewport::{DragMode, Size2, Viewport};

fn viewer_with(paths: &[&str]) -> Viewer {
    let mut images = ImageList::new(ExtensionFilter::default());
    images.set_paths(paths.iter().map(PathBuf::from).collect());
    Viewer::new(Viewport::new(Size2::new(800.0, 600.0)), images)
}

#[test]
fn test_gesture_commands_map_to_viewer_commands() {
    assert_eq!(
        ViewerCommand::from(GestureCommand::AdvanceNext),
        ViewerCommand::NextImage
    );
    assert_eq!(
        ViewerCommand::from(GestureCommand::AdvancePrevious),
        ViewerCommand::PreviousImage
    );
    assert_eq!(
        ViewerCommand::from(GestureCommand::ZoomBy(-7)),
        ViewerCommand::ZoomBy {
            delta: -7,
            anchor: None
        }
    );
    assert_eq!(
        ViewerCommand::from(GestureCommand::PanBy { dx: 1.0, dy: 2.0 }),
        ViewerCommand::PanBy { dx: 1.0, dy: 2.0 }
    );
    assert_eq!(
        ViewerCommand::from(GestureCommand::Reset),
        ViewerCommand::GestureReleased
    );
}

#[test]
fn test_navigation_effects() {
    let mut viewer = viewer_with(&["a.png", "b.png", "c.png"]);
    assert_eq!(
        viewer.apply(ViewerCommand::NextImage),
        Effect::ShowImage(PathBuf::from("b.png"))
    );
    assert_eq!(
        viewer.apply(ViewerCommand::PreviousImage),
        Effect::ShowImage(PathBuf::from("a.png"))
    );
    assert_eq!(
        viewer.apply(ViewerCommand::PreviousImage),
        Effect::ShowImage(PathBuf::from("c.png"))
    );
}

#[test]
fn test_navigation_without_images_is_noop() {
    let mut viewer = Viewer::default();
    assert_eq!(viewer.apply(ViewerCommand::NextImage), Effect::None);
    assert_eq!(viewer.apply(ViewerCommand::PreviousImage), Effect::None);

    let mut single = viewer_with(&["only.png"]);
    assert_eq!(single.apply(ViewerCommand::NextImage), Effect::None);
}

#[test]
fn test_view_commands_need_an_image() {
    let mut viewer = viewer_with(&["a.png"]);
    let zoom = ViewerCommand::ZoomBy {
        delta: 10,
        anchor: None,
    };
    assert_eq!(viewer.apply(zoom), Effect::None);
    assert_eq!(
        viewer.apply(ViewerCommand::PanBy { dx: 3.0, dy: 4.0 }),
        Effect::None
    );
    assert_eq!(viewer.apply(ViewerCommand::FitToWindow), Effect::None);
    assert_eq!(viewer.apply(ViewerCommand::ToggleDragMode), Effect::None);

    viewer.show_image(Size2::new(400.0, 300.0));
    assert_eq!(viewer.apply(zoom), Effect::ViewChanged);
    assert_eq!(viewer.viewport().state().zoom_level, 1);
    assert_eq!(
        viewer.apply(ViewerCommand::PanBy { dx: 3.0, dy: 4.0 }),
        Effect::ViewChanged
    );
    assert_eq!(viewer.viewport().state().pan_offset, Point2::new(3.0, 4.0));
}

#[test]
fn test_fit_to_window_resets_zoom() {
    let mut viewer = viewer_with(&["a.png"]);
    viewer.show_image(Size2::new(400.0, 300.0));
    viewer.apply(ViewerCommand::ZoomBy {
        delta: 1,
        anchor: Some(Point2::new(10.0, 10.0)),
    });
    assert_eq!(viewer.apply(ViewerCommand::FitToWindow), Effect::ViewChanged);
    assert_eq!(viewer.viewport().state().zoom_level, 0);
    assert_eq!(viewer.viewport().state().pan_offset, Point2::ZERO);
    assert_relative_eq!(viewer.viewport().state().scale, 2.0);
}

#[test]
fn test_toggle_drag_mode() {
    let mut viewer = viewer_with(&["a.png"]);
    viewer.show_image(Size2::new(400.0, 300.0));
    assert_eq!(viewer.viewport().state().drag_mode, DragMode::Pan);
    assert_eq!(viewer.apply(ViewerCommand::ToggleDragMode), Effect::ViewChanged);
    assert_eq!(viewer.viewport().state().drag_mode, DragMode::NoDrag);
}

#[test]
fn test_gesture_released_changes_nothing() {
    let mut viewer = viewer_with(&["a.png", "b.png"]);
    viewer.show_image(Size2::new(400.0, 300.0));
    viewer.apply(ViewerCommand::ZoomBy {
        delta: 1,
        anchor: None,
    });
    let before = viewer.viewport().state().clone();

    assert_eq!(viewer.apply(ViewerCommand::GestureReleased), Effect::None);
    assert_eq!(viewer.viewport().state(), &before);
    assert_eq!(viewer.images().current_index(), 0);
}

#[test]
fn test_clear_image_after_decode_failure() {
    let mut viewer = viewer_with(&["a.png"]);
    viewer.show_image(Size2::new(400.0, 300.0));
    viewer.clear_image();
    assert!(!viewer.viewport().has_image());
}

#[test]
fn test_open_folder() {
    let dir = TempDir::new().unwrap();
    for name in ["b.jpg", "a.png", "skip.txt"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let mut viewer = Viewer::default();
    let effect = viewer.open_folder(dir.path()).unwrap();
    assert_eq!(effect, Effect::ShowImage(dir.path().join("a.png")));
    assert_eq!(viewer.images().len(), 2);
}

#[test]
fn test_open_folder_without_images() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), b"").unwrap();

    let mut viewer = viewer_with(&["keep.png"]);
    assert_eq!(viewer.open_folder(dir.path()).unwrap(), Effect::None);
    assert_eq!(viewer.images().len(), 1);
}

#[test]
fn test_open_missing_folder_is_error() {
    let dir = TempDir::new().unwrap();
    let mut viewer = Viewer::default();
    assert!(viewer.open_folder(&dir.path().join("nope")).is_err());
}

#[test]
fn test_resize_refits() {
    let mut viewer = viewer_with(&["a.png"]);
    viewer.show_image(Size2::new(800.0, 600.0));
    assert!(viewer.resize(Size2::new(1600.0, 1200.0)));
    assert_relative_eq!(viewer.viewport().state().scale, 2.0);
}

#[test]
fn test_from_config_uses_viewer_section() {
    let mut config = handpan_core::config::AppConfig::default();
    config.viewer.window_width = 400.0;
    config.viewer.window_height = 400.0;
    config.viewer.zoom_in_factor = 2.0;

    let mut viewer = Viewer::from_config(&config);
    assert_eq!(viewer.viewport().viewport_size(), Size2::new(400.0, 400.0));
    viewer.show_image(Size2::new(100.0, 100.0));
    viewer.apply(ViewerCommand::ZoomBy {
        delta: 1,
        anchor: None,
    });
    assert_relative_eq!(viewer.viewport().state().scale, 8.0);
}
