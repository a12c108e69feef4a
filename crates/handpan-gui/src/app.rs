use std::path::{Path, PathBuf};
use std::sync::mpsc;

use handpan_core::config::AppConfig;
use handpan_core::dispatch::{Effect, Viewer, ViewerCommand};
use handpan_core::io::{image_size, load_image};
use tracing::{info, warn};

use crate::convert::rgba_to_color_image;
use crate::messages::{DialogResult, GestureControl, GestureEvent};
use crate::panels;
use crate::states::{CameraState, UIState, ViewportState};
use crate::worker;

pub struct HandpanApp {
    pub config: AppConfig,
    pub viewer: Viewer,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub camera: CameraState,
    pub dialog_tx: mpsc::Sender<DialogResult>,
    dialog_rx: mpsc::Receiver<DialogResult>,
    /// Replaced on every start, so events from a previous worker are never mixed in.
    gesture_rx: Option<mpsc::Receiver<GestureEvent>>,
    control_tx: Option<mpsc::Sender<GestureControl>>,
}

impl HandpanApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (dialog_tx, dialog_rx) = mpsc::channel();

        let mut app = Self {
            viewer: Viewer::from_config(&config),
            config,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            camera: CameraState::default(),
            dialog_tx,
            dialog_rx,
            gesture_rx: None,
            control_tx: None,
        };
        if app.config.gestures.enabled_on_start {
            app.start_gestures(ctx);
        }
        app
    }

    /// Route a command from any input through the viewer and act on the effect.
    pub fn apply(&mut self, ctx: &egui::Context, command: ViewerCommand) {
        match self.viewer.apply(command) {
            Effect::ShowImage(path) => self.show_image(ctx, path),
            Effect::ViewChanged => ctx.request_repaint(),
            Effect::None => {}
        }
    }

    fn show_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        self.viewport.last_click = None;
        match load_image(&path) {
            Ok(img) => {
                let texture = ctx.load_texture(
                    "viewport",
                    rgba_to_color_image(&img),
                    egui::TextureOptions::LINEAR,
                );
                self.viewer.show_image(image_size(&img));
                self.viewport.texture = Some(texture);
                self.viewport.current_path = Some(path);
            }
            Err(e) => {
                warn!("Failed to decode {}: {e}", path.display());
                self.ui_state
                    .add_log(format!("ERROR: cannot open {}: {e}", path.display()));
                self.viewer.clear_image();
                self.viewport.clear();
            }
        }
    }

    pub fn open_folder(&mut self, ctx: &egui::Context, folder: &Path) {
        match self.viewer.open_folder(folder) {
            Ok(Effect::ShowImage(path)) => {
                self.ui_state.add_log(format!(
                    "Loaded {} image(s) from {}",
                    self.viewer.images().len(),
                    folder.display()
                ));
                self.ui_state.folder = Some(folder.to_path_buf());
                self.show_image(ctx, path);
            }
            Ok(_) => {
                self.ui_state
                    .add_log(format!("No images in {}", folder.display()));
            }
            Err(e) => {
                self.ui_state
                    .add_log(format!("ERROR: cannot read {}: {e}", folder.display()));
            }
        }
    }

    pub fn gestures_running(&self) -> bool {
        self.control_tx.is_some()
    }

    pub fn start_gestures(&mut self, ctx: &egui::Context) {
        if self.gestures_running() {
            return;
        }
        let (event_tx, event_rx) = mpsc::channel();
        match worker::spawn_gesture_worker(
            self.config.clone(),
            self.ui_state.show_camera,
            event_tx,
            ctx.clone(),
        ) {
            Ok(control_tx) => {
                self.control_tx = Some(control_tx);
                self.gesture_rx = Some(event_rx);
                self.ui_state.gestures_running = true;
                self.ui_state.gesture_source = None;
                self.ui_state.add_log("Starting gesture tracking".into());
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e:#}")),
        }
    }

    pub fn stop_gestures(&mut self) {
        if let Some(control_tx) = self.control_tx.take() {
            let _ = control_tx.send(GestureControl::Stop);
            self.ui_state.add_log("Stopping gesture tracking".into());
        }
    }

    pub fn toggle_gestures(&mut self, ctx: &egui::Context) {
        if self.gestures_running() {
            self.stop_gestures();
        } else {
            self.start_gestures(ctx);
        }
    }

    pub fn set_camera_window(&mut self, open: bool) {
        self.ui_state.show_camera = open;
        if let Some(ref control_tx) = self.control_tx {
            let _ = control_tx.send(GestureControl::SetPreview(open));
        }
    }

    /// Drain all pending events from the gesture worker.
    fn poll_gestures(&mut self, ctx: &egui::Context) {
        let Some(ref gesture_rx) = self.gesture_rx else {
            return;
        };
        let events: Vec<GestureEvent> = gesture_rx.try_iter().collect();
        for event in events {
            match event {
                GestureEvent::Started { source } => {
                    self.ui_state.add_log(format!("Tracking gestures from {source}"));
                    self.ui_state.gesture_source = Some(source);
                }
                GestureEvent::Command(command) => {
                    self.ui_state.last_gesture = Some(command);
                    self.apply(ctx, command.into());
                }
                GestureEvent::Preview { frame, hands } => {
                    let mirror = self.config.camera.mirror_preview;
                    self.camera.update(ctx, frame, hands, mirror);
                }
                GestureEvent::Log { message } => self.ui_state.add_log(message),
                GestureEvent::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                GestureEvent::Stopped { frames } => {
                    info!(frames, "gesture worker exited");
                    self.ui_state
                        .add_log(format!("Gesture tracking stopped after {frames} frames"));
                    self.ui_state.gestures_running = false;
                    self.ui_state.gesture_source = None;
                    self.control_tx = None;
                    self.gesture_rx = None;
                }
            }
        }
    }

    /// Drain all pending results from file dialogs.
    fn poll_dialogs(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.dialog_rx.try_recv() {
            match result {
                DialogResult::FolderPicked { path } => self.open_folder(ctx, &path),
                DialogResult::ConfigImported { path, config } => {
                    self.import_config(ctx, &path, config);
                }
                DialogResult::Log { message } => self.ui_state.add_log(message),
            }
        }
    }

    fn import_config(&mut self, ctx: &egui::Context, path: &Path, config: AppConfig) {
        self.config = config;
        self.viewer = Viewer::from_config(&self.config);
        self.viewport.clear();
        self.ui_state
            .add_log(format!("Config imported from {}", path.display()));
        if let Some(folder) = self.ui_state.folder.clone() {
            self.open_folder(ctx, &folder);
        }
        if self.gestures_running() {
            self.ui_state
                .add_log("Restart gesture tracking to apply camera and detector settings".into());
        }
    }

    /// Single-key shortcuts. Ctrl+O and Ctrl+Q are handled by the menu bar.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        // Shift is allowed so `+` works on layouts where it needs it.
        let pressed = |key: egui::Key| {
            ctx.input(|i| !i.modifiers.command && !i.modifiers.alt && i.key_pressed(key))
        };

        if pressed(egui::Key::Q) {
            self.stop_gestures();
        }
        if pressed(egui::Key::ArrowRight) {
            self.apply(ctx, ViewerCommand::NextImage);
        }
        if pressed(egui::Key::ArrowLeft) {
            self.apply(ctx, ViewerCommand::PreviousImage);
        }
        if pressed(egui::Key::Plus) || pressed(egui::Key::Equals) {
            self.apply(ctx, ViewerCommand::ZoomBy { delta: 1, anchor: None });
        }
        if pressed(egui::Key::Minus) {
            self.apply(ctx, ViewerCommand::ZoomBy { delta: -1, anchor: None });
        }
        if pressed(egui::Key::F) {
            self.apply(ctx, ViewerCommand::FitToWindow);
        }
        if pressed(egui::Key::D) {
            self.apply(ctx, ViewerCommand::ToggleDragMode);
        }
    }
}

impl eframe::App for HandpanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_gestures(ctx);
        self.poll_dialogs(ctx);

        panels::menu_bar::show(ctx, self);
        panels::toolbar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::camera::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.handle_keyboard(ctx);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Handpan")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Handpan");
                        ui.label("Gesture-controlled image viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
