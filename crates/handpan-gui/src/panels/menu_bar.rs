use handpan_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use handpan_core::dispatch::ViewerCommand;

use crate::app::HandpanApp;
use crate::messages::DialogResult;

pub fn show(ctx: &egui::Context, app: &mut HandpanApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open Folder...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    super::pick_folder(ctx, app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let has_image = app.viewer.viewport().has_image();
                if ui
                    .add_enabled(has_image, egui::Button::new("Fit to Window").shortcut_text("F"))
                    .clicked()
                {
                    ui.close();
                    app.apply(ctx, ViewerCommand::FitToWindow);
                }
                if ui
                    .add_enabled(has_image, egui::Button::new("Toggle Drag Mode").shortcut_text("D"))
                    .clicked()
                {
                    ui.close();
                    app.apply(ctx, ViewerCommand::ToggleDragMode);
                }

                ui.separator();

                let can_navigate = app.viewer.images().len() > 1;
                if ui
                    .add_enabled(can_navigate, egui::Button::new("Previous Image").shortcut_text("Left"))
                    .clicked()
                {
                    ui.close();
                    app.apply(ctx, ViewerCommand::PreviousImage);
                }
                if ui
                    .add_enabled(can_navigate, egui::Button::new("Next Image").shortcut_text("Right"))
                    .clicked()
                {
                    ui.close();
                    app.apply(ctx, ViewerCommand::NextImage);
                }
            });

            ui.menu_button("Gestures", |ui| {
                let label = if app.gestures_running() {
                    "Stop Tracking"
                } else {
                    "Start Tracking"
                };
                if ui.button(label).clicked() {
                    ui.close();
                    app.toggle_gestures(ctx);
                }

                let mut show_camera = app.ui_state.show_camera;
                if ui.checkbox(&mut show_camera, "Camera Window").changed() {
                    app.set_camera_window(show_camera);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            super::pick_folder(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn import_config(ctx: &egui::Context, app: &HandpanApp) {
    let dialog_tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AppConfig::load(&path) {
            Ok(config) => DialogResult::ConfigImported { path, config },
            Err(e) => DialogResult::Log {
                message: format!("ERROR: cannot import {}: {e}", path.display()),
            },
        };
        let _ = dialog_tx.send(result);
        ctx.request_repaint();
    });
}

fn export_config(app: &HandpanApp) {
    let config = app.config.clone();
    let dialog_tx = app.dialog_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name(DEFAULT_CONFIG_FILE)
            .save_file()
        {
            let message = match config.save(&path) {
                Ok(()) => format!("Config saved to {}", path.display()),
                Err(e) => format!("ERROR: cannot save {}: {e}", path.display()),
            };
            let _ = dialog_tx.send(DialogResult::Log { message });
        }
    });
}
