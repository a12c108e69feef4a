use handpan_core::gesture::HandObservation;
use handpan_core::io::save_frame;

use crate::app::HandpanApp;
use crate::messages::DialogResult;

const LANDMARK_RADIUS: f32 = 3.0;

pub fn show(ctx: &egui::Context, app: &mut HandpanApp) {
    let mut open = app.ui_state.show_camera;
    if !open {
        return;
    }

    egui::Window::new("Camera")
        .open(&mut open)
        .default_width(360.0)
        .resizable(true)
        .show(ctx, |ui| {
            if !app.gestures_running() {
                ui.label("Gesture tracking is off.");
            }

            let texture = app.camera.texture.as_ref().map(|t| t.id());
            match (texture, app.camera.frame_size()) {
                (Some(texture_id), Some(frame_size)) => {
                    let width = ui.available_width().max(1.0);
                    let scale = width / frame_size.x;
                    let (rect, _) = ui.allocate_exact_size(frame_size * scale, egui::Sense::hover());
                    ui.painter().image(
                        texture_id,
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                    for hand in &app.camera.hands {
                        draw_landmarks(ui, hand, rect, scale, frame_size.x, app.camera.mirrored);
                    }
                }
                _ => {
                    ui.label("Waiting for frames...");
                }
            }

            ui.separator();

            if app.camera.hands.is_empty() {
                ui.label("No hands");
            }
            for hand in &app.camera.hands {
                ui.label(format!(
                    "{}: {} ({:.2})",
                    hand.handedness,
                    fingers_label(hand),
                    hand.score
                ));
            }
            if let Some(command) = app.ui_state.last_gesture {
                ui.label(format!("Last gesture: {command:?}"));
            }
            ui.label(format!("Frames: {}", app.camera.frames_seen));

            if ui
                .add_enabled(app.camera.frame.is_some(), egui::Button::new("Save snapshot..."))
                .clicked()
            {
                save_snapshot(app);
            }
        });

    if open != app.ui_state.show_camera {
        app.set_camera_window(open);
    }
}

fn draw_landmarks(
    ui: &egui::Ui,
    hand: &HandObservation,
    rect: egui::Rect,
    scale: f32,
    frame_width: f32,
    mirrored: bool,
) {
    let painter = ui.painter();
    for lm in hand.landmarks() {
        let x = if mirrored { frame_width - lm.x } else { lm.x };
        let pos = rect.min + egui::vec2(x * scale, lm.y * scale);
        painter.circle_filled(pos, LANDMARK_RADIUS, egui::Color32::from_rgb(80, 220, 120));
    }
}

/// Thumb-first pattern such as `11000`.
fn fingers_label(hand: &HandObservation) -> String {
    hand.fingers_up
        .iter()
        .map(|&up| if up { '1' } else { '0' })
        .collect()
}

fn save_snapshot(app: &HandpanApp) {
    let Some(frame) = app.camera.frame.clone() else {
        return;
    };
    let dialog_tx = app.dialog_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("snapshot.png")
            .save_file()
        {
            let message = match save_frame(&frame, &path) {
                Ok(()) => format!("Snapshot saved to {}", path.display()),
                Err(e) => format!("ERROR: cannot save {}: {e}", path.display()),
            };
            let _ = dialog_tx.send(DialogResult::Log { message });
        }
    });
}
