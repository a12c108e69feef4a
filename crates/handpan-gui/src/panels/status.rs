use handpan_core::viewport::DragMode;

use crate::app::HandpanApp;

pub fn show(ctx: &egui::Context, app: &mut HandpanApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Three visible log lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Keep the panel height stable before the first message.
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let images = app.viewer.images();
            if let Some(path) = images.current() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.label(format!("{name} ({}/{})", images.current_index() + 1, images.len()));
                ui.separator();
            }

            let state = app.viewer.viewport().state();
            if let Some(size) = state.image_size {
                ui.label(format!("{}x{}", size.width, size.height));
                ui.separator();
            }
            ui.label(format!(
                "Zoom: {:.0}% (level {})",
                state.scale * 100.0,
                state.zoom_level
            ));
            ui.separator();
            ui.label(match state.drag_mode {
                DragMode::Pan => "Drag: pan",
                DragMode::NoDrag => "Drag: off",
            });
            ui.separator();
            ui.label(app.ui_state.gesture_status());

            if let Some(p) = app.viewport.last_click {
                ui.separator();
                ui.label(format!("Pixel: {:.0}, {:.0}", p.x.floor(), p.y.floor()));
            }
        });

        ui.add_space(2.0);
    });
}
