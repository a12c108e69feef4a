use handpan_core::dispatch::ViewerCommand;
use handpan_core::viewport::DragMode;

use crate::app::HandpanApp;

pub fn show(ctx: &egui::Context, app: &mut HandpanApp) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Load images").clicked() {
                super::pick_folder(ctx, app);
            }

            let can_navigate = app.viewer.images().len() > 1;
            if ui
                .add_enabled(can_navigate, egui::Button::new("Previous"))
                .clicked()
            {
                app.apply(ctx, ViewerCommand::PreviousImage);
            }
            if ui
                .add_enabled(can_navigate, egui::Button::new("Next"))
                .clicked()
            {
                app.apply(ctx, ViewerCommand::NextImage);
            }

            ui.separator();

            let running = app.gestures_running();
            let label = if running {
                "Stop gestures"
            } else {
                "Start gestures"
            };
            if ui.selectable_label(running, label).clicked() {
                app.toggle_gestures(ctx);
            }
            if ui
                .selectable_label(app.ui_state.show_camera, "Camera")
                .clicked()
            {
                let open = !app.ui_state.show_camera;
                app.set_camera_window(open);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let pan = app.viewer.viewport().state().drag_mode == DragMode::Pan;
                if ui
                    .add_enabled(
                        app.viewer.viewport().has_image(),
                        egui::Button::new("Drag to pan").selected(pan),
                    )
                    .clicked()
                {
                    app.apply(ctx, ViewerCommand::ToggleDragMode);
                }
            });
        });
    });
}
