use handpan_core::dispatch::ViewerCommand;
use handpan_core::geometry::Point2;
use handpan_core::viewport::{DragMode, Size2};

use crate::app::HandpanApp;

pub fn show(ctx: &egui::Context, app: &mut HandpanApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        // The core viewport works in panel-local coordinates.
        app.viewer.resize(Size2::new(rect.width(), rect.height()));

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());

        if let Some(texture_id) = texture_id {
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

            handle_zoom(ctx, ui, &response, app, rect);
            handle_pan(&response, app, ctx);

            if response.double_clicked() {
                app.apply(ctx, ViewerCommand::FitToWindow);
            } else if response.clicked() {
                app.viewport.last_click = response
                    .interact_pointer_pos()
                    .and_then(|pos| app.viewer.viewport().screen_to_image(to_local(pos, rect)));
            }

            if let Some(img_rect) = app.viewer.viewport().image_rect() {
                let img_rect = egui::Rect::from_min_size(
                    rect.min + egui::vec2(img_rect.x, img_rect.y),
                    egui::vec2(img_rect.width, img_rect.height),
                );
                draw_image(ui, texture_id, img_rect, rect);
            }

            draw_viewing_label(ui, rect, &app.viewport.viewing_label());
        } else {
            show_placeholder(ui);
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point2 {
    Point2::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

/// One zoom step per wheel notch, anchored on the pointer.
fn handle_zoom(
    ctx: &egui::Context,
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut HandpanApp,
    rect: egui::Rect,
) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    let delta = if scroll_delta > 0.0 { 1 } else { -1 };
    let anchor = ui
        .input(|i| i.pointer.hover_pos())
        .map(|pos| to_local(pos, rect));
    app.apply(ctx, ViewerCommand::ZoomBy { delta, anchor });
}

fn handle_pan(response: &egui::Response, app: &mut HandpanApp, ctx: &egui::Context) {
    let pan_mode = app.viewer.viewport().state().drag_mode == DragMode::Pan;
    if response.dragged_by(egui::PointerButton::Middle)
        || (pan_mode && response.dragged_by(egui::PointerButton::Primary))
    {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            app.apply(
                ctx,
                ViewerCommand::PanBy {
                    dx: delta.x,
                    dy: delta.y,
                },
            );
        }
    }
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect, clip: egui::Rect) {
    ui.painter().with_clip_rect(clip).image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Load an image folder to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
