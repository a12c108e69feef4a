pub mod camera;
pub mod menu_bar;
pub mod status;
pub mod toolbar;
pub mod viewport;

use crate::app::HandpanApp;
use crate::messages::DialogResult;

/// Pick an image folder on a helper thread; the result arrives via the dialog channel.
pub(crate) fn pick_folder(ctx: &egui::Context, app: &HandpanApp) {
    let dialog_tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    let start = app.ui_state.folder.clone();
    std::thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new().set_title("Choose an image folder");
        if let Some(dir) = start {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_folder() {
            let _ = dialog_tx.send(DialogResult::FolderPicked { path });
            ctx.request_repaint();
        }
    });
}
