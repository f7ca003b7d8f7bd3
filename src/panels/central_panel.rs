use crate::canvas::Canvas;
use crate::editor::Editor;

/// The canvas fills whatever the other panels leave.
pub fn central_panel(editor: &mut Editor, canvas: &mut Canvas, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            canvas.show(ui, editor);
        });
}

/// Status line with the last action or failure.
pub fn status_panel(editor: &Editor, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(editor.status().unwrap_or("Ready"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} | {}", editor.tool().name(), editor.state().name()));
                ui.label(format!("{} items", editor.scene().len()));
            });
        });
    });
}
