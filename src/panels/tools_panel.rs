use crate::components::{Swatch, ToolButton};
use crate::config::PaletteColor;
use crate::editor::Editor;
use crate::tools::Tool;

/// Toolbar across the top: tools, history buttons and the style of new items.
pub fn tools_panel(editor: &mut Editor, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for tool in Tool::ALL {
                if ToolButton::new(tool, editor.tool() == tool).show(ui).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    editor.set_tool(tool);
                }
            }
            ui.separator();

            let undo = ui.add_enabled(editor.history().can_undo(), egui::Button::new("Undo"));
            let undo = match editor.history().undo_text() {
                Some(text) => undo.on_hover_text(text),
                None => undo,
            };
            if undo.clicked() {
                editor.undo();
            }
            let redo = ui.add_enabled(editor.history().can_redo(), egui::Button::new("Redo"));
            let redo = match editor.history().redo_text() {
                Some(text) => redo.on_hover_text(text),
                None => redo,
            };
            if redo.clicked() {
                editor.redo();
            }

            let has_selection = !editor.scene().selection().is_empty();
            if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                editor.delete_selection();
            }
            ui.separator();

            style_controls(ui, editor);
        });
    });
}

fn style_controls(ui: &mut egui::Ui, editor: &mut Editor) {
    let mut style = editor.style().clone();

    ui.label("Border:");
    for color in PaletteColor::ALL {
        let swatch = Swatch::new(Some(color.color()), style.border_color == color.color());
        if swatch.show(ui).on_hover_text(color.name()).clicked() {
            style.border_color = color.color();
        }
    }
    ui.add(egui::Slider::new(&mut style.border_width, 0.0..=20.0).text("width"));
    ui.separator();

    ui.label("Fill:");
    let transparent = style.fill_color == egui::Color32::TRANSPARENT;
    if Swatch::new(None, transparent).show(ui).on_hover_text("None").clicked() {
        style.fill_color = egui::Color32::TRANSPARENT;
    }
    for color in PaletteColor::ALL {
        let swatch = Swatch::new(Some(color.color()), style.fill_color == color.color());
        if swatch.show(ui).on_hover_text(color.name()).clicked() {
            style.fill_color = color.color();
        }
    }
    ui.add(egui::Slider::new(&mut style.font.size, 8.0..=72.0).text("font"));

    if &style != editor.style() {
        editor.set_style(style);
    }
}
