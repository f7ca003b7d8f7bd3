use eframe::egui;

const SWATCH_SIZE: f32 = 20.0;

/// Clickable color square; `None` draws the "no color" swatch.
pub struct Swatch {
    pub color: Option<egui::Color32>,
    pub selected: bool,
}

impl Swatch {
    pub fn new(color: Option<egui::Color32>, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            match self.color {
                Some(color) => {
                    painter.rect_filled(rect, 2.0, color);
                }
                None => {
                    painter.rect_filled(rect, 2.0, egui::Color32::WHITE);
                    painter.line_segment(
                        [rect.left_bottom(), rect.right_top()],
                        egui::Stroke::new(1.5, egui::Color32::RED),
                    );
                }
            }
            let stroke = if self.selected {
                egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243))
            } else {
                egui::Stroke::new(1.0, egui::Color32::GRAY)
            };
            painter.rect_stroke(rect, 2.0, stroke);
        }

        response
    }
}
