use egui::epaint::EllipseShape;
use egui::{Align2, Color32, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

use crate::editor::Editor;
use crate::event::RepaintHandler;
use crate::input::InputHandler;
use crate::item::{Item, ItemId};
use crate::texture_manager::TextureManager;

const SELECTION_MARGIN: f32 = 3.0;
const SELECTION_STROKE: Stroke = Stroke {
    width: 1.5,
    color: Color32::from_rgb(0, 120, 215),
};
const EDITING_STROKE: Stroke = Stroke {
    width: 1.0,
    color: Color32::from_rgb(255, 140, 0),
};

/// The drawing surface: feeds egui input to the editor and paints its scene.
#[derive(Debug)]
pub struct Canvas {
    input: InputHandler,
    textures: TextureManager,
    subscribed: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            input: InputHandler::new(Rect::NOTHING),
            textures: TextureManager::default(),
            subscribed: false,
        }
    }

    /// Converts a screen position (e.g. of a drop) into canvas space.
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        self.input.to_canvas(screen)
    }

    /// Fills the remaining space of `ui` with the canvas, dispatches this
    /// frame's input to `editor` and paints the result.
    pub fn show(&mut self, ui: &mut Ui, editor: &mut Editor) -> egui::Response {
        if !self.subscribed {
            editor
                .scene()
                .events()
                .subscribe(Box::new(RepaintHandler::new(ui.ctx().clone())));
            self.subscribed = true;
        }

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        self.input.set_canvas_rect(response.rect);
        painter.rect_filled(response.rect, 0.0, Color32::WHITE);

        let wants_keyboard = !ui.ctx().wants_keyboard_input();
        for event in self.input.process_input(ui.ctx(), wants_keyboard) {
            editor.handle_event(&event);
        }

        self.paint(&painter, editor);
        response
    }

    fn paint(&mut self, painter: &Painter, editor: &Editor) {
        self.textures.begin_frame();
        let scene = editor.scene();
        let offset = self.input.to_screen(Pos2::ZERO).to_vec2();

        for (id, item) in scene.items() {
            self.paint_item(painter, id, item, offset);
        }
        for id in scene.selection() {
            if let Some(item) = scene.item(id) {
                painter.rect_stroke(
                    item.bounds().translate(offset).expand(SELECTION_MARGIN),
                    0.0,
                    SELECTION_STROKE,
                );
            }
        }
        if let Some(item) = editor.state().editing_item().and_then(|id| scene.item(id)) {
            painter.rect_stroke(item.bounds().translate(offset).expand(1.0), 0.0, EDITING_STROKE);
        }
        self.textures.end_frame();
    }

    fn paint_item(&mut self, painter: &Painter, id: ItemId, item: &Item, offset: Vec2) {
        match item {
            Item::Rectangle(shape) => {
                painter.rect(shape.bounds.translate(offset), 0.0, shape.fill, shape.border);
            }
            Item::Ellipse(shape) => {
                let bounds = shape.bounds.translate(offset);
                painter.add(Shape::Ellipse(EllipseShape {
                    center: bounds.center(),
                    radius: bounds.size() / 2.0,
                    fill: shape.fill,
                    stroke: shape.border,
                }));
            }
            Item::Text(text) => {
                painter.text(
                    text.position + offset,
                    Align2::LEFT_TOP,
                    &text.content,
                    text.font.clone(),
                    text.color,
                );
            }
            Item::Image(image) => {
                let texture = self.textures.get_or_create(id, &image.pixels, painter.ctx());
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture, image.rect().translate(offset), uv, Color32::WHITE);
            }
        }
    }
}
