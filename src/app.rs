use egui::{Key, Modifiers, Pos2};

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::file_handler::FileHandler;
use crate::panels;

/// Offset between images dropped together so they do not cover each other.
const DROP_CASCADE: f32 = 20.0;

/// The editor window: toolbar, canvas and status line around one [`Editor`].
#[derive(Debug, Default)]
pub struct DocumentorApp {
    editor: Editor,
    canvas: Canvas,
    file_handler: FileHandler,
}

impl DocumentorApp {
    /// Called once before the first frame.
    ///
    /// An explicit `config` wins over the one persisted by the last run.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<EditorConfig>) -> Self {
        let config = config
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            })
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config),
            ..Self::default()
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Shift variants first: consume_key ignores extra shift.
        let redo = ctx.input_mut(|i| {
            i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y)
        });
        if redo {
            self.editor.redo();
        } else if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z)) {
            self.editor.undo();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::A)) {
            self.editor.select_all();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        let origin = ctx
            .input(|i| i.pointer.hover_pos())
            .map(|pos| self.canvas.to_canvas(pos))
            .unwrap_or(Pos2::ZERO);
        for (n, image) in self.file_handler.process_dropped_files().into_iter().enumerate() {
            let pos = origin + egui::Vec2::splat(n as f32 * DROP_CASCADE);
            log::info!("Placing {} at {:?}", image.name, pos);
            self.editor.place_image(image.pixels, pos);
        }
    }
}

impl eframe::App for DocumentorApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.editor.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        panels::tools_panel(&mut self.editor, ctx);
        panels::status_panel(&self.editor, ctx);
        panels::central_panel(&mut self.editor, &mut self.canvas, ctx);
    }
}
