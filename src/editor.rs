use std::sync::Arc;

use egui::{ColorImage, Pos2};
use log::{debug, error, warn};

use crate::command::{Command, CommandHistory};
use crate::config::{EditorConfig, Style};
use crate::error::CommandResult;
use crate::file_handler::decode_image;
use crate::input::InputEvent;
use crate::item::{ItemId, factory};
use crate::scene::Scene;
use crate::tools::{Tool, ToolContext, ToolState, ToolStateMachine};

/// One editing session: the scene, its history and the active tool.
///
/// Nothing here fails towards the caller for user-driven actions. Errors are
/// logged and turned into a status message, and the action becomes a no-op.
#[derive(Debug, Default)]
pub struct Editor {
    scene: Scene,
    history: CommandHistory,
    machine: ToolStateMachine,
    style: Style,
    status: Option<String>,
    /// History revision the status message was taken from
    seen_revision: u64,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: CommandHistory::with_config(config.history),
            style: config.style,
            ..Self::default()
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.machine.tool()
    }

    pub fn state(&self) -> &ToolState {
        self.machine.state()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Style for items created from now on. Existing items keep theirs.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Last action performed or last failure, for the status line.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn config(&self) -> EditorConfig {
        EditorConfig {
            style: self.style.clone(),
            history: self.history.config().clone(),
        }
    }

    /// Feeds one input event to the tool state machine.
    /// Returns false if the event was rejected.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        let result = {
            let (machine, mut ctx) = self.split();
            machine.handle(event, &mut ctx)
        };
        self.report(result)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        let result = {
            let (machine, mut ctx) = self.split();
            machine.set_tool(tool, &mut ctx)
        };
        self.report(result);
    }

    pub fn undo(&mut self) -> bool {
        if !self.finish_gesture() {
            return false;
        }
        match self.history.undo(&mut self.scene) {
            Ok(true) => self.report(Ok(())),
            Ok(false) => {
                debug!("Nothing to undo");
                false
            }
            Err(err) => self.report(Err(err)),
        }
    }

    pub fn redo(&mut self) -> bool {
        if !self.finish_gesture() {
            return false;
        }
        match self.history.redo(&mut self.scene) {
            Ok(true) => self.report(Ok(())),
            Ok(false) => {
                debug!("Nothing to redo");
                false
            }
            Err(err) => self.report(Err(err)),
        }
    }

    pub fn select_all(&mut self) {
        if self.finish_gesture() {
            self.scene.select_all();
        }
    }

    /// Deletes every selected item as one undoable step.
    pub fn delete_selection(&mut self) -> bool {
        if !self.finish_gesture() {
            return false;
        }
        let selection = self.scene.selection();
        if selection.is_empty() {
            return false;
        }
        let result = self.history.push(Command::delete(selection), &mut self.scene);
        self.report(result)
    }

    /// Places decoded pixels with their top-left corner at `pos`, behind all
    /// shapes. Undoable like any other add.
    pub fn place_image(&mut self, pixels: impl Into<Arc<ColorImage>>, pos: Pos2) -> Option<ItemId> {
        if !self.finish_gesture() {
            return None;
        }
        let command = Command::add(&mut self.scene, factory::image(pos, pixels), &self.style);
        let id = command.targets()[0];
        if let Err(err) = self.history.push(command, &mut self.scene) {
            self.scene.release(id);
            self.report(Err(err));
            return None;
        }
        let result = self.scene.set_interactive(id, true);
        self.report(result).then_some(id)
    }

    /// Decodes an encoded image (PNG, JPEG, ...) and places it at `pos`.
    pub fn import_image_bytes(&mut self, bytes: &[u8], pos: Pos2) -> Option<ItemId> {
        match decode_image(bytes) {
            Ok(pixels) => self.place_image(pixels, pos),
            Err(err) => {
                self.report(Err(err));
                None
            }
        }
    }

    /// Ends whatever the active tool is doing, committing its edit.
    pub fn finish_gesture(&mut self) -> bool {
        let result = {
            let (machine, mut ctx) = self.split();
            machine.finish_gesture(&mut ctx)
        };
        self.report(result)
    }

    fn split(&mut self) -> (&mut ToolStateMachine, ToolContext<'_>) {
        (
            &mut self.machine,
            ToolContext {
                scene: &mut self.scene,
                history: &mut self.history,
                style: &self.style,
            },
        )
    }

    fn report(&mut self, result: CommandResult) -> bool {
        match result {
            Ok(()) => {
                if self.history.revision() != self.seen_revision {
                    self.seen_revision = self.history.revision();
                    self.status = self.history.last_text().map(str::to_owned);
                }
                true
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!("{}", err);
                } else {
                    error!("{}", err);
                }
                self.seen_revision = self.history.revision();
                self.status = Some(err.to_string());
                false
            }
        }
    }
}
