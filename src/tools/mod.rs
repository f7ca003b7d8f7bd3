use egui::{Key, Pos2};
use log::{debug, warn};

use crate::command::{Command, CommandHistory};
use crate::config::Style;
use crate::error::{CommandResult, EditorError};
use crate::input::InputEvent;
use crate::item::{Item, ItemId, ItemKind};
use crate::scene::Scene;

mod cursor;
mod shape;
mod text;

/// Enum representing all available tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Select, move and delete items
    #[default]
    Cursor,
    Rectangle,
    Ellipse,
    /// Place text labels
    Text,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Cursor, Tool::Rectangle, Tool::Ellipse, Tool::Text];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Cursor => "Cursor",
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Text => "Text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Cursor => "⬉ Cursor",
            Tool::Rectangle => "◻ Rectangle",
            Tool::Ellipse => "◯ Ellipse",
            Tool::Text => "T Text",
        }
    }
}

/// Where the current gesture stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    /// No active gesture
    #[default]
    Idle,
    /// An item created on press is following the pointer
    Drawing {
        item: ItemId,
        /// Press position
        anchor: Pos2,
        /// Item position at press time
        origin: Pos2,
    },
    /// The selection is following the pointer
    Moving {
        items: Vec<ItemId>,
        old_positions: Vec<Pos2>,
        grab: Pos2,
    },
    /// A text item has keyboard focus
    EditingText { item: ItemId, old_text: String },
}

impl ToolState {
    pub fn name(&self) -> &'static str {
        match self {
            ToolState::Idle => "Idle",
            ToolState::Drawing { .. } => "Drawing",
            ToolState::Moving { .. } => "Moving",
            ToolState::EditingText { .. } => "EditingText",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ToolState::Idle)
    }

    /// Item receiving keyboard input, if any.
    pub fn editing_item(&self) -> Option<ItemId> {
        match self {
            ToolState::EditingText { item, .. } => Some(*item),
            _ => None,
        }
    }
}

/// Everything a tool may touch while handling an event.
pub struct ToolContext<'a> {
    pub scene: &'a mut Scene,
    pub history: &'a mut CommandHistory,
    /// Style captured for items created by this event
    pub style: &'a Style,
}

impl ToolContext<'_> {
    /// Styles a freshly created item and records the add command that places it.
    fn add_item(&mut self, item: Item) -> CommandResult<ItemId> {
        let command = Command::add(self.scene, item, self.style);
        let id = command.targets()[0];
        if let Err(err) = self.history.push(command, self.scene) {
            self.scene.release(id);
            return Err(err);
        }
        Ok(id)
    }
}

/// Turns pointer and keyboard gestures into scene edits for the active tool.
///
/// Every event runs to completion before the next one is handled. Whatever
/// happens, a gesture ends in `Idle` with its item finalized and its command
/// recorded; there is no cancel path that leaves half an edit behind.
#[derive(Debug, Default)]
pub struct ToolStateMachine {
    tool: Tool,
    state: ToolState,
    /// A press has been seen and its release has not
    pointer_down: bool,
}

impl ToolStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Switches tools, finishing the running gesture first.
    pub fn set_tool(&mut self, tool: Tool, ctx: &mut ToolContext<'_>) -> CommandResult {
        if tool == self.tool {
            return Ok(());
        }
        let finished = self.finish_gesture(ctx);
        debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        finished
    }

    /// Completes the running gesture as if it had ended normally and returns to `Idle`.
    pub fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) -> CommandResult {
        let state = std::mem::take(&mut self.state);
        if !state.is_idle() {
            debug!("Finishing {} gesture", state.name());
        }
        match state {
            ToolState::Idle => Ok(()),
            ToolState::Drawing { item, .. } => shape::finalize(ctx.scene, item),
            ToolState::Moving {
                items,
                old_positions,
                ..
            } => cursor::commit(ctx, items, old_positions),
            ToolState::EditingText { item, old_text } => text::commit(ctx, item, old_text),
        }
    }

    /// The transition function: feeds one event through the current state.
    ///
    /// On error the machine is back in `Idle` (or unchanged, for events the
    /// current state ignores) and the scene holds no partial edit.
    pub fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> CommandResult {
        match event {
            InputEvent::PointerDown { pos, modifiers } => {
                self.pointer_down = true;
                if let ToolState::EditingText { item, .. } = &self.state {
                    if ctx.scene.hit_test(*pos) == Some(*item) {
                        return Ok(());
                    }
                } else if !self.state.is_idle() {
                    warn!("Pointer press while {}, finishing gesture", self.state.name());
                }
                self.finish_gesture(ctx)?;

                self.state = match self.tool {
                    Tool::Cursor => cursor::press(ctx, *pos, *modifiers)?,
                    Tool::Rectangle => shape::press(ctx, *pos, ItemKind::Rectangle)?,
                    Tool::Ellipse => shape::press(ctx, *pos, ItemKind::Ellipse)?,
                    Tool::Text => text::press(ctx, *pos)?,
                };
                Ok(())
            }

            InputEvent::PointerMove { pos } => self.drag(ctx, *pos),

            InputEvent::PointerUp { pos } => {
                if !std::mem::replace(&mut self.pointer_down, false) {
                    return Err(self.unexpected(event));
                }
                if self.state.is_idle() || self.state.editing_item().is_some() {
                    return Ok(());
                }
                let dragged = self.drag(ctx, *pos);
                let finished = self.finish_gesture(ctx);
                dragged.and(finished)
            }

            InputEvent::DoubleClick { pos } => {
                if self.state.is_idle() {
                    self.state = text::begin_edit(ctx.scene, *pos)?;
                }
                Ok(())
            }

            InputEvent::Key { key, .. } => {
                if let Some(item) = self.state.editing_item() {
                    return match key {
                        Key::Escape => self.finish_gesture(ctx),
                        Key::Backspace => text::backspace(ctx.scene, item),
                        Key::Enter => text::insert(ctx.scene, item, "\n"),
                        _ => Ok(()),
                    };
                }
                match (self.state.is_idle(), key) {
                    (true, Key::Delete | Key::Backspace) => cursor::delete_selection(ctx),
                    (true, Key::Escape) => {
                        ctx.scene.clear_selection();
                        Ok(())
                    }
                    (false, Key::Escape) => self.finish_gesture(ctx),
                    _ => Ok(()),
                }
            }

            InputEvent::Text(typed) => match self.state.editing_item() {
                Some(item) => text::insert(ctx.scene, item, typed),
                None => Ok(()),
            },

            InputEvent::FocusLost => {
                self.pointer_down = false;
                self.finish_gesture(ctx)
            }
        }
    }

    /// Live feedback for a pointer move; no command is recorded.
    fn drag(&self, ctx: &mut ToolContext<'_>, pos: Pos2) -> CommandResult {
        match &self.state {
            ToolState::Drawing {
                item,
                anchor,
                origin,
            } => match ctx.scene.get(*item)?.kind() {
                ItemKind::Text => text::drag(ctx.scene, *item, *anchor, *origin, pos),
                _ => shape::drag(ctx.scene, *item, *anchor, pos),
            },
            ToolState::Moving {
                items,
                old_positions,
                grab,
            } => cursor::drag(ctx.scene, items, old_positions, *grab, pos),
            _ => Ok(()),
        }
    }

    fn unexpected(&self, event: &InputEvent) -> EditorError {
        EditorError::UnexpectedGesture {
            state: self.state.name(),
            event: event.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    struct Fixture {
        scene: Scene,
        history: CommandHistory,
        style: Style,
        machine: ToolStateMachine,
    }

    impl Fixture {
        fn new(tool: Tool) -> Self {
            let mut fixture = Self {
                scene: Scene::new(),
                history: CommandHistory::new(),
                style: Style::default(),
                machine: ToolStateMachine::new(),
            };
            fixture.set_tool(tool);
            fixture
        }

        fn send(&mut self, event: InputEvent) -> CommandResult {
            let mut ctx = ToolContext {
                scene: &mut self.scene,
                history: &mut self.history,
                style: &self.style,
            };
            self.machine.handle(&event, &mut ctx)
        }

        fn set_tool(&mut self, tool: Tool) {
            let mut ctx = ToolContext {
                scene: &mut self.scene,
                history: &mut self.history,
                style: &self.style,
            };
            self.machine.set_tool(tool, &mut ctx).unwrap();
        }

        fn press(&mut self, x: f32, y: f32) {
            self.send(InputEvent::PointerDown {
                pos: Pos2::new(x, y),
                modifiers: Modifiers::NONE,
            })
            .unwrap();
        }

        fn drag_to(&mut self, x: f32, y: f32) {
            self.send(InputEvent::PointerMove {
                pos: Pos2::new(x, y),
            })
            .unwrap();
        }

        fn release(&mut self, x: f32, y: f32) {
            self.send(InputEvent::PointerUp {
                pos: Pos2::new(x, y),
            })
            .unwrap();
        }
    }

    #[test]
    fn press_records_the_add_and_enters_drawing() {
        let mut f = Fixture::new(Tool::Rectangle);
        f.press(5.0, 5.0);
        assert_eq!(f.machine.state().name(), "Drawing");
        assert_eq!(f.history.undo_len(), 1);
        assert_eq!(f.scene.len(), 1);

        f.drag_to(20.0, 30.0);
        f.drag_to(25.0, 35.0);
        f.release(25.0, 35.0);
        assert!(f.machine.state().is_idle());
        // Resizing never adds history entries.
        assert_eq!(f.history.undo_len(), 1);
    }

    #[test]
    fn drawn_shapes_take_the_current_style() {
        let mut f = Fixture::new(Tool::Rectangle);
        f.style.border_color = egui::Color32::RED;
        f.style.border_width = 3.0;
        f.style.fill_color = egui::Color32::YELLOW;
        f.press(0.0, 0.0);
        f.release(10.0, 10.0);

        let id = f.scene.item_ids()[0];
        let Some(Item::Rectangle(shape)) = f.scene.item(id) else {
            panic!("expected a rectangle");
        };
        assert_eq!(shape.border, egui::Stroke::new(3.0, egui::Color32::RED));
        assert_eq!(shape.fill, egui::Color32::YELLOW);
        assert_eq!(f.history.undo_text().as_deref(), Some("Removed item"));
    }

    #[test]
    fn item_is_not_pickable_while_drawn() {
        let mut f = Fixture::new(Tool::Ellipse);
        f.press(0.0, 0.0);
        f.drag_to(100.0, 100.0);
        let id = f.scene.item_ids()[0];
        assert!(!f.scene.is_interactive(id));
        f.release(100.0, 100.0);
        assert!(f.scene.is_interactive(id));
    }

    #[test]
    fn release_without_press_is_a_sequencing_error() {
        let mut f = Fixture::new(Tool::Cursor);
        let result = f.send(InputEvent::PointerUp { pos: Pos2::ZERO });
        assert_eq!(
            result,
            Err(EditorError::UnexpectedGesture {
                state: "Idle",
                event: "pointer release"
            })
        );
        assert!(f.machine.state().is_idle());
        assert!(f.scene.is_empty());
    }

    #[test]
    fn click_on_empty_canvas_stays_idle() {
        let mut f = Fixture::new(Tool::Cursor);
        f.press(10.0, 10.0);
        assert!(f.machine.state().is_idle());
        f.release(10.0, 10.0);
        assert!(!f.history.can_undo());
    }

    #[test]
    fn click_without_drag_records_no_move() {
        let mut f = Fixture::new(Tool::Rectangle);
        f.press(0.0, 0.0);
        f.release(50.0, 50.0);
        f.set_tool(Tool::Cursor);

        f.press(25.0, 25.0);
        assert_eq!(f.machine.state().name(), "Moving");
        f.release(25.0, 25.0);
        assert_eq!(f.history.undo_len(), 1);
    }

    #[test]
    fn typing_only_reaches_the_focused_label() {
        let mut f = Fixture::new(Tool::Text);
        f.send(InputEvent::Text("ignored".into())).unwrap();
        assert!(f.scene.is_empty());

        f.press(10.0, 10.0);
        f.release(10.0, 10.0);
        f.send(InputEvent::DoubleClick {
            pos: Pos2::new(12.0, 12.0),
        })
        .unwrap();
        let id = f.scene.item_ids()[0];
        assert_eq!(f.machine.state().editing_item(), Some(id));

        f.send(InputEvent::Text("!".into())).unwrap();
        assert_eq!(f.scene.get(id).unwrap().text(), Some("Text!"));
    }
}
