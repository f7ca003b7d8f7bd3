use egui::Pos2;
use log::debug;

use crate::config::Style;
use crate::error::{CommandResult, EditorError};
use crate::item::{Item, ItemId};
use crate::scene::Scene;

/// Stable identifier of a command kind, used to decide whether two commands may merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Add,
    Delete,
    Move,
    ChangeText,
}

impl CommandKind {
    pub fn id(self) -> u32 {
        match self {
            CommandKind::Add => 1,
            CommandKind::Delete => 2,
            CommandKind::Move => 3,
            CommandKind::ChangeText => 4,
        }
    }
}

/// Direction a command is being run in, for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Do,
    Undo,
    Redo,
}

/// A reversible edit of the scene.
///
/// Commands address items by handle. `execute` and `undo` validate every
/// handle before touching the scene, so a failing command leaves it as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Places an allocated item on the canvas.
    Add {
        item: ItemId,
        /// Style the item was created with.
        style: Style,
    },

    /// Takes items off the canvas.
    Delete {
        items: Vec<ItemId>,
        /// Paint index of every removed item, ascending. Filled in by `execute`.
        restore: Vec<(ItemId, usize)>,
    },

    /// Repositions items; the lists are index-aligned with `items`.
    Move {
        items: Vec<ItemId>,
        old_positions: Vec<Pos2>,
        new_positions: Vec<Pos2>,
    },

    /// Replaces the content of a text item.
    ChangeText {
        item: ItemId,
        old_text: String,
        new_text: String,
    },
}

impl Command {
    /// Styles `item`, stores it in the scene arena and returns the command that places it.
    pub fn add(scene: &mut Scene, mut item: Item, style: &Style) -> Self {
        item.apply_style(style);
        let item = scene.allocate(item);
        Command::Add {
            item,
            style: style.clone(),
        }
    }

    pub fn delete(items: Vec<ItemId>) -> Self {
        Command::Delete {
            items,
            restore: Vec::new(),
        }
    }

    pub fn move_items(items: Vec<ItemId>, old_positions: Vec<Pos2>, new_positions: Vec<Pos2>) -> Self {
        Command::Move {
            items,
            old_positions,
            new_positions,
        }
    }

    pub fn change_text(item: ItemId, old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Command::ChangeText {
            item,
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Add { .. } => CommandKind::Add,
            Command::Delete { .. } => CommandKind::Delete,
            Command::Move { .. } => CommandKind::Move,
            Command::ChangeText { .. } => CommandKind::ChangeText,
        }
    }

    /// Items the command acts on.
    pub fn targets(&self) -> Vec<ItemId> {
        match self {
            Command::Add { item, .. } | Command::ChangeText { item, .. } => vec![*item],
            Command::Delete { items, .. } | Command::Move { items, .. } => items.clone(),
        }
    }

    /// Applies the command (first run and redo).
    pub fn execute(&mut self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::Add { item, .. } => {
                scene.add(*item)?;
            }

            Command::Delete { items, restore } => {
                scene.ensure_placed(items)?;
                let mut slots: Vec<(ItemId, usize)> = items
                    .iter()
                    .filter_map(|id| scene.paint_index(*id).map(|index| (*id, index)))
                    .collect();
                slots.sort_by_key(|(_, index)| *index);
                slots.dedup();
                for (id, _) in slots.iter().rev() {
                    scene.remove(*id)?;
                }
                *restore = slots;
            }

            Command::Move {
                items,
                new_positions,
                ..
            } => {
                scene.ensure_placed(items)?;
                for (id, pos) in items.iter().zip(new_positions.iter()) {
                    scene.set_position(*id, *pos)?;
                }
            }

            Command::ChangeText { item, new_text, .. } => {
                ensure_text(scene, *item)?;
                scene.set_text(*item, new_text)?;
            }
        }
        Ok(())
    }

    /// Reverts the effect of [`Command::execute`].
    pub fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::Add { item, .. } => {
                scene.ensure_placed(std::slice::from_ref(item))?;
                scene.remove(*item)?;
            }

            Command::Delete { restore, .. } => {
                for (id, _) in restore.iter() {
                    scene.get(*id)?;
                    if scene.contains(*id) {
                        return Err(EditorError::DuplicateItem(*id));
                    }
                }
                for (id, index) in restore.iter() {
                    scene.insert_at(*id, *index)?;
                }
            }

            Command::Move {
                items,
                old_positions,
                ..
            } => {
                scene.ensure_placed(items)?;
                for (id, pos) in items.iter().zip(old_positions.iter()) {
                    scene.set_position(*id, *pos)?;
                }
            }

            Command::ChangeText { item, old_text, .. } => {
                ensure_text(scene, *item)?;
                scene.set_text(*item, old_text)?;
            }
        }
        Ok(())
    }

    /// Folds `next` into `self` when both describe a continuation of the same edit.
    ///
    /// Both commands must already have been executed. Returns false if they cannot merge.
    pub fn merge_with(&mut self, next: &Command) -> bool {
        if self.kind().id() != next.kind().id() {
            return false;
        }
        match (self, next) {
            (
                Command::Move {
                    items,
                    new_positions,
                    ..
                },
                Command::Move {
                    items: next_items,
                    new_positions: next_positions,
                    ..
                },
            ) if items == next_items => {
                new_positions.clone_from(next_positions);
                true
            }
            (
                Command::ChangeText { item, new_text, .. },
                Command::ChangeText {
                    item: next_item,
                    new_text: next_text,
                    ..
                },
            ) if item == next_item => {
                new_text.clone_from(next_text);
                true
            }
            _ => false,
        }
    }

    /// True when running the command would not change anything.
    pub fn is_noop(&self) -> bool {
        match self {
            Command::Add { .. } => false,
            Command::Delete { items, .. } => items.is_empty(),
            Command::Move {
                old_positions,
                new_positions,
                ..
            } => old_positions == new_positions,
            Command::ChangeText {
                old_text, new_text, ..
            } => old_text == new_text,
        }
    }

    /// Frees the items an undone command would have placed, once its redo is discarded.
    ///
    /// Only an undone add owns an item nobody else can place again.
    pub(crate) fn release_undone(&self, scene: &mut Scene) {
        if let Command::Add { item, .. } = self {
            release_if_detached(scene, *item);
        }
    }

    /// Frees the items an applied command took off the canvas, once it can no longer be undone.
    ///
    /// An applied add does not own its item: later commands still in the
    /// history may have removed it and need it back on undo.
    pub(crate) fn release_evicted(&self, scene: &mut Scene) {
        if let Command::Delete { items, .. } = self {
            for id in items {
                release_if_detached(scene, *id);
            }
        }
    }

    /// Human readable text for the status line.
    pub fn describe(&self, action: Action) -> String {
        let count = self.targets().len();
        let items = if count == 1 {
            "item".to_owned()
        } else {
            format!("{count} items")
        };
        match (self.kind(), action) {
            (CommandKind::Add, Action::Do) => "Added item".to_owned(),
            (CommandKind::Add, Action::Undo) => "Removed item".to_owned(),
            (CommandKind::Add, Action::Redo) => "Re-added item".to_owned(),
            (CommandKind::Delete, Action::Do) => format!("Deleted {items}"),
            (CommandKind::Delete, Action::Undo) => format!("Undeleted {items}"),
            (CommandKind::Delete, Action::Redo) => format!("Redeleted {items}"),
            (CommandKind::Move, Action::Do) => format!("Moved {items}"),
            (CommandKind::Move, Action::Undo) => "Undone move".to_owned(),
            (CommandKind::Move, Action::Redo) => "Redone move".to_owned(),
            (CommandKind::ChangeText, Action::Do) => "Changed text".to_owned(),
            (CommandKind::ChangeText, Action::Undo) => "Undone text change".to_owned(),
            (CommandKind::ChangeText, Action::Redo) => "Redone text change".to_owned(),
        }
    }
}

fn release_if_detached(scene: &mut Scene, id: ItemId) {
    if scene.is_alive(id) && !scene.contains(id) {
        debug!("Releasing orphaned item {}", id);
        scene.release(id);
    }
}

fn ensure_text(scene: &Scene, id: ItemId) -> CommandResult {
    scene.ensure_placed(std::slice::from_ref(&id))?;
    match scene.get(id)? {
        Item::Text(_) => Ok(()),
        _ => Err(EditorError::InvalidItem(id)),
    }
}
