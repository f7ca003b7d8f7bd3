use std::collections::HashMap;

use egui::Pos2;
use log::debug;

use crate::error::{CommandResult, EditorError};
use crate::event::{EventBus, SceneEvent, SelectionEvent};
use crate::item::{Item, ItemId, normalized_rect};

#[derive(Debug)]
struct Slot {
    item: Item,
    /// Selectable, movable and focusable. Off while the item is still being drawn.
    interactive: bool,
}

/// Arena of items plus the subset currently placed on the canvas.
///
/// Items live in the arena from [`Scene::allocate`] until [`Scene::release`];
/// in between they can be attached to and detached from the paint order any
/// number of times, which is what undo and redo do. Images are kept in a
/// prefix of the paint order so they always paint behind everything else.
#[derive(Debug, Default)]
pub struct Scene {
    slots: HashMap<ItemId, Slot>,
    order: Vec<ItemId>,
    selection: Vec<ItemId>,
    next_id: u64,
    events: EventBus,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw notifications for the canvas.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Stores `item` without placing it on the canvas.
    pub fn allocate(&mut self, item: Item) -> ItemId {
        self.next_id += 1;
        let id = ItemId::from_raw(self.next_id);
        self.slots.insert(
            id,
            Slot {
                item,
                interactive: false,
            },
        );
        id
    }

    /// Drops the item from the arena; every handle to it becomes stale.
    pub fn release(&mut self, id: ItemId) -> Option<Item> {
        if self.contains(id) {
            // Cannot fail: the item is both alive and placed.
            let _ = self.remove(id);
        }
        let slot = self.slots.remove(&id)?;
        debug!("Released {} {}", slot.item.kind().name(), id);
        Some(slot.item)
    }

    pub fn is_alive(&self, id: ItemId) -> bool {
        self.slots.contains_key(&id)
    }

    /// True if the item is placed on the canvas.
    pub fn contains(&self, id: ItemId) -> bool {
        self.order.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Places an allocated item at the end of the paint order, or behind the
    /// last image if it is an image. Returns its paint index.
    pub fn add(&mut self, id: ItemId) -> CommandResult<usize> {
        let index = match self.slot(id)?.item.is_background() {
            true => self.background_count(),
            false => self.order.len(),
        };
        self.insert_at(id, index)
    }

    /// Places an allocated item at `index`, clamped so images stay in front of
    /// the paint order. Returns the index actually used.
    pub fn insert_at(&mut self, id: ItemId, index: usize) -> CommandResult<usize> {
        let (is_background, kind) = {
            let slot = self.slot(id)?;
            if self.contains(id) {
                return Err(EditorError::DuplicateItem(id));
            }
            slot.item.validate(id)?;
            (slot.item.is_background(), slot.item.kind())
        };

        let background = self.background_count();
        let index = if is_background {
            index.min(background)
        } else {
            index.clamp(background, self.order.len())
        };
        self.order.insert(index, id);
        debug!("Added {} {} at {}", kind.name(), id, index);
        self.events.emit(SceneEvent::ItemAdded { id, index });
        Ok(index)
    }

    /// Takes a placed item off the canvas, keeping it in the arena.
    /// Returns the paint index it had.
    pub fn remove(&mut self, id: ItemId) -> CommandResult<usize> {
        let index = self.paint_index_checked(id)?;
        self.order.remove(index);
        if let Some(pos) = self.selection.iter().position(|selected| *selected == id) {
            self.selection.remove(pos);
            self.emit_selection();
        }
        debug!("Removed {} from {}", id, index);
        self.events.emit(SceneEvent::ItemRemoved { id, index });
        Ok(index)
    }

    /// Checks that every item is alive and placed, without changing anything.
    pub fn ensure_placed(&self, ids: &[ItemId]) -> CommandResult {
        for id in ids {
            self.paint_index_checked(*id)?;
        }
        Ok(())
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.slots.get(&id).map(|slot| &slot.item)
    }

    /// Like [`Scene::item`] but reports why the item is unavailable.
    pub fn get(&self, id: ItemId) -> CommandResult<&Item> {
        self.slot(id).map(|slot| &slot.item)
    }

    /// Placed items in paint order, back to front.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id).map(|slot| (*id, &slot.item)))
    }

    pub fn item_ids(&self) -> &[ItemId] {
        &self.order
    }

    pub fn paint_index(&self, id: ItemId) -> Option<usize> {
        self.order.iter().position(|placed| *placed == id)
    }

    pub fn position(&self, id: ItemId) -> CommandResult<Pos2> {
        self.get(id).map(Item::position)
    }

    pub fn set_position(&mut self, id: ItemId, pos: Pos2) -> CommandResult {
        let item = self.placed_item_mut(id)?;
        if item.position() == pos {
            return Ok(());
        }
        item.set_position(pos);
        self.events.emit(SceneEvent::ItemMoved { id, position: pos });
        Ok(())
    }

    /// Replaces the content of a text item.
    pub fn set_text(&mut self, id: ItemId, text: &str) -> CommandResult {
        let item = self.placed_item_mut(id)?;
        let Item::Text(label) = item else {
            return Err(EditorError::InvalidItem(id));
        };
        if label.content == text {
            return Ok(());
        }
        label.content = text.to_owned();
        self.events.emit(SceneEvent::ItemChanged { id });
        Ok(())
    }

    /// Resizes a rectangle or ellipse to span `anchor` and `current`.
    pub fn set_bounds(&mut self, id: ItemId, anchor: Pos2, current: Pos2) -> CommandResult {
        let item = self.placed_item_mut(id)?;
        match item {
            Item::Rectangle(shape) | Item::Ellipse(shape) => {
                shape.bounds = normalized_rect(anchor, current);
            }
            _ => return Err(EditorError::InvalidItem(id)),
        }
        self.events.emit(SceneEvent::ItemChanged { id });
        Ok(())
    }

    pub fn set_interactive(&mut self, id: ItemId, interactive: bool) -> CommandResult {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(EditorError::StaleReference(id))?;
        slot.interactive = interactive;
        Ok(())
    }

    pub fn is_interactive(&self, id: ItemId) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.interactive)
    }

    /// Topmost interactive item under `point`.
    pub fn hit_test(&self, point: Pos2) -> Option<ItemId> {
        self.order.iter().rev().copied().find(|id| {
            self.slots
                .get(id)
                .is_some_and(|slot| slot.interactive && slot.item.hit_test(point))
        })
    }

    /// Selected items in paint order.
    pub fn selection(&self) -> Vec<ItemId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    /// Replaces the selection. Items that are not placed are ignored.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        let mut selection: Vec<ItemId> = Vec::new();
        for id in ids {
            if self.contains(id) && !selection.contains(&id) {
                selection.push(id);
            }
        }
        if selection != self.selection {
            self.selection = selection;
            self.emit_selection();
        }
    }

    pub fn select(&mut self, id: ItemId) {
        self.set_selection([id]);
    }

    pub fn toggle_selected(&mut self, id: ItemId) {
        let mut selection = self.selection.clone();
        match selection.iter().position(|selected| *selected == id) {
            Some(pos) => {
                selection.remove(pos);
            }
            None => selection.push(id),
        }
        self.set_selection(selection);
    }

    pub fn select_all(&mut self) {
        let interactive: Vec<ItemId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.is_interactive(*id))
            .collect();
        self.set_selection(interactive);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Vec::new());
    }

    fn background_count(&self) -> usize {
        self.order
            .iter()
            .take_while(|id| {
                self.slots
                    .get(id)
                    .is_some_and(|slot| slot.item.is_background())
            })
            .count()
    }

    fn slot(&self, id: ItemId) -> CommandResult<&Slot> {
        self.slots.get(&id).ok_or(EditorError::StaleReference(id))
    }

    fn paint_index_checked(&self, id: ItemId) -> CommandResult<usize> {
        self.slot(id)?;
        self.paint_index(id).ok_or(EditorError::NotFound(id))
    }

    fn placed_item_mut(&mut self, id: ItemId) -> CommandResult<&mut Item> {
        self.paint_index_checked(id)?;
        self.slots
            .get_mut(&id)
            .map(|slot| &mut slot.item)
            .ok_or(EditorError::StaleReference(id))
    }

    fn emit_selection(&self) {
        let event = if self.selection.is_empty() {
            SelectionEvent::Cleared
        } else {
            SelectionEvent::Modified(self.selection())
        };
        self.events.emit(SceneEvent::SelectionChanged(event));
    }
}
