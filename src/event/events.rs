use egui::Pos2;

use crate::item::ItemId;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    ItemAdded {
        id: ItemId,
        index: usize,
    },
    ItemRemoved {
        id: ItemId,
        index: usize,
    },
    ItemMoved {
        id: ItemId,
        position: Pos2,
    },
    /// Geometry, text or style changed in place.
    ItemChanged {
        id: ItemId,
    },
    SelectionChanged(SelectionEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Modified(Vec<ItemId>),
    Cleared,
}
