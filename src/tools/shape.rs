use egui::Pos2;

use super::{ToolContext, ToolState};
use crate::error::CommandResult;
use crate::item::{ItemId, ItemKind, factory};
use crate::scene::Scene;

/// Press with the rectangle or ellipse tool: a zero-sized item is placed right away.
///
/// The add command recorded here stands for the whole gesture; later drags
/// only reshape the same item.
pub(super) fn press(ctx: &mut ToolContext<'_>, pos: Pos2, kind: ItemKind) -> CommandResult<ToolState> {
    let item = match kind {
        ItemKind::Ellipse => factory::ellipse(pos),
        _ => factory::rectangle(pos),
    };
    let item = ctx.add_item(item)?;
    Ok(ToolState::Drawing {
        item,
        anchor: pos,
        origin: pos,
    })
}

pub(super) fn drag(scene: &mut Scene, item: ItemId, anchor: Pos2, pos: Pos2) -> CommandResult {
    scene.set_bounds(item, anchor, pos)
}

/// Ends a drawing gesture: the item becomes selectable, movable and focusable.
pub(super) fn finalize(scene: &mut Scene, item: ItemId) -> CommandResult {
    scene.set_interactive(item, true)
}
