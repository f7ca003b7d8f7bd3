use egui::{Modifiers, Pos2};
use log::debug;

use super::{ToolContext, ToolState};
use crate::command::Command;
use crate::error::CommandResult;
use crate::item::ItemId;
use crate::scene::Scene;

/// Press with the cursor tool: pick the item under the pointer and start moving the selection.
pub(super) fn press(
    ctx: &mut ToolContext<'_>,
    pos: Pos2,
    modifiers: Modifiers,
) -> CommandResult<ToolState> {
    let extend = modifiers.shift || modifiers.command;
    let Some(hit) = ctx.scene.hit_test(pos) else {
        if !extend {
            ctx.scene.clear_selection();
        }
        return Ok(ToolState::Idle);
    };

    if extend {
        ctx.scene.toggle_selected(hit);
        if !ctx.scene.is_selected(hit) {
            return Ok(ToolState::Idle);
        }
    } else if !ctx.scene.is_selected(hit) {
        ctx.scene.select(hit);
    }

    let items = ctx.scene.selection();
    let old_positions = items
        .iter()
        .map(|id| ctx.scene.position(*id))
        .collect::<CommandResult<Vec<_>>>()?;
    debug!("Grabbed {} item(s) at {:?}", items.len(), pos);
    Ok(ToolState::Moving {
        items,
        old_positions,
        grab: pos,
    })
}

/// Moves every grabbed item by the pointer offset since the press.
pub(super) fn drag(
    scene: &mut Scene,
    items: &[ItemId],
    old_positions: &[Pos2],
    grab: Pos2,
    pos: Pos2,
) -> CommandResult {
    scene.ensure_placed(items)?;
    let delta = pos - grab;
    for (id, old) in items.iter().zip(old_positions) {
        scene.set_position(*id, *old + delta)?;
    }
    Ok(())
}

/// Records where the grabbed items ended up. A click without movement records nothing.
pub(super) fn commit(
    ctx: &mut ToolContext<'_>,
    items: Vec<ItemId>,
    old_positions: Vec<Pos2>,
) -> CommandResult {
    let new_positions = items
        .iter()
        .map(|id| ctx.scene.position(*id))
        .collect::<CommandResult<Vec<_>>>()?;
    let command = Command::move_items(items, old_positions, new_positions);
    if command.is_noop() {
        return Ok(());
    }
    ctx.history.push(command, ctx.scene)
}

pub(super) fn delete_selection(ctx: &mut ToolContext<'_>) -> CommandResult {
    let selection = ctx.scene.selection();
    if selection.is_empty() {
        return Ok(());
    }
    ctx.history.push(Command::delete(selection), ctx.scene)
}
