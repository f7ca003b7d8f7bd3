use egui::Pos2;
use log::debug;

use super::{ToolContext, ToolState};
use crate::command::Command;
use crate::error::{CommandResult, EditorError};
use crate::item::{Item, ItemId, factory};
use crate::scene::Scene;

/// Press with the text tool. Pressing an existing label selects it instead of
/// stacking a new one on top.
pub(super) fn press(ctx: &mut ToolContext<'_>, pos: Pos2) -> CommandResult<ToolState> {
    if let Some(hit) = ctx.scene.hit_test(pos) {
        if matches!(ctx.scene.get(hit)?, Item::Text(_)) {
            ctx.scene.select(hit);
            return Ok(ToolState::Idle);
        }
    }
    let item = ctx.add_item(factory::text(pos))?;
    Ok(ToolState::Drawing {
        item,
        anchor: pos,
        origin: pos,
    })
}

/// Text is not resized by dragging, it follows the pointer.
pub(super) fn drag(
    scene: &mut Scene,
    item: ItemId,
    anchor: Pos2,
    origin: Pos2,
    pos: Pos2,
) -> CommandResult {
    scene.set_position(item, origin + (pos - anchor))
}

/// Double click on a label gives it keyboard focus and snapshots its content.
pub(super) fn begin_edit(scene: &Scene, pos: Pos2) -> CommandResult<ToolState> {
    let Some(hit) = scene.hit_test(pos) else {
        return Ok(ToolState::Idle);
    };
    match scene.get(hit)? {
        Item::Text(label) => {
            debug!("Editing text {}", hit);
            Ok(ToolState::EditingText {
                item: hit,
                old_text: label.content.clone(),
            })
        }
        _ => Ok(ToolState::Idle),
    }
}

fn current_text(scene: &Scene, item: ItemId) -> CommandResult<String> {
    scene
        .get(item)?
        .text()
        .map(str::to_owned)
        .ok_or(EditorError::InvalidItem(item))
}

pub(super) fn insert(scene: &mut Scene, item: ItemId, typed: &str) -> CommandResult {
    let mut text = current_text(scene, item)?;
    text.push_str(typed);
    scene.set_text(item, &text)
}

pub(super) fn backspace(scene: &mut Scene, item: ItemId) -> CommandResult {
    let mut text = current_text(scene, item)?;
    if text.pop().is_none() {
        return Ok(());
    }
    scene.set_text(item, &text)
}

/// Focus left the label: record the edit as one undo step, if anything changed.
pub(super) fn commit(ctx: &mut ToolContext<'_>, item: ItemId, old_text: String) -> CommandResult {
    let new_text = current_text(ctx.scene, item)?;
    let command = Command::change_text(item, old_text, new_text);
    if command.is_noop() {
        return Ok(());
    }
    ctx.history.push(command, ctx.scene)
}
