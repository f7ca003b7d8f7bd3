use documentor::command::{Command, CommandHistory};
use documentor::config::{HistoryConfig, Style};
use documentor::error::EditorError;
use documentor::item::{Item, ItemId, factory};
use documentor::scene::Scene;
use egui::{Color32, ColorImage, Pos2, Rect};

// Places a rectangle through the history, as the drawing tools do.
fn add_rect(history: &mut CommandHistory, scene: &mut Scene, min: Pos2, max: Pos2) -> ItemId {
    let command = Command::add(scene, factory::rectangle(min), &Style::default());
    let id = command.targets()[0];
    history.push(command, scene).unwrap();
    scene.set_bounds(id, min, max).unwrap();
    id
}

// Paint order plus the full state of every item on the canvas.
fn snapshot(scene: &Scene) -> Vec<(ItemId, Item)> {
    scene.items().map(|(id, item)| (id, item.clone())).collect()
}

#[test]
fn undo_is_the_inverse_of_execute() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let id = add_rect(&mut history, &mut scene, Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
    let before = snapshot(&scene);

    let command = Command::move_items(vec![id], vec![Pos2::ZERO], vec![Pos2::new(30.0, 40.0)]);
    history.push(command, &mut scene).unwrap();
    assert_ne!(snapshot(&scene), before);

    assert_eq!(history.undo(&mut scene), Ok(true));
    assert_eq!(snapshot(&scene), before);
}

#[test]
fn redo_after_undo_restores_the_edit() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let id = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(10.0, 10.0));
    history
        .push(
            Command::move_items(vec![id], vec![Pos2::ZERO], vec![Pos2::new(5.0, 5.0)]),
            &mut scene,
        )
        .unwrap();
    let after = snapshot(&scene);

    history.undo(&mut scene).unwrap();
    history.redo(&mut scene).unwrap();
    assert_eq!(snapshot(&scene), after);
    assert!(!history.can_redo());
}

#[test]
fn undoing_an_add_keeps_the_final_geometry_for_redo() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let id = add_rect(&mut history, &mut scene, Pos2::new(1.0, 2.0), Pos2::new(21.0, 32.0));

    history.undo(&mut scene).unwrap();
    assert!(scene.is_empty());
    assert!(scene.is_alive(id));

    history.redo(&mut scene).unwrap();
    let bounds = scene.item(id).unwrap().bounds();
    assert_eq!(bounds, Rect::from_min_max(Pos2::new(1.0, 2.0), Pos2::new(21.0, 32.0)));
}

#[test]
fn new_command_after_undo_discards_the_redo_tail() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(10.0, 10.0));
    add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(20.0, 20.0));
    history.undo(&mut scene).unwrap();
    assert_eq!(history.redo_len(), 1);

    add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(30.0, 30.0));
    assert_eq!(history.redo_len(), 0);
    assert_eq!(history.undo_len(), 2);
    assert_eq!(scene.len(), 2);
}

#[test]
fn deleting_several_items_restores_their_paint_order() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let a = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(10.0, 10.0));
    let b = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(20.0, 20.0));
    let c = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(30.0, 30.0));
    let d = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(40.0, 40.0));

    // Selection order is not paint order.
    history.push(Command::delete(vec![d, a, c]), &mut scene).unwrap();
    assert_eq!(scene.item_ids(), &[b]);

    history.undo(&mut scene).unwrap();
    assert_eq!(scene.item_ids(), &[a, b, c, d]);

    history.redo(&mut scene).unwrap();
    assert_eq!(scene.item_ids(), &[b]);
}

#[test]
fn commands_on_released_items_report_stale_references() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let kept = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(10.0, 10.0));
    let gone = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(10.0, 10.0));
    scene.release(gone);

    assert_eq!(history.undo(&mut scene), Err(EditorError::StaleReference(gone)));
    assert_eq!(history.undo_len(), 1);
    assert_eq!(scene.item_ids(), &[kept]);

    // The older entry still works.
    assert_eq!(history.undo(&mut scene), Ok(true));
    assert!(scene.is_empty());
}

#[test]
fn text_changes_merge_when_enabled() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::with_config(HistoryConfig {
        merge_text_edits: true,
        ..HistoryConfig::default()
    });
    let command = Command::add(&mut scene, factory::text(Pos2::ZERO), &Style::default());
    let id = command.targets()[0];
    history.push(command, &mut scene).unwrap();

    for (old, new) in [("Text", "Te"), ("Te", "Tea")] {
        history
            .push(Command::change_text(id, old, new), &mut scene)
            .unwrap();
    }
    assert_eq!(history.undo_len(), 2);

    history.undo(&mut scene).unwrap();
    assert_eq!(scene.item(id).unwrap().text(), Some("Text"));
}

#[test]
fn undo_all_then_redo_all_walks_back_through_every_state() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::new();
    let style = Style::default();
    let mut states = vec![snapshot(&scene)];

    let rect = add_rect(&mut history, &mut scene, Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
    states.push(snapshot(&scene));

    let command = Command::add(&mut scene, factory::text(Pos2::new(50.0, 50.0)), &style);
    let label = command.targets()[0];
    history.push(command, &mut scene).unwrap();
    states.push(snapshot(&scene));

    let pixels = ColorImage::new([4, 4], Color32::RED);
    let command = Command::add(&mut scene, factory::image(Pos2::new(5.0, 5.0), pixels), &style);
    history.push(command, &mut scene).unwrap();
    states.push(snapshot(&scene));

    let old = vec![scene.position(rect).unwrap(), scene.position(label).unwrap()];
    let new = vec![Pos2::new(100.0, 0.0), Pos2::new(60.0, 80.0)];
    history
        .push(Command::move_items(vec![rect, label], old, new), &mut scene)
        .unwrap();
    states.push(snapshot(&scene));

    history
        .push(Command::change_text(label, "Text", "Note"), &mut scene)
        .unwrap();
    states.push(snapshot(&scene));

    history.push(Command::delete(vec![label, rect]), &mut scene).unwrap();
    states.push(snapshot(&scene));

    for expected in states.iter().rev().skip(1) {
        assert_eq!(history.undo(&mut scene), Ok(true));
        assert_eq!(&snapshot(&scene), expected);
    }
    assert_eq!(history.undo(&mut scene), Ok(false));
    assert!(scene.is_empty());

    for expected in states.iter().skip(1) {
        assert_eq!(history.redo(&mut scene), Ok(true));
        assert_eq!(&snapshot(&scene), expected);
    }
    assert_eq!(history.redo(&mut scene), Ok(false));
}

#[test]
fn a_bounded_history_can_still_undo_its_deletes() {
    let mut scene = Scene::new();
    let mut history = CommandHistory::with_config(HistoryConfig {
        limit: Some(2),
        ..HistoryConfig::default()
    });
    let a = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(10.0, 10.0));
    let b = add_rect(&mut history, &mut scene, Pos2::ZERO, Pos2::new(20.0, 20.0));
    let before = snapshot(&scene);

    history.push(Command::delete(vec![a]), &mut scene).unwrap();
    history
        .push(
            Command::move_items(vec![b], vec![Pos2::ZERO], vec![Pos2::new(5.0, 5.0)]),
            &mut scene,
        )
        .unwrap();
    assert_eq!(history.undo_len(), 2);

    assert_eq!(history.undo(&mut scene), Ok(true));
    assert_eq!(history.undo(&mut scene), Ok(true));
    assert_eq!(snapshot(&scene), before);
    assert_eq!(history.undo(&mut scene), Ok(false));
}
