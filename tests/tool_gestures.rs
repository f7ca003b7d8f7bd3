use documentor::editor::Editor;
use documentor::input::InputEvent;
use documentor::item::ItemKind;
use documentor::tools::{Tool, ToolState};
use egui::{Key, Modifiers, Pos2, Rect};

fn press(editor: &mut Editor, x: f32, y: f32) {
    assert!(editor.handle_event(&InputEvent::PointerDown {
        pos: Pos2::new(x, y),
        modifiers: Modifiers::NONE,
    }));
}

fn drag(editor: &mut Editor, x: f32, y: f32) {
    assert!(editor.handle_event(&InputEvent::PointerMove { pos: Pos2::new(x, y) }));
}

fn release(editor: &mut Editor, x: f32, y: f32) {
    assert!(editor.handle_event(&InputEvent::PointerUp { pos: Pos2::new(x, y) }));
}

fn key(editor: &mut Editor, key: Key) {
    editor.handle_event(&InputEvent::Key {
        key,
        modifiers: Modifiers::NONE,
    });
}

#[test]
fn dragging_up_and_left_draws_a_normalized_rectangle() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Rectangle);
    press(&mut editor, 50.0, 50.0);
    drag(&mut editor, 30.0, 40.0);
    release(&mut editor, 10.0, 10.0);

    let (id, item) = editor.scene().items().next().unwrap();
    assert_eq!(item.kind(), ItemKind::Rectangle);
    assert_eq!(
        item.bounds(),
        Rect::from_min_max(Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0))
    );
    assert!(editor.scene().is_interactive(id));
    assert_eq!(editor.history().undo_len(), 1);
    assert!(editor.state().is_idle());
}

#[test]
fn undoing_a_drawn_ellipse_removes_it() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Ellipse);
    press(&mut editor, 0.0, 0.0);
    release(&mut editor, 40.0, 20.0);
    assert_eq!(editor.scene().len(), 1);

    editor.undo();
    assert!(editor.scene().is_empty());
    editor.redo();
    let (_, item) = editor.scene().items().next().unwrap();
    assert_eq!(item.kind(), ItemKind::Ellipse);
    assert_eq!(item.bounds().width(), 40.0);
}

#[test]
fn switching_tools_mid_drawing_finalizes_the_shape() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Rectangle);
    press(&mut editor, 10.0, 10.0);
    drag(&mut editor, 30.0, 30.0);
    assert!(matches!(editor.state(), ToolState::Drawing { .. }));

    editor.set_tool(Tool::Cursor);
    assert!(editor.state().is_idle());
    let id = editor.scene().item_ids()[0];
    assert!(editor.scene().is_interactive(id));
    assert_eq!(editor.scene().hit_test(Pos2::new(20.0, 20.0)), Some(id));
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn moving_a_selection_records_one_undoable_step() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Rectangle);
    press(&mut editor, 10.0, 10.0);
    release(&mut editor, 60.0, 40.0);
    let id = editor.scene().item_ids()[0];

    editor.set_tool(Tool::Cursor);
    press(&mut editor, 20.0, 20.0);
    drag(&mut editor, 25.0, 22.0);
    release(&mut editor, 30.0, 25.0);
    assert_eq!(editor.scene().position(id), Ok(Pos2::new(20.0, 15.0)));
    assert_eq!(editor.history().undo_len(), 2);

    editor.undo();
    assert_eq!(editor.scene().position(id), Ok(Pos2::new(10.0, 10.0)));
    editor.redo();
    assert_eq!(editor.scene().position(id), Ok(Pos2::new(20.0, 15.0)));
}

#[test]
fn focus_loss_mid_move_commits_the_move() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Rectangle);
    press(&mut editor, 0.0, 0.0);
    release(&mut editor, 10.0, 10.0);
    let id = editor.scene().item_ids()[0];

    editor.set_tool(Tool::Cursor);
    press(&mut editor, 5.0, 5.0);
    drag(&mut editor, 15.0, 5.0);
    assert!(editor.handle_event(&InputEvent::FocusLost));

    assert!(editor.state().is_idle());
    assert_eq!(editor.scene().position(id), Ok(Pos2::new(10.0, 0.0)));
    editor.undo();
    assert_eq!(editor.scene().position(id), Ok(Pos2::ZERO));
}

#[test]
fn delete_key_removes_the_selection() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Rectangle);
    for offset in [0.0, 100.0] {
        press(&mut editor, offset, offset);
        release(&mut editor, offset + 20.0, offset + 20.0);
    }
    editor.set_tool(Tool::Cursor);
    press(&mut editor, 10.0, 10.0);
    release(&mut editor, 10.0, 10.0);
    key(&mut editor, Key::Delete);

    assert_eq!(editor.scene().len(), 1);
    editor.undo();
    assert_eq!(editor.scene().len(), 2);
}

#[test]
fn text_edit_is_one_change_from_placeholder_to_final_text() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Text);
    press(&mut editor, 10.0, 10.0);
    release(&mut editor, 10.0, 10.0);
    let id = editor.scene().item_ids()[0];
    assert_eq!(editor.scene().item(id).unwrap().text(), Some("Text"));

    editor.handle_event(&InputEvent::DoubleClick { pos: Pos2::new(12.0, 12.0) });
    assert_eq!(editor.state().editing_item(), Some(id));
    for _ in 0..4 {
        key(&mut editor, Key::Backspace);
    }
    editor.handle_event(&InputEvent::Text("Hello".to_owned()));
    // Switching tools ends the edit.
    editor.set_tool(Tool::Cursor);
    assert!(editor.state().is_idle());

    assert_eq!(editor.scene().item(id).unwrap().text(), Some("Hello"));
    assert_eq!(editor.history().undo_len(), 2);
    editor.undo();
    assert_eq!(editor.scene().item(id).unwrap().text(), Some("Text"));
    editor.redo();
    assert_eq!(editor.scene().item(id).unwrap().text(), Some("Hello"));
}

#[test]
fn unchanged_text_records_nothing() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Text);
    press(&mut editor, 10.0, 10.0);
    release(&mut editor, 10.0, 10.0);
    editor.handle_event(&InputEvent::DoubleClick { pos: Pos2::new(12.0, 12.0) });
    key(&mut editor, Key::Escape);

    assert!(editor.state().is_idle());
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn release_without_press_changes_nothing() {
    let mut editor = Editor::default();
    assert!(!editor.handle_event(&InputEvent::PointerUp { pos: Pos2::ZERO }));
    assert!(editor.scene().is_empty());
    assert!(!editor.history().can_undo());
}

#[test]
fn pressing_elsewhere_commits_the_text_edit() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Text);
    press(&mut editor, 10.0, 10.0);
    release(&mut editor, 10.0, 10.0);
    let id = editor.scene().item_ids()[0];

    editor.set_tool(Tool::Cursor);
    editor.handle_event(&InputEvent::DoubleClick { pos: Pos2::new(12.0, 12.0) });
    editor.handle_event(&InputEvent::Text("!".to_owned()));
    press(&mut editor, 300.0, 300.0);
    release(&mut editor, 300.0, 300.0);

    assert!(editor.state().is_idle());
    assert_eq!(editor.scene().item(id).unwrap().text(), Some("Text!"));
    assert_eq!(editor.history().undo_len(), 2);
}
