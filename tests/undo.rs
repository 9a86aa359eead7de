//! Undo/redo tests - snapshots, debounce, redo truncation and eviction

mod common;

use common::{buffer_lines, cursor, doc, sel, status, test_model, type_text, undo_model};
use quire::messages::{DocumentMsg, Msg, SelectionMsg};
use quire::model::{EditMode, Position, Selection};
use quire::syntax::Highlight;
use quire::update::update;

#[test]
fn test_undo_each_edit_then_redo() {
    let mut model = undo_model("abc", 0, 3);
    type_text(&mut model, "xyz");
    assert_eq!(buffer_lines(&model), vec!["abcxyz"]);

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(buffer_lines(&model), vec!["abcxy"]);
    assert_eq!(cursor(&model), (0, 5));
    assert_eq!(status(&model), "Undo: Typing");

    doc(&mut model, DocumentMsg::Undo);
    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(buffer_lines(&model), vec!["abc"]);
    assert_eq!(cursor(&model), (0, 3));

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(status(&model), "Nothing to undo");
    assert_eq!(buffer_lines(&model), vec!["abc"]);

    doc(&mut model, DocumentMsg::Redo);
    assert_eq!(buffer_lines(&model), vec!["abcx"]);
    assert_eq!(status(&model), "Redo: Typing");

    doc(&mut model, DocumentMsg::Redo);
    doc(&mut model, DocumentMsg::Redo);
    assert_eq!(buffer_lines(&model), vec!["abcxyz"]);
    assert_eq!(cursor(&model), (0, 6));

    doc(&mut model, DocumentMsg::Redo);
    assert_eq!(status(&model), "Nothing to redo");
}

#[test]
fn test_fast_typing_is_one_undo_step() {
    let mut model = test_model("abc", 0, 3);
    type_text(&mut model, "xyz");
    assert_eq!(model.history.len(), 1);

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(buffer_lines(&model), vec!["abc"]);
}

#[test]
fn test_edit_after_undo_drops_redo() {
    let mut model = undo_model("x", 0, 1);
    type_text(&mut model, "ab");
    doc(&mut model, DocumentMsg::Undo);
    assert!(model.history.can_redo());

    type_text(&mut model, "c");
    assert!(!model.history.can_redo());

    doc(&mut model, DocumentMsg::Redo);
    assert_eq!(status(&model), "Nothing to redo");
    assert_eq!(buffer_lines(&model), vec!["xac"]);
}

#[test]
fn test_oldest_snapshots_are_evicted() {
    let mut model = undo_model("", 0, 0);
    type_text(&mut model, "abcdefghijklmno");
    assert_eq!(model.history.len(), 10);

    // The first undo keeps the live text for redo and stays within the cap
    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(model.history.len(), 10);
    assert_eq!(buffer_lines(&model), vec!["abcdefghijklmn"]);

    let mut undone = 1;
    while model.undo().is_ok() {
        undone += 1;
    }
    assert_eq!(undone, 9);
    assert_eq!(buffer_lines(&model), vec!["abcdef"]);

    while model.redo().is_ok() {}
    assert_eq!(buffer_lines(&model), vec!["abcdefghijklmno"]);
}

#[test]
fn test_undo_restores_structural_edits() {
    let mut model = undo_model("one\ntwo\nthree", 1, 3);
    doc(&mut model, DocumentMsg::InsertNewline);
    doc(&mut model, DocumentMsg::CutLine);
    assert_eq!(buffer_lines(&model), vec!["one", "two", "three"]);

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(buffer_lines(&model), vec!["one", "two", "", "three"]);
    assert_eq!(status(&model), "Undo: Cut line");

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(buffer_lines(&model), vec!["one", "two", "three"]);
    assert_eq!(cursor(&model), (1, 3));
}

#[test]
fn test_undo_block_move_restores_selection() {
    let mut model = undo_model("a\nb\nc", 0, 0);
    model.editor.selection = Selection::new(Position::new(1, 0), Position::new(1, 1));
    model.editor.cursor = Position::new(1, 1);
    model.editor.mode = EditMode::Selecting;

    sel(&mut model, SelectionMsg::Move(quire::messages::Direction::Up));
    assert_eq!(buffer_lines(&model), vec!["b", "a", "c"]);

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(buffer_lines(&model), vec!["a", "b", "c"]);
    assert_eq!(status(&model), "Undo: Move selection");
    assert_eq!(
        model.editor.selection.range(),
        (Position::new(1, 0), Position::new(1, 1))
    );
    // The restored selection is live again
    assert_eq!(model.editor.mode, EditMode::Selecting);
}

#[test]
fn test_undo_without_selection_is_normal_mode() {
    let mut model = undo_model("abc", 0, 3);
    type_text(&mut model, "d");
    doc(&mut model, DocumentMsg::Undo);

    assert!(!model.editor.selection.is_usable());
    assert_eq!(model.editor.mode, EditMode::Normal);
}

#[test]
fn test_selection_paint_follows_rows_after_undo() {
    let mut model = undo_model("a\nb\nccc\nddd", 2, 0);
    model.editor.selection = Selection::new(Position::new(2, 0), Position::new(3, 3));
    model.editor.mode = EditMode::Selecting;
    sel(&mut model, SelectionMsg::Indent);
    doc(&mut model, DocumentMsg::Undo);

    assert_eq!(buffer_lines(&model), vec!["a", "b", "ccc", "ddd"]);
    assert_eq!(model.editor.mode, EditMode::Selecting);
    assert!(model.buffer.row(2).unwrap().highlight().iter().all(|&h| h == Highlight::Selection));

    // Join row 1 into row 0: every row below moves up by one
    model.editor.cursor = Position::new(1, 0);
    update(&mut model, Msg::Document(DocumentMsg::DeleteBackward));

    assert_eq!(buffer_lines(&model), vec!["ab", "ccc", "ddd"]);
    let (start, end) = model.editor.selection.range();
    for line in 0..model.buffer.len() {
        let painted = model
            .buffer
            .row(line)
            .unwrap()
            .highlight()
            .contains(&Highlight::Selection);
        let covered = model.editor.selection.is_usable() && (start.line..=end.line).contains(&line);
        assert!(!painted || covered, "row {} keeps stale selection paint", line);
    }
}

#[test]
fn test_refused_edit_records_nothing() {
    let mut model = undo_model("abc", 0, 0);
    sel(&mut model, SelectionMsg::Indent);
    assert_eq!(status(&model), "No selection");
    assert!(model.history.is_empty());

    doc(&mut model, DocumentMsg::Undo);
    assert_eq!(status(&model), "Nothing to undo");
}
