//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Duration;

use quire::messages::{DocumentMsg, Msg, SelectionMsg};
use quire::model::{AppModel, EditMode, Position, Selection, UndoStore};
use quire::syntax::Highlight;
use quire::update::update;

/// Create a test model with given text and cursor position
pub fn test_model(text: &str, line: usize, column: usize) -> AppModel {
    let mut model = AppModel::with_text(text);
    model.editor.cursor = Position::new(line, column);
    model
}

/// Create a test model with given text and a selection (anchor to head).
/// The cursor will be at the head position and the model in Selecting mode.
pub fn test_model_with_selection(
    text: &str,
    anchor_line: usize,
    anchor_col: usize,
    head_line: usize,
    head_col: usize,
) -> AppModel {
    let mut model = test_model(text, head_line, head_col);
    model.editor.selection = Selection::new(
        Position::new(anchor_line, anchor_col),
        Position::new(head_line, head_col),
    );
    model.editor.mode = EditMode::Selecting;
    model
}

/// Test model whose every edit records its own undo step
pub fn undo_model(text: &str, line: usize, column: usize) -> AppModel {
    let mut model = test_model(text, line, column);
    model.history = UndoStore::new(model.config.max_snapshots, Duration::ZERO);
    model
}

/// Buffer rows as strings
pub fn buffer_lines(model: &AppModel) -> Vec<String> {
    model.buffer.lines()
}

/// Buffer content as it would be written to disk
pub fn buffer_to_string(model: &AppModel) -> String {
    String::from_utf8_lossy(&model.buffer.to_bytes()).into_owned()
}

/// Cursor as a (line, column) pair
pub fn cursor(model: &AppModel) -> (usize, usize) {
    (model.editor.cursor.line, model.editor.cursor.column)
}

/// Current status message
pub fn status(model: &AppModel) -> &str {
    &model.ui.status_message
}

/// Type a string one byte at a time through the update loop
pub fn type_text(model: &mut AppModel, text: &str) {
    for byte in text.bytes() {
        update(model, Msg::insert_char(byte));
    }
}

pub fn doc(model: &mut AppModel, msg: DocumentMsg) {
    update(model, Msg::Document(msg));
}

pub fn sel(model: &mut AppModel, msg: SelectionMsg) {
    update(model, Msg::Selection(msg));
}

/// Highlight class of one rendered column
pub fn class_at(model: &AppModel, line: usize, column: usize) -> Highlight {
    model.buffer.row(line).unwrap().highlight()[column]
}
