//! Editor update functions for cursor movement and viewport scrolling.

use crate::commands::Cmd;
use crate::messages::{Direction, EditorMsg};
use crate::model::{AppModel, EditError, Position};

/// Handle editor messages (cursor movement, viewport scrolling)
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::MoveCursor(direction) => {
            move_cursor(model, direction);
        }

        EditorMsg::MoveCursorLineStart => {
            model.editor.cursor.column = 0;
        }

        EditorMsg::MoveCursorLineEnd => {
            let line = model.editor.cursor.line;
            model.editor.cursor.column = model.buffer.row_len(line);
        }

        EditorMsg::PageUp | EditorMsg::PageDown => {
            let page = model.editor.viewport.visible_lines;
            let top = model.editor.viewport.top_line;
            let direction = if msg == EditorMsg::PageUp {
                model.editor.cursor.line = top;
                Direction::Up
            } else {
                model.editor.cursor.line = (top + page).saturating_sub(1).min(model.buffer.len());
                Direction::Down
            };
            for _ in 0..page {
                move_cursor(model, direction);
            }
        }

        EditorMsg::JumpToLine(line) => {
            jump_to_line(model, line);
        }
    }

    Some(Cmd::Redraw)
}

/// One arrow key step. Left/Right wrap across line ends; Down may reach the
/// pending row one past the last line. The column is clamped afterwards.
pub(crate) fn move_cursor(model: &mut AppModel, direction: Direction) {
    let Position { line, column } = model.editor.cursor;
    let len = model.buffer.len();
    let cursor = &mut model.editor.cursor;

    match direction {
        Direction::Left => {
            if column > 0 {
                cursor.column -= 1;
            } else if line > 0 {
                *cursor = Position::new(line - 1, model.buffer.row_len(line - 1));
            }
        }
        Direction::Right => {
            if line < len {
                if column < model.buffer.row_len(line) {
                    cursor.column += 1;
                } else {
                    *cursor = Position::new(line + 1, 0);
                }
            }
        }
        Direction::Up => {
            cursor.line = line.saturating_sub(1);
        }
        Direction::Down => {
            if line < len {
                cursor.line += 1;
            }
        }
    }

    model.editor.clamp_cursor(&model.buffer);
}

/// Put the cursor at the start of a 1-based line
pub(crate) fn jump_to_line(model: &mut AppModel, line: usize) {
    let max = model.buffer.len();
    if line == 0 || line > max {
        model.ui.set_status(EditError::InvalidLine { max }.to_string());
        return;
    }
    model.editor.cursor = Position::new(line - 1, 0);
    model.ui.set_status(format!("Jumped to line {}.", line));
}
