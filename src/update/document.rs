//! Document update functions for text editing, clipboard and undo/redo.

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::{AppModel, EditMode};

/// Handle document messages (text editing, clipboard, undo/redo)
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::InsertChar(ch) => {
            model.record_snapshot("Typing");
            model.insert_char(ch);
        }

        DocumentMsg::InsertNewline => {
            model.record_snapshot("Insert newline");
            model.insert_newline();
        }

        DocumentMsg::InsertTab => {
            model.record_snapshot("Typing");
            model.insert_tab();
        }

        DocumentMsg::DeleteBackward => {
            model.record_snapshot("Delete character");
            if !model.smart_outdent() {
                model.delete_char_before_cursor();
            }
        }

        DocumentMsg::DeleteForward => {
            model.record_snapshot("Delete character");
            model.delete_char_at_cursor();
        }

        DocumentMsg::CopyLine => match model.copy_line() {
            Ok(()) => model.ui.set_status("Line copied."),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        DocumentMsg::CutLine => {
            if model.editor.cursor.line >= model.buffer.len() {
                return Some(Cmd::Redraw);
            }
            model.record_snapshot("Cut line");
            match model.cut_line() {
                Ok(()) => model.ui.set_status("Line cut."),
                Err(e) => model.ui.set_status(e.to_string()),
            }
        }

        DocumentMsg::Paste => {
            if model.clipboard.is_empty() {
                model.ui.set_status("Clipboard is empty.");
                return Some(Cmd::Redraw);
            }
            model.record_snapshot("Paste");
            if model.paste() {
                model.editor.mode = EditMode::Selecting;
                model.ui.set_status("Pasted and selected.");
            }
        }

        DocumentMsg::Undo => match model.undo() {
            Ok(description) => model.ui.set_status(format!("Undo: {}", description)),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        DocumentMsg::Redo => match model.redo() {
            Ok(description) => model.ui.set_status(format!("Redo: {}", description)),
            Err(e) => model.ui.set_status(e.to_string()),
        },
    }

    Some(Cmd::Redraw)
}
