//! Selection update functions: anchoring, extending and block operations.

use crate::commands::Cmd;
use crate::messages::{Direction, DocumentMsg, SelectionMsg};
use crate::model::block::delimiter_pair;
use crate::model::{AppModel, EditError, EditMode};

use super::document::update_document;
use super::editor::move_cursor;

/// Handle selection messages
pub fn update_selection(model: &mut AppModel, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::StartAtCursor => {
            let cursor = model.editor.cursor;
            model.editor.selection.start_at(cursor);
            model.ui.set_status("Selection start set");
        }

        SelectionMsg::EndAtCursor => {
            if !model.editor.selection.active {
                model.ui.set_status(EditError::NoSelection.to_string());
                return Some(Cmd::Redraw);
            }
            let cursor = model.editor.cursor;
            model.editor.selection.extend_to(cursor);
            if model.editor.selection.active {
                model.editor.mode = EditMode::Selecting;
                model.ui.set_status("Selection end set. Entering selection mode.");
            } else {
                model.ui.set_status("Selection cleared");
            }
        }

        SelectionMsg::Extend(direction) => {
            let cursor = model.editor.cursor;
            model.editor.selection.start_at(cursor);
            move_cursor(model, direction);
            let cursor = model.editor.cursor;
            model.editor.selection.extend_to(cursor);
            if model.editor.selection.active {
                model.editor.mode = EditMode::Selecting;
            }
        }

        SelectionMsg::QuickSelectLine(direction) => match model.quick_select_line(direction) {
            Ok(Some(lines)) => {
                model.editor.mode = EditMode::Selecting;
                model.ui.set_status(format!(
                    "Selected: lines {}-{}",
                    lines.start() + 1,
                    lines.end() + 1
                ));
            }
            Ok(None) => model.ui.set_status("Selection cleared"),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::QuickSelectChar(direction) => match model.quick_select_char(direction) {
            Ok(true) => {
                model.editor.mode = EditMode::Selecting;
                model.ui.set_status("Selection active");
            }
            Ok(false) => model.ui.set_status("Selection cleared"),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::SelectAll => match model.select_all() {
            Ok(()) => model.ui.set_status("All text selected."),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::SelectRowText => match model.select_row_text() {
            Ok((start, end)) => model
                .ui
                .set_status(format!("Row text selected (chars {}-{})", start, end - 1)),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::SelectInsideDelimiters => match model.select_inside_delimiters() {
            Ok(open) => {
                let close = delimiter_pair(open).unwrap_or(open);
                model.ui.set_status(format!(
                    "Selected inside {}{}",
                    open as char, close as char
                ));
            }
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::Move(direction) => {
            match model.try_edit("Move selection", |m| m.move_selection(direction)) {
                Ok(()) => model.ui.set_status(format!(
                    "Selection moved {}",
                    match direction {
                        Direction::Up => "up",
                        Direction::Down => "down",
                        Direction::Left => "left",
                        Direction::Right => "right",
                    }
                )),
                Err(e) => model.ui.set_status(e.to_string()),
            }
        }

        SelectionMsg::Indent => match model.try_edit("Indent", AppModel::indent_selection) {
            Ok(()) => model.ui.set_status("Selection indented."),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::Outdent => match model.try_edit("Outdent", AppModel::outdent_selection) {
            Ok(()) => model.ui.set_status("Selection outdented."),
            Err(e) => model.ui.set_status(e.to_string()),
        },

        SelectionMsg::Copy => match model.copy_selection() {
            Ok(_) => model.ui.set_status("Selection copied."),
            Err(e) => {
                model.editor.selection.clear();
                model.ui.set_status(e.to_string());
            }
        },

        SelectionMsg::Cut => match model.try_edit("Cut selection", AppModel::cut_selection) {
            Ok(_) => model.ui.set_status("Selection cut."),
            Err(e) => {
                model.editor.selection.clear();
                model.ui.set_status(e.to_string());
            }
        },

        SelectionMsg::Delete => {
            match model.try_edit("Delete selection", AppModel::delete_selection) {
                Ok(()) => model.ui.set_status("Selection deleted."),
                Err(e) => model.ui.set_status(e.to_string()),
            }
        }

        SelectionMsg::Replace(ch) => {
            if !model.editor.selection.is_usable() {
                model.editor.cancel_selection();
                return update_document(model, DocumentMsg::InsertChar(ch));
            }
            let replaced = model.try_edit("Replace selection", |m| {
                m.delete_selection()?;
                m.insert_char(ch);
                Ok(())
            });
            match replaced {
                Ok(()) => model.ui.set_status(""),
                Err(e) => model.ui.set_status(e.to_string()),
            }
        }

        SelectionMsg::Cancel => {
            model.editor.cancel_selection();
            model.ui.set_status("Selection cancelled.");
        }
    }

    Some(Cmd::Redraw)
}
