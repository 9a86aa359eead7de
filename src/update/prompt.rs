//! Prompt update functions: incremental search, replace-all, save as and
//! jump to line.

use crate::commands::Cmd;
use crate::messages::{Direction, PromptMsg};
use crate::model::{AppModel, EditError, Prompt, PromptKind, PromptState, SearchState};
use crate::syntax::Highlight;
use crate::util::find_bytes;

use super::app::save_command;
use super::editor::jump_to_line;

/// Handle prompt messages
pub fn update_prompt(model: &mut AppModel, msg: PromptMsg) -> Option<Cmd> {
    if let PromptMsg::Open(kind) = msg {
        open_prompt(model, kind);
        return Some(Cmd::Redraw);
    }

    let Some(mut state) = model.ui.close_prompt() else {
        return None;
    };

    let mut cmd = Some(Cmd::Redraw);
    let keep_open = match msg {
        PromptMsg::Open(_) => true,

        PromptMsg::InsertChar(ch) => match state.prompt {
            Prompt::ConfirmReplace { .. } => {
                finish_replace(model, &mut state, ch == b'y' || ch == b'Y');
                true
            }
            _ => {
                state.input.push(ch as char);
                restart_search(model, &mut state);
                true
            }
        },

        PromptMsg::DeleteBackward => match state.prompt {
            Prompt::ConfirmReplace { .. } => {
                finish_replace(model, &mut state, false);
                true
            }
            _ => {
                state.input.pop();
                restart_search(model, &mut state);
                true
            }
        },

        PromptMsg::Navigate(direction) => {
            if let Prompt::Search(search) = &mut state.prompt {
                search.forward = matches!(direction, Direction::Right | Direction::Down);
                search_step(model, search, state.input.as_bytes());
            }
            true
        }

        PromptMsg::ReplaceAll => {
            if let Prompt::Search(search) = &state.prompt {
                if state.input.is_empty() {
                    model
                        .ui
                        .set_status("Enter a search term first, then press Ctrl-R to replace.");
                } else {
                    let search = search.clone();
                    let needle = std::mem::take(&mut state.input);
                    state = PromptState::new(Prompt::ReplaceWith { search, needle });
                }
            }
            true
        }

        PromptMsg::Confirm => {
            if state.input.is_empty() && state.kind() != PromptKind::ConfirmReplace {
                true
            } else {
                confirm(model, &mut state, &mut cmd)
            }
        }

        PromptMsg::Cancel => cancel(model, &mut state),
    };

    if keep_open {
        model.ui.prompt = Some(state);
    }
    cmd
}

fn open_prompt(model: &mut AppModel, kind: PromptKind) {
    let prompt = match kind {
        PromptKind::Search => Prompt::Search(SearchState {
            saved_cursor: model.editor.cursor,
            saved_top_line: model.editor.viewport.top_line,
            saved_left_column: model.editor.viewport.left_column,
            last_match: None,
            forward: true,
        }),
        PromptKind::SaveAs => Prompt::SaveAs,
        PromptKind::JumpToLine => Prompt::JumpToLine,
        PromptKind::ReplaceWith | PromptKind::ConfirmReplace => return,
    };
    model.ui.open_prompt(prompt);
}

/// Enter. Returns whether the prompt stays open.
fn confirm(model: &mut AppModel, state: &mut PromptState, cmd: &mut Option<Cmd>) -> bool {
    match &state.prompt {
        Prompt::Search(_) => {
            model.clear_overlays();
            model.ui.set_status("");
            false
        }

        Prompt::SaveAs => {
            model.file_path = Some(state.input.clone().into());
            model.select_syntax();
            *cmd = save_command(model);
            false
        }

        Prompt::JumpToLine => {
            match state.input.trim().parse::<usize>() {
                Ok(line) => jump_to_line(model, line),
                Err(_) => model.ui.set_status(
                    EditError::InvalidLine {
                        max: model.buffer.len(),
                    }
                    .to_string(),
                ),
            }
            false
        }

        Prompt::ReplaceWith { search, needle } => {
            let count = model.buffer.count_occurrences(needle.as_bytes());
            if count == 0 {
                model
                    .ui
                    .set_status(format!("No occurrences of '{}' found.", needle));
                *state = back_to_search(search.clone(), needle.clone());
            } else {
                *state = PromptState::new(Prompt::ConfirmReplace {
                    search: search.clone(),
                    needle: needle.clone(),
                    replacement: std::mem::take(&mut state.input),
                    count,
                });
            }
            true
        }

        Prompt::ConfirmReplace { .. } => {
            finish_replace(model, state, false);
            true
        }
    }
}

/// Escape. Returns whether the prompt stays open.
fn cancel(model: &mut AppModel, state: &mut PromptState) -> bool {
    match &state.prompt {
        Prompt::Search(search) => {
            model.clear_overlays();
            model.editor.cursor = search.saved_cursor;
            model.editor.viewport.top_line = search.saved_top_line;
            model.editor.viewport.left_column = search.saved_left_column;
            model.ui.set_status("");
            false
        }
        Prompt::SaveAs => {
            model.ui.set_status("Save aborted");
            false
        }
        Prompt::JumpToLine => {
            model.ui.set_status("Jump cancelled.");
            false
        }
        Prompt::ReplaceWith { search, needle } => {
            model.ui.set_status("Replace cancelled.");
            *state = back_to_search(search.clone(), needle.clone());
            true
        }
        Prompt::ConfirmReplace { .. } => {
            finish_replace(model, state, false);
            true
        }
    }
}

/// Answer the replace-all confirmation and return to the search prompt
fn finish_replace(model: &mut AppModel, state: &mut PromptState, accepted: bool) {
    let Prompt::ConfirmReplace {
        search,
        needle,
        replacement,
        ..
    } = &state.prompt
    else {
        return;
    };

    if accepted {
        model.record_snapshot("Replace all");
        model.clear_overlays();
        let replaced = model
            .buffer
            .replace_all(needle.as_bytes(), replacement.as_bytes());
        model.editor.selection.clear();
        tracing::debug!(needle = %needle, replaced, "Replaced all occurrences");
        model.ui.set_status(format!(
            "Replaced {} occurrence(s). Press ESC to close search.",
            replaced
        ));
    } else {
        model.ui.set_status("Replace aborted.");
    }

    let mut search = search.clone();
    search.last_match = None;
    *state = back_to_search(search, needle.clone());
}

fn back_to_search(search: SearchState, needle: String) -> PromptState {
    PromptState {
        prompt: Prompt::Search(search),
        input: needle,
    }
}

/// The query changed: search again from the top, forwards
fn restart_search(model: &mut AppModel, state: &mut PromptState) {
    if let Prompt::Search(search) = &mut state.prompt {
        search.last_match = None;
        search.forward = true;
        search_step(model, search, state.input.as_bytes());
    }
}

/// Find the next row containing `query` (in render form) after the last
/// match, wrapping around the buffer, and paint the match.
fn search_step(model: &mut AppModel, search: &mut SearchState, query: &[u8]) {
    model.clear_overlays();
    let len = model.buffer.len();
    if query.is_empty() || len == 0 {
        search.last_match = None;
        return;
    }
    if search.last_match.is_none() {
        search.forward = true;
    }

    // A fresh search starts at the first row
    let mut current = search.last_match.unwrap_or(len - 1);
    for _ in 0..len {
        current = if search.forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };

        let Some(row) = model.buffer.row(current) else {
            continue;
        };
        let Some(rx) = find_bytes(row.render(), query, 0) else {
            continue;
        };
        let column = row.render_to_char(rx, model.buffer.tab_stop());

        search.last_match = Some(current);
        model.editor.cursor.line = current;
        model.editor.cursor.column = column;
        model.editor.viewport.top_line = len;
        model.buffer.paint(current, rx..rx + query.len(), Highlight::Match);
        model.editor.painted.push(current);
        return;
    }

    search.last_match = None;
}
