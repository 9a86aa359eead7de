//! App message handlers (file operations, screen events)

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{AppModel, GuardedAction, Prompt};

/// Handle app messages (file operations, screen events)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(rows, columns) => {
            model.resize(rows, columns);
            Some(Cmd::Redraw)
        }

        AppMsg::SaveFile => save_command(model),

        AppMsg::SaveFileAs => {
            model.ui.open_prompt(Prompt::SaveAs);
            Some(Cmd::Redraw)
        }

        AppMsg::SaveCompleted { path, result } => {
            match result {
                Ok(bytes) => {
                    if model.file_path.as_deref() == Some(path.as_path()) {
                        model.buffer.mark_clean();
                    }
                    tracing::info!(path = %path.display(), bytes, "Saved file");
                    model.ui.set_status(format!("{} bytes written to disk", bytes));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Save failed");
                    model.ui.set_status(format!("Can't save! I/O error: {}", e));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::NewFile => {
            if !confirm_discard(model, GuardedAction::NewFile) {
                return Some(Cmd::Redraw);
            }
            model.set_document(None, b"");
            model.ui.set_status("New empty file. Ctrl-S to save.");
            Some(Cmd::Redraw)
        }

        AppMsg::OpenFile => {
            if !confirm_discard(model, GuardedAction::OpenFile) {
                return Some(Cmd::Redraw);
            }
            let start_dir = model
                .file_path
                .as_deref()
                .and_then(|p| p.parent())
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            Some(Cmd::OpenFileBrowser { start_dir })
        }

        AppMsg::LoadFile(path) => Some(Cmd::LoadFile { path }),

        AppMsg::FileLoaded { path, result } => {
            match result {
                Ok(Some(bytes)) => {
                    model.set_document(Some(path.clone()), &bytes);
                    tracing::info!(path = %path.display(), rows = model.buffer.len(), "Opened file");
                    model.ui.set_status(format!("{} opened.", path.display()));
                }
                Ok(None) => {
                    model.set_document(Some(path.clone()), b"");
                    model.ui.set_status(format!("New file: {}", path.display()));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Open failed");
                    model.ui.set_status(format!(
                        "Error: Could not open file {}: {}",
                        path.display(),
                        e
                    ));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::Quit => {
            if confirm_discard(model, GuardedAction::Quit) {
                Some(Cmd::Quit)
            } else {
                Some(Cmd::Redraw)
            }
        }

        AppMsg::ToggleLineNumbers => {
            model.ui.line_numbers = !model.ui.line_numbers;
            let (rows, columns) = model.screen_size;
            model.resize(rows, columns);
            Some(Cmd::Redraw)
        }

        AppMsg::ShowHelp => Some(Cmd::ShowHelp),
    }
}

/// Write the buffer to its file, or ask for a name first
pub(crate) fn save_command(model: &mut AppModel) -> Option<Cmd> {
    match model.file_path.clone() {
        Some(path) => Some(Cmd::SaveFile {
            path,
            content: model.buffer.to_bytes(),
        }),
        None => {
            model.ui.open_prompt(Prompt::SaveAs);
            Some(Cmd::Redraw)
        }
    }
}

/// Whether a destructive action may go ahead. With unsaved changes the
/// same command has to be repeated `quit_times` more times.
fn confirm_discard(model: &mut AppModel, action: GuardedAction) -> bool {
    if !model.buffer.is_dirty() {
        model.ui.pending_confirm = None;
        return true;
    }

    let remaining = match model.ui.pending_confirm {
        Some((pending, remaining)) if pending == action => remaining,
        _ => model.config.quit_times,
    };
    if remaining == 0 {
        model.ui.pending_confirm = None;
        return true;
    }

    let verb = match action {
        GuardedAction::Quit => "quit",
        GuardedAction::NewFile | GuardedAction::OpenFile => "discard them",
    };
    model.ui.set_status(format!(
        "WARNING!!! File has unsaved changes. Press {} {} more times to {}.",
        action.key_hint(),
        remaining,
        verb
    ));
    model.ui.pending_confirm = Some((action, remaining - 1));
    false
}
