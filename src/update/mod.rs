//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod document;
mod editor;
mod prompt;
mod selection;

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg};
use crate::model::{AppModel, EditMode, GuardedAction, PromptKind};

#[cfg(debug_assertions)]
use crate::tracing::CursorSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use document::update_document;
pub use editor::update_editor;
pub use prompt::update_prompt;
pub use selection::update_selection;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let guarded = guarded_action(&msg);
    // Painted row indices go stale once rows are inserted or deleted
    if !search_overlay_open(model) {
        model.clear_overlays();
    }
    let result = match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Document(m) => document::update_document(model, m),
        Msg::Selection(m) => selection::update_selection(model, m),
        Msg::Prompt(m) => prompt::update_prompt(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    finish_update(model, guarded);
    result
}

/// The guarded action a message repeats, if any
fn guarded_action(msg: &Msg) -> Option<GuardedAction> {
    match msg {
        Msg::App(AppMsg::Quit) => Some(GuardedAction::Quit),
        Msg::App(AppMsg::NewFile) => Some(GuardedAction::NewFile),
        Msg::App(AppMsg::OpenFile) => Some(GuardedAction::OpenFile),
        _ => None,
    }
}

/// Bookkeeping shared by every message: mode, confirmation counter,
/// overlays and scrolling
fn finish_update(model: &mut AppModel, guarded: Option<GuardedAction>) {
    if !model.editor.selection.active {
        model.editor.mode = EditMode::Normal;
    }

    if model
        .ui
        .pending_confirm
        .is_some_and(|(action, _)| Some(action) != guarded)
    {
        model.ui.pending_confirm = None;
    }

    if !search_overlay_open(model) {
        model.paint_selection();
    }

    model.ensure_cursor_visible();
}

/// Whether a search prompt owns the overlay (match paint instead of the
/// selection)
fn search_overlay_open(model: &AppModel) -> bool {
    model.ui.prompt.as_ref().is_some_and(|p| {
        matches!(
            p.kind(),
            PromptKind::Search | PromptKind::ReplaceWith | PromptKind::ConfirmReplace
        )
    })
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after cursor state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = CursorSnapshot::from_editor(&model.editor);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = CursorSnapshot::from_editor(&model.editor);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "state changed");
    }

    debug_assert!(
        model.editor.cursor.line <= model.buffer.len(),
        "cursor line {} past buffer end {} after {}",
        model.editor.cursor.line,
        model.buffer.len(),
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Editor::MoveCursor(Up)`
/// - `Document::InsertChar(120)`
/// - `App::Resize(24, 80)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Selection(m) => format!("Selection::{:?}", m),
        Msg::Prompt(m) => format!("Prompt::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
