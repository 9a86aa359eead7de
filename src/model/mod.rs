//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod block;
pub mod buffer;
pub mod cursor;
pub mod edit;
pub mod editor;
pub mod error;
pub mod history;
pub mod row;
pub mod selection;
pub mod ui;

pub use buffer::Buffer;
pub use cursor::Position;
pub use editor::{EditMode, EditorState, Viewport};
pub use error::EditError;
pub use history::{DocumentState, Snapshot, UndoStore, SNAPSHOT_DEBOUNCE, UNDO_BUFFER_SIZE};
pub use row::Row;
pub use selection::Selection;
pub use ui::{GuardedAction, Prompt, PromptKind, PromptState, SearchState, UiState};

use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::syntax::{Highlight, SyntaxRegistry};

/// Lines reserved below the text area (status bar + message bar)
pub const RESERVED_LINES: usize = 2;
/// Narrowest line number gutter, including its trailing space
pub const MIN_GUTTER_WIDTH: usize = 4;

/// Key reference shown by the help command
pub const HELP_TEXT: &[&str] = &[
    "quire help",
    "",
    "-- Normal Mode --",
    "Ctrl-S: Save",
    "Ctrl-Y: Save As",
    "Ctrl-Q: Quit",
    "Ctrl-F: Find (Ctrl-R inside search: replace all)",
    "Ctrl-O: Open File",
    "Ctrl-N: Toggle Line Numbers",
    "Ctrl-T: New File",
    "Ctrl-G: Show this Help",
    "Ctrl-J: Jump to Line",
    "Ctrl-Z: Undo",
    "Ctrl-R: Redo",
    "Ctrl-W: Copy Line",
    "Ctrl-K: Cut Line",
    "Ctrl-U: Paste",
    "Ctrl-B: Start Selection",
    "Ctrl-E: End Selection & Enter Selection Mode",
    "Ctrl-A: Select All",
    "Alt-R: Select Row Text",
    "Shift-Arrows: Quick Selection",
    "Shift-Tab: Select Inside Delimiters",
    "",
    "-- Selection Mode --",
    "Esc: Cancel Selection",
    "Arrows: Extend Selection",
    "Alt-Arrows: Move Selection",
    "Tab / Backspace: Indent / Outdent",
    "Ctrl-W: Copy Selection",
    "Ctrl-K: Cut Selection",
    "Del: Delete Selection",
];

fn live_state(buffer: &Buffer, editor: &EditorState) -> DocumentState {
    DocumentState {
        rows: buffer.rows().to_vec(),
        cursor: editor.cursor,
        row_offset: editor.viewport.top_line,
        col_offset: editor.viewport.left_column,
        selection: editor.selection,
    }
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Document rows
    pub buffer: Buffer,
    /// Cursor, viewport, selection and mode
    pub editor: EditorState,
    /// Undo/redo snapshots
    pub history: UndoStore,
    /// Status message and prompt
    pub ui: UiState,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// Known highlighting rules
    pub syntaxes: SyntaxRegistry,
    /// Last copied or cut text, `\n` separated, no trailing newline
    pub clipboard: Vec<u8>,
    /// File backing the buffer, if any
    pub file_path: Option<PathBuf>,
    /// Terminal size in cells
    pub screen_size: (usize, usize),
}

impl AppModel {
    /// Create an empty model with the given configuration and rules
    pub fn new(config: EditorConfig, syntaxes: SyntaxRegistry) -> Self {
        let mut ui = UiState::with_status("HELP: Ctrl-G = help | Ctrl-S = save | Ctrl-Q = quit");
        ui.line_numbers = config.line_numbers;
        let history = UndoStore::new(config.max_snapshots, config.snapshot_debounce());
        let screen_size = (24 + RESERVED_LINES, 80);

        let mut model = Self {
            buffer: Buffer::new(config.tab_stop),
            editor: EditorState::new(),
            history,
            ui,
            config,
            syntaxes,
            clipboard: Vec::new(),
            file_path: None,
            screen_size,
        };
        model.resize(screen_size.0, screen_size.1);
        model
    }

    /// Load configuration and syntax rules from the config directory
    pub fn from_config() -> Self {
        let config = EditorConfig::load();
        let syntaxes = Self::load_syntaxes(&config);
        Self::new(config, syntaxes)
    }

    /// Builtin rules plus any rule files in the configured directory
    pub fn load_syntaxes(config: &EditorConfig) -> SyntaxRegistry {
        let mut registry = SyntaxRegistry::with_builtin();
        if let Some(dir) = config.resolved_syntax_dir() {
            if dir.is_dir() {
                let loaded = registry.load_dir(&dir);
                tracing::info!(loaded, dir = %dir.display(), "Loaded syntax rules");
            }
        }
        registry
    }

    /// Unnamed model holding `text`, with default config and builtin rules
    pub fn with_text(text: &str) -> Self {
        let mut model = Self::new(EditorConfig::default(), SyntaxRegistry::with_builtin());
        model.buffer = Buffer::from_bytes(text.as_bytes(), model.config.tab_stop);
        model
    }

    /// Replace the document with file contents (or nothing, for a new file)
    pub fn set_document(&mut self, path: Option<PathBuf>, bytes: &[u8]) {
        self.buffer = Buffer::from_bytes(bytes, self.config.tab_stop);
        self.file_path = path;
        self.editor.reset();
        self.history.clear();
        self.select_syntax();
        self.ensure_cursor_visible();
    }

    /// Pick highlighting rules from the file name
    pub fn select_syntax(&mut self) {
        let syntax = self
            .file_path
            .as_deref()
            .and_then(|path| self.syntaxes.select(path));
        tracing::debug!(
            language = syntax.as_ref().map_or("none", |s| s.language.as_str()),
            "Selected syntax"
        );
        self.buffer.set_syntax(syntax);
    }

    /// Base name of the file, or `[No Name]`
    pub fn file_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Deep copy of everything an undo step restores
    pub fn capture_state(&self) -> DocumentState {
        live_state(&self.buffer, &self.editor)
    }

    /// Put a captured state back without recording a new undo step
    pub fn restore_state(&mut self, state: DocumentState) {
        self.buffer.replace_rows(state.rows);
        self.buffer.mark_dirty();
        self.editor.cursor = state.cursor;
        self.editor.viewport.top_line = state.row_offset;
        self.editor.viewport.left_column = state.col_offset;
        self.editor.selection = state.selection;
        self.editor.mode = if self.editor.selection.is_usable() {
            EditMode::Selecting
        } else {
            EditMode::Normal
        };
        self.editor.painted.clear();
        self.editor.clamp_cursor(&self.buffer);
    }

    /// Record the current state as the undo point for an edit about to happen
    pub fn record_snapshot(&mut self, description: &str) {
        let Self {
            history,
            buffer,
            editor,
            ..
        } = self;
        history.record(description, || live_state(buffer, editor));
    }

    /// Run a fallible edit, recording the pre-edit state only if it succeeds
    pub fn try_edit<T>(
        &mut self,
        description: &str,
        edit: impl FnOnce(&mut Self) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let before = self.capture_state();
        let value = edit(self)?;
        self.history.record(description, || before);
        Ok(value)
    }

    /// Step back one snapshot; returns the description of the undone step
    pub fn undo(&mut self) -> Result<String, EditError> {
        let (state, description) = {
            let Self {
                history,
                buffer,
                editor,
                ..
            } = self;
            history.undo(|| live_state(buffer, editor))?
        };
        self.restore_state(state);
        Ok(description)
    }

    /// Step forward one snapshot; returns the description of the redone step
    pub fn redo(&mut self) -> Result<String, EditError> {
        let (state, description) = self.history.redo()?;
        self.restore_state(state);
        Ok(description)
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Set the terminal size in cells
    pub fn resize(&mut self, rows: usize, columns: usize) {
        self.screen_size = (rows, columns);
        self.editor.resize(
            rows.saturating_sub(RESERVED_LINES),
            self.text_columns(),
        );
    }

    /// Width of the line number gutter (0 when hidden)
    pub fn gutter_width(&self) -> usize {
        if !self.ui.line_numbers {
            return 0;
        }
        let digits = self.buffer.len().max(1).to_string().len();
        (digits + 1).max(MIN_GUTTER_WIDTH)
    }

    /// Columns left for text after the gutter
    pub fn text_columns(&self) -> usize {
        self.screen_size.1.saturating_sub(self.gutter_width())
    }

    /// Clamp the cursor and scroll it into view
    pub fn ensure_cursor_visible(&mut self) {
        self.editor.viewport.visible_columns = self.text_columns();
        self.editor.clamp_cursor(&self.buffer);
        self.editor.scroll(&self.buffer);
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    /// Remove painted selection/match classes from the rows that carry them
    pub fn clear_overlays(&mut self) {
        for row in std::mem::take(&mut self.editor.painted) {
            self.buffer.refresh_highlight(row..row + 1);
        }
    }

    /// Paint a class over a span of text columns on one row
    pub fn paint_span(&mut self, line: usize, columns: std::ops::Range<usize>, class: Highlight) {
        let Some(row) = self.buffer.row(line) else {
            return;
        };
        let tab_stop = self.buffer.tab_stop();
        let start = row.char_to_render(columns.start.min(row.len()), tab_stop);
        let end = row.char_to_render(columns.end.min(row.len()), tab_stop);
        if start < end {
            self.buffer.paint(line, start..end, class);
            self.editor.painted.push(line);
        }
    }

    /// Repaint the selection overlay from scratch
    pub fn paint_selection(&mut self) {
        self.clear_overlays();
        if !self.editor.selection.is_usable() {
            return;
        }
        let (start, end) = self.editor.selection.range();
        for line in start.line..=end.line.min(self.buffer.len().saturating_sub(1)) {
            let from = if line == start.line { start.column } else { 0 };
            let to = if line == end.line {
                end.column
            } else {
                self.buffer.row_len(line)
            };
            self.paint_span(line, from..to, Highlight::Selection);
        }
    }

    /// Left and right status bar texts
    pub fn status_line(&self) -> (String, String) {
        let left = format!(
            "[{}] - {} lines {}",
            self.file_name(),
            self.buffer.len(),
            if self.buffer.is_dirty() {
                "(modified)"
            } else {
                ""
            }
        );
        let filetype = self
            .buffer
            .syntax()
            .map_or("no ft", |s| s.language.as_str());
        let mode = match self.editor.mode {
            EditMode::Normal => "",
            EditMode::Selecting => "SEL | ",
        };
        let right = format!(
            "{}{} | {}/{}",
            mode,
            filetype,
            self.editor.cursor.line + 1,
            self.buffer.len()
        );
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_width() {
        let mut model = AppModel::with_text("a\nb");
        assert_eq!(model.gutter_width(), 4);
        model.buffer = Buffer::from_text(&"x\n".repeat(12_345));
        assert_eq!(model.gutter_width(), 6);
        model.ui.line_numbers = false;
        assert_eq!(model.gutter_width(), 0);
    }

    #[test]
    fn test_capture_and_restore() {
        let mut model = AppModel::with_text("abc\ndef");
        model.editor.cursor = Position::new(1, 2);
        let state = model.capture_state();

        model.buffer.delete_row(0);
        model.editor.cursor = Position::zero();
        model.restore_state(state);

        assert_eq!(model.buffer.lines(), vec!["abc", "def"]);
        assert_eq!(model.editor.cursor, Position::new(1, 2));
        assert!(model.buffer.is_dirty());
    }

    #[test]
    fn test_selection_overlay_round_trip() {
        let mut model = AppModel::with_text("hello\nworld");
        model.editor.selection = Selection::new(Position::new(0, 1), Position::new(1, 2));
        model.paint_selection();
        assert_eq!(model.buffer.row(0).unwrap().highlight()[0], Highlight::Normal);
        assert_eq!(model.buffer.row(0).unwrap().highlight()[1], Highlight::Selection);
        assert_eq!(model.buffer.row(1).unwrap().highlight()[1], Highlight::Selection);
        assert_eq!(model.buffer.row(1).unwrap().highlight()[2], Highlight::Normal);

        model.editor.selection.clear();
        model.paint_selection();
        assert!(model
            .buffer
            .rows()
            .iter()
            .all(|r| r.highlight().iter().all(|&h| h == Highlight::Normal)));
    }

    #[test]
    fn test_status_line() {
        let mut model = AppModel::with_text("a");
        model.file_path = Some(PathBuf::from("/tmp/main.c"));
        model.select_syntax();
        let (left, right) = model.status_line();
        assert_eq!(left, "[main.c] - 1 lines ");
        assert_eq!(right, "c | 1/1");
    }
}
