//! Editor state - cursor, viewport, selection and editing mode

use super::buffer::Buffer;
use super::cursor::Position;
use super::selection::Selection;

/// Selection-driven editing mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Cursor-only editing
    #[default]
    Normal,
    /// Arrow keys extend the selection and edits consume it
    Selecting,
}

/// Visible region of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line (0-indexed)
    pub top_line: usize,
    /// First visible render column (for horizontal scrolling)
    pub left_column: usize,
    /// Number of text lines that fit on screen
    pub visible_lines: usize,
    /// Number of text columns that fit on screen
    pub visible_columns: usize,
}

impl Viewport {
    /// Create a new viewport with the given dimensions
    pub fn new(visible_lines: usize, visible_columns: usize) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            visible_lines,
            visible_columns,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 80)
    }
}

/// Cursor and everything hanging off it
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub cursor: Position,
    /// Render column of the cursor, refreshed by [`EditorState::scroll`]
    pub render_column: usize,
    pub viewport: Viewport,
    pub selection: Selection,
    pub mode: EditMode,
    /// Rows currently carrying a painted overlay
    pub(crate) painted: Vec<usize>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(visible_lines: usize, visible_columns: usize) -> Self {
        Self {
            viewport: Viewport::new(visible_lines, visible_columns),
            ..Self::default()
        }
    }

    /// Keep the cursor within the buffer: line at most one past the last
    /// row, column at most the row length
    pub fn clamp_cursor(&mut self, buffer: &Buffer) {
        self.cursor.line = self.cursor.line.min(buffer.len());
        self.cursor.column = self.cursor.column.min(buffer.row_len(self.cursor.line));
    }

    /// Recompute the render column and move the viewport so the cursor is
    /// on screen
    pub fn scroll(&mut self, buffer: &Buffer) {
        self.render_column = buffer
            .row(self.cursor.line)
            .map_or(0, |row| row.char_to_render(self.cursor.column, buffer.tab_stop()));

        let vp = &mut self.viewport;
        let lines = vp.visible_lines.max(1);
        let columns = vp.visible_columns.max(1);

        if self.cursor.line < vp.top_line {
            vp.top_line = self.cursor.line;
        }
        if self.cursor.line >= vp.top_line + lines {
            vp.top_line = self.cursor.line + 1 - lines;
        }
        if self.render_column < vp.left_column {
            vp.left_column = self.render_column;
        }
        if self.render_column >= vp.left_column + columns {
            vp.left_column = self.render_column + 1 - columns;
        }
    }

    pub fn resize(&mut self, visible_lines: usize, visible_columns: usize) {
        self.viewport.visible_lines = visible_lines;
        self.viewport.visible_columns = visible_columns;
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == EditMode::Selecting
    }

    /// Drop the selection and go back to Normal mode
    pub fn cancel_selection(&mut self) {
        self.selection.clear();
        self.mode = EditMode::Normal;
    }

    /// Reset everything but the screen size (new file / open file)
    pub fn reset(&mut self) {
        let (lines, columns) = (self.viewport.visible_lines, self.viewport.visible_columns);
        *self = Self::with_viewport(lines, columns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_cursor() {
        let buffer = Buffer::from_text("abc\nde");
        let mut editor = EditorState::new();
        editor.cursor = Position::new(1, 9);
        editor.clamp_cursor(&buffer);
        assert_eq!(editor.cursor, Position::new(1, 2));

        editor.cursor = Position::new(7, 3);
        editor.clamp_cursor(&buffer);
        assert_eq!(editor.cursor, Position::new(2, 0));
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let buffer = Buffer::from_text(&"line\n".repeat(100));
        let mut editor = EditorState::with_viewport(10, 80);
        editor.cursor = Position::new(50, 0);
        editor.scroll(&buffer);
        assert_eq!(editor.viewport.top_line, 41);

        editor.cursor = Position::new(5, 0);
        editor.scroll(&buffer);
        assert_eq!(editor.viewport.top_line, 5);
    }

    #[test]
    fn test_scroll_uses_render_column() {
        let buffer = Buffer::from_text("\t\t\tx");
        let mut editor = EditorState::with_viewport(10, 8);
        editor.cursor = Position::new(0, 3);
        editor.scroll(&buffer);
        assert_eq!(editor.render_column, 12);
        assert_eq!(editor.viewport.left_column, 5);
    }
}
