//! Text editing operations on the model
//!
//! These work on the single cursor and the anchor/head selection and keep
//! both inside the buffer. Snapshots and status messages are the caller's
//! business (see `update::document`).

use super::{AppModel, EditError, Position};
use crate::util::leading_spaces;

/// Closing partner of an auto-paired opener
pub fn closing_pair(ch: u8) -> Option<u8> {
    match ch {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'"' => Some(b'"'),
        b'\'' => Some(b'\''),
        _ => None,
    }
}

impl AppModel {
    /// Insert a byte at the cursor; openers get their closer right after
    /// the cursor
    pub fn insert_char(&mut self, ch: u8) {
        let Position { line, column } = self.editor.cursor;
        if line == self.buffer.len() {
            self.buffer.insert_row(line, b"");
        }
        self.buffer.insert_char(line, column, ch);
        self.editor.cursor.column += 1;
        if let Some(close) = closing_pair(ch) {
            self.buffer.insert_char(line, column + 1, close);
        }
    }

    /// Split the line at the cursor.
    ///
    /// At column 0 an empty row is opened above and the line moves down.
    /// Otherwise the tail moves to a new row. Either way the row below the
    /// cursor gets the split line's leading spaces prepended and the cursor
    /// lands after them.
    pub fn insert_newline(&mut self) {
        let Position { line, column } = self.editor.cursor;
        if line >= self.buffer.len() {
            self.buffer.insert_row(line, b"");
            self.editor.cursor = Position::new(line + 1, 0);
            return;
        }

        let indent = self.buffer.row(line).map_or(0, |r| leading_spaces(r.text()));
        let pad = vec![b' '; indent];
        if column == 0 {
            self.buffer.insert_row(line, b"");
            if indent > 0 {
                self.buffer.replace_range(line + 1, 0, 0, &pad);
            }
        } else {
            let mut tail = pad;
            tail.extend(self.buffer.truncate_row(line, column));
            self.buffer.insert_row(line + 1, &tail);
        }
        self.editor.cursor = Position::new(line + 1, indent);
    }

    /// Backspace without smart outdent.
    ///
    /// Joins with the previous row at column 0. Between an auto-paired
    /// opener and its closer both are removed, so this undoes
    /// [`AppModel::insert_char`] exactly.
    pub fn delete_char_before_cursor(&mut self) {
        let Position { line, column } = self.editor.cursor;
        if line >= self.buffer.len() || (line == 0 && column == 0) {
            return;
        }

        let column = column.min(self.buffer.row_len(line));
        self.editor.cursor.column = column;
        if column > 0 {
            let text = self.buffer.row(line).map(|r| r.text()).unwrap_or_default();
            let paired = text
                .get(column - 1)
                .and_then(|&ch| closing_pair(ch))
                .is_some_and(|close| text.get(column) == Some(&close));
            if paired {
                self.buffer.delete_char(line, column);
            }
            self.buffer.delete_char(line, column - 1);
            self.editor.cursor.column -= 1;
        } else {
            self.join_with_previous(line);
        }
    }

    /// Remove spaces back to the previous tab stop when the cursor sits on
    /// the first non-space column of an indented line. Returns false when
    /// the cursor is not in that position.
    pub fn smart_outdent(&mut self) -> bool {
        let Position { line, column } = self.editor.cursor;
        let Some(row) = self.buffer.row(line) else {
            return false;
        };
        let first = leading_spaces(row.text());
        if first == 0 || column != first {
            return false;
        }
        let tab_stop = self.buffer.tab_stop();
        let target = (first - 1) / tab_stop * tab_stop;
        self.buffer.replace_range(line, 0, first - target, b"");
        self.editor.cursor.column = target;
        true
    }

    /// Delete key: remove the character under the cursor, or join the next
    /// row at the end of a line
    pub fn delete_char_at_cursor(&mut self) {
        let Position { line, column } = self.editor.cursor;
        if line >= self.buffer.len() {
            return;
        }
        if column < self.buffer.row_len(line) {
            self.buffer.delete_char(line, column);
        } else if line + 1 < self.buffer.len() {
            self.join_with_previous(line + 1);
        }
    }

    /// Insert spaces up to the next tab stop
    pub fn insert_tab(&mut self) {
        let tab_stop = self.buffer.tab_stop();
        let pad = tab_stop - self.editor.cursor.column % tab_stop;
        for _ in 0..pad {
            self.insert_char(b' ');
        }
    }

    fn join_with_previous(&mut self, line: usize) {
        let prev_len = self.buffer.row_len(line - 1);
        let text = self
            .buffer
            .row(line)
            .map(|r| r.text().to_vec())
            .unwrap_or_default();
        self.buffer.append_bytes(line - 1, &text);
        self.buffer.delete_row(line);
        self.editor.cursor = Position::new(line - 1, prev_len);
    }

    // =========================================================================
    // Selection consumers
    // =========================================================================

    /// Normalized selection clamped to the buffer contents
    pub fn selection_bounds(&self) -> Result<(Position, Position), EditError> {
        let selection = &self.editor.selection;
        if !selection.active {
            return Err(EditError::NoSelection);
        }
        let last = self.buffer.len().checked_sub(1).ok_or(EditError::EmptySelection)?;
        let clamp = |p: Position| {
            if p.line > last {
                Position::new(last, self.buffer.row_len(last))
            } else {
                Position::new(p.line, p.column.min(self.buffer.row_len(p.line)))
            }
        };
        let (start, end) = (clamp(selection.start()), clamp(selection.end()));
        if start == end {
            return Err(EditError::EmptySelection);
        }
        Ok((start, end))
    }

    /// Selected text: lines joined by `\n`, no trailing newline
    pub fn selected_text(&self) -> Result<Vec<u8>, EditError> {
        let (start, end) = self.selection_bounds()?;
        let text = |line: usize| self.buffer.row(line).map(|r| r.text()).unwrap_or_default();

        if start.line == end.line {
            return Ok(text(start.line)[start.column..end.column].to_vec());
        }
        let mut out = text(start.line)[start.column..].to_vec();
        out.push(b'\n');
        for line in start.line + 1..end.line {
            out.extend_from_slice(text(line));
            out.push(b'\n');
        }
        out.extend_from_slice(&text(end.line)[..end.column]);
        Ok(out)
    }

    /// Delete the selected range and put the cursor at its start.
    ///
    /// An empty selection is only deactivated.
    pub fn delete_selection(&mut self) -> Result<(), EditError> {
        let (start, end) = match self.selection_bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                self.editor.selection.clear();
                return Err(e);
            }
        };

        if start.line == end.line {
            self.buffer
                .replace_range(start.line, start.column, end.column - start.column, b"");
        } else {
            let suffix = self
                .buffer
                .row(end.line)
                .map(|r| r.text()[end.column..].to_vec())
                .unwrap_or_default();
            self.buffer.truncate_row(start.line, start.column);
            for line in (start.line + 1..=end.line).rev() {
                self.buffer.delete_row(line);
            }
            if !suffix.is_empty() {
                self.buffer.append_bytes(start.line, &suffix);
            }
        }

        self.editor.cursor = start;
        self.editor.selection.clear();
        Ok(())
    }

    /// Copy the selection to the clipboard and deactivate it; returns the
    /// copied length
    pub fn copy_selection(&mut self) -> Result<usize, EditError> {
        let text = self.selected_text()?;
        let len = text.len();
        self.clipboard = text;
        self.editor.selection.clear();
        Ok(len)
    }

    /// Copy then delete the selection
    pub fn cut_selection(&mut self) -> Result<usize, EditError> {
        let text = self.selected_text()?;
        let len = text.len();
        self.clipboard = text;
        self.delete_selection()?;
        Ok(len)
    }

    /// Copy the cursor's line (without its terminator)
    pub fn copy_line(&mut self) -> Result<(), EditError> {
        let row = self.buffer.row(self.editor.cursor.line).ok_or(EditError::NoLine)?;
        self.clipboard = row.text().to_vec();
        Ok(())
    }

    /// Copy then remove the cursor's line
    pub fn cut_line(&mut self) -> Result<(), EditError> {
        self.copy_line()?;
        let line = self.editor.cursor.line;
        self.buffer.delete_row(line);
        if self.buffer.is_empty() {
            self.editor.cursor = Position::zero();
        } else if line >= self.buffer.len() {
            let last = self.buffer.len() - 1;
            self.editor.cursor = Position::new(last, self.buffer.row_len(last));
        }
        self.editor.clamp_cursor(&self.buffer);
        Ok(())
    }

    /// Insert the clipboard at the cursor (replacing an active selection)
    /// and select what was pasted. Returns false when the clipboard is empty.
    pub fn paste(&mut self) -> bool {
        if self.clipboard.is_empty() {
            return false;
        }
        if self.editor.selection.is_usable() {
            let _ = self.delete_selection();
        }

        let start = self.editor.cursor;
        let clipboard = std::mem::take(&mut self.clipboard);
        for &byte in &clipboard {
            let Position { line, column } = self.editor.cursor;
            if byte == b'\n' {
                if column == 0 || line >= self.buffer.len() {
                    self.buffer.insert_row(line, b"");
                } else {
                    self.buffer.split_row(line, column);
                }
                self.editor.cursor = Position::new(line + 1, 0);
            } else {
                if line == self.buffer.len() {
                    self.buffer.insert_row(line, b"");
                }
                self.buffer.insert_char(line, column, byte);
                self.editor.cursor.column += 1;
            }
        }
        self.clipboard = clipboard;

        self.editor.selection.active = false;
        self.editor.selection.start_at(start);
        self.editor.selection.extend_to(self.editor.cursor);
        true
    }
}
