//! Selection-driven block operations
//!
//! Moving, indenting and auto-selecting text. Every operation normalizes the
//! anchor/head pair first and leaves the edit cursor on the selection head.

use std::ops::RangeInclusive;

use super::{AppModel, EditError, EditMode, Position, Selection};
use crate::messages::Direction;
use crate::util::leading_spaces;

/// Closing delimiter for an opener recognised by
/// [`AppModel::select_inside_delimiters`]
pub(crate) fn delimiter_pair(ch: u8) -> Option<u8> {
    match ch {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'<' => Some(b'>'),
        b'"' => Some(b'"'),
        b'\'' => Some(b'\''),
        _ => None,
    }
}

/// Matching close bracket after `open_at`, counting nesting depth
fn matching_close(text: &[u8], open_at: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 1usize;
    for (i, &ch) in text.iter().enumerate().skip(open_at + 1) {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Next unescaped `quote` after `open_at`
fn next_quote(text: &[u8], open_at: usize, quote: u8) -> Option<usize> {
    let mut escaped = false;
    for (i, &ch) in text.iter().enumerate().skip(open_at + 1) {
        if escaped {
            escaped = false;
        } else if ch == b'\\' {
            escaped = true;
        } else if ch == quote {
            return Some(i);
        }
    }
    None
}

/// Shift a column by the spaces added (positive) or removed (negative) at
/// the start of its row. Column 0 stays put.
fn shift_column(column: usize, delta: isize) -> usize {
    if column == 0 {
        0
    } else {
        column.saturating_add_signed(delta)
    }
}

impl AppModel {
    /// Normalized start at column 0 and end at the end of its row
    pub fn is_full_line_selection(&self) -> bool {
        if !self.editor.selection.active {
            return false;
        }
        let (start, end) = self.editor.selection.range();
        end.line < self.buffer.len()
            && start.column == 0
            && end.column == self.buffer.row_len(end.line)
    }

    /// Every selected row has a space to remove: before the start column on
    /// the first row, at column 0 on the others
    pub fn can_shift_left(&self) -> bool {
        let Ok((start, end)) = self.selection_bounds() else {
            return false;
        };
        (start.line..=end.line).all(|line| {
            let text = self.buffer.row(line).map(|r| r.text()).unwrap_or_default();
            let at = if line == start.line {
                start.column.checked_sub(1)
            } else {
                Some(0)
            };
            at.and_then(|at| text.get(at)) == Some(&b' ')
        })
    }

    /// Move the selected block one row up or down, or one column left or
    /// right. Fails without touching the buffer when the move is impossible.
    pub fn move_selection(&mut self, direction: Direction) -> Result<(), EditError> {
        let (start, end) = self.selection_bounds()?;

        match direction {
            Direction::Up | Direction::Down => {
                if !self.is_full_line_selection() {
                    return Err(EditError::NotFullLines);
                }
                if direction == Direction::Up {
                    if start.line == 0 {
                        return Err(EditError::AtTop);
                    }
                    self.buffer.move_row(start.line - 1, end.line);
                } else {
                    if end.line + 1 >= self.buffer.len() {
                        return Err(EditError::AtBottom);
                    }
                    self.buffer.move_row(end.line + 1, start.line);
                }
                self.editor.selection.shift_lines(direction.delta());
            }
            Direction::Right => {
                self.buffer.insert_char(start.line, start.column, b' ');
                for line in start.line + 1..=end.line {
                    self.buffer.insert_char(line, 0, b' ');
                }
                let new_end = if start.line == end.line {
                    Position::new(end.line, end.column + 1)
                } else {
                    Position::new(end.line, shift_column(end.column, 1))
                };
                self.editor
                    .selection
                    .set_range(Position::new(start.line, start.column + 1), new_end);
            }
            Direction::Left => {
                if !self.can_shift_left() {
                    return Err(EditError::CannotShiftLeft);
                }
                self.buffer.delete_char(start.line, start.column - 1);
                for line in start.line + 1..=end.line {
                    self.buffer.delete_char(line, 0);
                }
                let new_end = if start.line == end.line {
                    Position::new(end.line, end.column - 1)
                } else {
                    Position::new(end.line, shift_column(end.column, -1))
                };
                self.editor
                    .selection
                    .set_range(Position::new(start.line, start.column - 1), new_end);
            }
        }

        self.editor.cursor = self.editor.selection.head;
        Ok(())
    }

    /// Prefix every selected line with one tab stop of spaces
    pub fn indent_selection(&mut self) -> Result<(), EditError> {
        let (start, end) = self.selection_bounds()?;
        let tab_stop = self.buffer.tab_stop();
        let pad = vec![b' '; tab_stop];
        for line in start.line..=end.line {
            self.buffer.replace_range(line, 0, 0, &pad);
        }

        let delta = tab_stop as isize;
        self.editor.selection.set_range(
            Position::new(start.line, shift_column(start.column, delta)),
            Position::new(end.line, shift_column(end.column, delta)),
        );
        self.editor.cursor = self.editor.selection.head;
        Ok(())
    }

    /// Remove up to one tab stop of leading spaces from every selected line
    pub fn outdent_selection(&mut self) -> Result<(), EditError> {
        let (start, end) = self.selection_bounds()?;
        let tab_stop = self.buffer.tab_stop();
        let mut start_removed = 0;
        let mut end_removed = 0;
        for line in start.line..=end.line {
            let removed = self
                .buffer
                .row(line)
                .map_or(0, |r| leading_spaces(r.text()))
                .min(tab_stop);
            if removed > 0 {
                self.buffer.replace_range(line, 0, removed, b"");
            }
            if line == start.line {
                start_removed = removed;
            }
            if line == end.line {
                end_removed = removed;
            }
        }

        self.editor.selection.set_range(
            Position::new(start.line, start.column.saturating_sub(start_removed)),
            Position::new(end.line, end.column.saturating_sub(end_removed)),
        );
        self.editor.cursor = self.editor.selection.head;
        Ok(())
    }

    // =========================================================================
    // Auto-selection
    // =========================================================================

    /// Select the current row without leading and trailing whitespace.
    /// Returns the selected column range.
    pub fn select_row_text(&mut self) -> Result<(usize, usize), EditError> {
        let line = self.editor.cursor.line;
        let text = self.buffer.row(line).ok_or(EditError::NoLine)?.text();
        if text.is_empty() {
            return Err(EditError::EmptyLine);
        }
        let start = text
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .ok_or(EditError::WhitespaceLine)?;
        let end = text
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(text.len(), |i| i + 1);

        self.editor.selection = Selection::new(Position::new(line, end), Position::new(line, start));
        self.editor.cursor = Position::new(line, start);
        self.editor.mode = EditMode::Selecting;
        Ok((start, end))
    }

    /// Select the interior of the nearest bracket or quote pair around the
    /// cursor on the current row. Returns the opening delimiter.
    pub fn select_inside_delimiters(&mut self) -> Result<u8, EditError> {
        let Position { line, column } = self.editor.cursor;
        let text = self.buffer.row(line).ok_or(EditError::NoLine)?.text();
        if text.is_empty() {
            return Err(EditError::EmptyLine);
        }

        let column = column.min(text.len());
        let found = (0..column).rev().find_map(|left| {
            let open = text[left];
            let close = delimiter_pair(open)?;
            let right = if open == close {
                next_quote(text, left, close)
            } else {
                matching_close(text, left, open, close)
            }?;
            (left < column && column <= right && right - left > 1).then_some((left, right, open))
        });
        let (left, right, open) = found.ok_or(EditError::NoDelimiters)?;

        self.editor.selection = Selection::new(Position::new(line, left + 1), Position::new(line, right));
        self.editor.cursor = self.editor.selection.head;
        self.editor.mode = EditMode::Selecting;
        Ok(open)
    }

    /// Shift-Up/Down: grow or shrink a whole-line selection from the anchor
    /// line to the cursor line. Returns the selected lines, or `None` when
    /// the head came back to the anchor line and the selection was dropped.
    pub fn quick_select_line(
        &mut self,
        direction: Direction,
    ) -> Result<Option<RangeInclusive<usize>>, EditError> {
        let line = self.editor.cursor.line;
        if line >= self.buffer.len() {
            return Err(EditError::NoLine);
        }
        let target = match direction {
            Direction::Up => line.checked_sub(1).ok_or(EditError::AtTop)?,
            _ => {
                if line + 1 >= self.buffer.len() {
                    return Err(EditError::AtBottom);
                }
                line + 1
            }
        };

        let anchor_line = if self.editor.selection.active {
            self.editor.selection.anchor.line.min(self.buffer.len() - 1)
        } else {
            line
        };
        if target == anchor_line {
            self.editor.selection.clear();
            self.editor.cursor = Position::new(target, 0);
            return Ok(None);
        }

        let selection = if target < anchor_line {
            Selection::new(
                Position::new(anchor_line, self.buffer.row_len(anchor_line)),
                Position::new(target, 0),
            )
        } else {
            Selection::new(
                Position::new(anchor_line, 0),
                Position::new(target, self.buffer.row_len(target)),
            )
        };
        self.editor.selection = selection;
        self.editor.cursor = selection.head;
        Ok(Some(selection.lines()))
    }

    /// Shift-Left/Right: move the cursor one character (wrapping across rows)
    /// and drag the selection head along. Returns whether a selection remains.
    pub fn quick_select_char(&mut self, direction: Direction) -> Result<bool, EditError> {
        let Position { line, column } = self.editor.cursor;
        if line >= self.buffer.len() {
            return Err(EditError::EmptyBuffer);
        }
        self.editor.selection.start_at(self.editor.cursor);

        let cursor = match direction {
            Direction::Left | Direction::Up if column > 0 => Position::new(line, column - 1),
            Direction::Left | Direction::Up if line > 0 => {
                Position::new(line - 1, self.buffer.row_len(line - 1))
            }
            Direction::Right | Direction::Down if column < self.buffer.row_len(line) => {
                Position::new(line, column + 1)
            }
            Direction::Right | Direction::Down if line + 1 < self.buffer.len() => {
                Position::new(line + 1, 0)
            }
            _ => self.editor.cursor,
        };
        self.editor.cursor = cursor;
        self.editor.selection.extend_to(cursor);
        Ok(self.editor.selection.active)
    }

    /// Select the whole buffer and enter Selecting mode
    pub fn select_all(&mut self) -> Result<(), EditError> {
        let last = self.buffer.len().checked_sub(1).ok_or(EditError::EmptyBuffer)?;
        let end = Position::new(last, self.buffer.row_len(last));
        if end == Position::zero() {
            return Err(EditError::EmptyBuffer);
        }
        self.editor.selection = Selection::new(Position::zero(), end);
        self.editor.cursor = end;
        self.editor.mode = EditMode::Selecting;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &str) -> AppModel {
        AppModel::with_text(text)
    }

    fn select(m: &mut AppModel, anchor: (usize, usize), head: (usize, usize)) {
        m.editor.selection = Selection::new(
            Position::new(anchor.0, anchor.1),
            Position::new(head.0, head.1),
        );
        m.editor.cursor = m.editor.selection.head;
    }

    #[test]
    fn test_full_line_detection() {
        let mut m = model("abc\ndef");
        select(&mut m, (1, 3), (0, 0));
        assert!(m.is_full_line_selection());
        select(&mut m, (0, 1), (1, 3));
        assert!(!m.is_full_line_selection());
    }

    #[test]
    fn test_move_block_up_and_down() {
        let mut m = model("a\nb\nc\nd");
        select(&mut m, (1, 0), (2, 1));
        m.move_selection(Direction::Up).unwrap();
        assert_eq!(m.buffer.lines(), vec!["b", "c", "a", "d"]);
        assert_eq!(m.editor.selection.range(), (Position::new(0, 0), Position::new(1, 1)));
        assert_eq!(m.editor.cursor, Position::new(1, 1));
        assert_eq!(m.move_selection(Direction::Up), Err(EditError::AtTop));

        m.move_selection(Direction::Down).unwrap();
        m.move_selection(Direction::Down).unwrap();
        assert_eq!(m.buffer.lines(), vec!["a", "d", "b", "c"]);
        assert_eq!(m.move_selection(Direction::Down), Err(EditError::AtBottom));
        assert!(m.buffer.rows().iter().enumerate().all(|(i, r)| r.index() == i));
    }

    #[test]
    fn test_vertical_move_needs_full_lines() {
        let mut m = model("abc\ndef\nghi");
        select(&mut m, (1, 1), (1, 3));
        assert_eq!(m.move_selection(Direction::Up), Err(EditError::NotFullLines));
        assert_eq!(m.buffer.lines(), vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn test_move_right_then_left() {
        let mut m = model("ab cd\n ef");
        select(&mut m, (0, 3), (1, 3));
        m.move_selection(Direction::Right).unwrap();
        assert_eq!(m.buffer.lines(), vec!["ab  cd", "  ef"]);
        assert_eq!(m.editor.selection.range(), (Position::new(0, 4), Position::new(1, 4)));

        m.move_selection(Direction::Left).unwrap();
        m.move_selection(Direction::Left).unwrap();
        assert_eq!(m.buffer.lines(), vec!["abcd", "ef"]);
        assert_eq!(m.move_selection(Direction::Left), Err(EditError::CannotShiftLeft));
        assert_eq!(m.buffer.lines(), vec!["abcd", "ef"]);
    }

    #[test]
    fn test_indent_and_outdent() {
        let mut m = model("a\n  b\nc");
        select(&mut m, (0, 0), (1, 3));
        m.indent_selection().unwrap();
        assert_eq!(m.buffer.lines(), vec!["    a", "      b", "c"]);
        assert_eq!(m.editor.selection.range(), (Position::new(0, 0), Position::new(1, 7)));

        m.outdent_selection().unwrap();
        m.outdent_selection().unwrap();
        assert_eq!(m.buffer.lines(), vec!["a", "b", "c"]);
        assert_eq!(m.editor.selection.range(), (Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_select_row_text() {
        let mut m = model("  hello world \t\n\n \t ");
        assert_eq!(m.select_row_text(), Ok((2, 13)));
        assert_eq!(m.editor.selection.range(), (Position::new(0, 2), Position::new(0, 13)));
        assert_eq!(m.editor.cursor, Position::new(0, 2));
        assert_eq!(m.editor.mode, EditMode::Selecting);

        m.editor.cursor = Position::new(1, 0);
        assert_eq!(m.select_row_text(), Err(EditError::EmptyLine));
        m.editor.cursor = Position::new(2, 0);
        assert_eq!(m.select_row_text(), Err(EditError::WhitespaceLine));
        m.editor.cursor = Position::new(3, 0);
        assert_eq!(m.select_row_text(), Err(EditError::NoLine));
    }

    #[test]
    fn test_select_inside_delimiters() {
        let mut m = model("call(a, [b, c], \"x\\\"y\")");
        m.editor.cursor = Position::new(0, 10);
        assert_eq!(m.select_inside_delimiters(), Ok(b'['));
        assert_eq!(m.editor.selection.range(), (Position::new(0, 9), Position::new(0, 13)));

        m.editor.cursor = Position::new(0, 6);
        assert_eq!(m.select_inside_delimiters(), Ok(b'('));
        assert_eq!(m.editor.selection.range(), (Position::new(0, 5), Position::new(0, 22)));

        m.editor.cursor = Position::new(0, 19);
        assert_eq!(m.select_inside_delimiters(), Ok(b'"'));
        assert_eq!(m.editor.selection.range(), (Position::new(0, 17), Position::new(0, 21)));
    }

    #[test]
    fn test_select_inside_adjacent_pair_fails() {
        let mut m = model("f() x");
        m.editor.cursor = Position::new(0, 2);
        assert_eq!(m.select_inside_delimiters(), Err(EditError::NoDelimiters));
        m.editor.cursor = Position::new(0, 4);
        assert_eq!(m.select_inside_delimiters(), Err(EditError::NoDelimiters));
    }

    #[test]
    fn test_quick_select_line_both_ways() {
        let mut m = model("one\ntwo\nthree");
        m.editor.cursor = Position::new(1, 1);
        assert_eq!(m.quick_select_line(Direction::Down), Ok(Some(1..=2)));
        assert_eq!(m.editor.selection.range(), (Position::new(1, 0), Position::new(2, 5)));
        assert_eq!(m.quick_select_line(Direction::Down), Err(EditError::AtBottom));

        assert_eq!(m.quick_select_line(Direction::Up), Ok(None));
        assert!(!m.editor.selection.active);

        m.editor.cursor = Position::new(1, 0);
        assert_eq!(m.quick_select_line(Direction::Up), Ok(Some(0..=1)));
        assert_eq!(m.editor.selection.range(), (Position::new(0, 0), Position::new(1, 3)));
        assert!(m.is_full_line_selection());
    }

    #[test]
    fn test_quick_select_char_wraps_and_clears() {
        let mut m = model("ab\ncd");
        m.editor.cursor = Position::new(0, 2);
        assert_eq!(m.quick_select_char(Direction::Right), Ok(true));
        assert_eq!(m.editor.cursor, Position::new(1, 0));
        assert_eq!(m.selected_text().unwrap(), b"\n".to_vec());
        assert_eq!(m.quick_select_char(Direction::Left), Ok(false));
        assert!(!m.editor.selection.active);
    }

    #[test]
    fn test_select_all() {
        let mut m = model("ab\ncd");
        m.select_all().unwrap();
        assert_eq!(m.selected_text().unwrap(), b"ab\ncd".to_vec());
        assert_eq!(model("").select_all(), Err(EditError::EmptyBuffer));
    }
}
