//! Anchor/head selection
//!
//! The anchor stays fixed while the head follows the edit cursor. Nothing
//! orders the two endpoints, so consumers go through [`Selection::start`] and
//! [`Selection::end`] (or [`Selection::range`]) before acting.

use super::cursor::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Moving endpoint, kept equal to the edit cursor while selecting
    pub head: Position,
    pub active: bool,
}

impl Selection {
    /// An active selection between two positions
    pub fn new(anchor: Position, head: Position) -> Self {
        Self {
            anchor,
            head,
            active: true,
        }
    }

    /// Begin a selection at `pos` unless one is already active
    pub fn start_at(&mut self, pos: Position) {
        if !self.active {
            self.anchor = pos;
            self.head = pos;
            self.active = true;
        }
    }

    /// Move the head; an empty result deactivates the selection
    pub fn extend_to(&mut self, pos: Position) {
        self.head = pos;
        if self.anchor == self.head {
            self.active = false;
        }
    }

    /// Replace both endpoints with a normalized range, keeping the
    /// orientation (a reversed selection stays reversed)
    pub fn set_range(&mut self, start: Position, end: Position) {
        if self.is_reversed() {
            self.anchor = end;
            self.head = start;
        } else {
            self.anchor = start;
            self.head = end;
        }
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Active and non-empty
    pub fn is_usable(&self) -> bool {
        self.active && !self.is_empty()
    }

    /// Get the start position (minimum of anchor and head)
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Get the end position (maximum of anchor and head)
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    pub fn range(&self) -> (Position, Position) {
        (self.start(), self.end())
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    /// Lines touched by the selection
    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.start().line..=self.end().line
    }

    /// Shift both endpoints vertically
    pub(crate) fn shift_lines(&mut self, delta: isize) {
        self.anchor.line = self.anchor.line.saturating_add_signed(delta);
        self.head.line = self.head.line.saturating_add_signed(delta);
    }
}
