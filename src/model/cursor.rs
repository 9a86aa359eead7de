//! Positions in the buffer

/// A position in the buffer (line and column, both 0-indexed).
///
/// `column` is a byte index into the row's text, not a render column. It may
/// equal the row length (end of line), and `line` may equal the number of
/// rows (the pending row past the end of the buffer).
///
/// Ordering is row-major: earlier line wins, then smaller column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}
