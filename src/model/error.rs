//! Refusals reported by editing commands
//!
//! None of these are failures of the editor; each one means the command was
//! rejected without touching the buffer. The `Display` text is what the
//! status bar shows.

/// Why an editing command did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// No active selection
    NoSelection,
    /// The selection covers nothing
    EmptySelection,
    /// Block moves need whole lines selected
    NotFullLines,
    /// Selection already touches the first row
    AtTop,
    /// Selection already touches the last row
    AtBottom,
    /// Some selected line has no space to remove
    CannotShiftLeft,
    /// Cursor is past the last row
    NoLine,
    /// Buffer has no rows
    EmptyBuffer,
    EmptyLine,
    WhitespaceLine,
    /// Cursor is not inside a delimiter pair
    NoDelimiters,
    NothingToUndo,
    NothingToRedo,
    /// Line number outside the buffer
    InvalidLine { max: usize },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSelection => write!(f, "No selection"),
            Self::EmptySelection => write!(f, "Selection is empty"),
            Self::NotFullLines => write!(f, "Can only move full lines"),
            Self::AtTop => write!(f, "Cannot move selection up"),
            Self::AtBottom => write!(f, "Cannot move selection down"),
            Self::CannotShiftLeft => write!(f, "Cannot move selection left"),
            Self::NoLine => write!(f, "No line at cursor"),
            Self::EmptyBuffer => write!(f, "No text to select"),
            Self::EmptyLine => write!(f, "Line is empty"),
            Self::WhitespaceLine => write!(f, "Line contains only whitespace"),
            Self::NoDelimiters => write!(f, "No enclosing delimiters found"),
            Self::NothingToUndo => write!(f, "Nothing to undo"),
            Self::NothingToRedo => write!(f, "Nothing to redo"),
            Self::InvalidLine { max } => write!(f, "Invalid line number (1-{})", max),
        }
    }
}

impl std::error::Error for EditError {}
