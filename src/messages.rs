//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::PromptKind;

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// -1 for Up/Left, +1 for Down/Right
    pub fn delta(self) -> isize {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Editor-specific messages (cursor movement, viewport scrolling)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    /// Move cursor in a direction (wraps across line ends)
    MoveCursor(Direction),
    /// Move cursor to start of line (Home key)
    MoveCursorLineStart,
    /// Move cursor to end of line (End key)
    MoveCursorLineEnd,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Move to a 1-based line number
    JumpToLine(usize),
}

/// Document-specific messages (text editing, clipboard, undo/redo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    /// Insert a byte at the cursor (auto-pairs brackets and quotes)
    InsertChar(u8),
    /// Split the line at the cursor, carrying indentation forward
    InsertNewline,
    /// Insert spaces up to one tab stop
    InsertTab,
    /// Backspace, with smart outdent on leading indentation
    DeleteBackward,
    /// Delete the character under the cursor
    DeleteForward,
    /// Copy the current line
    CopyLine,
    /// Cut the current line
    CutLine,
    /// Paste the clipboard at the cursor and select it
    Paste,
    /// Undo last edit
    Undo,
    /// Redo last undone edit
    Redo,
}

/// Selection messages (anchor/head selection and block operations)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMsg {
    /// Anchor a selection at the cursor (Ctrl-B)
    StartAtCursor,
    /// Extend the anchored selection to the cursor and enter Selecting (Ctrl-E)
    EndAtCursor,
    /// Move the cursor and drag the selection head along
    Extend(Direction),
    /// Shift-Up/Down: select whole lines
    QuickSelectLine(Direction),
    /// Shift-Left/Right: select characters
    QuickSelectChar(Direction),
    /// Select the whole buffer
    SelectAll,
    /// Select the current line without surrounding whitespace
    SelectRowText,
    /// Select the interior of the enclosing brackets or quotes
    SelectInsideDelimiters,
    /// Move the selected block one row or one column
    Move(Direction),
    /// Indent selected lines by one tab stop
    Indent,
    /// Outdent selected lines by one tab stop
    Outdent,
    /// Copy the selection to the clipboard
    Copy,
    /// Copy then delete the selection
    Cut,
    /// Delete the selection
    Delete,
    /// Delete the selection and type a character in its place
    Replace(u8),
    /// Drop the selection and return to Normal mode
    Cancel,
}

/// Prompt messages (search, save as, jump to line, replace)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptMsg {
    /// Open a prompt
    Open(PromptKind),
    /// Type into the prompt input
    InsertChar(u8),
    /// Delete the last input character
    DeleteBackward,
    /// Search: next/previous match
    Navigate(Direction),
    /// Search: start replace-all with the current query
    ReplaceAll,
    /// Enter
    Confirm,
    /// Escape
    Cancel,
}

/// Application-level messages (file operations, screen)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Terminal resized (rows, columns)
    Resize(usize, usize),
    /// Save current file (asks for a name when there is none)
    SaveFile,
    /// Ask for a new name, then save
    SaveFileAs,
    /// File save completed
    SaveCompleted {
        path: PathBuf,
        result: Result<usize, String>,
    },
    /// Start an empty unnamed buffer
    NewFile,
    /// Open the file browser
    OpenFile,
    /// Load a file chosen by the file browser
    LoadFile(PathBuf),
    /// File load completed; `None` contents means the file does not exist yet
    FileLoaded {
        path: PathBuf,
        result: Result<Option<Vec<u8>>, String>,
    },
    /// Quit the application
    Quit,
    /// Toggle the line number gutter
    ToggleLineNumbers,
    /// Show the key reference
    ShowHelp,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Editor messages (cursor, viewport)
    Editor(EditorMsg),
    /// Document messages (text editing)
    Document(DocumentMsg),
    /// Selection messages
    Selection(SelectionMsg),
    /// Prompt messages
    Prompt(PromptMsg),
    /// App messages (file I/O, screen)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create a cursor movement message
    pub fn move_cursor(direction: Direction) -> Self {
        Msg::Editor(EditorMsg::MoveCursor(direction))
    }

    /// Create an insert character message
    pub fn insert_char(ch: u8) -> Self {
        Msg::Document(DocumentMsg::InsertChar(ch))
    }

    /// Create a resize message
    pub fn resize(rows: usize, columns: usize) -> Self {
        Msg::App(AppMsg::Resize(rows, columns))
    }
}
