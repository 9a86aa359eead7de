//! UI state - status message, prompts and confirmation counters

use std::time::{Duration, Instant};

use super::cursor::Position;

/// How long a status message stays visible
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Prompt System
// ============================================================================

/// Identifies which prompt is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Incremental search (Ctrl+F)
    Search,
    /// File name for Save As (Ctrl+Y, or Ctrl+S on an unnamed buffer)
    SaveAs,
    /// Line number (Ctrl+J)
    JumpToLine,
    /// Replacement text for replace-all (Ctrl+R inside search)
    ReplaceWith,
    /// Single-key confirmation of replace-all
    ConfirmReplace,
}

/// Search progress, kept so Escape can put everything back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub saved_cursor: Position,
    pub saved_top_line: usize,
    pub saved_left_column: usize,
    /// Row of the last match, if any
    pub last_match: Option<usize>,
    /// Search towards the end of the buffer
    pub forward: bool,
}

/// Per-kind prompt data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Search(SearchState),
    SaveAs,
    JumpToLine,
    ReplaceWith {
        search: SearchState,
        needle: String,
    },
    ConfirmReplace {
        search: SearchState,
        needle: String,
        replacement: String,
        count: usize,
    },
}

impl Prompt {
    /// Get the prompt kind
    pub fn kind(&self) -> PromptKind {
        match self {
            Prompt::Search(_) => PromptKind::Search,
            Prompt::SaveAs => PromptKind::SaveAs,
            Prompt::JumpToLine => PromptKind::JumpToLine,
            Prompt::ReplaceWith { .. } => PromptKind::ReplaceWith,
            Prompt::ConfirmReplace { .. } => PromptKind::ConfirmReplace,
        }
    }

    /// Label shown before the input
    pub fn label(&self) -> String {
        match self {
            Prompt::Search(_) => "Search (ESC/Arrows/Enter, Ctrl-R replace): ".to_string(),
            Prompt::SaveAs => "Save as (ESC to cancel): ".to_string(),
            Prompt::JumpToLine => "Jump to line (ESC to cancel): ".to_string(),
            Prompt::ReplaceWith { .. } => "Replace with (ESC to cancel): ".to_string(),
            Prompt::ConfirmReplace {
                needle,
                replacement,
                count,
                ..
            } => format!(
                "Replace all {} whole-word occurrence(s) of '{}' with '{}'? (y/n) ",
                count, needle, replacement
            ),
        }
    }
}

/// An open prompt with its input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub prompt: Prompt,
    pub input: String,
}

impl PromptState {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            input: String::new(),
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.prompt.kind()
    }
}

// ============================================================================
// Confirmation
// ============================================================================

/// Destructive commands guarded by the unsaved-changes warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    Quit,
    NewFile,
    OpenFile,
}

impl GuardedAction {
    pub fn key_hint(self) -> &'static str {
        match self {
            GuardedAction::Quit => "Ctrl-Q",
            GuardedAction::NewFile => "Ctrl-T",
            GuardedAction::OpenFile => "Ctrl-O",
        }
    }
}

/// Status message, active prompt and confirmation state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Message displayed in the status bar
    pub status_message: String,
    /// When the status message was set
    pub status_time: Instant,
    /// Currently active prompt (if any)
    pub prompt: Option<PromptState>,
    /// Show the line number gutter
    pub line_numbers: bool,
    /// Guarded action awaiting repeats, and how many are still needed
    pub pending_confirm: Option<(GuardedAction, usize)>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            status_message: String::new(),
            status_time: Instant::now(),
            prompt: None,
            line_numbers: true,
            pending_confirm: None,
        }
    }

    /// Create a UI state with an initial status message
    pub fn with_status(message: impl Into<String>) -> Self {
        let mut ui = Self::new();
        ui.set_status(message);
        ui
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_time = Instant::now();
    }

    /// Status message if it has not timed out yet
    pub fn visible_status(&self) -> Option<&str> {
        (!self.status_message.is_empty() && self.status_time.elapsed() < STATUS_TIMEOUT)
            .then_some(self.status_message.as_str())
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(PromptState::new(prompt));
    }

    pub fn close_prompt(&mut self) -> Option<PromptState> {
        self.prompt.take()
    }

    /// Text for the message bar: the prompt with its input, or the status
    pub fn message_line(&self) -> String {
        match &self.prompt {
            Some(state) => format!("{}{}", state.prompt.label(), state.input),
            None => self.visible_status().unwrap_or_default().to_string(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lifecycle() {
        let mut ui = UiState::new();
        assert!(!ui.has_prompt());
        ui.open_prompt(Prompt::JumpToLine);
        ui.prompt.as_mut().unwrap().input.push_str("12");
        assert_eq!(ui.message_line(), "Jump to line (ESC to cancel): 12");
        let closed = ui.close_prompt().unwrap();
        assert_eq!(closed.kind(), PromptKind::JumpToLine);
        assert!(!ui.has_prompt());
    }

    #[test]
    fn test_status_message() {
        let ui = UiState::with_status("Saved");
        assert_eq!(ui.visible_status(), Some("Saved"));
        assert_eq!(ui.message_line(), "Saved");
    }
}
