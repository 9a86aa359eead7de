//! Logical keys and their translation into messages
//!
//! The terminal front-end decodes escape sequences into [`Key`] values; this
//! module decides what each key means given the open prompt and the editing
//! mode.

use crate::messages::{AppMsg, Direction, DocumentMsg, EditorMsg, Msg, PromptMsg, SelectionMsg};
use crate::model::{AppModel, PromptKind};

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII byte
    Char(u8),
    /// Control combination, by lowercase letter
    Ctrl(u8),
    /// Alt (meta) combination, by lowercase letter
    Alt(u8),
    Enter,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Escape,
    Arrow(Direction),
    ShiftArrow(Direction),
    AltArrow(Direction),
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Printable byte carried by the key, if any
    pub fn printable(self) -> Option<u8> {
        match self {
            Key::Char(ch) if (0x20..0x7f).contains(&ch) => Some(ch),
            _ => None,
        }
    }
}

/// Translate a key into the message it triggers, or `None` when the key
/// means nothing in the current state
pub fn handle_key(model: &AppModel, key: Key) -> Option<Msg> {
    if let Some(prompt) = &model.ui.prompt {
        return prompt_key(prompt.kind(), key);
    }
    if model.editor.is_selecting() {
        return selecting_key(model, key);
    }
    normal_key(model, key)
}

fn prompt_key(kind: PromptKind, key: Key) -> Option<Msg> {
    let msg = match key {
        Key::Escape => PromptMsg::Cancel,
        Key::Enter => PromptMsg::Confirm,
        Key::Backspace | Key::Delete | Key::Ctrl(b'h') => PromptMsg::DeleteBackward,
        Key::Arrow(direction) if kind == PromptKind::Search => PromptMsg::Navigate(direction),
        Key::Ctrl(b'r') if kind == PromptKind::Search => PromptMsg::ReplaceAll,
        _ => PromptMsg::InsertChar(key.printable()?),
    };
    Some(Msg::Prompt(msg))
}

fn selecting_key(model: &AppModel, key: Key) -> Option<Msg> {
    let msg = match key {
        Key::Escape => SelectionMsg::Cancel,
        Key::Tab => SelectionMsg::Indent,
        Key::Backspace => SelectionMsg::Outdent,
        Key::Delete => SelectionMsg::Delete,
        Key::Arrow(direction) => SelectionMsg::Extend(direction),
        Key::ShiftArrow(direction) if direction.is_vertical() => {
            SelectionMsg::QuickSelectLine(direction)
        }
        Key::ShiftArrow(direction) => SelectionMsg::QuickSelectChar(direction),
        Key::AltArrow(direction) => SelectionMsg::Move(direction),
        Key::Ctrl(b'w') => SelectionMsg::Copy,
        Key::Ctrl(b'k') => SelectionMsg::Cut,
        Key::ShiftTab => SelectionMsg::SelectInsideDelimiters,
        // Everything else behaves as in Normal mode
        _ => match key.printable() {
            Some(ch) => SelectionMsg::Replace(ch),
            None => return normal_key(model, key),
        },
    };
    Some(Msg::Selection(msg))
}

fn normal_key(model: &AppModel, key: Key) -> Option<Msg> {
    let usable = model.editor.selection.is_usable();
    let msg = match key {
        Key::Enter => Msg::Document(DocumentMsg::InsertNewline),
        Key::Tab => Msg::Document(DocumentMsg::InsertTab),
        Key::Backspace | Key::Ctrl(b'h') => Msg::Document(DocumentMsg::DeleteBackward),
        Key::Delete => Msg::Document(DocumentMsg::DeleteForward),

        Key::Ctrl(b'q') => Msg::App(AppMsg::Quit),
        Key::Ctrl(b's') => Msg::App(AppMsg::SaveFile),
        Key::Ctrl(b'y') => Msg::App(AppMsg::SaveFileAs),
        Key::Ctrl(b't') => Msg::App(AppMsg::NewFile),
        Key::Ctrl(b'o') => Msg::App(AppMsg::OpenFile),
        Key::Ctrl(b'n') => Msg::App(AppMsg::ToggleLineNumbers),
        Key::Ctrl(b'g') => Msg::App(AppMsg::ShowHelp),

        Key::Ctrl(b'w') => Msg::Document(DocumentMsg::CopyLine),
        Key::Ctrl(b'k') if usable => Msg::Selection(SelectionMsg::Cut),
        Key::Ctrl(b'k') => Msg::Document(DocumentMsg::CutLine),
        Key::Ctrl(b'u') => Msg::Document(DocumentMsg::Paste),
        Key::Ctrl(b'z') => Msg::Document(DocumentMsg::Undo),
        Key::Ctrl(b'r') => Msg::Document(DocumentMsg::Redo),

        Key::Ctrl(b'f') => Msg::Prompt(PromptMsg::Open(PromptKind::Search)),
        Key::Ctrl(b'j') => Msg::Prompt(PromptMsg::Open(PromptKind::JumpToLine)),

        Key::Ctrl(b'b') => Msg::Selection(SelectionMsg::StartAtCursor),
        Key::Ctrl(b'e') => Msg::Selection(SelectionMsg::EndAtCursor),
        Key::Ctrl(b'a') => Msg::Selection(SelectionMsg::SelectAll),
        Key::Alt(b'r') => Msg::Selection(SelectionMsg::SelectRowText),
        Key::ShiftTab => Msg::Selection(SelectionMsg::SelectInsideDelimiters),
        Key::Escape => Msg::Selection(SelectionMsg::Cancel),

        Key::Home | Key::Alt(b'b') => Msg::Editor(EditorMsg::MoveCursorLineStart),
        Key::End | Key::Alt(b'e') => Msg::Editor(EditorMsg::MoveCursorLineEnd),
        Key::PageUp => Msg::Editor(EditorMsg::PageUp),
        Key::PageDown => Msg::Editor(EditorMsg::PageDown),
        Key::Arrow(direction) => Msg::move_cursor(direction),
        Key::ShiftArrow(direction) if direction.is_vertical() => {
            Msg::Selection(SelectionMsg::QuickSelectLine(direction))
        }
        Key::ShiftArrow(direction) => Msg::Selection(SelectionMsg::QuickSelectChar(direction)),

        _ => {
            let ch = key.printable()?;
            if usable {
                Msg::Selection(SelectionMsg::Replace(ch))
            } else {
                Msg::insert_char(ch)
            }
        }
    };
    Some(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EditMode, Position, Selection};

    #[test]
    fn test_normal_mode_keys() {
        let model = AppModel::with_text("abc");
        assert_eq!(handle_key(&model, Key::Char(b'x')), Some(Msg::insert_char(b'x')));
        assert_eq!(
            handle_key(&model, Key::Ctrl(b'k')),
            Some(Msg::Document(DocumentMsg::CutLine))
        );
        assert_eq!(handle_key(&model, Key::Char(0x01)), None);
        assert_eq!(handle_key(&model, Key::Alt(b'z')), None);
    }

    #[test]
    fn test_selecting_mode_keys() {
        let mut model = AppModel::with_text("abc");
        model.editor.selection = Selection::new(Position::new(0, 0), Position::new(0, 2));
        model.editor.mode = EditMode::Selecting;

        assert_eq!(
            handle_key(&model, Key::Arrow(Direction::Right)),
            Some(Msg::Selection(SelectionMsg::Extend(Direction::Right)))
        );
        assert_eq!(
            handle_key(&model, Key::AltArrow(Direction::Up)),
            Some(Msg::Selection(SelectionMsg::Move(Direction::Up)))
        );
        assert_eq!(
            handle_key(&model, Key::Char(b'q')),
            Some(Msg::Selection(SelectionMsg::Replace(b'q')))
        );
        assert_eq!(
            handle_key(&model, Key::Ctrl(b's')),
            Some(Msg::App(AppMsg::SaveFile))
        );
    }

    #[test]
    fn test_prompt_keys() {
        let mut model = AppModel::with_text("abc");
        model.ui.open_prompt(crate::model::Prompt::JumpToLine);
        assert_eq!(
            handle_key(&model, Key::Char(b'7')),
            Some(Msg::Prompt(PromptMsg::InsertChar(b'7')))
        );
        assert_eq!(handle_key(&model, Key::Arrow(Direction::Up)), None);
        assert_eq!(handle_key(&model, Key::Ctrl(b'r')), None);
    }
}
