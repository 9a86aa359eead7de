//! Key handling tests - Normal/Selecting modes, prompts and guarded commands

use std::path::PathBuf;

use quire::commands::Cmd;
use quire::messages::{Direction, Msg};
use quire::model::{AppModel, EditMode, Position, PromptKind};
use quire::{App, Key};

fn app(text: &str) -> App {
    App::new(AppModel::with_text(text))
}

fn press(app: &mut App, keys: &[Key]) -> Vec<Cmd> {
    keys.iter().flat_map(|&key| app.handle_key(key)).collect()
}

fn lines(app: &App) -> Vec<String> {
    app.model().buffer.lines()
}

fn status(app: &App) -> &str {
    &app.model().ui.status_message
}

// ========================================================================
// Normal mode
// ========================================================================

#[test]
fn test_typing_and_navigation_keys() {
    let mut app = app("hello\nworld");
    press(&mut app, &[Key::End, Key::Char(b'!')]);
    press(&mut app, &[Key::Arrow(Direction::Down), Key::Home, Key::Char(b'>')]);

    assert_eq!(lines(&app), vec!["hello!", ">world"]);
    assert_eq!(app.model().editor.cursor, Position::new(1, 1));
}

#[test]
fn test_control_bytes_are_ignored() {
    let mut app = app("abc");
    let cmds = press(&mut app, &[Key::Char(0x01), Key::Alt(b'z')]);

    assert!(cmds.is_empty());
    assert_eq!(lines(&app), vec!["abc"]);
}

#[test]
fn test_arrow_right_wraps_to_next_line() {
    let mut app = app("ab\ncd");
    press(&mut app, &[Key::End, Key::Arrow(Direction::Right)]);
    assert_eq!(app.model().editor.cursor, Position::new(1, 0));

    press(&mut app, &[Key::Arrow(Direction::Left)]);
    assert_eq!(app.model().editor.cursor, Position::new(0, 2));
}

#[test]
fn test_vertical_move_clamps_column() {
    let mut app = app("long line\nab");
    press(&mut app, &[Key::End, Key::Arrow(Direction::Down)]);
    assert_eq!(app.model().editor.cursor, Position::new(1, 2));
}

#[test]
fn test_page_down_and_up_scroll() {
    let text = (0..100).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
    let mut app = app(&text);
    assert_eq!(app.model().editor.viewport.visible_lines, 24);

    press(&mut app, &[Key::PageDown]);
    assert_eq!(app.model().editor.cursor.line, 47);
    assert_eq!(app.model().editor.viewport.top_line, 24);

    press(&mut app, &[Key::PageUp]);
    assert_eq!(app.model().editor.cursor.line, 0);
    assert_eq!(app.model().editor.viewport.top_line, 0);
}

#[test]
fn test_copy_and_paste_line_keys() {
    let mut app = app("first\nsecond");
    press(&mut app, &[Key::Ctrl(b'w'), Key::Arrow(Direction::Down), Key::End]);
    press(&mut app, &[Key::Ctrl(b'u')]);

    assert_eq!(lines(&app), vec!["first", "secondfirst"]);
    assert_eq!(app.model().editor.mode, EditMode::Selecting);
}

#[test]
fn test_undo_redo_keys() {
    let mut app = app("abc");
    press(&mut app, &[Key::End, Key::Char(b'd')]);
    press(&mut app, &[Key::Ctrl(b'z')]);
    assert_eq!(lines(&app), vec!["abc"]);

    press(&mut app, &[Key::Ctrl(b'r')]);
    assert_eq!(lines(&app), vec!["abcd"]);
}

// ========================================================================
// Selecting mode
// ========================================================================

#[test]
fn test_mark_extend_indent_cancel() {
    let mut app = app("one\ntwo\nthree");
    press(&mut app, &[Key::Ctrl(b'b'), Key::Arrow(Direction::Down), Key::Ctrl(b'e')]);
    assert_eq!(app.model().editor.mode, EditMode::Selecting);
    assert_eq!(app.model().status_line().1, "SEL | no ft | 2/3");

    // Arrows now extend the selection
    press(&mut app, &[Key::Arrow(Direction::Down)]);
    assert_eq!(
        app.model().editor.selection.range(),
        (Position::new(0, 0), Position::new(2, 0))
    );

    press(&mut app, &[Key::Tab]);
    assert_eq!(lines(&app), vec!["    one", "    two", "    three"]);

    press(&mut app, &[Key::Backspace]);
    assert_eq!(lines(&app), vec!["one", "two", "three"]);

    press(&mut app, &[Key::Escape]);
    assert_eq!(app.model().editor.mode, EditMode::Normal);
    assert!(!app.model().editor.selection.active);
    assert_eq!(status(&app), "Selection cancelled.");
}

#[test]
fn test_shift_arrows_and_alt_move() {
    let mut app = app("one\ntwo\nthree");
    press(&mut app, &[Key::ShiftArrow(Direction::Down)]);
    assert_eq!(app.model().editor.mode, EditMode::Selecting);

    press(&mut app, &[Key::AltArrow(Direction::Down)]);
    assert_eq!(lines(&app), vec!["three", "one", "two"]);
    assert_eq!(
        app.model().editor.selection.range(),
        (Position::new(1, 0), Position::new(2, 3))
    );
}

#[test]
fn test_typing_over_quick_selection() {
    let mut app = app("hello");
    press(
        &mut app,
        &[
            Key::ShiftArrow(Direction::Right),
            Key::ShiftArrow(Direction::Right),
            Key::ShiftArrow(Direction::Right),
            Key::Char(b'J'),
        ],
    );

    assert_eq!(lines(&app), vec!["Jlo"]);
    assert_eq!(app.model().editor.mode, EditMode::Normal);
}

#[test]
fn test_cut_and_delete_selection_keys() {
    let mut app = app("abc def");
    press(&mut app, &[Key::Alt(b'r'), Key::Ctrl(b'k')]);
    assert_eq!(lines(&app), vec![""]);
    assert_eq!(app.model().clipboard, b"abc def".to_vec());

    let mut app = self::app("abc def");
    press(&mut app, &[Key::ShiftArrow(Direction::Right), Key::Delete]);
    assert_eq!(lines(&app), vec!["bc def"]);
}

// ========================================================================
// Prompts
// ========================================================================

#[test]
fn test_search_keys() {
    let mut app = app("alpha\nbeta\ngamma");
    press(&mut app, &[Key::Ctrl(b'f')]);
    assert_eq!(
        app.model().ui.prompt.as_ref().map(|p| p.kind()),
        Some(PromptKind::Search)
    );

    press(&mut app, &[Key::Char(b'm'), Key::Char(b'm')]);
    assert_eq!(app.model().editor.cursor, Position::new(2, 2));
    // Typed characters went to the prompt, not the buffer
    assert_eq!(lines(&app), vec!["alpha", "beta", "gamma"]);

    press(&mut app, &[Key::Enter]);
    assert!(app.model().ui.prompt.is_none());
    assert_eq!(app.model().editor.cursor, Position::new(2, 2));
}

#[test]
fn test_jump_to_line_keys() {
    let mut app = app("a\nb\nc\nd");
    press(&mut app, &[Key::Ctrl(b'j'), Key::Char(b'4'), Key::Enter]);

    assert_eq!(app.model().editor.cursor, Position::new(3, 0));
    assert_eq!(status(&app), "Jumped to line 4.");
}

// ========================================================================
// Screen and app commands
// ========================================================================

#[test]
fn test_help_and_file_browser_commands() {
    let mut app = app("x");
    assert!(press(&mut app, &[Key::Ctrl(b'g')]).contains(&Cmd::ShowHelp));

    app.model_mut().file_path = Some(PathBuf::from("/tmp/project/main.c"));
    let cmds = press(&mut app, &[Key::Ctrl(b'o')]);
    assert!(cmds.contains(&Cmd::OpenFileBrowser {
        start_dir: PathBuf::from("/tmp/project")
    }));
}

#[test]
fn test_toggle_line_numbers_and_resize() {
    let mut app = app("x");
    assert_eq!(app.model().gutter_width(), 4);
    assert_eq!(app.model().editor.viewport.visible_columns, 76);

    press(&mut app, &[Key::Ctrl(b'n')]);
    assert_eq!(app.model().gutter_width(), 0);
    assert_eq!(app.model().editor.viewport.visible_columns, 80);

    app.dispatch(Msg::resize(10, 40));
    assert_eq!(app.model().editor.viewport.visible_lines, 8);
    assert_eq!(app.model().editor.viewport.visible_columns, 40);
}

#[test]
fn test_new_file_needs_repeats_when_dirty() {
    let mut app = app("keep");
    press(&mut app, &[Key::End, Key::Char(b'!')]);

    press(&mut app, &[Key::Ctrl(b't')]);
    assert_eq!(
        status(&app),
        "WARNING!!! File has unsaved changes. Press Ctrl-T 2 more times to discard them."
    );
    press(&mut app, &[Key::Ctrl(b't')]);
    assert_eq!(
        status(&app),
        "WARNING!!! File has unsaved changes. Press Ctrl-T 1 more times to discard them."
    );
    assert_eq!(lines(&app), vec!["keep!"]);

    press(&mut app, &[Key::Ctrl(b't')]);
    assert!(app.model().buffer.is_empty());
    assert_eq!(status(&app), "New empty file. Ctrl-S to save.");
    assert!(!app.model().history.can_undo());
}

#[test]
fn test_other_key_resets_confirmation() {
    let mut app = app("keep");
    press(&mut app, &[Key::End, Key::Char(b'!')]);
    press(&mut app, &[Key::Ctrl(b'q'), Key::Ctrl(b'q')]);
    press(&mut app, &[Key::Arrow(Direction::Left)]);
    press(&mut app, &[Key::Ctrl(b'q')]);

    assert!(!app.should_quit());
    assert_eq!(
        status(&app),
        "WARNING!!! File has unsaved changes. Press Ctrl-Q 2 more times to quit."
    );
}

#[test]
fn test_quit_clean_buffer_immediately() {
    let mut app = app("clean");
    let cmds = press(&mut app, &[Key::Ctrl(b'q')]);

    assert!(app.should_quit());
    assert!(cmds.iter().any(Cmd::is_quit));
}
