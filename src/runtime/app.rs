use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::commands::Cmd;
use crate::input::{handle_key, Key};
use crate::messages::{AppMsg, Msg};
use crate::model::AppModel;
use crate::update::update;
use crate::util::{read_document, write_document};

/// The model plus the loop that feeds messages through `update`.
///
/// File commands run synchronously; their completion messages go through a
/// channel and are drained before control returns to the front-end.
pub struct App {
    model: AppModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    quit: bool,
}

impl App {
    pub fn new(model: AppModel) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            msg_tx,
            msg_rx,
            quit: false,
        }
    }

    /// Startup entry for a front-end: installs logging, reads configuration
    /// and syntax rules from the config directory, optionally loading `path`
    pub fn with_file(path: Option<PathBuf>) -> (Self, Vec<Cmd>) {
        crate::tracing::init();
        let mut app = Self::new(AppModel::from_config());
        let cmds = match path {
            Some(path) => app.dispatch(Msg::App(AppMsg::LoadFile(path))),
            None => Vec::new(),
        };
        (app, cmds)
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Translate and dispatch one key press
    pub fn handle_key(&mut self, key: Key) -> Vec<Cmd> {
        match handle_key(&self.model, key) {
            Some(msg) => self.dispatch(msg),
            None => Vec::new(),
        }
    }

    /// Run a message through `update`, perform file I/O, and return the
    /// commands the front-end has to carry out (redraw, help, file browser,
    /// quit)
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Cmd> {
        let mut front = Vec::new();
        let _ = self.msg_tx.send(msg);
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd, &mut front);
            }
        }
        front
    }

    fn process_cmd(&mut self, cmd: Cmd, front: &mut Vec<Cmd>) {
        match cmd {
            Cmd::None => {}
            Cmd::SaveFile { path, content } => {
                let result = write_document(&path, &content).map_err(|e| format!("{:#}", e));
                let _ = self
                    .msg_tx
                    .send(Msg::App(AppMsg::SaveCompleted { path, result }));
                front.push(Cmd::Redraw);
            }
            Cmd::LoadFile { path } => {
                let result = load(&path);
                let _ = self.msg_tx.send(Msg::App(AppMsg::FileLoaded { path, result }));
                front.push(Cmd::Redraw);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, front);
                }
            }
            Cmd::Quit => {
                self.quit = true;
                front.push(Cmd::Quit);
            }
            cmd @ (Cmd::Redraw | Cmd::OpenFileBrowser { .. } | Cmd::ShowHelp) => front.push(cmd),
        }
    }
}

fn load(path: &Path) -> Result<Option<Vec<u8>>, String> {
    read_document(path).map_err(|e| format!("{:#}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::syntax::SyntaxRegistry;
    use tempfile::TempDir;

    fn app() -> App {
        App::new(AppModel::new(
            EditorConfig::default(),
            SyntaxRegistry::with_builtin(),
        ))
    }

    #[test]
    fn test_open_edit_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.c");
        std::fs::write(&path, "int x;\r\nreturn 0;\n").unwrap();

        let mut app = app();
        app.dispatch(Msg::App(AppMsg::LoadFile(path.clone())));
        assert_eq!(app.model().buffer.lines(), vec!["int x;", "return 0;"]);
        assert_eq!(app.model().buffer.syntax().unwrap().language, "c");
        assert!(!app.model().buffer.is_dirty());

        app.handle_key(Key::End);
        app.handle_key(Key::Char(b'y'));
        assert!(app.model().buffer.is_dirty());

        app.handle_key(Key::Ctrl(b's'));
        assert_eq!(std::fs::read(&path).unwrap(), b"int x;y\nreturn 0;\n");
        assert!(!app.model().buffer.is_dirty());
        assert_eq!(app.model().ui.status_message, "18 bytes written to disk");
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.txt");
        let mut app = app();
        app.dispatch(Msg::App(AppMsg::LoadFile(path.clone())));
        assert!(app.model().buffer.is_empty());
        assert_eq!(app.model().file_path.as_deref(), Some(path.as_path()));
        assert!(app.model().ui.status_message.starts_with("New file: "));
    }

    #[test]
    fn test_quit_needs_repeats_when_dirty() {
        let mut app = app();
        app.handle_key(Key::Char(b'a'));
        assert!(app.handle_key(Key::Ctrl(b'q')).iter().all(|c| !c.is_quit()));
        assert!(app.handle_key(Key::Ctrl(b'q')).iter().all(|c| !c.is_quit()));
        assert!(app.handle_key(Key::Ctrl(b'q')).iter().any(Cmd::is_quit));
        assert!(app.should_quit());
    }

    #[test]
    fn test_save_without_name_prompts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("named.txt");
        let mut app = app();
        app.handle_key(Key::Char(b'z'));
        app.handle_key(Key::Ctrl(b's'));
        assert!(app.model().ui.has_prompt());

        for ch in path.to_string_lossy().bytes() {
            app.handle_key(Key::Char(ch));
        }
        app.handle_key(Key::Enter);
        assert!(!app.model().ui.has_prompt());
        assert_eq!(std::fs::read(&path).unwrap(), b"z\n");
    }
}
