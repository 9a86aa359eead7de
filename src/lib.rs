//! quire - editing core of a small terminal text editor
//!
//! This crate provides the row store, selection model, undo history and
//! syntax highlighter of the editor, driven through the Elm Architecture
//! pattern. Raw terminal handling and drawing live in the front-end.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod input;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod syntax;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use input::Key;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::App;
pub use update::update;
