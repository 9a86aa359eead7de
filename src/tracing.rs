//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! selection, undo and highlighting state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cursor=trace,message=debug` - scoped filtering
//! - `RUST_LOG=quire::model::history=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/quire/logs/quire.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{EditMode, EditorState};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). The console writes to
/// stderr so it never interleaves with the terminal screen. Returns false if
/// a global subscriber was already installed.
pub fn init() -> bool {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "quire.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    match tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: tracing already initialized: {}", e);
            false
        }
    }
}

/// Lightweight snapshot of cursor/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub line: usize,
    pub column: usize,
    pub anchor: (usize, usize),
    pub head: (usize, usize),
    pub selection_active: bool,
    pub mode: EditMode,
}

impl CursorSnapshot {
    pub fn from_editor(editor: &EditorState) -> Self {
        let s = &editor.selection;
        Self {
            line: editor.cursor.line,
            column: editor.cursor.column,
            anchor: (s.anchor.line, s.anchor.column),
            head: (s.head.line, s.head.column),
            selection_active: s.active,
            mode: editor.mode,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.line != other.line || self.column != other.column {
            changes.push(format!(
                "cursor: ({},{}) → ({},{})",
                self.line, self.column, other.line, other.column
            ));
        }
        if self.selection_active != other.selection_active {
            let status = if other.selection_active {
                "active"
            } else {
                "cleared"
            };
            changes.push(format!("selection {}", status));
        } else if other.selection_active && (self.anchor, self.head) != (other.anchor, other.head)
        {
            changes.push(format!(
                "selection: {:?}..{:?} → {:?}..{:?}",
                self.anchor, self.head, other.anchor, other.head
            ));
        }
        if self.mode != other.mode {
            changes.push(format!("mode: {:?} → {:?}", self.mode, other.mode));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
