//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/quire/config.yaml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{SNAPSHOT_DEBOUNCE, UNDO_BUFFER_SIZE};
use crate::util::TABULATOR_WIDTH;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Columns per tab stop when rendering and indenting
    pub tab_stop: usize,
    /// Undo steps retained
    pub max_snapshots: usize,
    /// Edits closer together than this share one undo step
    pub snapshot_debounce_ms: u64,
    /// Repeats needed to discard unsaved changes
    pub quit_times: usize,
    /// Show the line number gutter on startup
    pub line_numbers: bool,
    /// Directory of syntax rule files (defaults to `~/.config/quire/syntax`)
    pub syntax_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: TABULATOR_WIDTH,
            max_snapshots: UNDO_BUFFER_SIZE,
            snapshot_debounce_ms: SNAPSHOT_DEBOUNCE.as_millis() as u64,
            quit_times: 2,
            line_numbers: true,
            syntax_dir: None,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<EditorConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn snapshot_debounce(&self) -> Duration {
        Duration::from_millis(self.snapshot_debounce_ms)
    }

    /// Configured syntax directory, or the default one under the config dir
    pub fn resolved_syntax_dir(&self) -> Option<PathBuf> {
        self.syntax_dir
            .clone()
            .or_else(crate::config_paths::syntax_dir)
    }

    fn sanitized(mut self) -> Self {
        if self.tab_stop == 0 {
            tracing::warn!("tab_stop must be at least 1, using {}", TABULATOR_WIDTH);
            self.tab_stop = TABULATOR_WIDTH;
        }
        if self.max_snapshots == 0 {
            self.max_snapshots = 1;
        }
        self
    }
}
