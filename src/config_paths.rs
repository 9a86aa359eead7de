//! Where quire keeps its files
//!
//! ```text
//! <config dir>/quire/
//!     config.yaml     editor settings
//!     syntax/         JSON syntax rule files
//!     logs/           daily rotated debug log
//! ```
//!
//! The config dir is `$XDG_CONFIG_HOME`, else `~/.config` (`%APPDATA%` on
//! Windows).

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "quire";

/// Pick the quire directory from an explicit base or the home directory
fn resolve_config_dir(base: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    base.filter(|b| !b.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")))
        .map(|dir| dir.join(APP_DIR))
}

/// Base directory for all quire files
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        resolve_config_dir(env::var_os("APPDATA"), None)
    }

    #[cfg(not(target_os = "windows"))]
    {
        resolve_config_dir(env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Default location of syntax rule files
pub fn syntax_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("syntax"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir().context("No config directory available")?;
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_wins() {
        let dir = resolve_config_dir(Some("/xdg".into()), Some(PathBuf::from("/home/u")));
        assert_eq!(dir, Some(PathBuf::from("/xdg/quire")));
    }

    #[test]
    fn test_falls_back_to_home() {
        let home = Some(PathBuf::from("/home/u"));
        assert_eq!(
            resolve_config_dir(None, home.clone()),
            Some(PathBuf::from("/home/u/.config/quire"))
        );
        assert_eq!(
            resolve_config_dir(Some(OsString::new()), home),
            Some(PathBuf::from("/home/u/.config/quire"))
        );
        assert_eq!(resolve_config_dir(None, None), None);
    }

    #[test]
    fn test_files_live_under_config_dir() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(config_file(), Some(dir.join("config.yaml")));
            assert_eq!(syntax_dir(), Some(dir.join("syntax")));
            assert_eq!(logs_dir(), Some(dir.join("logs")));
        }
    }
}
