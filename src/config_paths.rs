//! Where recase keeps its files on disk
//!
//! Everything sits in one per-user directory: the YAML config that holds
//! the ignore list, and a `logs/` directory for the rotating debug log.
//! Callers ask this module for locations instead of joining paths
//! themselves.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "recase";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Per-user recase directory, or None when no home can be found.
///
/// `%APPDATA%\recase` on Windows. Elsewhere `$XDG_CONFIG_HOME/recase`,
/// falling back to `~/.config/recase` when the variable is unset.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// The YAML file holding the ignore list
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Directory receiving the daily log files
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

fn create_all(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the log directory (and its parents) if missing, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    create_all(&logs)?;
    Ok(logs)
}
