//! Converter configuration persistence
//!
//! Stores user preferences in `~/.config/recase/config.yaml`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::convert::DEFAULT_IGNORE_LIST;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecaseConfig {
    /// Comma-separated tokens whose casing is never changed (e.g., "LLC, Ltd., LP")
    #[serde(default = "default_ignore_list")]
    pub ignore_list: String,
}

fn default_ignore_list() -> String {
    DEFAULT_IGNORE_LIST.to_string()
}

impl Default for RecaseConfig {
    fn default() -> Self {
        Self {
            ignore_list: default_ignore_list(),
        }
    }
}

impl RecaseConfig {
    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Read and parse `path`, reporting failures
    pub fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update the ignore list and save to `path`
    pub fn set_ignore_list(&mut self, ignore_list: &str, path: &Path) -> Result<(), String> {
        self.ignore_list = ignore_list.trim().to_string();
        self.save_to(path)
    }

    /// Replace the ignore list stored at `path`, creating the file if needed.
    /// Returns the config as written.
    pub fn store_ignore_list(path: &Path, ignore_list: &str) -> Result<Self, String> {
        let mut config = Self::load_from(path);
        config.set_ignore_list(ignore_list, path)?;
        Ok(config)
    }
}
