//! Settings providers for the ignore list
//!
//! A provider answers "what is the ignore list right now". Change
//! notifications arrive separately as [`SettingsChange`] values, see
//! [`crate::settings_watcher`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RecaseConfig;
use crate::convert::IgnoreListCache;

/// Errors that can occur when reading settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Backing store could not be read
    Unavailable(String),
    /// Backing store holds something that is not a valid configuration
    Malformed(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "settings unavailable: {}", msg),
            Self::Malformed(msg) => write!(f, "malformed settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Source of the configured ignore list
pub trait SettingsProvider: Send + Sync {
    /// Current raw ignore-list string
    fn ignore_list(&self) -> Result<String, SettingsError>;
}

/// A change notification: the previous and the new raw value.
/// `new == None` means the setting was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    pub old: Option<String>,
    pub new: Option<String>,
}

impl SettingsChange {
    pub fn new(old: Option<String>, new: Option<String>) -> Self {
        Self { old, new }
    }

    /// Replace the cache with the new value (empty when removed)
    pub fn apply_to(&self, cache: &IgnoreListCache) {
        cache.load(self.new.as_deref().unwrap_or(""));
    }
}

/// Read the provider into the cache.
///
/// On failure the cache keeps its contents and stays unloaded, so the next
/// conversion retries.
pub fn load_into(provider: &dyn SettingsProvider, cache: &IgnoreListCache) {
    match provider.ignore_list() {
        Ok(raw) => {
            cache.load(&raw);
            tracing::info!("Ignore list loaded ({} entries)", cache.snapshot().len());
        }
        Err(e) => {
            tracing::warn!("Could not load ignore list, using current list: {}", e);
        }
    }
}

/// Settings backed by a YAML config file.
/// A missing file yields the default ignore list.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Settings at the default config location
    pub fn from_default_location() -> Option<Self> {
        crate::config_paths::config_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw value currently stored in the file; None when the file is absent
    pub fn stored_value(&self) -> Result<Option<String>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }
        RecaseConfig::read(&self.path)
            .map(|config| Some(config.ignore_list))
            .map_err(SettingsError::Malformed)
    }
}

impl SettingsProvider for FileSettings {
    fn ignore_list(&self) -> Result<String, SettingsError> {
        Ok(self
            .stored_value()?
            .unwrap_or_else(|| RecaseConfig::default().ignore_list))
    }
}

/// Fixed in-memory settings (command-line overrides, tests)
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    value: String,
}

impl StaticSettings {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn ignore_list(&self) -> Result<String, SettingsError> {
        Ok(self.value.clone())
    }
}
