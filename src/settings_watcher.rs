//! Config file watching for ignore-list change notifications
//!
//! Uses the `notify` crate with debouncing to detect edits to the config
//! file and turn them into [`SettingsChange`] values carrying the old and
//! new ignore list.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::settings::{FileSettings, SettingsChange};

/// Watches one config file and reports value changes
pub struct SettingsWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    /// Receiver for debounced events
    rx: Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    settings: FileSettings,
    /// Last value reported (or read at startup)
    last: Option<String>,
}

impl SettingsWatcher {
    /// Start watching the directory holding `settings`' file.
    ///
    /// Events are debounced with a 250ms delay so that editors writing the
    /// file in several steps produce one notification.
    pub fn new(settings: FileSettings) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(Duration::from_millis(250), tx)?;

        let dir = settings
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching settings at {}", settings.path().display());

        let last = settings.stored_value().ok().flatten();
        Ok(Self {
            _debouncer: debouncer,
            rx,
            settings,
            last,
        })
    }

    pub fn path(&self) -> &Path {
        self.settings.path()
    }

    /// Poll for a pending change (non-blocking)
    ///
    /// Returns at most one change per call, covering every file event since
    /// the last poll. Unreadable intermediate states are skipped.
    pub fn poll_changes(&mut self) -> Option<SettingsChange> {
        let mut touched = false;

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    touched |= events.iter().any(|event| {
                        event.kind != DebouncedEventKind::AnyContinuous
                            && self.is_settings_file(&event.path)
                    });
                }
                Err(e) => {
                    tracing::warn!("Settings watcher error: {:?}", e);
                }
            }
        }

        if touched {
            self.check_for_change()
        } else {
            None
        }
    }

    /// Re-read the file and report a change if its value differs
    pub fn check_for_change(&mut self) -> Option<SettingsChange> {
        let current = match self.settings.stored_value() {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Ignoring unreadable settings file: {}", e);
                return None;
            }
        };

        if current == self.last {
            return None;
        }

        tracing::debug!("Settings changed: {:?} -> {:?}", self.last, current);
        let change = SettingsChange::new(self.last.take(), current.clone());
        self.last = current;
        Some(change)
    }

    fn is_settings_file(&self, path: &Path) -> bool {
        path.file_name().is_some() && path.file_name() == self.settings.path().file_name()
    }
}
