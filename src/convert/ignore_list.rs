//! Ignore list: tokens whose casing is never altered.
//!
//! The configured value is a single comma-separated string such as
//! `"LLC, Ltd., LP"`. Entries are matched case-insensitively and always
//! rendered exactly as the user wrote them.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ignore list used when no configuration has been written yet
pub const DEFAULT_IGNORE_LIST: &str = "LLC, Ltd., LP";

/// One configured entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreEntry {
    /// Uppercased lookup key
    pub key: String,
    /// The entry exactly as configured
    pub display: String,
}

/// Immutable mapping from uppercased key to configured entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: HashMap<String, IgnoreEntry>,
}

impl IgnoreList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma-separated configuration string. Never fails: pieces are
    /// trimmed, empty pieces dropped, and the last duplicate key wins.
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let entry = IgnoreEntry {
                    key: piece.to_uppercase(),
                    display: piece.to_string(),
                };
                (entry.key.clone(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Configured display form for `word`, if any entry matches it
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries
            .get(&word.to_uppercase())
            .map(|entry| entry.display.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide holder of the current ignore list.
///
/// Readers take a snapshot and keep it for a whole conversion; writers
/// replace the list wholesale, so a lookup never sees a half-built mapping.
#[derive(Debug, Default)]
pub struct IgnoreListCache {
    current: ArcSwap<IgnoreList>,
    loaded: AtomicBool,
}

impl IgnoreListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache from a raw configuration string and mark it loaded
    pub fn load(&self, raw: &str) {
        self.store(IgnoreList::parse(raw));
    }

    /// Replace the cache with an already parsed list and mark it loaded
    pub fn store(&self, list: IgnoreList) {
        tracing::debug!("Ignore list replaced ({} entries)", list.len());
        self.current.store(Arc::new(list));
        self.loaded.store(true, Ordering::Release);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Consistent view of the current list
    pub fn snapshot(&self) -> Arc<IgnoreList> {
        self.current.load_full()
    }

    pub fn lookup(&self, word: &str) -> Option<String> {
        self.current.load().lookup(word).map(str::to_string)
    }
}
