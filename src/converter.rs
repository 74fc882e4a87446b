//! Conversion orchestration
//!
//! [`Converter`] owns the registered surfaces, the shared ignore-list cache
//! and the settings provider. A command resolves its target surface, makes
//! sure settings have been requested at least once, then hands the surface
//! a snapshot of the ignore list.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::convert::{ConversionMode, IgnoreListCache};
use crate::messages::Msg;
use crate::settings::{self, SettingsChange, SettingsProvider};
use crate::settings_watcher::SettingsWatcher;
use crate::surface::{Applied, Surface, SurfaceId};

/// A request to convert one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertCommand {
    pub mode: ConversionMode,
    /// Explicit target; `None` means the context-menu target or the focused surface
    pub target: Option<SurfaceId>,
}

impl ConvertCommand {
    pub fn new(mode: ConversionMode) -> Self {
        Self { mode, target: None }
    }

    pub fn on(mut self, target: SurfaceId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Why a command did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No explicit target, no context-menu target and nothing focused
    NoTarget,
    /// The target id is not registered
    UnknownSurface(SurfaceId),
    /// The target is not a text-like field or editable region
    Ineligible(SurfaceId),
}

/// Result of handling a [`ConvertCommand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Converted { surface: SurfaceId, applied: Applied },
    Ignored(IgnoreReason),
}

impl ConvertOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConvertOutcome::Converted { .. })
    }
}

/// Surfaces known to the host, plus focus and context-menu tracking
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<SurfaceId, Surface>,
    next_id: u64,
    focused: Option<SurfaceId>,
    context_target: Option<SurfaceId>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface and return its id
    pub fn add(&mut self, surface: Surface) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Registered {} ({})", id, surface.kind_name());
        self.surfaces.insert(id, surface);
        id
    }

    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(&id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.get_mut(&id)
    }

    pub fn remove(&mut self, id: SurfaceId) -> Option<Surface> {
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.context_target == Some(id) {
            self.context_target = None;
        }
        self.surfaces.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn focused(&self) -> Option<SurfaceId> {
        self.focused
    }

    pub fn context_target(&self) -> Option<SurfaceId> {
        self.context_target
    }

    pub fn focus(&mut self, id: SurfaceId) {
        if self.surfaces.contains_key(&id) {
            self.focused = Some(id);
        } else {
            tracing::debug!("Ignoring focus on unknown {}", id);
        }
    }

    /// Remember where a context menu was opened.
    /// Only eligible surfaces are remembered; anything else clears the target.
    pub fn context_menu(&mut self, id: SurfaceId) {
        let eligible = self.surfaces.get(&id).is_some_and(Surface::is_eligible);
        self.context_target = eligible.then_some(id);
    }

    /// Pick the surface a command applies to
    pub fn resolve(&self, explicit: Option<SurfaceId>) -> Option<SurfaceId> {
        explicit
            .or_else(|| {
                self.context_target
                    .filter(|id| self.surfaces.contains_key(id))
            })
            .or(self.focused)
    }
}

/// Drives conversions end to end
pub struct Converter {
    registry: SurfaceRegistry,
    cache: Arc<IgnoreListCache>,
    settings: Arc<dyn SettingsProvider>,
    loader: Option<JoinHandle<()>>,
    watcher: Option<SettingsWatcher>,
}

impl Converter {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self::with_cache(settings, Arc::new(IgnoreListCache::new()))
    }

    /// Share an existing cache (several converters, or a host that loads it itself)
    pub fn with_cache(settings: Arc<dyn SettingsProvider>, cache: Arc<IgnoreListCache>) -> Self {
        Self {
            registry: SurfaceRegistry::new(),
            cache,
            settings,
            loader: None,
            watcher: None,
        }
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SurfaceRegistry {
        &mut self.registry
    }

    pub fn cache(&self) -> &Arc<IgnoreListCache> {
        &self.cache
    }

    /// Attach a watcher whose changes are applied by [`Converter::poll_settings`]
    pub fn watch(&mut self, watcher: SettingsWatcher) {
        self.watcher = Some(watcher);
    }

    /// Convert the resolved target surface
    pub fn handle(&mut self, cmd: ConvertCommand) -> ConvertOutcome {
        let Some(id) = self.registry.resolve(cmd.target) else {
            tracing::debug!("No target for {} conversion", cmd.mode);
            return ConvertOutcome::Ignored(IgnoreReason::NoTarget);
        };

        match self.registry.get(id) {
            None => {
                tracing::debug!("Conversion target {} is not registered", id);
                return ConvertOutcome::Ignored(IgnoreReason::UnknownSurface(id));
            }
            Some(surface) if !surface.is_eligible() => {
                tracing::debug!("Skipping ineligible {} ({})", id, surface.kind_name());
                return ConvertOutcome::Ignored(IgnoreReason::Ineligible(id));
            }
            Some(_) => {}
        }

        if !self.cache.is_loaded() {
            self.refresh_settings();
        }
        let ignore = self.cache.snapshot();

        let Some(surface) = self.registry.get_mut(id) else {
            return ConvertOutcome::Ignored(IgnoreReason::UnknownSurface(id));
        };
        let applied = surface.apply(cmd.mode, &ignore);
        tracing::debug!("Converted {} to {}: {:?}", id, cmd.mode, applied);

        ConvertOutcome::Converted {
            surface: id,
            applied,
        }
    }

    /// Start a background settings load unless one is already running
    pub fn refresh_settings(&mut self) {
        if self.loader.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }

        let settings = Arc::clone(&self.settings);
        let cache = Arc::clone(&self.cache);
        let spawned = thread::Builder::new()
            .name("recase-settings".to_string())
            .spawn(move || settings::load_into(settings.as_ref(), &cache));

        match spawned {
            Ok(handle) => self.loader = Some(handle),
            Err(e) => tracing::warn!("Could not start settings load: {}", e),
        }
    }

    /// Load settings on the calling thread
    pub fn load_settings_now(&mut self) {
        self.wait_for_settings();
        settings::load_into(self.settings.as_ref(), &self.cache);
    }

    /// Block until a running background load (if any) has finished
    pub fn wait_for_settings(&mut self) {
        if let Some(handle) = self.loader.take() {
            if handle.join().is_err() {
                tracing::warn!("Settings load thread panicked");
            }
        }
    }

    pub fn apply_settings_change(&mut self, change: &SettingsChange) {
        tracing::info!("Ignore list changed: {:?} -> {:?}", change.old, change.new);
        change.apply_to(&self.cache);
    }

    /// Apply any pending change from the attached watcher.
    /// Returns true when the cache was replaced.
    pub fn poll_settings(&mut self) -> bool {
        let Some(change) = self.watcher.as_mut().and_then(SettingsWatcher::poll_changes) else {
            return false;
        };
        self.apply_settings_change(&change);
        true
    }

    /// Message entry point; only conversions produce an outcome
    pub fn update(&mut self, msg: Msg) -> Option<ConvertOutcome> {
        match msg {
            Msg::Convert(cmd) => Some(self.handle(cmd)),
            Msg::Focus(id) => {
                self.registry.focus(id);
                None
            }
            Msg::ContextMenu(id) => {
                self.registry.context_menu(id);
                None
            }
            Msg::SettingsChanged(change) => {
                self.apply_settings_change(&change);
                None
            }
        }
    }
}

impl Drop for Converter {
    fn drop(&mut self) {
        self.wait_for_settings();
    }
}
