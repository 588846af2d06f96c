//! The visualizer: modules, scenes and the reload loop that connects them.
//!
//! All deferred work happens inside [`Visualizer::poll`]. Hosts call it from
//! their event loop, sleeping until [`Visualizer::next_deadline`] in between.
//!
//! ```rust
//! use vizscene::prelude::*;
//!
//! struct Counter(u32);
//!
//! impl View for Counter {
//!     fn run(&mut self, _operation: &str, _params: &Params) {
//!         self.0 += 1;
//!     }
//!     fn clear(&mut self) {
//!         self.0 = 0;
//!     }
//! }
//!
//! let clock = ManualClock::new();
//! let mut vis = Visualizer::new(true).with_clock(clock.clone());
//! vis.use_scenes(vec![Scene::new("main").with_widget(Widget::new("0", "count", "tick"))])
//!     .unwrap();
//! vis.add_module("0", |_: &str| Some(Box::new(Counter(0)) as Box<dyn View>));
//! assert!(vis.module("0").unwrap().get_view("count").is_some());
//!
//! assert_eq!(vis.refresh(), Some(ReloadKind::Partial));
//! clock.advance_ms(100);
//! assert_eq!(vis.poll(), 2, "Module redraw and partial reload");
//! ```

use crate::color::Colorer;
use crate::config::Config;
use crate::error::Result;
use crate::module::{DefaultViewsProvider, Module, Record};
use crate::scene::{
    requested_module_views, requested_views, validate_scenes, ReloadDecision, ReloadKind, Scene, SceneScheduler,
    TimerKey,
};
use crate::schedule::{Clock, SystemClock};
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::time::Instant;

/// The rendering surface views draw into.
pub trait Surface {
    /// Whether the surface can be drawn on right now.
    fn is_available(&self) -> bool;
}

impl Surface for bool {
    fn is_available(&self) -> bool {
        *self
    }
}

/// A shared availability toggle.
///
/// Clones share state, so a host keeps one clone and hands the other to the
/// visualizer.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHandle(Rc<Cell<bool>>);

impl SurfaceHandle {
    /// Creates a handle with the given availability.
    #[must_use]
    pub fn new(available: bool) -> Self {
        Self(Rc::new(Cell::new(available)))
    }

    /// Marks the surface available or not.
    pub fn set_available(&self, available: bool) {
        self.0.set(available);
    }
}

impl Surface for SurfaceHandle {
    fn is_available(&self) -> bool {
        self.0.get()
    }
}

/// Owns modules and scenes and drives their reloads.
pub struct Visualizer {
    modules: BTreeMap<String, Module>,
    scenes: Vec<Scene>,
    current: Option<usize>,
    scheduler: SceneScheduler,
    colorer: Colorer,
    surface: Box<dyn Surface>,
    clock: Box<dyn Clock>,
    full_owed: bool,
}

impl std::fmt::Debug for Visualizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualizer")
            .field("modules", &self.modules)
            .field("scenes", &self.scenes.len())
            .field("current", &self.current_scene().map(Scene::identifier))
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Visualizer {
    /// Creates a visualizer drawing into `surface`, timed by the system clock.
    pub fn new(surface: impl Surface + 'static) -> Self {
        Self {
            modules: BTreeMap::new(),
            scenes: Vec::new(),
            current: None,
            scheduler: SceneScheduler::new(),
            colorer: Colorer::default(),
            surface: Box::new(surface),
            clock: Box::new(SystemClock),
            full_owed: false,
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the colorer.
    #[must_use]
    pub fn with_colorer(mut self, colorer: Colorer) -> Self {
        self.colorer = colorer;
        self
    }

    /// Builds a visualizer from a configuration: palette and scenes.
    ///
    /// # Errors
    ///
    /// Returns an error if the color section or the scene list is invalid.
    pub fn from_config(config: &Config, surface: impl Surface + 'static) -> Result<Self> {
        let mut vis = Self::new(surface).with_colorer(Colorer::new(config.palette()?));
        vis.use_scenes(config.scenes.clone())?;
        Ok(vis)
    }

    // ------------------------------------------------------------------
    // Scenes
    // ------------------------------------------------------------------

    /// Replaces every scene. The first one becomes current and is fully reloaded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateScene`] or
    /// [`crate::Error::EmptySceneIdentifier`]; the previous scenes stay in place.
    pub fn use_scenes(&mut self, scenes: Vec<Scene>) -> Result<()> {
        validate_scenes(&scenes)?;

        for old in &self.scenes {
            if !scenes.iter().any(|s| s.identifier() == old.identifier()) {
                self.scheduler.forget(old.identifier());
            }
        }
        if let Some(current) = self.current_scene() {
            let id = current.identifier().to_string();
            self.scheduler.cancel_all_for_scene(&id);
        }

        self.scenes = scenes;
        self.current = if self.scenes.is_empty() { None } else { Some(0) };
        tracing::debug!(count = self.scenes.len(), "scenes replaced");
        self.reload_full();
        Ok(())
    }

    /// Makes `identifier` the current scene and fully reloads it.
    ///
    /// An unknown identifier leaves no scene current and returns `false`.
    pub fn set_scene(&mut self, identifier: &str) -> bool {
        if let Some(outgoing) = self.current_scene() {
            let id = outgoing.identifier().to_string();
            self.scheduler.cancel_all_for_scene(&id);
        }

        self.current = self.scenes.iter().position(|s| s.identifier() == identifier);
        if self.current.is_none() {
            tracing::warn!(scene = identifier, "unknown scene");
            self.full_owed = false;
            return false;
        }

        tracing::debug!(scene = identifier, "scene switched");
        self.reload_full();
        true
    }

    /// Replaces the definition of the scene with the same identifier, or adds it.
    ///
    /// Updating the current scene fully reloads it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptySceneIdentifier`] for a blank identifier.
    pub fn update_scene(&mut self, scene: Scene) -> Result<()> {
        scene.validate()?;

        match self.scenes.iter().position(|s| s.identifier() == scene.identifier()) {
            Some(index) => {
                self.scenes[index] = scene;
                if self.current == Some(index) {
                    self.reload_full();
                }
            }
            None => self.scenes.push(scene),
        }
        Ok(())
    }

    /// The current scene.
    #[must_use]
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.and_then(|i| self.scenes.get(i))
    }

    /// The scene `identifier`.
    #[must_use]
    pub fn scene(&self, identifier: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.identifier() == identifier)
    }

    /// Every scene, in declaration order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    /// Registers a module with no content. See [`Self::add_module_with_content`].
    pub fn add_module(&mut self, key: impl Into<String>, provider: impl DefaultViewsProvider + 'static) {
        self.install(Module::new(key, provider));
    }

    /// Registers a module holding `content`.
    ///
    /// The views the current scene requests from the module are created right
    /// away and its widgets are scheduled through a module redraw. With the
    /// surface down a full reload is owed instead. A module already registered
    /// under `key` is replaced and its views cleared.
    pub fn add_module_with_content(
        &mut self,
        key: impl Into<String>,
        provider: impl DefaultViewsProvider + 'static,
        content: Vec<Record>,
    ) {
        self.install(Module::new(key, provider).with_content(content));
    }

    fn install(&mut self, mut module: Module) {
        let key = module.key().to_string();
        let ready = self.surface.is_available();

        if let Some(index) = self.current {
            if ready {
                module.set_default_views(&requested_views(&self.scenes[index], &key));
            } else {
                self.full_owed = true;
            }
        }
        tracing::debug!(module = %key, views = module.view_count(), "module added");

        let wants_redraw = module.redraw_requested();
        if self.modules.insert(key.clone(), module).is_some() {
            self.scheduler.cancel_module(&key);
        }
        if ready && wants_redraw {
            self.request_redraw(&key);
        }
    }

    /// Unregisters a module, cancelling its redraw and clearing its views.
    pub fn remove_module(&mut self, key: &str) -> bool {
        self.scheduler.cancel_module(key);
        let removed = self.modules.remove(key).is_some();
        if removed {
            tracing::debug!(module = key, "module removed");
        }
        removed
    }

    /// The module `key`.
    #[must_use]
    pub fn module(&self, key: &str) -> Option<&Module> {
        self.modules.get(key)
    }

    /// The module `key`, mutably.
    pub fn module_mut(&mut self, key: &str) -> Option<&mut Module> {
        self.modules.get_mut(key)
    }

    /// Replaces a module's content and schedules a redraw of its widgets.
    ///
    /// Returns `false` for an unknown module.
    pub fn set_module_content(&mut self, key: &str, content: Vec<Record>) -> bool {
        let Some(module) = self.modules.get_mut(key) else {
            return false;
        };
        module.set_content(content);
        self.request_redraw(key);
        true
    }

    /// Schedules a debounced pass that creates the views the current scene
    /// requests from `module`, coalesced over the scene's `draw_wait`.
    ///
    /// Returns `false` when no pass can run: no surface, no current scene or
    /// an unknown module.
    pub fn set_default_views(&mut self, module: &str) -> bool {
        if !self.surface.is_available() || !self.modules.contains_key(module) {
            return false;
        }
        let Some(index) = self.current else {
            return false;
        };
        let scene = &self.scenes[index];
        let now = self.clock.now();
        if self.scheduler.request_default_views(module, scene, now) {
            tracing::trace!(module, scene = scene.identifier(), "default views scheduled");
        }
        true
    }

    // ------------------------------------------------------------------
    // Reloads
    // ------------------------------------------------------------------

    /// Requests a reload of the current scene.
    ///
    /// Returns [`ReloadKind::Full`] when a full reload ran now,
    /// [`ReloadKind::Partial`] when a partial reload is pending, and `None`
    /// when there is no current scene or no surface.
    pub fn refresh(&mut self) -> Option<ReloadKind> {
        if !self.surface.is_available() {
            return None;
        }
        if self.full_owed {
            return self.reload_full();
        }

        let index = self.current?;
        let now = self.clock.now();
        match self.scheduler.request_reload(&self.scenes[index], now) {
            ReloadDecision::Full => {
                self.perform_full(index);
                Some(ReloadKind::Full)
            }
            ReloadDecision::Deferred { .. } => Some(ReloadKind::Partial),
        }
    }

    /// Schedules a debounced rerun of `module`'s widgets in the current scene.
    ///
    /// Returns `false` when nothing would run: no surface, no current scene,
    /// or no widget of the current scene uses the module.
    pub fn request_redraw(&mut self, module: &str) -> bool {
        if !self.surface.is_available() {
            return false;
        }
        let Some(index) = self.current else {
            return false;
        };
        let scene = &self.scenes[index];
        let Some(target) = self.modules.get_mut(module) else {
            return false;
        };
        if scene.widgets_for(module).next().is_none() {
            return false;
        }

        target.request_redraw();
        let now = self.clock.now();
        if self.scheduler.request_module_redraw(module, scene, now) {
            tracing::trace!(module, scene = scene.identifier(), "module redraw scheduled");
        }
        true
    }

    /// Runs every due partial reload, module redraw and default-views pass.
    ///
    /// Timers belonging to a scene that is no longer current are dropped.
    /// Returns how many reloads and redraws ran. Nothing runs, and nothing is
    /// consumed, while the surface is unavailable.
    pub fn poll(&mut self) -> usize {
        if !self.surface.is_available() {
            return 0;
        }
        let now = self.clock.now();
        let mut ran = 0;

        for (key, scene_id) in self.scheduler.take_due(now) {
            let Some(index) = self.current.filter(|&i| self.scenes[i].identifier() == scene_id) else {
                tracing::trace!(scene = %scene_id, ?key, "stale timer dropped");
                continue;
            };
            let scene = &self.scenes[index];

            match key {
                TimerKey::Scene(_) => {
                    run_widgets(&mut self.modules, scene, None);
                    self.scheduler.record_partial(&scene_id, now);
                    tracing::debug!(scene = %scene_id, kind = %ReloadKind::Partial, "reload");
                }
                TimerKey::ModuleRedraw(module) => {
                    run_widgets(&mut self.modules, scene, Some(&module));
                    tracing::trace!(scene = %scene_id, module = %module, "module redrawn");
                }
                TimerKey::DefaultViews(key) => {
                    let Some(module) = self.modules.get_mut(&key) else {
                        continue;
                    };
                    module.set_default_views(&requested_views(scene, &key));
                    if module.redraw_requested() && scene.widgets_for(&key).next().is_some() {
                        self.scheduler.request_module_redraw(&key, scene, now);
                    }
                }
            }
            ran += 1;
        }
        ran
    }

    /// When the next deferred reload or redraw becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// The reload scheduler, for inspecting reload history.
    #[must_use]
    pub fn scheduler(&self) -> &SceneScheduler {
        &self.scheduler
    }

    /// Whether the surface is currently available.
    #[must_use]
    pub fn surface_available(&self) -> bool {
        self.surface.is_available()
    }

    // ------------------------------------------------------------------
    // Colors
    // ------------------------------------------------------------------

    /// The color allocator.
    #[must_use]
    pub fn colorer(&self) -> &Colorer {
        &self.colorer
    }

    /// The color allocator, mutably.
    pub fn colorer_mut(&mut self) -> &mut Colorer {
        &mut self.colorer
    }

    /// Forces a full reload of the current scene, or owes one until the
    /// surface comes back.
    fn reload_full(&mut self) -> Option<ReloadKind> {
        let Some(index) = self.current else {
            self.full_owed = false;
            return None;
        };
        if !self.surface.is_available() {
            self.full_owed = true;
            return None;
        }

        self.full_owed = false;
        let now = self.clock.now();
        self.scheduler.force_full(&self.scenes[index], now);
        self.perform_full(index);
        Some(ReloadKind::Full)
    }

    fn perform_full(&mut self, index: usize) {
        let scene = &self.scenes[index];
        reconcile_modules(&mut self.modules, scene);
        let ran = run_widgets(&mut self.modules, scene, None);
        tracing::debug!(scene = scene.identifier(), kind = %ReloadKind::Full, widgets = ran, "reload");
    }
}

/// Brings every module's views in line with what `scene` requests.
fn reconcile_modules(modules: &mut BTreeMap<String, Module>, scene: &Scene) {
    let requested = requested_module_views(scene);
    let none = BTreeSet::new();

    for (key, module) in modules.iter_mut() {
        module.set_default_views(requested.get(key).unwrap_or(&none));
    }

    for key in requested.keys().filter(|key| !modules.contains_key(*key)) {
        tracing::warn!(scene = scene.identifier(), module = %key, "scene references unknown module");
    }
}

/// Runs the operations of `scene`'s widgets, optionally only those of one module.
fn run_widgets(modules: &mut BTreeMap<String, Module>, scene: &Scene, only: Option<&str>) -> usize {
    let mut ran = 0;

    for widget in scene.widgets() {
        if only.is_some_and(|m| m != widget.module) {
            continue;
        }
        let Some(module) = modules.get_mut(&widget.module) else {
            continue;
        };
        if !module.run_view(&widget.view, &widget.operation, &widget.params) {
            tracing::warn!(module = %widget.module, view = %widget.view, "widget view missing");
            continue;
        }
        ran += 1;
    }

    for module in modules.values_mut() {
        if only.is_none() || only == Some(module.key()) {
            module.take_redraw_request();
        }
    }
    ran
}
