//! Two-tier reload scheduling.
//!
//! Each scene identifier carries its own [`ReloadHistory`]. A reload request is
//! either due for a full reload right now (never reloaded, or
//! `full_refresh_wait` has passed since the last full one) or is coalesced into
//! a single partial reload `draw_wait` after the first request of the burst.
//!
//! The scheduler only decides and keeps time. Performing the reload is the
//! owner's job; deferred partials come back from [`SceneScheduler::take_due`].

use super::Scene;
use crate::schedule::Debouncer;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Which kind of reload ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReloadKind {
    /// Views reconciled, then every widget operation rerun.
    Full,
    /// Widget operations rerun on existing views.
    Partial,
}

impl fmt::Display for ReloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Full => "full",
            Self::Partial => "partial",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a reload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadDecision {
    /// Perform a full reload now. Already recorded in the history.
    Full,
    /// A partial reload is pending and fires at `fire_at`.
    Deferred {
        /// When the coalesced partial reload becomes due.
        fire_at: Instant,
    },
}

/// Identifies a pending timer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Partial reload of a scene.
    Scene(String),
    /// Redraw of one module's widgets in the current scene.
    ModuleRedraw(String),
    /// Creation of the views the current scene requests from one module.
    DefaultViews(String),
}

/// Reload timestamps and counters for one scene identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadHistory {
    /// When the last full reload ran.
    pub last_full_at: Option<Instant>,
    /// When widget operations last ran (full or partial).
    pub last_draw_at: Option<Instant>,
    /// Number of full reloads.
    pub full_reloads: u64,
    /// Number of partial reloads.
    pub partial_reloads: u64,
}

/// Per-scene reload scheduler.
#[derive(Debug, Default)]
pub struct SceneScheduler {
    timers: Debouncer<TimerKey, String>,
    history: HashMap<String, ReloadHistory>,
}

impl SceneScheduler {
    /// Creates a scheduler with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides how to honor a reload request for `scene` at `now`.
    pub fn request_reload(&mut self, scene: &Scene, now: Instant) -> ReloadDecision {
        let id = scene.identifier();
        let full_due = self
            .history
            .get(id)
            .and_then(|h| h.last_full_at)
            .map_or(true, |at| now.saturating_duration_since(at) >= scene.full_refresh_wait());

        if full_due {
            return self.force_full(scene, now);
        }

        let key = TimerKey::Scene(id.to_string());
        let started = self.timers.trigger(key.clone(), id.to_string(), scene.draw_wait(), now);
        let fire_at = self.timers.deadline(&key).unwrap_or(now);
        if started {
            tracing::debug!(scene = id, draw_wait_ms = scene.draw_wait_ms(), "partial reload scheduled");
        } else {
            tracing::trace!(scene = id, "reload coalesced into pending partial");
        }
        ReloadDecision::Deferred { fire_at }
    }

    /// Records a full reload of `scene` at `now`, regardless of its windows.
    ///
    /// Any pending partial for the scene is dropped; the full reload covers it.
    pub fn force_full(&mut self, scene: &Scene, now: Instant) -> ReloadDecision {
        let id = scene.identifier();
        self.timers.cancel(&TimerKey::Scene(id.to_string()));

        let history = self.history.entry(id.to_string()).or_default();
        history.last_full_at = Some(now);
        history.last_draw_at = Some(now);
        history.full_reloads += 1;

        tracing::debug!(scene = id, count = history.full_reloads, "full reload");
        ReloadDecision::Full
    }

    /// Records that a deferred partial reload of `scene_id` ran at `now`.
    pub fn record_partial(&mut self, scene_id: &str, now: Instant) {
        let history = self.history.entry(scene_id.to_string()).or_default();
        history.last_draw_at = Some(now);
        history.partial_reloads += 1;
    }

    /// Schedules a redraw of `module`'s widgets in `scene`, coalesced over the
    /// scene's `draw_wait`. Returns `true` if a new timer was started.
    pub fn request_module_redraw(&mut self, module: &str, scene: &Scene, now: Instant) -> bool {
        self.timers.trigger(
            TimerKey::ModuleRedraw(module.to_string()),
            scene.identifier().to_string(),
            scene.draw_wait(),
            now,
        )
    }

    /// Schedules a default-views pass for `module` in `scene`, coalesced over
    /// the scene's `draw_wait`. Returns `true` if a new timer was started.
    pub fn request_default_views(&mut self, module: &str, scene: &Scene, now: Instant) -> bool {
        self.timers.trigger(
            TimerKey::DefaultViews(module.to_string()),
            scene.identifier().to_string(),
            scene.draw_wait(),
            now,
        )
    }

    /// Drops the pending partial reload of `scene_id`, if any.
    pub fn cancel_scene(&mut self, scene_id: &str) -> bool {
        self.timers.cancel(&TimerKey::Scene(scene_id.to_string())).is_some()
    }

    /// Drops the pending redraw and default-views pass of `module`, if any.
    pub fn cancel_module(&mut self, module: &str) -> bool {
        let redraw = self.timers.cancel(&TimerKey::ModuleRedraw(module.to_string())).is_some();
        let views = self.timers.cancel(&TimerKey::DefaultViews(module.to_string())).is_some();
        redraw || views
    }

    /// Drops every pending timer that targets `scene_id`, module redraws included.
    pub fn cancel_all_for_scene(&mut self, scene_id: &str) {
        self.timers.retain(|_, scene| scene != scene_id);
    }

    /// Forgets everything known about `scene_id`.
    pub fn forget(&mut self, scene_id: &str) {
        self.cancel_all_for_scene(scene_id);
        self.history.remove(scene_id);
    }

    /// Removes and returns every timer due at `now`, as `(key, scene_id)`.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerKey, String)> {
        self.timers.take_due(now)
    }

    /// Whether the timer `key` is pending.
    #[must_use]
    pub fn is_pending(&self, key: &TimerKey) -> bool {
        self.timers.is_pending(key)
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Reload history of `scene_id`.
    #[must_use]
    pub fn history(&self, scene_id: &str) -> Option<&ReloadHistory> {
        self.history.get(scene_id)
    }
}
