//! Scenes and widgets.
//!
//! A [`Scene`] names a set of [`Widget`]s, each binding a module's view to an
//! operation, and the two refresh rates that govern how often they rerun:
//!
//! - `draw_wait`: minimum time between partial reloads (rerun operations)
//! - `full_refresh_wait`: minimum time between full reloads (reconcile views,
//!   then rerun operations)
//!
//! Scenes are plain data. Scheduling lives in [`scheduler`], view bookkeeping in
//! [`reconcile`].

pub mod reconcile;
pub mod scheduler;

pub use reconcile::{diff_views, requested_module_views, requested_views, RequestedViewSet, ViewDiff};
pub use scheduler::{ReloadDecision, ReloadHistory, ReloadKind, SceneScheduler, TimerKey};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

/// Default minimum milliseconds between partial reloads.
pub const DEFAULT_DRAW_WAIT_MS: u64 = 100;

/// Default minimum milliseconds between full reloads.
pub const DEFAULT_FULL_REFRESH_WAIT_MS: u64 = 1000;

/// A single widget parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean flag.
    Bool(bool),
    /// A numeric value (sizes, increments).
    Number(f64),
    /// A text value (selectors, labels).
    Text(String),
}

impl ParamValue {
    /// Returns the value as a number, if it is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as text, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a flag, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Widget parameters, ordered by name.
pub type Params = BTreeMap<String, ParamValue>;

/// Binds `operation(params)` to the view `view` of module `module`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Key of the module that owns the view.
    pub module: String,
    /// Key of the view within the module.
    pub view: String,
    /// Operation invoked on the view.
    pub operation: String,
    /// Parameters passed to the operation.
    #[serde(default)]
    pub params: Params,
}

impl Widget {
    /// Creates a widget with no parameters.
    #[must_use]
    pub fn new(module: impl Into<String>, view: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            view: view.into(),
            operation: operation.into(),
            params: Params::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// A named configuration of active widgets and refresh rates.
///
/// The widget list is fixed once the scene is built; changing it means
/// replacing the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    identifier: String,

    /// Minimum milliseconds between partial reloads.
    #[serde(default = "default_draw_wait")]
    draw_wait: u64,

    /// Minimum milliseconds between full reloads.
    #[serde(default = "default_full_refresh_wait")]
    full_refresh_wait: u64,

    #[serde(default)]
    widgets: Vec<Widget>,
}

fn default_draw_wait() -> u64 {
    DEFAULT_DRAW_WAIT_MS
}
fn default_full_refresh_wait() -> u64 {
    DEFAULT_FULL_REFRESH_WAIT_MS
}

impl Scene {
    /// Creates an empty scene with default refresh rates.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            draw_wait: DEFAULT_DRAW_WAIT_MS,
            full_refresh_wait: DEFAULT_FULL_REFRESH_WAIT_MS,
            widgets: Vec::new(),
        }
    }

    /// Sets the partial reload window in milliseconds.
    #[must_use]
    pub fn with_draw_wait(mut self, ms: u64) -> Self {
        self.draw_wait = ms;
        self
    }

    /// Sets the full reload window in milliseconds.
    #[must_use]
    pub fn with_full_refresh_wait(mut self, ms: u64) -> Self {
        self.full_refresh_wait = ms;
        self
    }

    /// Appends a widget.
    #[must_use]
    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    /// The scene identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The widgets, in run order.
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Widgets bound to `module`, in run order.
    pub fn widgets_for<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Widget> + 'a {
        self.widgets.iter().filter(move |w| w.module == module)
    }

    /// Partial reload window in milliseconds.
    #[must_use]
    pub fn draw_wait_ms(&self) -> u64 {
        self.draw_wait
    }

    /// Full reload window in milliseconds.
    #[must_use]
    pub fn full_refresh_wait_ms(&self) -> u64 {
        self.full_refresh_wait
    }

    /// Partial reload window.
    #[must_use]
    pub fn draw_wait(&self) -> Duration {
        Duration::from_millis(self.draw_wait)
    }

    /// Full reload window.
    #[must_use]
    pub fn full_refresh_wait(&self) -> Duration {
        Duration::from_millis(self.full_refresh_wait)
    }

    /// Checks that the scene has an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySceneIdentifier`] for a blank identifier.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(Error::EmptySceneIdentifier);
        }
        Ok(())
    }
}

/// Validates a list of scenes: every identifier present and unique.
///
/// # Errors
///
/// Returns the first [`Error::EmptySceneIdentifier`] or [`Error::DuplicateScene`].
pub fn validate_scenes(scenes: &[Scene]) -> Result<()> {
    let mut seen = HashSet::new();
    for scene in scenes {
        scene.validate()?;
        if !seen.insert(scene.identifier()) {
            return Err(Error::DuplicateScene(scene.identifier().to_string()));
        }
    }
    Ok(())
}
