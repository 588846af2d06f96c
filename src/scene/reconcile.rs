//! Which views a scene needs, and how a module's views must change to match.
//!
//! Everything here is pure: results are sets, so they are free of duplicates and
//! independent of widget order.

use super::Scene;
use std::collections::{BTreeMap, BTreeSet};

/// Module key → view keys referenced by a scene's widgets.
pub type RequestedViewSet = BTreeMap<String, BTreeSet<String>>;

/// View keys `module` must expose for `scene` to run.
#[must_use]
pub fn requested_views(scene: &Scene, module: &str) -> BTreeSet<String> {
    scene.widgets_for(module).map(|w| w.view.clone()).collect()
}

/// The requested views of every module referenced by `scene`.
#[must_use]
pub fn requested_module_views(scene: &Scene) -> RequestedViewSet {
    let mut requested = RequestedViewSet::new();
    for widget in scene.widgets() {
        requested
            .entry(widget.module.clone())
            .or_default()
            .insert(widget.view.clone());
    }
    requested
}

/// Structural change a full reload applies to one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewDiff {
    /// Requested views the module does not have yet.
    pub to_create: BTreeSet<String>,
    /// Existing views no longer requested; cleared and removed.
    pub to_clear: BTreeSet<String>,
}

impl ViewDiff {
    /// True when the module already matches the request.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_clear.is_empty()
    }
}

/// Computes the delta between `requested` views and the module's `active` ones.
pub fn diff_views<'a, I>(requested: &BTreeSet<String>, active: I) -> ViewDiff
where
    I: IntoIterator<Item = &'a str>,
{
    let active: BTreeSet<&str> = active.into_iter().collect();

    ViewDiff {
        to_create: requested
            .iter()
            .filter(|view| !active.contains(view.as_str()))
            .cloned()
            .collect(),
        to_clear: active
            .iter()
            .filter(|view| !requested.contains(**view))
            .map(|view| (*view).to_string())
            .collect(),
    }
}
