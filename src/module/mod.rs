//! Modules and their views.
//!
//! A [`Module`] owns its data and the named views built by its
//! [`DefaultViewsProvider`]. Which views exist is decided by the current
//! scene: [`Module::set_default_views`] creates the requested ones on
//! registration, full reloads reconcile them afterwards. The module also
//! tracks whether it asked for a redraw.

pub mod dataset;
pub mod resize;
pub mod view;

pub use dataset::{Dataset, Group, Record, DEFAULT_MAX_LENGTH};
pub use resize::{Resizable, ResizeState};
pub use view::{DefaultViewsProvider, View};

use crate::scene::{diff_views, Params};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A named owner of data and views.
pub struct Module {
    key: String,
    provider: Box<dyn DefaultViewsProvider>,
    views: BTreeMap<String, Box<dyn View>>,
    data: Dataset<Record>,
    redraw_requested: bool,
    default_view_passes: u64,
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("key", &self.key)
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .field("rows", &self.data.content().len())
            .field("redraw_requested", &self.redraw_requested)
            .finish_non_exhaustive()
    }
}

impl Module {
    /// Creates a module with no views and no content.
    pub fn new(key: impl Into<String>, provider: impl DefaultViewsProvider + 'static) -> Self {
        Self {
            key: key.into(),
            provider: Box::new(provider),
            views: BTreeMap::new(),
            data: Dataset::default(),
            redraw_requested: false,
            default_view_passes: 0,
        }
    }

    /// Sets the initial content.
    #[must_use]
    pub fn with_content(mut self, content: Vec<Record>) -> Self {
        self.data.set_content(content);
        self
    }

    /// The module key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The module's content and dataset.
    #[must_use]
    pub fn data(&self) -> &Dataset<Record> {
        &self.data
    }

    /// The module's data, mutably. Call [`Dataset::notify_changed`] after
    /// editing the content in place.
    pub fn data_mut(&mut self) -> &mut Dataset<Record> {
        &mut self.data
    }

    /// Replaces the content and flags a redraw request.
    pub fn set_content(&mut self, content: Vec<Record>) {
        self.data.set_content(content);
        self.redraw_requested = true;
    }

    /// Brings the views in line with `requested`: unrequested views are
    /// cleared, missing ones are built through the provider.
    ///
    /// Creating a view flags a redraw request. Returns how many views were created.
    pub fn set_default_views(&mut self, requested: &BTreeSet<String>) -> usize {
        self.default_view_passes += 1;
        let diff = diff_views(requested, self.view_keys());

        for view_key in &diff.to_clear {
            self.remove_view(view_key);
        }
        let created = diff
            .to_create
            .iter()
            .filter(|view_key| self.add_view(view_key).is_some())
            .count();

        tracing::trace!(module = %self.key, created, cleared = diff.to_clear.len(), "default views set");
        created
    }

    /// How many times [`Self::set_default_views`] ran.
    #[must_use]
    pub fn default_view_passes(&self) -> u64 {
        self.default_view_passes
    }

    /// Returns the view `view_key`, creating it through the provider if absent.
    ///
    /// Creating a view flags a redraw request. Returns `None` when the provider
    /// cannot build the view.
    pub fn add_view(&mut self, view_key: &str) -> Option<&mut (dyn View + 'static)> {
        if !self.views.contains_key(view_key) {
            let Some(view) = self.provider.create_view(view_key) else {
                tracing::warn!(module = %self.key, view = view_key, "provider has no such view");
                return None;
            };
            tracing::debug!(module = %self.key, view = view_key, "view created");
            self.views.insert(view_key.to_string(), view);
            self.redraw_requested = true;
        }
        self.views.get_mut(view_key).map(|view| &mut **view)
    }

    /// The view `view_key`, if it exists.
    #[must_use]
    pub fn get_view(&self, view_key: &str) -> Option<&(dyn View + 'static)> {
        self.views.get(view_key).map(|view| &**view)
    }

    /// The view `view_key`, mutably.
    pub fn get_view_mut(&mut self, view_key: &str) -> Option<&mut (dyn View + 'static)> {
        self.views.get_mut(view_key).map(|view| &mut **view)
    }

    /// Runs `operation` on the view `view_key` against the module's data.
    ///
    /// Resizable views pick up `width`/`height` from `params` first. Returns
    /// `false` when the view does not exist.
    pub fn run_view(&mut self, view_key: &str, operation: &str, params: &Params) -> bool {
        let Some(view) = self.views.get_mut(view_key) else {
            return false;
        };
        if let Some(resizable) = view.resizable_mut() {
            resizable.resize_state_mut().apply_params(params);
        }
        view.run_with(operation, params, &mut self.data);
        true
    }

    /// Clears and removes the view `view_key`. Returns whether it existed.
    pub fn remove_view(&mut self, view_key: &str) -> bool {
        match self.views.remove(view_key) {
            Some(mut view) => {
                view.clear();
                tracing::debug!(module = %self.key, view = view_key, "view cleared");
                true
            }
            None => false,
        }
    }

    /// Clears and removes every view.
    pub fn clear_views(&mut self) {
        for (view_key, mut view) in std::mem::take(&mut self.views) {
            view.clear();
            tracing::debug!(module = %self.key, view = %view_key, "view cleared");
        }
    }

    /// Keys of the current views, sorted.
    pub fn view_keys(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Number of views.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Asks the owner to redraw this module.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Whether a redraw was requested and not yet taken.
    #[must_use]
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Reads and clears the redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::replace(&mut self.redraw_requested, false)
    }
}

impl Drop for Module {
    fn drop(&mut self) {
        self.clear_views();
    }
}
