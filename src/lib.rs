//! # vizscene
//!
//! Scene scheduling and color allocation for visualization widget toolkits.
//!
//! *Modules* hold data, *views* render it, and *scenes* say which views are
//! active and how often they refresh. vizscene owns the parts in between:
//!
//! - **Reload scheduling**: bursts of change notifications collapse into
//!   rate-limited partial reloads, with a full reload (views reconciled against
//!   the scene) at most once per `full_refresh_wait`.
//! - **Scene switching**: views the incoming scene does not request are
//!   cleared, missing ones created, pending work of the outgoing scene dropped.
//! - **Color allocation**: deterministic colors for string keys, either
//!   round-robin (colors reused) or exclusive per pool (colors released
//!   explicitly), with case-insensitive fixed colors.
//!
//! Rendering itself is out of scope; views implement [`module::View`].
//!
//! ## Quick Start
//!
//! ```rust
//! use vizscene::prelude::*;
//!
//! let mut colorer = Colorer::new(ColorPalette::new(vec![Rgba::RED, Rgba::BLUE]));
//!
//! let rust = colorer.unique_assign("rust", MAIN_POOL);
//! let ruby = colorer.unique_assign("ruby", MAIN_POOL);
//! assert_ne!(rust, ruby);
//! assert_eq!(colorer.unique_next(MAIN_POOL), None);
//! ```
//!
//! Everything is single-threaded and driven through `&mut self`. Deferred
//! work only runs inside [`Visualizer::poll`].

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types, palettes and allocation policies.
pub mod color;

/// Clocks and the debounce coordinator.
pub mod schedule;

/// Scenes, widgets, reload scheduling and view reconciliation.
pub mod scene;

/// Modules, views and module data.
pub mod module;

// ============================================================================
// Facade
// ============================================================================

/// The visualizer that ties modules, scenes and the reload loop together.
pub mod visualizer;

pub use visualizer::{Surface, SurfaceHandle, Visualizer};

// ============================================================================
// Configuration
// ============================================================================

/// YAML configuration.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for vizscene operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use vizscene::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{ColorPalette, Colorer, Hsla, Rgba, MAIN_POOL};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::module::{Dataset, DefaultViewsProvider, Module, Record, Resizable, ResizeState, View};
    pub use crate::scene::{ParamValue, Params, ReloadKind, Scene, Widget};
    pub use crate::schedule::{Clock, ManualClock, SystemClock};
    pub use crate::visualizer::{Surface, SurfaceHandle, Visualizer};
}
