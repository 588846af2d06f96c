//! Dimension tracking for views that redraw differently after a resize.
//!
//! Views embed a [`ResizeState`] and expose it through [`Resizable`]. A view's
//! draw reads [`ResizeState::take_dimensions_changed`] to choose between a full
//! redraw (layout recomputed) and an incremental one.

use crate::scene::Params;

/// Views with integral pixel dimensions.
pub trait Resizable {
    /// The resize state.
    fn resize_state(&self) -> &ResizeState;

    /// The resize state, mutably.
    fn resize_state_mut(&mut self) -> &mut ResizeState;

    /// Sets the width, floored.
    fn set_width(&mut self, width: f64) {
        self.resize_state_mut().set_width(width);
    }

    /// Sets the height, floored.
    fn set_height(&mut self, height: f64) {
        self.resize_state_mut().set_height(height);
    }

    /// Forces the next draw to be a full one.
    fn hard_reset(&mut self) {
        self.resize_state_mut().hard_reset();
    }
}

/// Floored width/height plus a "dimensions changed since last draw" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeState {
    width: i64,
    height: i64,
    dimensions_did_change: bool,
}

impl Default for ResizeState {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            dimensions_did_change: true,
        }
    }
}

impl ResizeState {
    /// Creates a state that reports a change on the first draw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current width in whole pixels.
    #[must_use]
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Current height in whole pixels.
    #[must_use]
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Sets the width. Only a change of the floored value marks the state dirty.
    pub fn set_width(&mut self, width: f64) {
        let floored = floor_px(width);
        if floored != self.width {
            self.width = floored;
            self.dimensions_did_change = true;
        }
    }

    /// Sets the height. Only a change of the floored value marks the state dirty.
    pub fn set_height(&mut self, height: f64) {
        let floored = floor_px(height);
        if floored != self.height {
            self.height = floored;
            self.dimensions_did_change = true;
        }
    }

    /// Applies `width` and `height` numeric params, when present.
    pub fn apply_params(&mut self, params: &Params) {
        if let Some(width) = params.get("width").and_then(|v| v.as_f64()) {
            self.set_width(width);
        }
        if let Some(height) = params.get("height").and_then(|v| v.as_f64()) {
            self.set_height(height);
        }
    }

    /// Whether the dimensions changed since the flag was last taken.
    #[must_use]
    pub fn dimensions_did_change(&self) -> bool {
        self.dimensions_did_change
    }

    /// Marks the dimensions as changed regardless of their values.
    pub fn hard_reset(&mut self) {
        self.dimensions_did_change = true;
    }

    /// Reads and clears the changed flag.
    pub fn take_dimensions_changed(&mut self) -> bool {
        std::mem::replace(&mut self.dimensions_did_change, false)
    }
}

fn floor_px(value: f64) -> i64 {
    if value.is_finite() {
        value.floor() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ParamValue;

    #[test]
    fn test_starts_dirty() {
        let mut state = ResizeState::new();
        assert!(state.dimensions_did_change());
        assert!(state.take_dimensions_changed());
        assert!(!state.take_dimensions_changed());
    }

    #[test]
    fn test_fractional_change_is_ignored() {
        let mut state = ResizeState::new();
        state.set_width(300.2);
        state.take_dimensions_changed();

        state.set_width(300.9);
        assert_eq!(state.width(), 300);
        assert!(!state.dimensions_did_change());

        state.set_width(301.0);
        assert!(state.dimensions_did_change());
    }

    #[test]
    fn test_hard_reset() {
        let mut state = ResizeState::new();
        state.take_dimensions_changed();
        state.hard_reset();
        assert!(state.take_dimensions_changed());
    }

    #[test]
    fn test_apply_params() {
        let mut state = ResizeState::new();
        let mut params = Params::new();
        params.insert("width".to_string(), ParamValue::Number(640.5));
        params.insert("height".to_string(), ParamValue::Number(480.0));
        params.insert("label".to_string(), ParamValue::from("x"));

        state.apply_params(&params);
        assert_eq!((state.width(), state.height()), (640, 480));
    }

    #[test]
    fn test_non_finite_floors_to_zero() {
        let mut state = ResizeState::new();
        state.set_height(f64::NAN);
        assert_eq!(state.height(), 0);
    }

    struct Panel {
        size: ResizeState,
    }

    impl Resizable for Panel {
        fn resize_state(&self) -> &ResizeState {
            &self.size
        }
        fn resize_state_mut(&mut self) -> &mut ResizeState {
            &mut self.size
        }
    }

    #[test]
    fn test_trait_delegates_to_state() {
        let mut panel = Panel { size: ResizeState::new() };
        panel.resize_state_mut().take_dimensions_changed();

        panel.set_width(12.7);
        panel.set_height(3.0);
        assert_eq!(panel.resize_state().width(), 12);
        assert!(panel.resize_state().dimensions_did_change());
    }
}
