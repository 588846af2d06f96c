//! Rotating color assignment.
//!
//! Keys receive colors in scheme order from a working copy of the scheme. When
//! the working copy runs dry it is refilled from the full scheme, so a color is
//! only handed out again after every other scheme color has been used in the
//! current cycle. Assignments are permanent.

use super::{ColorPalette, Rgba};
use std::collections::{HashMap, VecDeque};

/// Permanent round-robin assignment of scheme colors to keys.
///
/// Keys are case-sensitive here; callers that want case-insensitive keys
/// normalize first (see [`Colorer::fixed`](super::Colorer::fixed)).
#[derive(Debug, Clone, Default)]
pub struct RotatingAssigner {
    working: VecDeque<Rgba>,
    assigned: HashMap<String, Rgba>,
    refills: usize,
}

impl RotatingAssigner {
    /// Creates an empty assigner. The working copy is filled on first draw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for `key`, assigning the next rotating color if needed.
    ///
    /// An empty scheme has nothing to rotate through; the palette's
    /// default-assigned color is returned (and cached) instead.
    pub fn color(&mut self, key: &str, palette: &ColorPalette) -> Rgba {
        if let Some(color) = self.assigned.get(key) {
            return *color;
        }

        if self.working.is_empty() {
            self.working.extend(palette.scheme().iter().copied());
            if !self.working.is_empty() {
                self.refills += 1;
                tracing::trace!(refills = self.refills, "rotating palette refilled");
            }
        }

        let color = self.working.pop_front().unwrap_or_else(|| palette.default_assigned());
        self.assigned.insert(key.to_string(), color);
        color
    }

    /// Returns the color already assigned to `key`, without assigning.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Rgba> {
        self.assigned.get(key).copied()
    }

    /// Number of keys holding a rotating color.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Returns true if no key has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Colors left in the current cycle before the next refill.
    #[must_use]
    pub fn remaining_in_cycle(&self) -> usize {
        self.working.len()
    }

    /// How many times the working copy has been (re)filled from the scheme.
    #[must_use]
    pub fn refills(&self) -> usize {
        self.refills
    }

    /// Forgets every assignment and the working copy.
    pub fn reset(&mut self) {
        self.working.clear();
        self.assigned.clear();
        self.refills = 0;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rotating allocation never leaves the scheme.
        #[test]
        fn prop_colors_come_from_scheme(
            scheme_len in 1usize..12,
            keys in prop::collection::vec("[a-z]{1,4}", 1..60)
        ) {
            let palette = ColorPalette::hue_wheel(scheme_len, 0.8, 0.5);
            let mut rotating = RotatingAssigner::new();

            for key in &keys {
                let color = rotating.color(key, &palette);
                prop_assert!(palette.contains(color));
            }
        }

        /// A key keeps its first color no matter how many refills follow.
        #[test]
        fn prop_assignment_is_stable(
            keys in prop::collection::vec("[a-z]{1,3}", 1..80)
        ) {
            let palette = ColorPalette::default();
            let mut rotating = RotatingAssigner::new();
            let mut first_seen = HashMap::new();

            for key in &keys {
                let color = rotating.color(key, &palette);
                let expected = *first_seen.entry(key.clone()).or_insert(color);
                prop_assert_eq!(color, expected);
            }
        }

        /// Within one cycle, distinct new keys receive distinct colors.
        #[test]
        fn prop_no_reuse_within_cycle(count in 1usize..=10) {
            let palette = ColorPalette::default();
            let mut rotating = RotatingAssigner::new();
            let colors: Vec<_> = (0..count)
                .map(|i| rotating.color(&format!("k{i}"), &palette))
                .collect();

            for (i, a) in colors.iter().enumerate() {
                for b in &colors[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
        }
    }
}
