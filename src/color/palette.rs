//! Color palettes: the scheme that allocation draws from, plus fallbacks.

use super::{Hsla, Rgba};
use std::collections::HashMap;

/// The ten-color categorical scheme used when no scheme is configured.
pub const CATEGORY10: [Rgba; 10] = [
    Rgba::from_rgb_u32(0x1f77b4),
    Rgba::from_rgb_u32(0xff7f0e),
    Rgba::from_rgb_u32(0x2ca02c),
    Rgba::from_rgb_u32(0xd62728),
    Rgba::from_rgb_u32(0x9467bd),
    Rgba::from_rgb_u32(0x8c564b),
    Rgba::from_rgb_u32(0xe377c2),
    Rgba::from_rgb_u32(0x7f7f7f),
    Rgba::from_rgb_u32(0xbcbd22),
    Rgba::from_rgb_u32(0x17becf),
];

/// Default color bound to keys when a unique pool is exhausted.
pub const DEFAULT_ASSIGNED: Rgba = Rgba::from_rgb_u32(0xcccccc);

/// Default color reported for keys that hold no unique color.
pub const DEFAULT_UNASSIGNED: Rgba = Rgba::WHITE;

/// An ordered color scheme with its fallback colors and fixed-value table.
///
/// Fixed-value keys are stored lowercased; lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    scheme: Vec<Rgba>,
    default_assigned: Rgba,
    default_unassigned: Rgba,
    fixed: HashMap<String, Rgba>,
}

impl ColorPalette {
    /// Creates a palette with the given scheme and default fallbacks.
    #[must_use]
    pub fn new(scheme: Vec<Rgba>) -> Self {
        Self {
            scheme,
            default_assigned: DEFAULT_ASSIGNED,
            default_unassigned: DEFAULT_UNASSIGNED,
            fixed: HashMap::new(),
        }
    }

    /// Creates a palette of `count` hues evenly spaced around the color wheel.
    #[must_use]
    pub fn hue_wheel(count: usize, saturation: f32, lightness: f32) -> Self {
        let step = if count == 0 { 0.0 } else { 360.0 / count as f32 };
        let scheme = (0..count)
            .map(|i| Hsla::hsl(step * i as f32, saturation, lightness).to_rgba())
            .collect();
        Self::new(scheme)
    }

    /// Sets the color bound to keys when a unique pool is exhausted.
    #[must_use]
    pub fn with_default_assigned(mut self, color: Rgba) -> Self {
        self.default_assigned = color;
        self
    }

    /// Sets the color reported for keys without a unique color.
    #[must_use]
    pub fn with_default_unassigned(mut self, color: Rgba) -> Self {
        self.default_unassigned = color;
        self
    }

    /// Adds a fixed color for `key` (case-insensitive).
    #[must_use]
    pub fn with_fixed(mut self, key: &str, color: Rgba) -> Self {
        self.fixed.insert(key.to_lowercase(), color);
        self
    }

    /// The ordered scheme.
    #[must_use]
    pub fn scheme(&self) -> &[Rgba] {
        &self.scheme
    }

    /// A new owned copy of the scheme, in scheme order.
    #[must_use]
    pub fn fresh(&self) -> Vec<Rgba> {
        self.scheme.clone()
    }

    /// Whether `color` is one of the scheme's colors.
    #[must_use]
    pub fn contains(&self, color: Rgba) -> bool {
        self.scheme.contains(&color)
    }

    /// Fallback color for exhausted unique pools.
    #[must_use]
    pub fn default_assigned(&self) -> Rgba {
        self.default_assigned
    }

    /// Fallback color for keys without a unique assignment.
    #[must_use]
    pub fn default_unassigned(&self) -> Rgba {
        self.default_unassigned
    }

    /// Looks up the fixed color for `key`, ignoring case.
    #[must_use]
    pub fn fixed_color(&self, key: &str) -> Option<Rgba> {
        self.fixed.get(&key.to_lowercase()).copied()
    }

    /// Number of fixed-value entries.
    #[must_use]
    pub fn fixed_len(&self) -> usize {
        self.fixed.len()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(CATEGORY10.to_vec())
    }
}
