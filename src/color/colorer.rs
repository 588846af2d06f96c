//! The colorer: one palette shared by the fixed, rotating and unique policies.

use super::{ColorPalette, Rgba, RotatingAssigner, UniquePools};

/// Assigns visual identities to string keys from a single palette.
#[derive(Debug, Clone, Default)]
pub struct Colorer {
    palette: ColorPalette,
    rotating: RotatingAssigner,
    unique: UniquePools,
}

impl Colorer {
    /// Creates a colorer over `palette`.
    #[must_use]
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette,
            rotating: RotatingAssigner::new(),
            unique: UniquePools::new(),
        }
    }

    /// The active palette.
    #[must_use]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Replaces the palette. All rotating and unique assignments are dropped,
    /// since they referred to the old scheme.
    pub fn set_palette(&mut self, palette: ColorPalette) {
        self.palette = palette;
        self.rotating.reset();
        self.unique.reset_all();
    }

    /// A new owned copy of the scheme.
    #[must_use]
    pub fn fresh_palette(&self) -> Vec<Rgba> {
        self.palette.fresh()
    }

    /// Case-insensitive color for `key`.
    ///
    /// Fixed-table entries win and never touch the rotating table; anything else
    /// gets a permanent rotating color under its lowercased key.
    pub fn fixed(&mut self, key: &str) -> Rgba {
        let normalized = key.to_lowercase();
        match self.palette.fixed_color(&normalized) {
            Some(color) => color,
            None => self.rotating.color(&normalized, &self.palette),
        }
    }

    /// Case-sensitive rotating color for `key`.
    pub fn rotating_color(&mut self, key: &str) -> Rgba {
        self.rotating.color(key, &self.palette)
    }

    /// Read-only access to the rotating table.
    #[must_use]
    pub fn rotating(&self) -> &RotatingAssigner {
        &self.rotating
    }

    /// The color `unique_assign` would hand out next in `pool`.
    #[must_use]
    pub fn unique_next(&self, pool: &str) -> Option<Rgba> {
        self.unique.next(pool, &self.palette)
    }

    /// Binds `key` to an exclusive color in `pool`.
    pub fn unique_assign(&mut self, key: &str, pool: &str) -> Rgba {
        self.unique.assign(key, pool, &self.palette)
    }

    /// The exclusive color held by `key` in `pool`.
    #[must_use]
    pub fn unique(&self, key: &str, pool: &str) -> Option<Rgba> {
        self.unique.get(key, pool)
    }

    /// Like [`unique`](Self::unique), but falls back to the default-unassigned color.
    #[must_use]
    pub fn unique_or_unassigned(&self, key: &str, pool: &str) -> Rgba {
        self.unique
            .get(key, pool)
            .unwrap_or_else(|| self.palette.default_unassigned())
    }

    /// Releases `key`'s exclusive color in `pool`.
    pub fn unique_unassign(&mut self, key: &str, pool: &str) -> Option<Rgba> {
        self.unique.unassign(key, pool)
    }

    /// Restores `pool` to the full scheme with no bindings.
    pub fn unique_reset_set(&mut self, pool: &str) {
        self.unique.reset_set(pool, &self.palette);
    }

    /// Colors still available in `pool`.
    #[must_use]
    pub fn unique_available(&self, pool: &str) -> usize {
        self.unique.available(pool, &self.palette)
    }
}
