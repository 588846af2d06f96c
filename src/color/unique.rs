//! Unique (exclusive) color assignment.
//!
//! Each named pool starts as a FIFO queue holding the scheme in order. Assigning
//! a key takes the front color; unassigning pushes it to the back. A scheme color
//! is therefore either queued or held by exactly one key. Once a pool is empty,
//! new keys receive the palette's default-assigned color instead, which is never
//! returned to the queue.

use super::{ColorPalette, Rgba};
use std::collections::{HashMap, HashSet, VecDeque};

/// Name of the pool used when callers have no reason to pick another.
pub const MAIN_POOL: &str = "main";

#[derive(Debug, Clone, Default)]
struct UniquePool {
    available: VecDeque<Rgba>,
    assigned: HashMap<String, Rgba>,
    // Keys bound to the default-assigned color after exhaustion.
    fallback: HashSet<String>,
}

impl UniquePool {
    fn fresh(palette: &ColorPalette) -> Self {
        Self {
            available: palette.scheme().iter().copied().collect(),
            assigned: HashMap::new(),
            fallback: HashSet::new(),
        }
    }
}

/// Named pools of exclusively held colors.
///
/// Pools are created lazily from the palette the first time they are touched.
#[derive(Debug, Clone, Default)]
pub struct UniquePools {
    pools: HashMap<String, UniquePool>,
}

impl UniquePools {
    /// Creates an empty set of pools.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn pool_mut(&mut self, pool: &str, palette: &ColorPalette) -> &mut UniquePool {
        self.pools
            .entry(pool.to_string())
            .or_insert_with(|| UniquePool::fresh(palette))
    }

    /// Peeks the color the next assignment in `pool` would receive.
    ///
    /// Returns `None` when the pool is exhausted.
    #[must_use]
    pub fn next(&self, pool: &str, palette: &ColorPalette) -> Option<Rgba> {
        match self.pools.get(pool) {
            Some(p) => p.available.front().copied(),
            None => palette.scheme().first().copied(),
        }
    }

    /// Binds `key` to the next available color in `pool` and returns it.
    ///
    /// An exhausted pool binds the palette's default-assigned color. A key that
    /// already holds a color keeps it and nothing is consumed.
    pub fn assign(&mut self, key: &str, pool: &str, palette: &ColorPalette) -> Rgba {
        let entry = self.pool_mut(pool, palette);
        if let Some(color) = entry.assigned.get(key) {
            return *color;
        }

        let color = match entry.available.pop_front() {
            Some(color) => color,
            None => {
                tracing::debug!(pool, key, "unique pool exhausted, using default color");
                entry.fallback.insert(key.to_string());
                palette.default_assigned()
            }
        };
        entry.assigned.insert(key.to_string(), color);
        color
    }

    /// Returns the color held by `key` in `pool`, if any.
    #[must_use]
    pub fn get(&self, key: &str, pool: &str) -> Option<Rgba> {
        self.pools.get(pool)?.assigned.get(key).copied()
    }

    /// Releases `key`'s color back to the end of `pool`'s queue.
    ///
    /// Returns the released binding, or `None` if `key` held nothing. A
    /// default-assigned fallback binding is dropped but not queued, since it was
    /// never drawn from the scheme. This holds even when the default color is
    /// also a scheme color held by another key.
    pub fn unassign(&mut self, key: &str, pool: &str) -> Option<Rgba> {
        let entry = self.pools.get_mut(pool)?;
        let color = entry.assigned.remove(key)?;

        if !entry.fallback.remove(key) && !entry.available.contains(&color) {
            entry.available.push_back(color);
        }
        Some(color)
    }

    /// Clears every binding in `pool` and restores the full scheme in order.
    pub fn reset_set(&mut self, pool: &str, palette: &ColorPalette) {
        self.pools.insert(pool.to_string(), UniquePool::fresh(palette));
    }

    /// Drops every pool; they are recreated on next use.
    pub fn reset_all(&mut self) {
        self.pools.clear();
    }

    /// Number of colors still available in `pool`.
    #[must_use]
    pub fn available(&self, pool: &str, palette: &ColorPalette) -> usize {
        self.pools
            .get(pool)
            .map_or(palette.scheme().len(), |p| p.available.len())
    }

    /// Number of keys holding a color in `pool`.
    #[must_use]
    pub fn assigned_len(&self, pool: &str) -> usize {
        self.pools.get(pool).map_or(0, |p| p.assigned.len())
    }
}
