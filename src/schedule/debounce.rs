//! Named-timer coalescing.
//!
//! A [`Debouncer`] holds at most one pending timer per key. The first trigger
//! for an idle key fixes the deadline at `now + window`; later triggers before
//! the deadline only replace the action that will run (latest wins). The window
//! does not slide, so a steady stream of triggers still fires once per window.
//!
//! Timers never fire on their own. The owner calls [`Debouncer::take_due`] from
//! its event loop and executes what comes back.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use vizscene::schedule::Debouncer;
//!
//! let mut debouncer = Debouncer::new();
//! let t0 = Instant::now();
//! let window = Duration::from_millis(100);
//!
//! debouncer.trigger("redraw", 1, window, t0);
//! debouncer.trigger("redraw", 2, window, t0 + Duration::from_millis(60));
//!
//! assert!(debouncer.take_due(t0 + Duration::from_millis(99)).is_empty());
//! assert_eq!(debouncer.take_due(t0 + window), vec![("redraw", 2)]);
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<A> {
    fire_at: Instant,
    seq: u64,
    action: A,
}

/// Fire-once timers keyed by `K`, each carrying an action `A`.
#[derive(Debug)]
pub struct Debouncer<K, A> {
    pending: HashMap<K, Pending<A>>,
    next_seq: u64,
}

impl<K, A> Default for Debouncer<K, A> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, A> Debouncer<K, A> {
    /// Creates a debouncer with no pending timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` to run once `window` after the first trigger of `key`.
    ///
    /// Returns `true` if a new timer was started, `false` if one was already
    /// pending (its deadline is kept and its action replaced).
    pub fn trigger(&mut self, key: K, action: A, window: Duration, now: Instant) -> bool {
        if let Some(pending) = self.pending.get_mut(&key) {
            pending.action = action;
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(
            key,
            Pending {
                fire_at: now + window,
                seq,
                action,
            },
        );
        true
    }

    /// Drops the pending timer for `key`, returning its action.
    pub fn cancel(&mut self, key: &K) -> Option<A> {
        self.pending.remove(key).map(|p| p.action)
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Keeps only the timers for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &A) -> bool) {
        self.pending.retain(|key, p| keep(key, &p.action));
    }

    /// Whether a timer for `key` is pending.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// When the timer for `key` will fire, if pending.
    #[must_use]
    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.pending.get(key).map(|p| p.fire_at)
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.fire_at).min()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every timer due at `now`.
    ///
    /// Results are ordered by deadline, ties by trigger order.
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, A)> {
        let mut due: Vec<(Instant, u64, K)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.fire_at <= now)
            .map(|(k, p)| (p.fire_at, p.seq, k.clone()))
            .collect();
        due.sort_by_key(|(fire_at, seq, _)| (*fire_at, *seq));

        due.into_iter()
            .filter_map(|(_, _, key)| {
                let pending = self.pending.remove(&key)?;
                Some((key, pending.action))
            })
            .collect()
    }
}

impl<K: Eq + Hash + Clone> Debouncer<K, Box<dyn FnOnce()>> {
    /// Runs every due callback and returns how many ran.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let due = self.take_due(now);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// However triggers are spread, each key fires at most once per window
        /// and every trigger is eventually covered by a firing.
        #[test]
        fn prop_at_most_one_fire_per_window(
            window_ms in 1u64..50,
            offsets in prop::collection::vec(0u64..500, 1..100)
        ) {
            let mut offsets = offsets;
            offsets.sort_unstable();
            let window = Duration::from_millis(window_ms);
            let t0 = Instant::now();
            let mut debouncer = Debouncer::new();
            let mut fired_at = Vec::new();

            for offset in offsets {
                let now = t0 + Duration::from_millis(offset);
                for _ in debouncer.take_due(now) {
                    fired_at.push(now);
                }
                debouncer.trigger("k", (), window, now);
            }
            let end = t0 + Duration::from_millis(1000);
            fired_at.extend(debouncer.take_due(end).into_iter().map(|_| end));

            prop_assert!(!fired_at.is_empty());
            prop_assert!(debouncer.is_empty());
            for pair in fired_at.windows(2) {
                prop_assert!(pair[1] - pair[0] >= window);
            }
        }
    }
}
