//! Module data with explicit invalidation.
//!
//! A [`Dataset`] holds the module's *content* and the *dataset* views draw from.
//! The dataset is the content itself until [`Dataset::force_limit`] trims it to
//! the `max_length` largest rows.
//!
//! Derived views of the data (groupings) are computed on first use and kept
//! until [`Dataset::notify_changed`] or [`Dataset::set_content`] invalidates
//! them. Nothing watches the content: callers that mutate it in place through
//! [`Dataset::content_mut`] must notify.

use crate::scene::ParamValue;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Default maximum number of rows a limited dataset keeps.
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// A loosely typed row: field name to value.
pub type Record = BTreeMap<String, ParamValue>;

/// Rows sharing one grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The grouping key.
    pub key: String,
    /// Indices of the member rows in content order.
    pub members: Vec<usize>,
}

impl Group {
    /// Number of member rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the group has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A module's content plus its limit and memoized groupings.
#[derive(Debug, Clone)]
pub struct Dataset<T> {
    content: Vec<T>,
    max_length: usize,
    // Content indices kept by `force_limit`, in content order.
    limited: Option<Vec<usize>>,
    generation: u64,
    groupings: HashMap<String, Vec<Group>>,
    recomputed: u64,
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            max_length: DEFAULT_MAX_LENGTH,
            limited: None,
            generation: 0,
            groupings: HashMap::new(),
            recomputed: 0,
        }
    }
}

impl<T> Dataset<T> {
    /// Creates a dataset holding `content`.
    #[must_use]
    pub fn new(content: Vec<T>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// All rows.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// The rows, for in-place edits. Call [`Self::notify_changed`] afterwards.
    pub fn content_mut(&mut self) -> &mut Vec<T> {
        &mut self.content
    }

    /// Replaces the rows and invalidates derived data.
    pub fn set_content(&mut self, content: Vec<T>) {
        self.content = content;
        self.notify_changed();
    }

    /// Invalidates every memoized grouping and any forced limit.
    pub fn notify_changed(&mut self) {
        self.generation += 1;
        self.limited = None;
        self.groupings.clear();
        tracing::trace!(generation = self.generation, "dataset invalidated");
    }

    /// Bumped on every invalidation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How many groupings have been computed since creation.
    #[must_use]
    pub fn recomputed(&self) -> u64 {
        self.recomputed
    }

    /// Maximum number of rows [`Self::force_limit`] keeps.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Sets the maximum number of rows [`Self::force_limit`] keeps.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length;
    }

    /// Trims the dataset to the `max_length` rows with the largest `value_fn`.
    ///
    /// The content is untouched and the kept rows stay in content order. Ties
    /// keep the earlier row. Content within the limit leaves the dataset equal
    /// to the content.
    pub fn force_limit<F>(&mut self, value_fn: F)
    where
        F: Fn(&T) -> f64,
    {
        self.groupings.clear();
        if self.content.len() <= self.max_length {
            self.limited = None;
            return;
        }

        let mut ranked: Vec<(usize, f64)> = self.content.iter().map(&value_fn).enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let mut kept: Vec<usize> = ranked.into_iter().take(self.max_length).map(|(i, _)| i).collect();
        kept.sort_unstable();

        tracing::debug!(content = self.content.len(), kept = kept.len(), "dataset limited");
        self.limited = Some(kept);
    }

    /// Whether a forced limit currently trims the dataset.
    #[must_use]
    pub fn is_limited(&self) -> bool {
        self.limited.is_some()
    }

    /// The rows views draw from.
    pub fn dataset(&self) -> impl Iterator<Item = &T> + '_ {
        self.dataset_indices().map(move |i| &self.content[i])
    }

    /// Number of rows in the dataset.
    #[must_use]
    pub fn dataset_len(&self) -> usize {
        self.limited.as_ref().map_or(self.content.len(), Vec::len)
    }

    fn dataset_indices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match &self.limited {
            Some(kept) => Box::new(kept.iter().copied()),
            None => Box::new(0..self.content.len()),
        }
    }

    /// Groups the dataset rows by `key_fn`, memoized under `name`.
    ///
    /// Groups are ordered largest first; equal sizes keep the order in which
    /// their key first appears. `key_fn` only runs when `name` has no valid
    /// cached grouping.
    pub fn grouped_by<F>(&mut self, name: &str, key_fn: F) -> &[Group]
    where
        F: Fn(&T) -> String,
    {
        if !self.groupings.contains_key(name) {
            let groups = group_rows(&self.content, self.dataset_indices(), key_fn);
            self.recomputed += 1;
            self.groupings.insert(name.to_string(), groups);
        }
        self.groupings.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Dataset<Record> {
    /// Groups records by the text form of `field`; rows without it group under "".
    pub fn grouped_by_field(&mut self, field: &str) -> &[Group] {
        self.grouped_by(field, |row| match row.get(field) {
            Some(ParamValue::Text(text)) => text.clone(),
            Some(ParamValue::Number(n)) => n.to_string(),
            Some(ParamValue::Bool(b)) => b.to_string(),
            None => String::new(),
        })
    }

    /// Limits records by the numeric `field`; rows without it rank lowest.
    pub fn force_limit_by_field(&mut self, field: &str) {
        self.force_limit(|row| row.get(field).and_then(ParamValue::as_f64).unwrap_or(f64::NEG_INFINITY));
    }
}

fn group_rows<T, F>(rows: &[T], indices: impl Iterator<Item = usize>, key_fn: F) -> Vec<Group>
where
    F: Fn(&T) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for i in indices {
        let key = key_fn(&rows[i]);
        match index.get(&key) {
            Some(&g) => groups[g].members.push(i),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group { key, members: vec![i] });
            }
        }
    }

    // Stable: ties stay in first-appearance order.
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}
