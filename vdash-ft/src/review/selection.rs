//! Selection set for bulk actions
//!
//! Tracks which sample ids are currently chosen. Range-select and
//! select-all operate on the *filtered* view, never the full dataset.
//! Ids that no longer exist in the dataset are silent no-ops for every
//! operation.

use std::collections::HashSet;

use vdash_common::Sample;

/// Set of sample ids chosen for bulk actions
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in arbitrary order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Add every id between two positions of the filtered view, inclusive.
    /// The anchor may come before or after the endpoint; out-of-range
    /// positions are clamped to the end of the view.
    pub fn select_range(&mut self, filtered: &[&Sample], a: usize, b: usize) {
        if filtered.is_empty() {
            return;
        }
        let last = filtered.len() - 1;
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let (start, end) = (start.min(last), end.min(last));
        for sample in &filtered[start..=end] {
            self.ids.insert(sample.id.clone());
        }
    }

    /// Select every sample in the filtered view
    pub fn select_all(&mut self, filtered: &[&Sample]) {
        for sample in filtered {
            self.ids.insert(sample.id.clone());
        }
    }

    /// Drop selected ids that no longer pass the predicate
    /// (used after deletes and reloads)
    pub fn retain<F: Fn(&str) -> bool>(&mut self, keep: F) {
        self.ids.retain(|id| keep(id));
    }
}
