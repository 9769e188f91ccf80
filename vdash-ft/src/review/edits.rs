//! Pending transcription edits (the modification map)
//!
//! Maps sample id to the unsaved transcription text. An edit equal to the
//! sample's saved text removes the entry (no-op detection); entries are
//! cleared per batch on successful save, and only when the pending value
//! still matches what was flushed, so an edit racing a flush is kept for
//! the next one.

use std::collections::BTreeMap;

/// Unsaved transcription edits keyed by sample id
#[derive(Debug, Default, Clone)]
pub struct PendingEdits {
    pending: BTreeMap<String, String>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit. Returns true if the sample now has a pending edit,
    /// false if the edit restored the saved text and cleared the entry.
    pub fn record(&mut self, id: &str, new_text: &str, saved_text: &str) -> bool {
        if new_text == saved_text {
            self.pending.remove(id);
            false
        } else {
            self.pending.insert(id.to_string(), new_text.to_string());
            true
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.pending.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remove(&mut self, id: &str) {
        self.pending.remove(id);
    }

    /// Stable (id-ordered) copy of all pending entries, for batching
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.pending
            .iter()
            .map(|(id, text)| (id.clone(), text.clone()))
            .collect()
    }

    /// Clear an entry after a successful save, unless a newer edit landed
    /// while the flush was in flight.
    pub fn clear_if_unchanged(&mut self, id: &str, flushed_text: &str) {
        if self.pending.get(id).map(String::as_str) == Some(flushed_text) {
            self.pending.remove(id);
        }
    }

    /// Drop entries whose id no longer passes the predicate
    /// (samples deleted or gone after a reload)
    pub fn retain<F: Fn(&str) -> bool>(&mut self, keep: F) {
        self.pending.retain(|id, _| keep(id));
    }
}
