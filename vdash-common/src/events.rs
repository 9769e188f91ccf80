//! Notification event types for the review dashboard
//!
//! These are the transient "toast" payloads pushed to connected dashboard
//! clients over the SSE notification stream.

use serde::{Deserialize, Serialize};

/// Review notification events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReviewEvent {
    /// Sample list (re)loaded from the backend
    SamplesLoaded {
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One batch of transcription edits was saved
    EditsSaved {
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A batch of transcription edits failed; its entries remain pending
    SaveFailed {
        error: String,
        pending: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Selected samples were reassigned to another split
    SplitChanged {
        count: usize,
        split: crate::Split,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Selected samples were deleted
    SamplesDeleted {
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A bulk operation failed; local state was left untouched
    BulkFailed {
        operation: String,
        error: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Dataset metadata regenerated on the backend
    DatasetSynced {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl ReviewEvent {
    /// SSE event name for this notification
    pub fn event_name(&self) -> &'static str {
        match self {
            ReviewEvent::SamplesLoaded { .. } => "samples_loaded",
            ReviewEvent::EditsSaved { .. } => "edits_saved",
            ReviewEvent::SaveFailed { .. } => "save_failed",
            ReviewEvent::SplitChanged { .. } => "split_changed",
            ReviewEvent::SamplesDeleted { .. } => "samples_deleted",
            ReviewEvent::BulkFailed { .. } => "bulk_failed",
            ReviewEvent::DatasetSynced { .. } => "dataset_synced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_type_tag() {
        let event = ReviewEvent::EditsSaved {
            count: 7,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "EditsSaved");
        assert_eq!(json["count"], 7);
    }
}
