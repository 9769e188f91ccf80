//! Review controller: owns the dataset copy, selection, and pending edits
//!
//! All review state lives behind one lock. Flushes never hold the lock
//! across a network await: pending entries are snapshotted, the batch
//! requests run sequentially, and the lock is re-taken per batch to fold
//! results back in. A batch that fails leaves its entries pending for the
//! next scheduled or manual flush; batches that already succeeded stand.

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use vdash_common::events::ReviewEvent;
use vdash_common::types::{SampleFiles, SplitUpdate, TranscriptionUpdate};
use vdash_common::{human_time, Error, Result, Sample, Split};

use crate::client::BackendClient;
use crate::pagination::{calculate_pagination, page_slice};
use crate::sse::NotificationBroadcaster;

use super::edits::PendingEdits;
use super::filter::{apply_filters, distinct_engines, quality, Filters, Quality};
use super::selection::SelectionSet;

/// Mutable review state, single-owner behind the controller lock
#[derive(Debug, Default)]
struct ReviewState {
    samples: Vec<Sample>,
    selection: SelectionSet,
    edits: PendingEdits,
    filters: Filters,
}

/// Result of one flush over all pending edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlushOutcome {
    /// Entries saved and cleared
    pub saved: usize,
    /// Batches that failed (their entries remain pending)
    pub failed_batches: usize,
    /// Entries still pending after the flush
    pub remaining: usize,
}

/// One row of the rendered view: the sample plus its review overlay
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    #[serde(flatten)]
    pub sample: Sample,
    /// Unsaved transcription text, if any
    pub pending_transcription: Option<String>,
    pub modified: bool,
    pub selected: bool,
    pub quality: Quality,
}

/// One page of the filtered view
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub rows: Vec<SampleRow>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
}

/// Dataset statistics for the header bar
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub train: usize,
    pub validation: usize,
    pub test: usize,
    pub total_duration_seconds: f64,
    pub total_duration: String,
    pub modified: usize,
    pub selected: usize,
}

/// Owns review state and talks to the dataset backend
pub struct ReviewController {
    state: Mutex<ReviewState>,
    client: BackendClient,
    notifications: NotificationBroadcaster,
    save_batch_size: usize,
    page_size: usize,
}

impl ReviewController {
    pub fn new(
        client: BackendClient,
        notifications: NotificationBroadcaster,
        save_batch_size: usize,
        page_size: usize,
    ) -> Self {
        Self {
            state: Mutex::new(ReviewState::default()),
            client,
            notifications,
            save_batch_size: save_batch_size.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Load (or reload) the sample list from the backend.
    ///
    /// Pending edits and selections whose sample survives the reload are
    /// kept; the rest are pruned together with their samples.
    pub async fn load(&self) -> Result<usize> {
        let samples = self.client.fetch_samples().await?;
        let count = samples.len();

        let mut state = self.state.lock().await;
        let known: std::collections::HashSet<String> =
            samples.iter().map(|s| s.id.clone()).collect();
        state.samples = samples;
        state.selection.retain(|id| known.contains(id));
        state.edits.retain(|id| known.contains(id));
        drop(state);

        self.notifications.notify(ReviewEvent::SamplesLoaded {
            count,
            timestamp: chrono::Utc::now(),
        });
        Ok(count)
    }

    /// Record a transcription edit. Editing back to the saved text clears
    /// the pending entry. Returns true when the sample has a pending edit
    /// afterwards.
    pub async fn record_edit(&self, id: &str, text: &str) -> Result<bool> {
        let mut state = self.state.lock().await;
        let saved = state
            .samples
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.transcription.clone())
            .ok_or_else(|| Error::NotFound(format!("sample {id}")))?;
        Ok(state.edits.record(id, text, &saved))
    }

    /// Flush all pending edits in sequential fixed-size batches.
    ///
    /// Each batch clears its own entries on success; a failed batch keeps
    /// its entries pending and the remaining batches are still attempted.
    pub async fn flush(&self) -> FlushOutcome {
        let entries = {
            let state = self.state.lock().await;
            let snapshot = state.edits.snapshot();
            snapshot
                .into_iter()
                .filter_map(|(id, text)| {
                    state.samples.iter().find(|s| s.id == id).map(|sample| {
                        (
                            id,
                            text.clone(),
                            TranscriptionUpdate {
                                text_path: sample.text_path.clone(),
                                json_path: sample.json_path.clone(),
                                transcription: text,
                            },
                        )
                    })
                })
                .collect::<Vec<_>>()
        };

        if entries.is_empty() {
            let remaining = self.state.lock().await.edits.len();
            return FlushOutcome {
                saved: 0,
                failed_batches: 0,
                remaining,
            };
        }

        let mut saved = 0;
        let mut failed_batches = 0;

        for batch in entries.chunks(self.save_batch_size) {
            let updates: Vec<TranscriptionUpdate> =
                batch.iter().map(|(_, _, update)| update.clone()).collect();

            match self.client.batch_update(updates).await {
                Ok(()) => {
                    let mut state = self.state.lock().await;
                    for (id, flushed_text, _) in batch {
                        if let Some(sample) = state.samples.iter_mut().find(|s| &s.id == id) {
                            sample.transcription = flushed_text.clone();
                        }
                        state.edits.clear_if_unchanged(id, flushed_text);
                    }
                    drop(state);

                    saved += batch.len();
                    self.notifications.notify(ReviewEvent::EditsSaved {
                        count: batch.len(),
                        timestamp: chrono::Utc::now(),
                    });
                }
                Err(e) => {
                    failed_batches += 1;
                    let pending = self.state.lock().await.edits.len();
                    warn!("Batch save failed, {} entries stay pending: {}", batch.len(), e);
                    self.notifications.notify(ReviewEvent::SaveFailed {
                        error: e.to_string(),
                        pending,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
        }

        let remaining = self.state.lock().await.edits.len();
        info!(saved, failed_batches, remaining, "Flush complete");
        FlushOutcome {
            saved,
            failed_batches,
            remaining,
        }
    }

    /// Reassign every selected sample to `split`.
    /// On success local splits are updated and the selection is cleared.
    pub async fn bulk_change_split(&self, split: Split) -> Result<usize> {
        let (ids, updates) = {
            let state = self.state.lock().await;
            let mut ids = Vec::new();
            let mut updates = Vec::new();
            for sample in &state.samples {
                if state.selection.contains(&sample.id) {
                    ids.push(sample.id.clone());
                    updates.push(SplitUpdate {
                        audio_path: sample.audio_path.clone(),
                        text_path: sample.text_path.clone(),
                        json_path: sample.json_path.clone(),
                        split,
                    });
                }
            }
            (ids, updates)
        };

        if updates.is_empty() {
            return Ok(0);
        }

        if let Err(e) = self.client.batch_change_split(updates).await {
            self.notify_bulk_failure("change_split", &e);
            return Err(e);
        }

        let mut state = self.state.lock().await;
        for sample in state.samples.iter_mut() {
            if ids.iter().any(|id| id == &sample.id) {
                sample.split = split;
            }
        }
        state.selection.clear();
        drop(state);

        self.notifications.notify(ReviewEvent::SplitChanged {
            count: ids.len(),
            split,
            timestamp: chrono::Utc::now(),
        });
        Ok(ids.len())
    }

    /// Delete every selected sample.
    /// On success the samples leave the local list and their selection and
    /// pending-edit entries are pruned with them.
    pub async fn bulk_delete(&self) -> Result<usize> {
        let (ids, files) = {
            let state = self.state.lock().await;
            let mut ids = Vec::new();
            let mut files = Vec::new();
            for sample in &state.samples {
                if state.selection.contains(&sample.id) {
                    ids.push(sample.id.clone());
                    files.push(SampleFiles {
                        audio_path: sample.audio_path.clone(),
                        text_path: sample.text_path.clone(),
                        json_path: sample.json_path.clone(),
                    });
                }
            }
            (ids, files)
        };

        if files.is_empty() {
            return Ok(0);
        }

        if let Err(e) = self.client.batch_delete(files).await {
            self.notify_bulk_failure("delete", &e);
            return Err(e);
        }

        let mut state = self.state.lock().await;
        state.samples.retain(|s| !ids.contains(&s.id));
        state.edits.retain(|id| ids.iter().all(|deleted| deleted != id));
        state.selection.clear();
        drop(state);

        self.notifications.notify(ReviewEvent::SamplesDeleted {
            count: ids.len(),
            timestamp: chrono::Utc::now(),
        });
        Ok(ids.len())
    }

    /// Regenerate the backend dataset metadata, then reload
    pub async fn sync_dataset(&self) -> Result<usize> {
        self.client.regenerate_dataset().await?;
        self.notifications.notify(ReviewEvent::DatasetSynced {
            timestamp: chrono::Utc::now(),
        });
        self.load().await
    }

    /// Replace the active filter state (a full re-filter, never incremental)
    pub async fn set_filters(&self, filters: Filters) {
        self.state.lock().await.filters = filters;
    }

    pub async fn select(&self, id: &str) {
        let mut state = self.state.lock().await;
        // Unknown ids are silent no-ops
        if state.samples.iter().any(|s| s.id == id) {
            state.selection.add(id);
        }
    }

    pub async fn deselect(&self, id: &str) {
        self.state.lock().await.selection.remove(id);
    }

    pub async fn clear_selection(&self) {
        self.state.lock().await.selection.clear();
    }

    /// Range-select between two positions of the current filtered view
    pub async fn select_range(&self, a: usize, b: usize) {
        let mut state = self.state.lock().await;
        let ReviewState {
            samples,
            selection,
            edits,
            filters,
        } = &mut *state;
        let filtered = apply_filters(samples, filters, edits, chrono::Utc::now());
        selection.select_range(&filtered, a, b);
    }

    /// Select everything in the current filtered view (not the full dataset)
    pub async fn select_all_filtered(&self) {
        let mut state = self.state.lock().await;
        let ReviewState {
            samples,
            selection,
            edits,
            filters,
        } = &mut *state;
        let filtered = apply_filters(samples, filters, edits, chrono::Utc::now());
        selection.select_all(&filtered);
    }

    pub async fn selection_len(&self) -> usize {
        self.state.lock().await.selection.len()
    }

    pub async fn is_selected(&self, id: &str) -> bool {
        self.state.lock().await.selection.contains(id)
    }

    pub async fn pending_edit_count(&self) -> usize {
        self.state.lock().await.edits.len()
    }

    /// One page of the filtered view with the review overlay applied
    pub async fn page(&self, requested_page: usize) -> PageView {
        let state = self.state.lock().await;
        let filtered = apply_filters(&state.samples, &state.filters, &state.edits, chrono::Utc::now());
        let pagination = calculate_pagination(filtered.len(), requested_page, self.page_size);

        let rows = page_slice(&filtered, &pagination, self.page_size)
            .iter()
            .map(|sample| SampleRow {
                sample: (*sample).clone(),
                pending_transcription: state.edits.get(&sample.id).map(str::to_string),
                modified: state.edits.contains(&sample.id),
                selected: state.selection.contains(&sample.id),
                quality: quality(sample),
            })
            .collect();

        PageView {
            rows,
            page: pagination.page,
            total_pages: pagination.total_pages,
            filtered_count: filtered.len(),
            total_count: state.samples.len(),
        }
    }

    /// Distinct engines for the filter control
    pub async fn engines(&self) -> Vec<String> {
        distinct_engines(&self.state.lock().await.samples)
    }

    /// Dataset statistics for the header bar
    pub async fn stats(&self) -> DatasetStats {
        let state = self.state.lock().await;
        let mut stats = DatasetStats {
            total: state.samples.len(),
            train: 0,
            validation: 0,
            test: 0,
            total_duration_seconds: 0.0,
            total_duration: String::new(),
            modified: state.edits.len(),
            selected: state.selection.len(),
        };
        for sample in &state.samples {
            match sample.split {
                Split::Train => stats.train += 1,
                Split::Validation => stats.validation += 1,
                Split::Test => stats.test += 1,
            }
            stats.total_duration_seconds += sample.duration.unwrap_or(0.0);
        }
        stats.total_duration = human_time::format_duration(stats.total_duration_seconds);
        stats
    }

    /// Current split of a sample, for tests and handlers
    pub async fn sample_split(&self, id: &str) -> Option<Split> {
        self.state
            .lock()
            .await
            .samples
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.split)
    }

    /// Saved transcription of a sample
    pub async fn sample_transcription(&self, id: &str) -> Option<String> {
        self.state
            .lock()
            .await
            .samples
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.transcription.clone())
    }

    fn notify_bulk_failure(&self, operation: &str, error: &Error) {
        warn!("Bulk {} failed: {}", operation, error);
        self.notifications.notify(ReviewEvent::BulkFailed {
            operation: operation.to_string(),
            error: error.to_string(),
            timestamp: chrono::Utc::now(),
        });
    }
}
