//! Pure filter pipeline for the sample list
//!
//! Base filters (engine, split, free-text search, quality) combine with
//! independently toggled advanced chips (duration bucket, edit status,
//! date bucket). A sample passes when it satisfies every set filter and
//! every active chip. Output preserves the original relative order.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use vdash_common::{Sample, Split};

use super::edits::PendingEdits;

/// Derived quality rating: characters of transcription per second of audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

/// Rate a sample by transcription density.
/// Missing duration or an empty transcription rates low.
pub fn quality(sample: &Sample) -> Quality {
    let duration = match sample.duration {
        Some(d) if d > 0.0 => d,
        _ => return Quality::Low,
    };
    if sample.transcription.is_empty() {
        return Quality::Low;
    }
    let char_rate = sample.transcription.chars().count() as f64 / duration;
    if char_rate > 8.0 {
        Quality::High
    } else if char_rate < 3.0 {
        Quality::Low
    } else {
        Quality::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    /// At most 5 seconds
    Short,
    /// More than 5, at most 10 seconds
    Medium,
    /// More than 10 seconds
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditStatus {
    Modified,
    Unmodified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    Today,
    ThisWeek,
    ThisMonth,
}

/// One active advanced filter chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "chip", content = "value")]
pub enum FilterChip {
    Duration(DurationBucket),
    Status(EditStatus),
    Date(DateBucket),
}

/// Complete filter state of the review view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub engine: Option<String>,
    pub split: Option<Split>,
    /// Case-insensitive substring match against the transcription
    pub search: Option<String>,
    pub quality: Option<Quality>,
    /// Active advanced chips; all must match
    pub chips: Vec<FilterChip>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.engine.is_none()
            && self.split.is_none()
            && self.search.is_none()
            && self.quality.is_none()
            && self.chips.is_empty()
    }
}

/// Recompute the filtered view over the full sample list.
/// `now` is injected so date buckets are deterministic under test.
pub fn apply_filters<'a>(
    samples: &'a [Sample],
    filters: &Filters,
    edits: &PendingEdits,
    now: DateTime<Utc>,
) -> Vec<&'a Sample> {
    let search = filters.search.as_ref().map(|s| s.to_lowercase());

    samples
        .iter()
        .filter(|sample| {
            if let Some(engine) = &filters.engine {
                if &sample.engine != engine {
                    return false;
                }
            }
            if let Some(split) = filters.split {
                if sample.split != split {
                    return false;
                }
            }
            if let Some(search) = &search {
                if !sample.transcription.to_lowercase().contains(search) {
                    return false;
                }
            }
            if let Some(wanted) = filters.quality {
                if quality(sample) != wanted {
                    return false;
                }
            }
            filters
                .chips
                .iter()
                .all(|chip| matches_chip(sample, *chip, edits, now))
        })
        .collect()
}

fn matches_chip(sample: &Sample, chip: FilterChip, edits: &PendingEdits, now: DateTime<Utc>) -> bool {
    match chip {
        FilterChip::Duration(bucket) => {
            let Some(duration) = sample.duration else {
                return false;
            };
            match bucket {
                DurationBucket::Short => duration <= 5.0,
                DurationBucket::Medium => duration > 5.0 && duration <= 10.0,
                DurationBucket::Long => duration > 10.0,
            }
        }
        FilterChip::Status(status) => match status {
            EditStatus::Modified => edits.contains(&sample.id),
            EditStatus::Unmodified => !edits.contains(&sample.id),
        },
        FilterChip::Date(bucket) => {
            let Some(timestamp) = sample.timestamp else {
                return false;
            };
            let Some(recorded) = Utc.timestamp_opt(timestamp, 0).single() else {
                return false;
            };
            match bucket {
                DateBucket::Today => recorded.date_naive() == now.date_naive(),
                DateBucket::ThisWeek => recorded >= now - Duration::days(7) && recorded <= now,
                DateBucket::ThisMonth => {
                    recorded.month() == now.month() && recorded.year() == now.year()
                }
            }
        }
    }
}

/// Distinct engines present in the dataset, in first-seen order
/// (populates the engine filter control)
pub fn distinct_engines(samples: &[Sample]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut engines = Vec::new();
    for sample in samples {
        if seen.insert(sample.engine.as_str()) {
            engines.push(sample.engine.clone());
        }
    }
    engines
}
