//! Review state: sample list, selection, pending edits, filters

pub mod autosave;
pub mod controller;
pub mod edits;
pub mod filter;
pub mod selection;

pub use autosave::AutoSaveScheduler;
pub use controller::{DatasetStats, FlushOutcome, PageView, ReviewController, SampleRow};
pub use edits::PendingEdits;
pub use filter::{apply_filters, distinct_engines, quality, Filters, Quality};
pub use selection::SelectionSet;
