//! # VDash Common Library
//!
//! Shared code for the voice-assistant dashboard services including:
//! - Sample and wire types for the fine-tuning dataset API
//! - Notification event types (ReviewEvent enum)
//! - Configuration loading
//! - Error types
//! - Duration formatting for the stats views

pub mod config;
pub mod error;
pub mod events;
pub mod human_time;
pub mod types;

pub use error::{Error, Result};
pub use types::{Sample, Split};
