//! Transcription edit and save handlers
//!
//! Every edit re-arms the auto-save debounce; save_now bypasses it and
//! flushes immediately with the same batching.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::review::FlushOutcome;
use crate::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub id: String,
    pub transcription: String,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub success: bool,
    /// True when the sample now carries a pending edit
    pub modified: bool,
    /// Total pending edits after this one
    pub pending: usize,
}

/// POST /api/review/edit
///
/// Record one edit keystroke's worth of text. Editing back to the saved
/// text clears the pending entry; either way the debounce timer restarts.
pub async fn record_edit(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<EditResponse>, ApiError> {
    let modified = state
        .controller
        .record_edit(&request.id, &request.transcription)
        .await?;
    state.scheduler.arm();

    Ok(Json(EditResponse {
        success: true,
        modified,
        pending: state.controller.pending_edit_count().await,
    }))
}

/// POST /api/review/save_now
///
/// Manual save (the dashboard's Ctrl+S): cancel the debounce and flush
/// all pending edits immediately.
pub async fn save_now(State(state): State<AppState>) -> Json<FlushOutcome> {
    state.scheduler.cancel();
    Json(state.controller.flush().await)
}
