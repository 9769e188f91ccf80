//! Selection handlers
//!
//! Range-select and select-all operate on the current filtered view.
//! Ids no longer present in the dataset are silent no-ops.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    /// Anchor position in the filtered view
    pub from: usize,
    /// Endpoint position; may come before `from`
    pub to: usize,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub success: bool,
    pub selected: usize,
}

async fn selection_response(state: &AppState) -> Json<SelectionResponse> {
    Json(SelectionResponse {
        success: true,
        selected: state.controller.selection_len().await,
    })
}

/// POST /api/review/select
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Json<SelectionResponse> {
    state.controller.select(&request.id).await;
    selection_response(&state).await
}

/// POST /api/review/deselect
pub async fn deselect(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Json<SelectionResponse> {
    state.controller.deselect(&request.id).await;
    selection_response(&state).await
}

/// POST /api/review/select_range
pub async fn select_range(
    State(state): State<AppState>,
    Json(request): Json<RangeRequest>,
) -> Json<SelectionResponse> {
    state.controller.select_range(request.from, request.to).await;
    selection_response(&state).await
}

/// POST /api/review/select_all
pub async fn select_all(State(state): State<AppState>) -> Json<SelectionResponse> {
    state.controller.select_all_filtered().await;
    selection_response(&state).await
}

/// POST /api/review/clear_selection
pub async fn clear_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    state.controller.clear_selection().await;
    selection_response(&state).await
}
