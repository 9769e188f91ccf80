//! Dataset statistics and engine list handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::review::DatasetStats;
use crate::AppState;

/// GET /api/review/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<DatasetStats> {
    Json(state.controller.stats().await)
}

#[derive(Debug, Serialize)]
pub struct EnginesResponse {
    pub engines: Vec<String>,
}

/// GET /api/review/engines
///
/// Distinct engines present in the dataset, for the filter control.
pub async fn get_engines(State(state): State<AppState>) -> Json<EnginesResponse> {
    Json(EnginesResponse {
        engines: state.controller.engines().await,
    })
}
