//! Sample listing, filters, and dataset refresh/sync handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::review::{Filters, PageView};
use crate::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// GET /api/review/samples?page=N
///
/// One page of the filtered view; filters are the ones last set via
/// POST /api/review/filters.
pub async fn get_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<PageView> {
    Json(state.controller.page(query.page).await)
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// POST /api/review/filters
///
/// Replace the filter state. The view is recomputed wholesale on the
/// next listing request.
pub async fn set_filters(
    State(state): State<AppState>,
    Json(filters): Json<Filters>,
) -> Json<AckResponse> {
    state.controller.set_filters(filters).await;
    Json(AckResponse { success: true })
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub success: bool,
    pub count: usize,
}

/// POST /api/review/refresh
///
/// Reload the sample list from the backend. Pending edits whose sample
/// survives the reload are kept.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<LoadResponse>, ApiError> {
    let count = state.controller.load().await?;
    Ok(Json(LoadResponse {
        success: true,
        count,
    }))
}

/// POST /api/review/sync
///
/// Regenerate the backend dataset metadata, then reload.
pub async fn sync_dataset(State(state): State<AppState>) -> Result<Json<LoadResponse>, ApiError> {
    let count = state.controller.sync_dataset().await?;
    Ok(Json(LoadResponse {
        success: true,
        count,
    }))
}
