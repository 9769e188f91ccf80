//! Bulk actions over the selection set

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use vdash_common::Split;

use crate::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct BulkSplitRequest {
    pub split: Split,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub success: bool,
    /// Samples affected by the operation
    pub count: usize,
}

/// POST /api/review/bulk/split
///
/// Reassign every selected sample to the given split. On success the
/// selection is cleared; on failure local state is untouched.
pub async fn bulk_change_split(
    State(state): State<AppState>,
    Json(request): Json<BulkSplitRequest>,
) -> Result<Json<BulkResponse>, ApiError> {
    let count = state.controller.bulk_change_split(request.split).await?;
    Ok(Json(BulkResponse {
        success: true,
        count,
    }))
}

/// POST /api/review/bulk/delete
///
/// Delete every selected sample. Their pending edits and selection
/// entries are pruned with them.
pub async fn bulk_delete(State(state): State<AppState>) -> Result<Json<BulkResponse>, ApiError> {
    let count = state.controller.bulk_delete().await?;
    Ok(Json(BulkResponse {
        success: true,
        count,
    }))
}
