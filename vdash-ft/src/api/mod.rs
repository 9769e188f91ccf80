//! HTTP API handlers for vdash-ft

pub mod bulk;
pub mod edits;
pub mod health;
pub mod samples;
pub mod selection;
pub mod sse;
pub mod stats;

pub use bulk::{bulk_change_split, bulk_delete};
pub use edits::{record_edit, save_now};
pub use health::health_routes;
pub use samples::{get_page, refresh, set_filters, sync_dataset};
pub use selection::{clear_selection, deselect, select, select_all, select_range};
pub use sse::event_stream;
pub use stats::{get_engines, get_stats};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use vdash_common::Error;

/// Error wrapper mapping crate errors onto HTTP responses
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Network(_) | Error::Backend(_) => StatusCode::BAD_GATEWAY,
            Error::Io(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
