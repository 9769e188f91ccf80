//! SSE notification stream handler

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use std::convert::Infallible;

use crate::AppState;

/// GET /api/review/events
///
/// Transient notifications (save results, bulk outcomes, sync results)
/// pushed to the dashboard as they happen.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.notifications.handle_sse_connection()
}
