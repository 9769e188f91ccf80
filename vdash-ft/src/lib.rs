//! vdash-ft library - Fine-tuning sample review service
//!
//! Holds the review state for the dashboard (sample list, selection,
//! pending edits, debounced auto-save) and consumes the voice-assistant
//! dataset backend over HTTP. Exposes a JSON surface plus an SSE
//! notification stream for the dashboard front-end.

use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use vdash_common::config::ReviewConfig;
use vdash_common::Result;

pub mod api;
pub mod client;
pub mod pagination;
pub mod review;
pub mod sse;

use client::BackendClient;
use review::{AutoSaveScheduler, ReviewController};
use sse::NotificationBroadcaster;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ReviewController>,
    pub scheduler: Arc<AutoSaveScheduler>,
    pub notifications: NotificationBroadcaster,
}

impl AppState {
    /// Wire up the backend client, controller, and auto-save scheduler
    pub fn new(config: &ReviewConfig) -> Result<Self> {
        let notifications = NotificationBroadcaster::new(100);
        let client = BackendClient::new(&config.backend_url)?;
        let controller = Arc::new(ReviewController::new(
            client,
            notifications.clone(),
            config.save_batch_size,
            config.page_size,
        ));

        let flush_target = Arc::clone(&controller);
        let scheduler = Arc::new(AutoSaveScheduler::new(
            Duration::from_millis(config.autosave_delay_ms),
            Arc::new(move || {
                let controller = Arc::clone(&flush_target);
                Box::pin(async move {
                    controller.flush().await;
                })
            }),
        ));

        Ok(Self {
            controller,
            scheduler,
            notifications,
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/api/review/samples", get(api::get_page))
        .route("/api/review/filters", post(api::set_filters))
        .route("/api/review/select", post(api::select))
        .route("/api/review/deselect", post(api::deselect))
        .route("/api/review/select_range", post(api::select_range))
        .route("/api/review/select_all", post(api::select_all))
        .route("/api/review/clear_selection", post(api::clear_selection))
        .route("/api/review/edit", post(api::record_edit))
        .route("/api/review/save_now", post(api::save_now))
        .route("/api/review/bulk/split", post(api::bulk_change_split))
        .route("/api/review/bulk/delete", post(api::bulk_delete))
        .route("/api/review/refresh", post(api::refresh))
        .route("/api/review/sync", post(api::sync_dataset))
        .route("/api/review/stats", get(api::get_stats))
        .route("/api/review/engines", get(api::get_engines))
        .route("/api/review/events", get(api::event_stream))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
