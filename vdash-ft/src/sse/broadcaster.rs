//! SSE broadcaster for transient review notifications
//!
//! Save results, bulk-operation outcomes, and sync results are pushed to
//! every connected dashboard client as they happen.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

use vdash_common::events::ReviewEvent;

/// Manages client connections and notification distribution
#[derive(Clone)]
pub struct NotificationBroadcaster {
    tx: broadcast::Sender<ReviewEvent>,
}

impl NotificationBroadcaster {
    /// Create a new broadcaster buffering up to `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        info!("Notification broadcaster initialized with capacity {}", capacity);
        Self { tx }
    }

    /// Broadcast a notification, ignoring if no clients are connected
    pub fn notify(&self, event: ReviewEvent) {
        if let Ok(count) = self.tx.send(event) {
            debug!("Broadcast notification to {} clients", count);
        }
    }

    /// Current number of connected clients
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Subscribe directly to the event channel (used by tests)
    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.tx.subscribe()
    }

    /// Create an SSE stream for a new client connection
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx);

        stream.filter_map(|result| async move {
            match result {
                Ok(review_event) => {
                    let event = Event::default()
                        .event(review_event.event_name())
                        .json_data(&review_event)
                        .ok();
                    event.map(Ok)
                }
                Err(e) => {
                    // Lagged receivers just skip missed notifications
                    warn!("SSE client error: {:?}", e);
                    None
                }
            }
        })
    }

    /// Axum handler body for GET /api/review/events
    pub fn handle_sse_connection(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        info!("New SSE client connected, total clients: {}", self.client_count() + 1);

        Sse::new(self.subscribe_stream()).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("keep-alive"),
        )
    }
}
