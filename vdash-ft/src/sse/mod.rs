//! Server-sent events for transient review notifications

mod broadcaster;

pub use broadcaster::NotificationBroadcaster;
