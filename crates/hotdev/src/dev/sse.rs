//! Server-Sent Events endpoint pushing change notifications to browsers.
//!
//! Each connection owns one bus [`Subscription`](crate::dev::Subscription).
//! The subscription lives inside the response stream, so it is released as
//! soon as hyper drops the stream after the client goes away.

use crate::dev::{ChangeNotification, SharedState};
use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Interval between `:ping` comment frames on idle streams.
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Serialize a batch of notifications into one event-stream frame.
pub fn frame(batch: &[ChangeNotification]) -> Result<Event, axum::Error> {
    Event::default().json_data(batch)
}

/// Handle an event-stream connection.
pub async fn handle_events(State(state): State<SharedState>) -> impl IntoResponse {
    let (tx, mut rx) = mpsc::unbounded_channel::<ChangeNotification>();

    // The callback runs synchronously inside `EventBus::publish`; it only
    // hands the notification over to this connection's stream.
    let subscription = state.bus().subscribe_guarded(move |notification| {
        let _ = tx.send(notification.clone());
    });
    debug!(
        id = ?subscription.id(),
        clients = state.client_count(),
        "Event stream opened"
    );

    let stream = async_stream::stream! {
        let _subscription = subscription;
        while let Some(notification) = rx.recv().await {
            match frame(std::slice::from_ref(&notification)) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(err) => warn!("Failed to encode {}: {}", notification.filename, err),
            }
        }
    };

    (
        [(header::CONNECTION, "keep-alive")],
        Sse::new(stream).keep_alive(
            KeepAlive::new()
                .interval(KEEP_ALIVE_INTERVAL)
                .text("ping"),
        ),
    )
}
