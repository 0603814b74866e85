//! WebSocket stream of download events.
//!
//! `GET /ws/events` upgrades to a text WebSocket. Each connection gets its
//! own event bus subscription and receives every event published after it
//! connected, one JSON object per text frame. Client frames are ignored;
//! a close frame or a dropped connection ends the subscription.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, warn};
use workbench_core::WorkbenchEvent;

use crate::state::AppState;

/// `GET /ws/events` - WebSocket upgrade endpoint.
pub async fn stream(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let mut subscription = state.events.subscribe();
    let id = subscription.id();
    let (mut sender, mut receiver) = socket.split();
    debug!(?id, "Event subscriber connected");

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let Some(frame) = event_frame(&event) else { continue };
                if sender.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.events.unsubscribe(id);
    debug!(?id, "Event subscriber disconnected");
}

/// Serialize an event for the wire, skipping it on failure.
pub fn event_frame(event: &WorkbenchEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(repo_id = %event.repo_id(), error = %e, "Failed to serialize event");
            None
        }
    }
}
