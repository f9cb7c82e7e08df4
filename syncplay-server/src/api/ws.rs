//! WebSocket endpoint for the realtime channel
//!
//! Each upgraded socket gets an ephemeral connection id and an outbound
//! channel registered with the hub. The socket task is pure transport
//! plumbing: it parses inbound frames into `ClientMessage` and forwards
//! them, and drains the outbound channel back onto the wire. All decisions
//! happen in the hub; malformed frames are dropped here, which implements
//! the silently-ignored invalid-input policy.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use syncplay_common::ClientMessage;

use crate::hub::HubHandle;

use super::AppState;

/// GET /ws - upgrade onto the realtime channel
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub))
}

/// Pump one client connection until either side goes away.
async fn handle_socket(mut socket: WebSocket, hub: HubHandle) {
    let id = Uuid::new_v4();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();

    // Registration triggers the initial sync:response snapshot
    if hub.connect(id, outbound_tx).is_err() {
        return;
    }

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                let Some(message) = outbound else {
                    // Hub pruned this connection
                    break;
                };
                match serde_json::to_string(&message) {
                    Ok(text) => {
                        if socket.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to serialize {}: {}", message.message_type(), e);
                    }
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(message) => {
                                if hub.inbound(id, message).is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                // Unknown type/action or wrong value shape:
                                // drop the frame, state unchanged
                                debug!("Dropping malformed frame from {}: {}", id, e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // ping/pong/binary: ignore
                    Some(Err(e)) => {
                        debug!("WebSocket error on {}: {}", id, e);
                        break;
                    }
                }
            }
        }
    }

    let _ = hub.disconnect(id);
}
