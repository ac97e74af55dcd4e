//! WebSocket endpoint for engine-side consumers.
//!
//! `GET /ws/events` upgrades the connection. Once connected, the handler:
//!
//! - **Registers the connection** in the [`SocketRegistry`] and stamps
//!   the connection id onto every event it forwards (field `ws`), so a
//!   downstream reply step can address this peer.
//! - **Forwards events:** subscribes to the event bus and pushes every
//!   classified event to the client as a JSON text frame.
//! - **Relays replies:** messages dispatched through the reply route are
//!   written to the socket from the same task.
//! - **Handles commands:** `{"type":"ping"}` is answered with
//!   `{"type":"pong"}`; anything else is logged and ignored.
//!
//! Lagged receivers (a client too slow to keep up) are logged and the
//! loop keeps going; the client misses events but stays connected.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use crate::state::AppState;

/// Incoming command from a WebSocket client.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

/// Upgrade an HTTP request to a WebSocket connection.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core WebSocket connection handler.
///
/// Uses `tokio::select!` to multiplex bus events, reply messages, and
/// incoming client frames in a single task.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut event_rx = state.event_bus.subscribe();

    // Replies addressed to this connection arrive on this channel.
    let (reply_tx, mut reply_rx) = mpsc::channel::<String>(32);
    let connection_id = state.socket_registry.register(reply_tx);

    loop {
        tokio::select! {
            // --- Branch 1: Forward classified events to the client ---
            event_result = event_rx.recv() => {
                match event_result {
                    Ok(event) => {
                        match serde_json::to_value(&event) {
                            Ok(mut json) => {
                                // Stamp the connection id so reply steps
                                // can address this peer.
                                json["ws"] = serde_json::Value::String(connection_id.to_string());
                                if ws_sender.send(Message::Text(json.to_string().into())).await.is_err() {
                                    // Client disconnected
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Failed to serialize classified event: {err}");
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            skipped = n,
                            "WebSocket subscriber lagged, skipping {n} events"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Bus sender dropped (server shutting down)
                        break;
                    }
                }
            }

            // --- Branch 2: Write replies dispatched to this connection ---
            reply = reply_rx.recv() => {
                match reply {
                    Some(content) => {
                        if ws_sender.send(Message::Text(content.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // --- Branch 3: Process frames from the client ---
            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        process_command(&text, &mut ws_sender).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // Client disconnected
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.socket_registry.unregister(connection_id);
    tracing::debug!(connection_id = %connection_id, "WebSocket connection closed");
}

/// Parse and process a single command from the client.
async fn process_command(
    text: &str,
    ws_sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
) {
    let cmd: WsCommand = match serde_json::from_str(text) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::warn!(
                raw = %text,
                error = %err,
                "Ignoring malformed WebSocket command"
            );
            return;
        }
    };

    match cmd {
        WsCommand::Ping => {
            let pong = r#"{"type":"pong"}"#;
            if ws_sender.send(Message::Text(pong.into())).await.is_err() {
                tracing::debug!("Failed to send pong (client disconnecting)");
            }
        }
    }
}
