//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, RelayEvent},
    infrastructure::dto::websocket::{ClientEventDto, ServerEventDto},
    ui::state::AppState,
    usecase::{SendMessageCommand, SendMessageError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the WebSocket sink.
///
/// Events are serialised here, outside the relay lock. The task ends when the
/// channel closes or the socket stops accepting frames.
fn pusher_loop(
    connection_id: ConnectionId,
    mut rx: mpsc::UnboundedReceiver<RelayEvent>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let name = event.name();
            let json = match serde_json::to_string(&ServerEventDto::from(event)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(
                        "Failed to serialize '{}' for '{}': {}",
                        name,
                        connection_id,
                        e
                    );
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::debug!(
                    "Socket for '{}' stopped accepting frames: {}",
                    connection_id,
                    e
                );
                break;
            }
        }
    })
}

/// Handle one inbound text frame. Anything that is not a valid
/// `chat:message` event is dropped without a reply.
async fn handle_text_frame(state: &AppState, connection_id: ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEventDto>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEventDto::ChatMessage(payload) => {
            let command = SendMessageCommand {
                name: payload.user.name,
                avatar: payload.user.avatar,
                text: payload.text,
            };
            match state
                .send_message_usecase
                .execute(connection_id, command)
                .await
            {
                Ok(message) => {
                    tracing::trace!("Accepted message '{}' from '{}'", message.id, connection_id);
                }
                Err(SendMessageError::InvalidPayload(e)) => {
                    tracing::warn!("Dropping invalid message from '{}': {}", connection_id, e);
                }
                Err(e) => {
                    tracing::warn!("Failed to send message: {}", e);
                }
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive relay events
    let (tx, rx) = mpsc::unbounded_channel();

    // Register, send history + count, broadcast the new count
    let count = state
        .connect_participant_usecase
        .execute(connection_id, tx)
        .await;
    tracing::info!("User connected: {} | Total: {}", connection_id, count);

    let state_clone = state.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text.as_str());
                    handle_text_frame(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", connection_id);
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::debug!("Client '{}' requested close", connection_id);
                    break;
                }
            }
        }
    });

    // Spawn a task to push relay events to this client
    let mut send_task = pusher_loop(connection_id, rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        Some(count) => {
            tracing::info!("User disconnected: {} | Total: {}", connection_id, count);
        }
        None => {
            tracing::debug!("Connection '{}' was already closed", connection_id);
        }
    }
}
