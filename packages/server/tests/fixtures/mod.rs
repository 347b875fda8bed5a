//! Shared fixtures for integration tests.
//!
//! The relay runs in-process on an ephemeral port; clients speak real
//! WebSocket through `tokio-tungstenite`.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use cinechat_server::{
    domain::{DEFAULT_HISTORY_CAPACITY, Relay},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRelayStatsUseCase,
        SendMessageUseCase,
    },
};
use cinechat_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long a client waits for an expected event
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Window used to assert that no event arrives
pub const QUIET_WINDOW: Duration = Duration::from_millis(300);

/// Helper struct to manage an in-process relay
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay with the default history capacity
    pub async fn start() -> Self {
        Self::start_with_history_capacity(DEFAULT_HISTORY_CAPACITY).await
    }

    /// Start a relay with a custom history capacity
    pub async fn start_with_history_capacity(capacity: usize) -> Self {
        let relay = Relay::with_history_capacity(capacity).into_shared();
        let server = Server::new(
            Arc::new(ConnectParticipantUseCase::new(relay.clone())),
            Arc::new(DisconnectParticipantUseCase::new(relay.clone())),
            Arc::new(SendMessageUseCase::new(relay.clone(), Arc::new(SystemClock))),
            Arc::new(GetRelayStatsUseCase::new(relay)),
            vec![],
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = server.router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        TestServer { addr, handle }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Get the HTTP base URL for this server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct wrapping one WebSocket client
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect without consuming any event
    pub async fn connect_raw(server: &TestServer) -> Self {
        let (stream, _response) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Connect and consume the connect handshake (history, own count, count
    /// broadcast). Returns the client and the history payload.
    ///
    /// Consuming the handshake guarantees that this connection is registered
    /// before the next one is opened.
    pub async fn connect(server: &TestServer) -> (Self, Vec<Value>) {
        let mut client = Self::connect_raw(server).await;
        let history = client.expect_event("chat:history").await;
        client.expect_event("users:count").await;
        client.expect_event("users:count").await;
        let history = history.as_array().cloned().expect("history must be an array");
        (client, history)
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: impl Into<String>) {
        self.stream
            .send(Message::text(text.into()))
            .await
            .expect("Failed to send frame");
    }

    /// Send a well-formed chat:message event
    pub async fn send_chat(&mut self, name: &str, text: &str) {
        let event = json!({
            "event": "chat:message",
            "data": {"user": {"name": name}, "text": text}
        });
        self.send_text(event.to_string()).await;
    }

    /// Receive the next event envelope
    pub async fn next_event(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(EVENT_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for event")
                .expect("Stream closed")
                .expect("WebSocket error");
            match frame {
                Message::Text(text) => {
                    return serde_json::from_str(text.as_str()).expect("Invalid JSON event");
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("Unexpected frame: {other:?}"),
            }
        }
    }

    /// Receive the next event and assert its name; returns its `data`
    pub async fn expect_event(&mut self, name: &str) -> Value {
        let event = self.next_event().await;
        assert_eq!(event["event"], name, "unexpected event: {event}");
        event["data"].clone()
    }

    /// Assert that nothing arrives within the quiet window
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(frame))) = tokio::time::timeout(QUIET_WINDOW, self.stream.next()).await
        {
            panic!("Expected no event, got {frame:?}");
        }
    }

    /// Close the connection
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
