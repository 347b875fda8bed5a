//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRelayStatsUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listening socket
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// WebSocket chat relay server
///
/// This struct encapsulates the use cases and CORS settings and provides
/// methods to build the router and run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     send_message_usecase,
///     get_relay_stats_usecase,
///     allowed_origins,
/// );
/// server.run("127.0.0.1", 3001).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    allowed_origins: Vec<HeaderValue>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_participant_usecase` - UseCase for participant connection
    /// * `disconnect_participant_usecase` - UseCase for participant disconnection
    /// * `send_message_usecase` - UseCase for message sending
    /// * `get_relay_stats_usecase` - UseCase for reading relay statistics
    /// * `allowed_origins` - Origins allowed by CORS (empty list disables CORS headers)
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_relay_stats_usecase: Arc<GetRelayStatsUseCase>,
        allowed_origins: Vec<HeaderValue>,
    ) -> Self {
        let app_state = Arc::new(AppState {
            connect_participant_usecase,
            disconnect_participant_usecase,
            send_message_usecase,
            get_relay_stats_usecase,
        });
        Self {
            app_state,
            allowed_origins,
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins.clone()))
            .allow_methods([Method::GET, Method::POST])
            .allow_credentials(true);

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the relay until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        self.run_with_shutdown(host, port, shutdown_signal()).await
    }

    /// Run the relay until `shutdown` resolves
    pub async fn run_with_shutdown<F>(
        self,
        host: &str,
        port: u16,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!("Chat relay listening on {}", local_addr);
        tracing::info!("WebSocket endpoint: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
