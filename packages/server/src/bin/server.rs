//! Chat relay server.
//!
//! Replays recent history to new clients, broadcasts every accepted message
//! to all connected clients and keeps them informed of the live user count.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin cinechat-server
//! cargo run --bin cinechat-server -- --host 0.0.0.0 --port 3001
//! ```

use std::sync::Arc;

use cinechat_server::{
    config::ServerConfig,
    domain::Relay,
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRelayStatsUseCase,
        SendMessageUseCase,
    },
};
use cinechat_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_BIN_NAME")], "debug");

    let config = ServerConfig::parse();
    let allowed_origins = match config.validate() {
        Ok(origins) => origins,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Relay state (history + registry)
    // 2. UseCases
    // 3. Server

    // 1. Create the relay state, owned by the use cases for the process lifetime
    let relay = Relay::with_history_capacity(config.history_capacity).into_shared();
    tracing::info!(
        "Relay created (history capacity: {})",
        config.history_capacity
    );

    // 2. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(relay.clone()));
    let disconnect_participant_usecase =
        Arc::new(DisconnectParticipantUseCase::new(relay.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        relay.clone(),
        Arc::new(SystemClock),
    ));
    let get_relay_stats_usecase = Arc::new(GetRelayStatsUseCase::new(relay));

    // 3. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        get_relay_stats_usecase,
        allowed_origins,
    );
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
