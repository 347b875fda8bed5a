//! Real-time chat relay library.
//!
//! Accepts WebSocket connections, keeps a bounded shared message history and
//! a live connection count, and fans every accepted message out to all
//! connected clients in one total order.

pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
