//! Shared utilities for the Cinechat relay.

pub mod logger;
pub mod time;
