//! Infrastructure layer: wire formats for the relay.

pub mod dto;
