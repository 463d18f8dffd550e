//! Data Transfer Objects (DTOs) for the messaging server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: inbound frame decoding
//! - `http`: HTTP API response DTOs

pub mod http;
pub mod websocket;
