//! Besedka messaging server.
//!
//! Users register to obtain a bearer credential, open a WebSocket presenting it, and
//! then chat either with everyone connected or with one named recipient.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
