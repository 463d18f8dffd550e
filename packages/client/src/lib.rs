//! Terminal chat client for Besedka.
//!
//! - `api`: account registration over HTTP and socket URL construction
//! - `domain`: input parsing and reconnect decisions (pure functions)
//! - `formatter`: how inbound lines are shown
//! - `session`: one WebSocket session
//! - `runner`: registration, reconnect loop

pub mod api;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
pub use session::run_client_session;
