//! Request handlers.
//!
//! - `http`: account registration, health check, usage page
//! - `websocket`: the chat socket

mod http;
mod websocket;

pub use http::{health_check, index, register_account};
pub use websocket::connect_handler;
