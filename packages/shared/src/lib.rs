//! Code shared by the Besedka server and client.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and timestamp formatting
//! - `protocol`: wire frames and close codes spoken over the chat socket

pub mod logger;
pub mod protocol;
pub mod time;
