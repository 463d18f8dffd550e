//! ConnectionHandle の実装
//!
//! - `websocket`: チャンネル経由で WebSocket の書き込みタスクへ渡す実装

pub mod websocket;

pub use websocket::{OutboundFrame, WebSocketConnection};
