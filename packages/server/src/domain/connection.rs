//! Connection capabilities consumed by the core.
//!
//! The transport is hidden behind two small seams: a [`ConnectionHandle`] to push text
//! and close, and a [`FrameReceiver`] to pull the next inbound frame.

use async_trait::async_trait;
use besedka_shared::protocol::ChatFrame;

use super::{error::ConnectionError, value_object::CloseCode};

/// Outbound side of one connection.
pub trait ConnectionHandle: Send + Sync {
    /// Queue a text line for delivery.
    fn send(&self, text: &str) -> Result<(), ConnectionError>;

    /// Close the transport with `code`. Closing twice is harmless.
    fn close(&self, code: CloseCode);
}

/// Result of waiting for the next inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedFrame {
    /// A decoded chat frame.
    Chat(ChatFrame),
    /// A frame that could not be decoded; carries the decoder's complaint.
    Malformed(String),
    /// Control traffic (ping/pong) with nothing to route.
    Ignored,
    /// The peer went away or the transport was closed locally. Terminal.
    PeerClosed,
}

/// Inbound side of one connection.
#[async_trait]
pub trait FrameReceiver: Send {
    /// Wait for the next frame.
    ///
    /// Must return [`ReceivedFrame::PeerClosed`] once the connection's handle is closed.
    async fn recv(&mut self) -> ReceivedFrame;
}
