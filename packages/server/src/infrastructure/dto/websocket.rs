//! Inbound WebSocket frame decoding.

use besedka_shared::protocol::ChatFrame;

use crate::domain::ReceivedFrame;

/// Decode a text frame into a [`ReceivedFrame`].
pub fn decode_text_frame(text: &str) -> ReceivedFrame {
    match serde_json::from_str::<ChatFrame>(text) {
        Ok(frame) => ReceivedFrame::Chat(frame),
        Err(e) => ReceivedFrame::Malformed(e.to_string()),
    }
}

/// Decode a binary frame, accepting UTF-8 JSON payloads only.
pub fn decode_binary_frame(bytes: &[u8]) -> ReceivedFrame {
    match serde_json::from_slice::<ChatFrame>(bytes) {
        Ok(frame) => ReceivedFrame::Chat(frame),
        Err(e) => ReceivedFrame::Malformed(e.to_string()),
    }
}
