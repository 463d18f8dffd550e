//! Wire protocol spoken over the chat socket.
//!
//! Client → server frames are JSON [`ChatFrame`]s. Server → client frames are plain
//! text lines, formatted by the server.

use serde::{Deserialize, Serialize};

/// Close code sent when the presented credential does not validate (policy violation).
pub const CLOSE_POLICY_VIOLATION: u16 = 1008;
/// Close code sent when an idle connection is shut down.
pub const CLOSE_GOING_AWAY: u16 = 1001;
/// Close code sent when the server could not complete the handshake.
pub const CLOSE_INTERNAL_ERROR: u16 = 1011;
/// Close code sent to a connection replaced by a newer one with the same credential.
pub const CLOSE_SESSION_REPLACED: u16 = 4001;

/// Inbound chat frame: `{"to": string | null, "message": string}`.
///
/// A missing `message` decodes as an empty body, and an empty `to` means broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatFrame {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ChatFrame {
    /// Frame addressed to everyone.
    pub fn broadcast(message: impl Into<String>) -> Self {
        Self {
            to: None,
            message: message.into(),
        }
    }

    /// Frame addressed to a single named recipient.
    pub fn direct(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: Some(to.into()),
            message: message.into(),
        }
    }

    /// Recipient name, treating an empty string as absent.
    pub fn recipient(&self) -> Option<&str> {
        self.to.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_frame_with_null_recipient() {
        // テスト項目: to が null のフレームはブロードキャストとして解釈される
        // given (前提条件):
        let json = r#"{"to": null, "message": "hi"}"#;

        // when (操作):
        let frame: ChatFrame = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(frame, ChatFrame::broadcast("hi"));
        assert_eq!(frame.recipient(), None);
    }

    #[test]
    fn test_decode_frame_without_message_field() {
        // テスト項目: message が欠けている場合は空文字列になる
        // given (前提条件):
        let json = r#"{"to": "bob"}"#;

        // when (操作):
        let frame: ChatFrame = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(frame.message, "");
        assert_eq!(frame.recipient(), Some("bob"));
    }

    #[test]
    fn test_empty_recipient_is_broadcast() {
        // テスト項目: 空文字列の宛先は宛先なしとして扱われる
        // given (前提条件):
        let frame = ChatFrame::direct("", "hi");

        // when (操作):
        let recipient = frame.recipient();

        // then (期待する結果):
        assert_eq!(recipient, None);
    }

    #[test]
    fn test_decode_rejects_non_string_message() {
        // テスト項目: message が文字列でないフレームはデコードに失敗する
        // given (前提条件):
        let json = r#"{"to": null, "message": 42}"#;

        // when (操作):
        let result = serde_json::from_str::<ChatFrame>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
