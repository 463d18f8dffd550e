//! Message formatting utilities for client display.

use besedka_shared::time::timestamp_to_clock_time;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format an inbound server line as `[HH:MM:SS] text`.
    ///
    /// The server escapes markup for HTML renderers; a terminal shows the original
    /// characters instead.
    pub fn format_incoming(text: &str, received_at: i64) -> String {
        format!(
            "\n[{}] {}\n",
            timestamp_to_clock_time(received_at),
            unescape_markup(text)
        )
    }

    /// Greeting printed once a session is open
    pub fn format_banner(name: &str) -> String {
        format!(
            "\nYou are '{}'. Type a message and press Enter to send it to everyone,\n\
             or '@name message' to send it to one person. Press Ctrl+C to exit.\n",
            name
        )
    }

    /// Notice printed after a fresh registration, so the credential can be reused
    pub fn format_registered(name: &str, credential: &str) -> String {
        format!(
            "\nRegistered '{}'. Keep this credential to reconnect later:\n  {}\n\
             (pass it with --name {} --credential <credential>)\n",
            name, credential, name
        )
    }
}

/// Reverse the server's markup escaping.
fn unescape_markup(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_incoming_prefixes_clock_time() {
        // テスト項目: 受信行に時刻が付与される
        // given (前提条件): 2023-01-01T00:00:00Z
        let received_at = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_incoming("bob >>> hi", received_at);

        // then (期待する結果):
        assert_eq!(result, "\n[00:00:00] bob >>> hi\n");
    }

    #[test]
    fn test_format_incoming_unescapes_markup() {
        // テスト項目: エスケープされた文字が元に戻して表示される
        // given (前提条件):
        let text = "bob >>> &lt;b&gt;&amp;lt;&quot;&#x27;";

        // when (操作):
        let result = MessageFormatter::format_incoming(text, 0);

        // then (期待する結果):
        assert!(result.ends_with("bob >>> <b>&lt;\"'\n"));
    }

    #[test]
    fn test_format_registered_shows_credential() {
        // テスト項目: 登録通知に名前と認証情報が含まれる
        let result = MessageFormatter::format_registered("alice", "0123abcd");
        assert!(result.contains("'alice'"));
        assert!(result.contains("0123abcd"));
        assert!(result.contains("--name alice"));
    }

    #[test]
    fn test_format_banner() {
        // テスト項目: 開始メッセージに名前と使い方が含まれる
        let result = MessageFormatter::format_banner("alice");
        assert!(result.contains("You are 'alice'"));
        assert!(result.contains("@name"));
    }
}
