//! WebSocket を使った ConnectionHandle 実装
//!
//! ## 設計ノート
//!
//! WebSocket の受付と分割は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は書き込みタスクへの `UnboundedSender` だけを保持するため、
//! 送信は非同期 I/O を待たずにキューへ積むだけで終わります。
//!
//! - UI 層: WebSocket の受付、書き込みタスク（pusher loop）の起動
//! - Infrastructure 層: 書き込みタスクへのフレーム投入

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::domain::{CloseCode, ConnectionError, ConnectionHandle};

/// 書き込みタスクへ渡すフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Text(String),
    Close(CloseCode),
}

/// WebSocket を使った ConnectionHandle 実装
///
/// ## 使用例
///
/// ```ignore
/// let (handle, rx) = WebSocketConnection::new();
/// tokio::spawn(pusher_loop(rx, sink));
///
/// handle.send("alice >>> hello")?;
/// handle.close(CloseCode::POLICY_VIOLATION);
/// ```
pub struct WebSocketConnection {
    sender: mpsc::UnboundedSender<OutboundFrame>,
    closed: AtomicBool,
}

impl WebSocketConnection {
    /// 新しいハンドルと、書き込みタスク用の受信側を作成
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundFrame>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = Self {
            sender,
            closed: AtomicBool::new(false),
        };
        (handle, receiver)
    }
}

impl ConnectionHandle for WebSocketConnection {
    fn send(&self, text: &str) -> Result<(), ConnectionError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ConnectionError::Closed("handle closed".to_string()));
        }
        self.sender
            .send(OutboundFrame::Text(text.to_string()))
            .map_err(|_| ConnectionError::Closed("writer gone".to_string()))
    }

    fn close(&self, code: CloseCode) {
        // Only the first close frame is queued
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if self.sender.send(OutboundFrame::Close(code)).is_err() {
            tracing::debug!("Close {} requested after writer already stopped", code.value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_queues_text_frame() {
        // テスト項目: send したテキストが書き込みタスク側に届く
        // given (前提条件):
        let (handle, mut rx) = WebSocketConnection::new();

        // when (操作):
        let result = handle.send("Hello");

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some(OutboundFrame::Text("Hello".to_string())));
    }

    #[tokio::test]
    async fn test_close_is_sent_once_and_blocks_further_sends() {
        // テスト項目: close は 1 度だけ送られ、以降の send はエラーになる
        // given (前提条件):
        let (handle, mut rx) = WebSocketConnection::new();

        // when (操作):
        handle.close(CloseCode::POLICY_VIOLATION);
        handle.close(CloseCode::GOING_AWAY);
        let result = handle.send("late");

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectionError::Closed(_))));
        assert_eq!(
            rx.recv().await,
            Some(OutboundFrame::Close(CloseCode::POLICY_VIOLATION))
        );
        drop(handle);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_send_after_writer_stopped_fails() {
        // テスト項目: 書き込みタスクが終了した後の send はエラーになる
        // given (前提条件):
        let (handle, rx) = WebSocketConnection::new();
        drop(rx);

        // when (操作):
        let result = handle.send("Hello");

        // then (期待する結果):
        assert!(result.is_err());
    }
}
