//! UseCase: メッセージ配送
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MessageRouter::route() と presence 通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者以外の全員にだけ届くこと（N 人接続なら N−1 人）
//! - 宛先がオフラインのとき、送信者にだけ通知が届くこと
//! - 1 人への送信失敗が他の配送を止めないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：ブロードキャスト、ユニキャスト（エコー付き）
//! - 異常系：未登録・未接続の宛先、閉じた接続、ストア障害
//! - エッジケース：空の本文、500 文字超の本文、マークアップを含む本文

use std::sync::Arc;

use besedka_shared::{
    protocol::ChatFrame,
    time::{Clock, timestamp_to_rfc3339},
};

use crate::domain::{
    AccountStore, ChatMessage, Connection, ConnectionRegistry, Credential, MessageBody, Notice,
    Timestamp, Username,
};

/// What [`MessageRouter::route`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Nothing left after sanitizing.
    Dropped,
    /// Sent to every other registered connection; `delivered` counts successful sends.
    Broadcast { delivered: usize },
    /// Sent to the named recipient and echoed back to the sender.
    Unicast { delivered: bool },
    /// Recipient unknown or not connected; the sender was told so.
    RecipientOffline,
}

/// Stateless routing between registered connections.
pub struct MessageRouter {
    account_store: Arc<dyn AccountStore>,
    registry: Arc<dyn ConnectionRegistry>,
    clock: Arc<dyn Clock>,
}

impl MessageRouter {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        registry: Arc<dyn ConnectionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            account_store,
            registry,
            clock,
        }
    }

    /// Sanitize `frame` and deliver it as unicast or broadcast.
    ///
    /// Echoes and offline notices go back on `sender` itself, never on whatever
    /// connection the registry currently holds for the sender's credential.
    pub async fn route(&self, sender: &Connection, frame: ChatFrame) -> RouteOutcome {
        let Some(body) = MessageBody::sanitize(&frame.message) else {
            tracing::debug!("Dropping empty message from '{}'", sender.username);
            return RouteOutcome::Dropped;
        };
        let message = ChatMessage::new(
            sender.username.clone(),
            frame.recipient().map(str::to_string),
            body,
            Timestamp::new(self.clock.now_millis()),
        );
        tracing::debug!(
            "Routing message from '{}' received at {}",
            message.sender,
            timestamp_to_rfc3339(message.timestamp.value())
        );

        match message.recipient.as_deref() {
            Some(recipient) => self.unicast(&message, recipient, sender).await,
            None => {
                let line = Notice::Chat {
                    sender: &message.sender,
                    body: &message.body,
                }
                .to_string();
                let delivered = self.broadcast(&line, Some(&sender.credential)).await;
                tracing::info!(
                    "Broadcast from '{}' delivered to {} connection(s)",
                    message.sender,
                    delivered
                );
                RouteOutcome::Broadcast { delivered }
            }
        }
    }

    /// Tell everyone already connected that `name` joined.
    pub async fn announce_joined(&self, name: &Username, credential: &Credential) -> usize {
        self.broadcast(&Notice::Joined(name).to_string(), Some(credential))
            .await
    }

    /// Tell everyone still connected that `name` left.
    pub async fn announce_left(&self, name: &Username) -> usize {
        self.broadcast(&Notice::Left(name).to_string(), None).await
    }

    /// Send `text` to every connection in a registry snapshot except `exclude`.
    ///
    /// Failed sends are logged and skipped. Returns the number of successful sends.
    pub async fn broadcast(&self, text: &str, exclude: Option<&Credential>) -> usize {
        let targets = self.registry.snapshot().await;
        let mut delivered = 0;
        for (credential, connection) in &targets {
            if Some(credential) == exclude {
                continue;
            }
            if deliver(connection, text) {
                delivered += 1;
            }
        }
        delivered
    }

    async fn unicast(
        &self,
        message: &ChatMessage,
        recipient: &str,
        sender: &Connection,
    ) -> RouteOutcome {
        let Some(target) = self.resolve_recipient(recipient).await else {
            tracing::info!(
                "Recipient '{}' of '{}' is offline",
                recipient,
                message.sender
            );
            deliver(sender, &Notice::RecipientOffline(recipient).to_string());
            return RouteOutcome::RecipientOffline;
        };

        let delivered = deliver(
            &target,
            &Notice::Chat {
                sender: &message.sender,
                body: &message.body,
            }
            .to_string(),
        );
        deliver(sender, &Notice::Echo(&message.body).to_string());

        RouteOutcome::Unicast { delivered }
    }

    /// Connection of the user called `recipient`, if registered and connected.
    async fn resolve_recipient(&self, recipient: &str) -> Option<Connection> {
        let name = Username::new(recipient.to_string()).ok()?;
        let credential = match self.account_store.lookup_by_name(&name).await {
            Ok(credential) => credential?,
            Err(e) => {
                tracing::error!("Failed to look up recipient '{}': {}", recipient, e);
                return None;
            }
        };
        self.registry.get(&credential).await
    }
}

fn deliver(connection: &Connection, text: &str) -> bool {
    match connection.send(text) {
        Ok(()) => {
            tracing::debug!("Delivered to '{}' ({})", connection.username, connection.id);
            true
        }
        Err(e) => {
            tracing::warn!(
                "Failed to deliver to '{}' ({}): {}",
                connection.username,
                connection.id,
                e
            );
            false
        }
    }
}
