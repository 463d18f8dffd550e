//! UseCase: 接続ごとの制御ループ
//!
//! `Connecting → Authenticated → Active → Closing → Closed` の状態遷移を駆動します。
//! 認証に失敗した接続は `Connecting` から直接 `Closed` へ遷移し、Registry には一切触れません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 状態遷移表（ConnectionState::next）
//! - ConnectionHandler::run() によるハンドシェイク、受信ループ、後始末
//!
//! ### なぜこのテストが必要か
//! - 不正な認証情報では登録も参加通知も発生しないこと
//! - 切断時に退出通知がちょうど 1 回だけ送られること
//! - 同じ認証情報の再接続で、古いセッションの後始末が新しい接続を消さないこと
//! - 接続・切断が並行しても、安定したメンバーへの配送が欠けも重複もしないこと

use std::{sync::Arc, time::Duration};

use besedka_shared::time::Clock;

use crate::domain::{
    AccountStore, AccountStoreError, CloseCode, Connection, ConnectionHandle, ConnectionRegistry,
    Credential, FrameReceiver, ReceivedFrame, Timestamp, Username,
};

use super::{error::HandshakeError, message_router::MessageRouter};

/// Lifecycle of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Authenticated,
    Active,
    Closing,
    Closed,
}

/// Inputs that move a connection between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    CredentialAccepted,
    CredentialRejected,
    Registered,
    FrameReceived,
    PeerClosed,
    IdleTimeout,
    CleanedUp,
}

impl ConnectionState {
    /// State after `event`, or `None` if `event` is not valid in this state.
    pub fn next(self, event: ConnectionEvent) -> Option<Self> {
        use ConnectionEvent as E;
        use ConnectionState as S;

        match (self, event) {
            (S::Connecting, E::CredentialAccepted) => Some(S::Authenticated),
            (S::Connecting, E::CredentialRejected) => Some(S::Closed),
            (S::Authenticated, E::Registered) => Some(S::Active),
            (S::Active, E::FrameReceived) => Some(S::Active),
            (S::Active, E::PeerClosed | E::IdleTimeout) => Some(S::Closing),
            (S::Closing, E::CleanedUp) => Some(S::Closed),
            _ => None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The handshake failed; nothing was registered.
    Rejected(HandshakeError),
    /// The session was registered and has been torn down.
    ///
    /// `replaced` is set when a newer connection with the same credential took over,
    /// in which case no "left" notice was sent.
    Finished { replaced: bool },
}

/// Per-connection control loop.
pub struct ConnectionHandler {
    account_store: Arc<dyn AccountStore>,
    registry: Arc<dyn ConnectionRegistry>,
    router: Arc<MessageRouter>,
    clock: Arc<dyn Clock>,
    idle_timeout: Option<Duration>,
}

impl ConnectionHandler {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        registry: Arc<dyn ConnectionRegistry>,
        router: Arc<MessageRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            account_store,
            registry,
            router,
            clock,
            idle_timeout: None,
        }
    }

    /// Close connections that stay silent for `idle_timeout`.
    pub fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Check that `credential` belongs to the user called `name`.
    pub async fn authenticate(
        &self,
        name: &str,
        credential: &str,
    ) -> Result<(Username, Credential), HandshakeError> {
        let username =
            Username::new(name.to_string()).map_err(|_| HandshakeError::InvalidCredential)?;
        let credential = Credential::new(credential.to_string())
            .map_err(|_| HandshakeError::InvalidCredential)?;

        match self.account_store.validate(&credential).await {
            Ok(Some(owner)) if owner == username => Ok((username, credential)),
            Ok(_) => Err(HandshakeError::InvalidCredential),
            Err(AccountStoreError::Storage(reason)) => Err(HandshakeError::Storage(reason)),
            Err(e) => Err(HandshakeError::Storage(e.to_string())),
        }
    }

    /// Drive one connection from handshake to teardown.
    ///
    /// Returns once the connection reaches [`ConnectionState::Closed`]. Teardown runs at
    /// most once per call, whichever way the connection ended.
    pub async fn run<R: FrameReceiver>(
        &self,
        name: &str,
        credential: &str,
        handle: Arc<dyn ConnectionHandle>,
        mut receiver: R,
    ) -> SessionOutcome {
        let mut state = ConnectionState::Connecting;

        // Connecting
        let (username, credential) = match self.authenticate(name, credential).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("Rejecting connection for '{}': {}", name, e);
                handle.close(e.close_code());
                advance(&mut state, ConnectionEvent::CredentialRejected);
                return SessionOutcome::Rejected(e);
            }
        };
        advance(&mut state, ConnectionEvent::CredentialAccepted);

        // Authenticated
        let connection = Connection::new(
            credential.clone(),
            username.clone(),
            Timestamp::new(self.clock.now_millis()),
            handle,
        );
        self.registry.add(connection.clone()).await;
        advance(&mut state, ConnectionEvent::Registered);
        tracing::info!("'{}' connected ({})", username, connection.id);
        self.router.announce_joined(&username, &credential).await;

        // Active
        while state == ConnectionState::Active {
            match self.receive(&mut receiver).await {
                Some(ReceivedFrame::Chat(frame)) => {
                    self.router.route(&connection, frame).await;
                    advance(&mut state, ConnectionEvent::FrameReceived);
                }
                Some(ReceivedFrame::Malformed(reason)) => {
                    tracing::warn!("Dropping malformed frame from '{}': {}", username, reason);
                }
                Some(ReceivedFrame::Ignored) => {}
                Some(ReceivedFrame::PeerClosed) => {
                    advance(&mut state, ConnectionEvent::PeerClosed);
                }
                None => {
                    tracing::info!("'{}' idle for too long, closing", username);
                    connection.close(CloseCode::GOING_AWAY);
                    advance(&mut state, ConnectionEvent::IdleTimeout);
                }
            }
        }

        // Closing
        let removed = self
            .registry
            .remove_if_current(&credential, connection.id)
            .await;
        let replaced = removed.is_none();
        if replaced {
            tracing::info!(
                "'{}' ({}) was replaced by a newer connection",
                username,
                connection.id
            );
        } else {
            tracing::info!("'{}' disconnected ({})", username, connection.id);
            self.router.announce_left(&username).await;
        }
        advance(&mut state, ConnectionEvent::CleanedUp);

        SessionOutcome::Finished { replaced }
    }

    /// Next frame, or `None` if the idle timeout elapsed first.
    async fn receive<R: FrameReceiver>(&self, receiver: &mut R) -> Option<ReceivedFrame> {
        match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, receiver.recv()).await.ok(),
            None => Some(receiver.recv().await),
        }
    }
}

fn advance(state: &mut ConnectionState, event: ConnectionEvent) {
    match state.next(event) {
        Some(next) => {
            tracing::trace!("{:?} --{:?}--> {:?}", state, event, next);
            *state = next;
        }
        None => tracing::error!("Ignoring {:?} in state {:?}", event, state),
    }
}
