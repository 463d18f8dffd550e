//! エンティティ

use std::{fmt, sync::Arc};

use super::{
    connection::ConnectionHandle,
    error::ConnectionError,
    value_object::{CloseCode, ConnectionId, Credential, MessageBody, Timestamp, Username},
};

/// 登録済みユーザー（登録時に一度だけ作成され、以後変更されない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: Username,
    pub credential: Credential,
}

impl User {
    pub fn new(name: Username, credential: Credential) -> Self {
        Self { name, credential }
    }
}

/// A live, authenticated connection.
///
/// Cloning is cheap: clones share the same transport handle.
#[derive(Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub credential: Credential,
    pub username: Username,
    pub established_at: Timestamp,
    handle: Arc<dyn ConnectionHandle>,
}

impl Connection {
    pub fn new(
        credential: Credential,
        username: Username,
        established_at: Timestamp,
        handle: Arc<dyn ConnectionHandle>,
    ) -> Self {
        Self {
            id: ConnectionId::generate(),
            credential,
            username,
            established_at,
            handle,
        }
    }

    pub fn send(&self, text: &str) -> Result<(), ConnectionError> {
        self.handle.send(text)
    }

    pub fn close(&self, code: CloseCode) {
        self.handle.close(code)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("credential", &self.credential)
            .field("username", &self.username)
            .field("established_at", &self.established_at)
            .finish_non_exhaustive()
    }
}

/// 受信したチャットメッセージ（配送後は保持しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Username,
    /// Raw recipient name as sent by the client; not necessarily a registered user.
    pub recipient: Option<String>,
    pub body: MessageBody,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        sender: Username,
        recipient: Option<String>,
        body: MessageBody,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            sender,
            recipient,
            body,
            timestamp,
        }
    }
}
