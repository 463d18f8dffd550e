//! InMemory ConnectionRegistry 実装
//!
//! 認証情報 → 接続 の HashMap を 1 つの Mutex で守ります。
//! ブロードキャストはロック中に取ったスナップショットを、ロック解放後に走査します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CloseCode, Connection, ConnectionId, ConnectionRegistry, Credential};

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<Credential, Connection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, connection: Connection) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        let username = connection.username.clone();
        let evicted = connections.insert(connection.credential.clone(), connection);

        if let Some(stale) = &evicted {
            stale.close(CloseCode::SESSION_REPLACED);
            tracing::info!(
                "Connection {} of '{}' replaced by a newer connection",
                stale.id,
                username
            );
        }
        tracing::debug!("Registry holds {} connection(s)", connections.len());

        evicted
    }

    async fn remove(&self, credential: &Credential) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        connections.remove(credential)
    }

    async fn remove_if_current(
        &self,
        credential: &Credential,
        id: ConnectionId,
    ) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        match connections.get(credential) {
            Some(current) if current.id == id => connections.remove(credential),
            _ => None,
        }
    }

    async fn get(&self, credential: &Credential) -> Option<Connection> {
        let connections = self.connections.lock().await;
        connections.get(credential).cloned()
    }

    async fn snapshot(&self) -> Vec<(Credential, Connection)> {
        let mut entries: Vec<(Credential, Connection)> = {
            let connections = self.connections.lock().await;
            connections
                .iter()
                .map(|(credential, connection)| (credential.clone(), connection.clone()))
                .collect()
        };

        // Sort by connection time for a stable broadcast order
        entries.sort_by(|(a_cred, a), (b_cred, b)| {
            a.established_at
                .cmp(&b.established_at)
                .then_with(|| a_cred.as_str().cmp(b_cred.as_str()))
        });

        entries
    }

    async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Timestamp, Username},
        infrastructure::connection::{OutboundFrame, WebSocketConnection},
    };
    use std::sync::Arc;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - add / remove / get / snapshot の基本動作
    // - 同じ認証情報での再接続時に古い接続が閉じられること（明示的な置き換え）
    // - remove の冪等性と remove_if_current による置き換え後の保護
    //
    // 【なぜこのテストが必要か】
    // - Registry は全接続タスクから共有される唯一の可変状態
    // - 古い接続を閉じずに上書きすると transport がリークする
    // ========================================

    fn connection(
        name: &str,
        credential: &str,
        at: i64,
    ) -> (Connection, mpsc::UnboundedReceiver<OutboundFrame>) {
        let (handle, rx) = WebSocketConnection::new();
        let connection = Connection::new(
            Credential::new(credential.to_string()).unwrap(),
            Username::new(name.to_string()).unwrap(),
            Timestamp::new(at),
            Arc::new(handle),
        );
        (connection, rx)
    }

    #[tokio::test]
    async fn test_add_and_get() {
        // テスト項目: 追加した接続を認証情報で取得できる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx) = connection("alice", "cred-a", 1000);

        // when (操作):
        let evicted = registry.add(alice.clone()).await;

        // then (期待する結果):
        assert!(evicted.is_none());
        let found = registry.get(&alice.credential).await.unwrap();
        assert_eq!(found.id, alice.id);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_add_same_credential_evicts_and_closes_stale_connection() {
        // テスト項目: 同じ認証情報で追加すると古い接続が閉じられ、置き換えられる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (first, mut first_rx) = connection("alice", "cred-a", 1000);
        let (second, _second_rx) = connection("alice", "cred-a", 2000);
        registry.add(first.clone()).await;

        // when (操作):
        let evicted = registry.add(second.clone()).await;

        // then (期待する結果):
        assert_eq!(evicted.map(|c| c.id), Some(first.id));
        assert_eq!(
            first_rx.recv().await,
            Some(OutboundFrame::Close(CloseCode::SESSION_REPLACED))
        );
        assert_eq!(registry.get(&second.credential).await.unwrap().id, second.id);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // テスト項目: 存在しない認証情報の削除は何もしない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (alice, _rx) = connection("alice", "cred-a", 1000);
        registry.add(alice.clone()).await;

        // when (操作):
        let first = registry.remove(&alice.credential).await;
        let second = registry.remove(&alice.credential).await;

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_if_current_keeps_replacement() {
        // テスト項目: 置き換えられた古い接続の後始末で新しい接続が消えない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (first, _rx1) = connection("alice", "cred-a", 1000);
        let (second, _rx2) = connection("alice", "cred-a", 2000);
        registry.add(first.clone()).await;
        registry.add(second.clone()).await;

        // when (操作):
        let stale_removal = registry.remove_if_current(&first.credential, first.id).await;
        let current_removal = registry
            .remove_if_current(&second.credential, second.id)
            .await;

        // then (期待する結果):
        assert!(stale_removal.is_none());
        assert_eq!(current_removal.map(|c| c.id), Some(second.id));
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_is_ordered_and_detached() {
        // テスト項目: スナップショットは接続時刻順で、取得後の変更の影響を受けない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (charlie, _rx1) = connection("charlie", "cred-c", 3000);
        let (alice, _rx2) = connection("alice", "cred-a", 1000);
        let (bob, _rx3) = connection("bob", "cred-b", 2000);
        registry.add(charlie.clone()).await;
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // when (操作):
        let snapshot = registry.snapshot().await;
        registry.remove(&bob.credential).await;

        // then (期待する結果):
        let names: Vec<&str> = snapshot.iter().map(|(_, c)| c.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "charlie"]);
        assert_eq!(registry.count().await, 2);
    }
}
