//! ConnectionRegistry trait 定義

use async_trait::async_trait;

use super::{
    entity::Connection,
    value_object::{ConnectionId, Credential},
};

/// In-memory mapping of credential → live connection.
///
/// Sole owner of connection lifetime. Every method is safe to call concurrently from
/// any number of connection tasks.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Register `connection` under its credential.
    ///
    /// An existing connection for the same credential is closed and returned.
    async fn add(&self, connection: Connection) -> Option<Connection>;

    /// Remove whatever is registered for `credential`. Absent credentials are a no-op.
    async fn remove(&self, credential: &Credential) -> Option<Connection>;

    /// Remove the entry for `credential` only if it is still the connection `id`.
    ///
    /// Lets an evicted session tear down without touching its replacement.
    async fn remove_if_current(
        &self,
        credential: &Credential,
        id: ConnectionId,
    ) -> Option<Connection>;

    /// Connection registered for `credential`.
    async fn get(&self, credential: &Credential) -> Option<Connection>;

    /// Point-in-time copy of all entries ordered by connection time.
    async fn snapshot(&self) -> Vec<(Credential, Connection)>;

    /// Number of registered connections.
    async fn count(&self) -> usize;
}
