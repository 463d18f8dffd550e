//! AccountStore trait 定義
//!
//! ユーザー名と認証情報の永続的な対応付けを扱うインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::User,
    error::AccountStoreError,
    value_object::{Credential, Username},
};

/// Durable mapping of username → credential.
///
/// Implementations that do blocking I/O must keep it off the async worker threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Issue a credential for a new name.
    ///
    /// Fails with [`AccountStoreError::DuplicateName`] if the name exists, even when
    /// two registrations for the same name race.
    async fn register(&self, name: &Username) -> Result<User, AccountStoreError>;

    /// Owner of `credential`, if any.
    async fn validate(
        &self,
        credential: &Credential,
    ) -> Result<Option<Username>, AccountStoreError>;

    /// Credential registered for `name`, if any.
    async fn lookup_by_name(
        &self,
        name: &Username,
    ) -> Result<Option<Credential>, AccountStoreError>;
}
