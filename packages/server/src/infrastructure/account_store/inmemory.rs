//! InMemory AccountStore 実装
//!
//! ユーザー名 → 認証情報、認証情報 → ユーザー名 の 2 つの HashMap を
//! 1 つの Mutex で守ることで、登録の原子性を保証します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{AccountStore, AccountStoreError, Credential, User, Username};

#[derive(Default)]
struct Accounts {
    by_name: HashMap<Username, Credential>,
    by_credential: HashMap<Credential, Username>,
}

/// インメモリ AccountStore 実装
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<Accounts>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みアカウント数を取得
    pub async fn count(&self) -> usize {
        self.accounts.lock().await.by_name.len()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn register(&self, name: &Username) -> Result<User, AccountStoreError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.by_name.contains_key(name) {
            return Err(AccountStoreError::DuplicateName(name.as_str().to_string()));
        }

        let credential = Credential::generate();
        accounts.by_name.insert(name.clone(), credential.clone());
        accounts
            .by_credential
            .insert(credential.clone(), name.clone());
        tracing::debug!("Account '{}' registered in memory", name);

        Ok(User::new(name.clone(), credential))
    }

    async fn validate(
        &self,
        credential: &Credential,
    ) -> Result<Option<Username>, AccountStoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.by_credential.get(credential).cloned())
    }

    async fn lookup_by_name(
        &self,
        name: &Username,
    ) -> Result<Option<Credential>, AccountStoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.by_name.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn name(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_validate() {
        // テスト項目: 登録で発行された認証情報が検証に通る
        // given (前提条件):
        let store = InMemoryAccountStore::new();

        // when (操作):
        let user = store.register(&name("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(user.name, name("alice"));
        assert_eq!(
            store.validate(&user.credential).await.unwrap(),
            Some(name("alice"))
        );
        assert_eq!(
            store.lookup_by_name(&name("alice")).await.unwrap(),
            Some(user.credential)
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_name_fails() {
        // テスト項目: 同じ名前の 2 回目の登録は DuplicateName になり、認証情報は 1 つだけ残る
        // given (前提条件):
        let store = InMemoryAccountStore::new();
        let first = store.register(&name("alice")).await.unwrap();

        // when (操作):
        let second = store.register(&name("alice")).await;

        // then (期待する結果):
        assert_eq!(
            second,
            Err(AccountStoreError::DuplicateName("alice".to_string()))
        );
        assert_eq!(store.count().await, 1);
        assert_eq!(
            store.lookup_by_name(&name("alice")).await.unwrap(),
            Some(first.credential)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_is_atomic() {
        // テスト項目: 同名の同時登録でも成功は 1 件だけ
        // given (前提条件):
        let store = Arc::new(InMemoryAccountStore::new());

        // when (操作):
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(
                async move { store.register(&name("racer")).await },
            ));
        }
        let mut successes = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(successes, 1);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_validate_unknown_credential() {
        // テスト項目: 未知の認証情報は None になる
        // given (前提条件):
        let store = InMemoryAccountStore::new();

        // when (操作):
        let result = store.validate(&Credential::generate()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }
}
