//! UseCase: アカウント登録

use std::sync::Arc;

use crate::domain::{AccountStore, User, Username};

use super::error::RegisterError;

/// アカウント登録のユースケース
pub struct RegisterAccountUseCase {
    account_store: Arc<dyn AccountStore>,
}

impl RegisterAccountUseCase {
    pub fn new(account_store: Arc<dyn AccountStore>) -> Self {
        Self { account_store }
    }

    /// 名前を検証し、新しい認証情報を発行する
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 登録されたユーザー（認証情報を含む）
    /// * `Err(RegisterError)` - 名前が不正、重複、またはストレージ障害
    pub async fn execute(&self, name: String) -> Result<User, RegisterError> {
        let name = Username::new(name)?;
        let user = self.account_store.register(&name).await?;
        tracing::info!("Account '{}' registered", user.name);
        Ok(user)
    }
}
