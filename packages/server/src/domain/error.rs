//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("username must be {min}..={max} characters long (got {actual})")]
    InvalidUsernameLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("credential must not be empty")]
    EmptyCredential,
}

/// AccountStore のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountStoreError {
    #[error("username '{0}' is already registered")]
    DuplicateName(String),

    #[error("account storage failure: {0}")]
    Storage(String),
}

/// 接続ハンドルへの送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection {0} is already closed")]
    Closed(String),
}
