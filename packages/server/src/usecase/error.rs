//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{AccountStoreError, CloseCode, ValueObjectError};

/// アカウント登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("invalid username: {0}")]
    InvalidName(#[from] ValueObjectError),

    #[error("username '{0}' is already registered")]
    DuplicateName(String),

    #[error("account storage failure: {0}")]
    Storage(String),
}

impl From<AccountStoreError> for RegisterError {
    fn from(e: AccountStoreError) -> Self {
        match e {
            AccountStoreError::DuplicateName(name) => RegisterError::DuplicateName(name),
            AccountStoreError::Storage(reason) => RegisterError::Storage(reason),
        }
    }
}

/// ハンドシェイクのエラー（いずれも接続の終端）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    #[error("credential does not authorize this user")]
    InvalidCredential,

    #[error("account storage failure: {0}")]
    Storage(String),
}

impl HandshakeError {
    /// Close code that tells the client why it was turned away.
    pub fn close_code(&self) -> CloseCode {
        match self {
            HandshakeError::InvalidCredential => CloseCode::POLICY_VIOLATION,
            HandshakeError::Storage(_) => CloseCode::INTERNAL_ERROR,
        }
    }
}
