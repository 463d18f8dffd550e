//! Shared application state.

use std::sync::Arc;

use crate::usecase::{ConnectionHandler, RegisterAccountUseCase};

/// Shared application state
pub struct AppState {
    /// RegisterAccountUseCase（アカウント登録のユースケース）
    pub register_account_usecase: Arc<RegisterAccountUseCase>,
    /// ConnectionHandler（接続ごとの制御ループ）
    pub connection_handler: Arc<ConnectionHandler>,
}
