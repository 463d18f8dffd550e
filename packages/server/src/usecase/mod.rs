//! UseCase 層
//!
//! - `register_account`: アカウント登録
//! - `message_router`: ユニキャスト / ブロードキャストの配送
//! - `connection_handler`: 接続ごとの状態遷移（ハンドシェイク → 受信ループ → 後始末）

pub mod connection_handler;
pub mod error;
pub mod message_router;
pub mod register_account;

pub use connection_handler::{ConnectionEvent, ConnectionHandler, ConnectionState, SessionOutcome};
pub use error::{HandshakeError, RegisterError};
pub use message_router::{MessageRouter, RouteOutcome};
pub use register_account::RegisterAccountUseCase;
