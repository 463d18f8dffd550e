//! ドメイン層
//!
//! 値オブジェクト、エンティティ、そして外側の層が実装する trait を定義します。

pub mod account_store;
pub mod connection;
pub mod entity;
pub mod error;
pub mod notice;
pub mod registry;
pub mod value_object;

pub use account_store::AccountStore;
pub use connection::{ConnectionHandle, FrameReceiver, ReceivedFrame};
pub use entity::{ChatMessage, Connection, User};
pub use error::{AccountStoreError, ConnectionError, ValueObjectError};
pub use notice::Notice;
pub use registry::ConnectionRegistry;
pub use value_object::{
    CloseCode, ConnectionId, Credential, MessageBody, Timestamp, Username, escape_markup,
};

#[cfg(test)]
pub use account_store::MockAccountStore;
