//! AccountStore の実装
//!
//! - `inmemory`: HashMap を使ったプロセス内実装（再起動で消える）
//! - `sqlite`: SQLite ファイルを使った永続実装

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryAccountStore;
pub use sqlite::SqliteAccountStore;
