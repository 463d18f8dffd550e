//! SQLite-backed AccountStore.
//!
//! rusqlite is synchronous, so every query runs on tokio's blocking pool and never
//! stalls the tasks serving other connections.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use crate::domain::{AccountStore, AccountStoreError, Credential, User, Username};

pub struct SqliteAccountStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAccountStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AccountStoreError> {
        let conn = Connection::open(path).map_err(storage_error)?;
        Self::from_connection(conn)
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self, AccountStoreError> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, AccountStoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                token TEXT UNIQUE NOT NULL
            )",
            [],
        )
        .map_err(storage_error)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, AccountStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, AccountStoreError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| AccountStoreError::Storage("connection lock poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| AccountStoreError::Storage(e.to_string()))?
    }
}

fn storage_error(e: rusqlite::Error) -> AccountStoreError {
    AccountStoreError::Storage(e.to_string())
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn register(&self, name: &Username) -> Result<User, AccountStoreError> {
        let name = name.clone();
        self.with_connection(move |conn| {
            let credential = Credential::generate();
            let inserted = conn.execute(
                "INSERT INTO users (name, token) VALUES (?1, ?2)",
                params![name.as_str(), credential.as_str()],
            );
            match inserted {
                Ok(_) => {
                    tracing::debug!("Account '{}' stored in sqlite", name);
                    Ok(User::new(name, credential))
                }
                Err(e) if is_constraint_violation(&e) => {
                    Err(AccountStoreError::DuplicateName(name.into_string()))
                }
                Err(e) => Err(storage_error(e)),
            }
        })
        .await
    }

    async fn validate(
        &self,
        credential: &Credential,
    ) -> Result<Option<Username>, AccountStoreError> {
        let credential = credential.clone();
        self.with_connection(move |conn| {
            let name: Option<String> = conn
                .query_row(
                    "SELECT name FROM users WHERE token = ?1",
                    params![credential.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_error)?;

            name.map(|name| {
                Username::new(name).map_err(|e| AccountStoreError::Storage(e.to_string()))
            })
            .transpose()
        })
        .await
    }

    async fn lookup_by_name(
        &self,
        name: &Username,
    ) -> Result<Option<Credential>, AccountStoreError> {
        let name = name.clone();
        self.with_connection(move |conn| {
            let token: Option<String> = conn
                .query_row(
                    "SELECT token FROM users WHERE name = ?1",
                    params![name.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_error)?;

            token
                .map(|token| {
                    Credential::new(token).map_err(|e| AccountStoreError::Storage(e.to_string()))
                })
                .transpose()
        })
        .await
    }
}
