//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server refused to create the account
    #[error("Registration failed: {0}")]
    Registration(String),

    /// The server closed the socket because the credential is not valid for this name
    #[error("Server rejected the credential for '{0}'")]
    Rejected(String),

    /// Another connection with the same credential took over
    #[error("Session for '{0}' was taken over by another connection")]
    SessionReplaced(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server URL cannot be turned into a WebSocket URL
    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(String),
}
