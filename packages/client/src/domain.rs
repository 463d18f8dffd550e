//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use besedka_shared::protocol::{ChatFrame, CLOSE_POLICY_VIOLATION, CLOSE_SESSION_REPLACED};

use crate::error::ClientError;

/// Turn a typed line into a frame.
///
/// `@name text` is sent to `name` only; any other line goes to everyone. A bare `@name`
/// with no text is sent as an ordinary broadcast line. Blank lines produce nothing.
pub fn parse_input(line: &str) -> Option<ChatFrame> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(addressed) = line.strip_prefix('@')
        && let Some((to, message)) = addressed.split_once(char::is_whitespace)
    {
        let message = message.trim();
        if !to.is_empty() && !message.is_empty() {
            return Some(ChatFrame::direct(to, message));
        }
    }

    Some(ChatFrame::broadcast(line))
}

/// Map a server close frame to the error that ends the session.
pub fn classify_close(code: u16, name: &str) -> ClientError {
    match code {
        CLOSE_POLICY_VIOLATION => ClientError::Rejected(name.to_string()),
        CLOSE_SESSION_REPLACED => ClientError::SessionReplaced(name.to_string()),
        other => ClientError::ConnectionError(format!("closed by server (code {})", other)),
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (bad credential, replaced session, bad URL,
/// refused registration), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Rejected(_)
            | ClientError::SessionReplaced(_)
            | ClientError::InvalidServerUrl(_)
            | ClientError::Registration(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
