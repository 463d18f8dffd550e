//! 値オブジェクト
//!
//! 生成時にバリデーションを行い、不正な値が存在しないことを型で保証します。

use std::fmt;

use besedka_shared::protocol::{
    CLOSE_GOING_AWAY, CLOSE_INTERNAL_ERROR, CLOSE_POLICY_VIOLATION, CLOSE_SESSION_REPLACED,
};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum number of characters kept from an inbound message body.
const MAX_MESSAGE_CHARS: usize = 500;

const USERNAME_MIN_CHARS: usize = 2;
const USERNAME_MAX_CHARS: usize = 30;

/// Escape characters that carry meaning for an HTML renderer.
pub fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// ユーザー名（2〜30 文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let actual = value.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&actual) {
            return Err(ValueObjectError::InvalidUsernameLength {
                min: USERNAME_MIN_CHARS,
                max: USERNAME_MAX_CHARS,
                actual,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque bearer credential issued at registration.
///
/// `Debug` masks all but the first four characters so credentials never land in logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyCredential);
        }
        Ok(Self(value))
    }

    /// Issue a fresh 32-character credential.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "Credential({prefix}…)")
    }
}

/// サニタイズ済みのメッセージ本文
///
/// 500 文字に切り詰めた後、マークアップ文字をエスケープした値のみを保持します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    /// Truncate to 500 characters, then escape markup.
    ///
    /// Returns `None` when nothing is left to deliver.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let truncated: String = raw.chars().take(MAX_MESSAGE_CHARS).collect();
        let escaped = escape_markup(&truncated);
        if escaped.is_empty() {
            None
        } else {
            Some(Self(escaped))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a single live connection, distinct across reconnects with one credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// WebSocket close code sent when the server ends a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseCode(u16);

impl CloseCode {
    pub const GOING_AWAY: Self = Self(CLOSE_GOING_AWAY);
    pub const POLICY_VIOLATION: Self = Self(CLOSE_POLICY_VIOLATION);
    pub const INTERNAL_ERROR: Self = Self(CLOSE_INTERNAL_ERROR);
    pub const SESSION_REPLACED: Self = Self(CLOSE_SESSION_REPLACED);

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Human-readable reason carried in the close frame.
    pub fn reason(&self) -> &'static str {
        match self.0 {
            CLOSE_GOING_AWAY => "idle timeout",
            CLOSE_POLICY_VIOLATION => "invalid credential",
            CLOSE_INTERNAL_ERROR => "internal error",
            CLOSE_SESSION_REPLACED => "session replaced",
            _ => "",
        }
    }
}
