//! Outbound text lines delivered to clients.

use std::fmt;

use super::value_object::{MessageBody, Username, escape_markup};

/// Every line the server ever sends to a client.
///
/// Names are escaped on output; bodies are escaped when sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    Joined(&'a Username),
    Left(&'a Username),
    Chat {
        sender: &'a Username,
        body: &'a MessageBody,
    },
    Echo(&'a MessageBody),
    RecipientOffline(&'a str),
}

impl fmt::Display for Notice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Joined(name) => {
                write!(f, "{} подключился к чату", escape_markup(name.as_str()))
            }
            Notice::Left(name) => write!(f, "{} покинул чат", escape_markup(name.as_str())),
            Notice::Chat { sender, body } => {
                write!(f, "{} >>> {}", escape_markup(sender.as_str()), body)
            }
            Notice::Echo(body) => write!(f, "Вы >>> {}", body),
            Notice::RecipientOffline(name) => {
                write!(f, "Пользователь {} не в сети.", escape_markup(name))
            }
        }
    }
}
