//! Wire-level chat message entities.
//!
//! [`Message`] is the role-tagged unit sent to an LLM backend. It is
//! distinct from [`Turn`](crate::debate::turn::Turn): a turn belongs to
//! the transcript, while a message is one persona's *view* of a turn
//! (own turns become `Assistant`, everything else becomes `User`).

use serde::{Deserialize, Serialize};

/// Role of a message in a backend conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A message in a backend conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Message::system("s").role, ChatRole::System);
        assert_eq!(Message::user("u").role, ChatRole::User);
        assert_eq!(Message::assistant("a").role, ChatRole::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert!(json.contains("\"assistant\""));
    }
}
