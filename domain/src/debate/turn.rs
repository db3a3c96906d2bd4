//! Turn entity

use super::role::Role;
use serde::{Deserialize, Serialize};

/// One atomic contribution to the transcript by a single speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Role,
    pub content: String,
}

impl Turn {
    pub fn new(speaker: Role, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn strategist(content: impl Into<String>) -> Self {
        Self::new(Role::Strategist, content)
    }

    pub fn critic(content: impl Into<String>) -> Self {
        Self::new(Role::Critic, content)
    }

    pub fn judge(content: impl Into<String>) -> Self {
        Self::new(Role::Judge, content)
    }
}
