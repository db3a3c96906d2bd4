//! Debate roles and speaker sequencing.

use serde::{Deserialize, Serialize};

/// Speaker of a [`Turn`](super::turn::Turn).
///
/// `Strategist` and `Critic` are the two debating personas; `Judge`
/// only ever speaks once, to deliver the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Strategist,
    Critic,
    Judge,
}

impl Role {
    /// Label used in transcript export and judge context rendering.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Strategist => "Strategist",
            Role::Critic => "Critic",
            Role::Judge => "Judge",
        }
    }

    /// Whether this role is one of the two debating personas.
    pub fn is_debater(self) -> bool {
        matches!(self, Role::Strategist | Role::Critic)
    }

    /// The debating persona that speaks after `last_speaker`.
    ///
    /// A `user` or `judge` turn always hands the floor back to the
    /// strategist; the debaters otherwise alternate.
    pub fn next_speaker(last_speaker: Role) -> Role {
        match last_speaker {
            Role::User | Role::Judge => Role::Strategist,
            Role::Strategist => Role::Critic,
            Role::Critic => Role::Strategist,
        }
    }

    /// The debating persona this one argues against.
    pub fn rival(self) -> Option<Role> {
        match self {
            Role::Strategist => Some(Role::Critic),
            Role::Critic => Some(Role::Strategist),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Strip a leading self-attribution label from generated text.
///
/// Models sometimes prefix their reply with their own name, e.g.
/// `"[Strategist]: I propose..."` or `"strategist: I propose..."`.
/// Any of the following leading forms is removed (case-insensitive):
/// the role's own label with or without brackets, or any bracketed tag,
/// each followed by a colon.
pub fn strip_attribution(role: Role, text: &str) -> String {
    let trimmed = text.trim_start();
    let label = role.label();

    let rest = strip_labeled_prefix(trimmed, label)
        .or_else(|| strip_any_bracketed_prefix(trimmed))
        .unwrap_or(trimmed);

    rest.trim().to_string()
}

/// Remove `[Label]:` or `Label:` (case-insensitive) from the start.
fn strip_labeled_prefix<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    for candidate in [format!("[{}]", label), label.to_string()] {
        if text.len() >= candidate.len()
            && text
                .chars()
                .zip(candidate.chars())
                .take(candidate.chars().count())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b))
        {
            let after = &text[candidate.len()..];
            if let Some(rest) = after.trim_start().strip_prefix(':') {
                return Some(rest);
            }
        }
    }
    None
}

/// Remove any `[...]:` tag from the start, whatever its content.
fn strip_any_bracketed_prefix(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('[')?;
    let close = inner.find(']')?;
    let after = &inner[close + 1..];
    after.trim_start().strip_prefix(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_speaker_rules() {
        assert_eq!(Role::next_speaker(Role::User), Role::Strategist);
        assert_eq!(Role::next_speaker(Role::Judge), Role::Strategist);
        assert_eq!(Role::next_speaker(Role::Strategist), Role::Critic);
        assert_eq!(Role::next_speaker(Role::Critic), Role::Strategist);
    }

    #[test]
    fn test_is_debater() {
        assert!(Role::Strategist.is_debater());
        assert!(Role::Critic.is_debater());
        assert!(!Role::User.is_debater());
        assert!(!Role::Judge.is_debater());
    }

    #[test]
    fn test_strip_bracketed_own_label() {
        let cleaned = strip_attribution(Role::Critic, "[Critic]: The plan is reckless.");
        assert_eq!(cleaned, "The plan is reckless.");
    }

    #[test]
    fn test_strip_bare_label_case_insensitive() {
        let cleaned = strip_attribution(Role::Strategist, "strategist: Go all in.");
        assert_eq!(cleaned, "Go all in.");
    }

    #[test]
    fn test_strip_arbitrary_bracketed_tag() {
        let cleaned = strip_attribution(Role::Strategist, "[The Bulldozer]: Go all in.");
        assert_eq!(cleaned, "Go all in.");
    }

    #[test]
    fn test_no_label_left_untouched() {
        let cleaned = strip_attribution(Role::Critic, "No label here: but a colon later.");
        assert_eq!(cleaned, "No label here: but a colon later.");
    }

    #[test]
    fn test_bracket_without_colon_left_untouched() {
        let cleaned = strip_attribution(Role::Critic, "[Critic] said nothing.");
        assert_eq!(cleaned, "[Critic] said nothing.");
    }
}
