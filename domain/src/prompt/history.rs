//! Per-persona history view construction.
//!
//! Each debater sees the transcript through its own lens: its own turns
//! come back as assistant messages, user turns are marked as client
//! requests, and the rival's turns are marked as rival assertions. The
//! judge never appears mid-debate, so judge turns are dropped entirely.

use crate::chat::entities::Message;
use crate::debate::role::{strip_attribution, Role};
use crate::debate::turn::Turn;

/// Marker prefixed to user turns in a debater's history view.
pub const REQUEST_MARKER: &str = "### [CLIENT'S REQUEST]:";

/// Marker prefixed to the rival's turns in a debater's history view.
pub fn rival_marker(rival: Role) -> String {
    format!("### [RIVAL AGENT - {}]:", rival.label())
}

/// Directive appended to the most recent rival turn, and only when that
/// turn is the last element of the transcript at construction time.
fn rebuttal_directive(rival: Role) -> String {
    format!(
        "\n\n{}\n[SYSTEM COMMAND]: The message above is your rival ({})'s assertion.\nRebut it ruthlessly.",
        "-".repeat(30),
        rival.label()
    )
}

/// Build `target`'s view of the conversation.
///
/// `target` must be one of the two debating personas.
pub fn build_history(target: Role, transcript: &[Turn]) -> Vec<Message> {
    debug_assert!(target.is_debater());
    let last_index = transcript.len().saturating_sub(1);
    let mut messages = Vec::with_capacity(transcript.len());

    for (i, turn) in transcript.iter().enumerate() {
        if turn.speaker == Role::Judge {
            continue;
        }

        let content = strip_attribution(turn.speaker, &turn.content);

        if turn.speaker == target {
            messages.push(Message::assistant(content));
        } else if turn.speaker == Role::User {
            messages.push(Message::user(format!("{}\n{}", REQUEST_MARKER, content)));
        } else {
            // Rival debater
            let mut body = format!("{}\n{}", rival_marker(turn.speaker), content);
            if i == last_index {
                body.push_str(&rebuttal_directive(turn.speaker));
            }
            messages.push(Message::user(body));
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::entities::ChatRole;

    fn sample_transcript() -> Vec<Turn> {
        vec![
            Turn::user("Should I quit?"),
            Turn::strategist("Quit now."),
            Turn::critic("[Critic]: Reckless."),
        ]
    }

    #[test]
    fn test_own_turns_become_assistant() {
        let history = build_history(Role::Strategist, &sample_transcript());
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, "Quit now.");
    }

    #[test]
    fn test_user_turns_carry_request_marker() {
        let history = build_history(Role::Critic, &sample_transcript());
        assert_eq!(history[0].role, ChatRole::User);
        assert!(history[0].content.starts_with(REQUEST_MARKER));
        assert!(history[0].content.contains("Should I quit?"));
    }

    #[test]
    fn test_rival_turns_carry_rival_marker_and_strip_label() {
        let history = build_history(Role::Strategist, &sample_transcript());
        assert_eq!(history[2].role, ChatRole::User);
        assert!(history[2].content.contains("[RIVAL AGENT - Critic]"));
        assert!(history[2].content.contains("Reckless."));
        assert!(!history[2].content.contains("[Critic]:"));
    }

    #[test]
    fn test_rebuttal_directive_only_on_last_rival_turn() {
        let mut transcript = sample_transcript();
        transcript.push(Turn::strategist("Stagnation kills."));
        transcript.push(Turn::critic("Gambling."));

        let history = build_history(Role::Strategist, &transcript);
        let annotated: Vec<_> = history
            .iter()
            .filter(|m| m.content.contains("[SYSTEM COMMAND]"))
            .collect();
        assert_eq!(annotated.len(), 1);
        assert!(annotated[0].content.contains("Gambling."));
        // Earlier rival turn gets no directive
        assert!(!history[2].content.contains("[SYSTEM COMMAND]"));
    }

    #[test]
    fn test_no_directive_when_last_turn_is_not_rival() {
        let mut transcript = sample_transcript();
        transcript.push(Turn::strategist("Final word."));

        let history = build_history(Role::Strategist, &transcript);
        assert!(history.iter().all(|m| !m.content.contains("[SYSTEM COMMAND]")));
    }

    #[test]
    fn test_judge_turns_are_dropped() {
        let mut transcript = sample_transcript();
        transcript.push(Turn::judge("Verdict."));

        let history = build_history(Role::Strategist, &transcript);
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|m| !m.content.contains("Verdict.")));
    }

    #[test]
    fn test_judge_turn_last_means_no_rival_directive() {
        // The directive belongs to the last element of the transcript,
        // not to the last rival turn in general.
        let mut transcript = sample_transcript();
        transcript.push(Turn::judge("Verdict."));

        let history = build_history(Role::Strategist, &transcript);
        assert!(history.iter().all(|m| !m.content.contains("[SYSTEM COMMAND]")));
    }
}
