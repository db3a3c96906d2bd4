//! Debate lifecycle phases and transitions.

use serde::{Deserialize, Serialize};

/// Phase of a debate session.
///
/// The orchestrator drives `AwaitingInput → Running →
/// AwaitingVerdict → Verdict → Finished`. A manual stop moves
/// `Running` straight to `AwaitingVerdict`; a failed judge call moves
/// `Verdict` back to `AwaitingVerdict` for an operator retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// No user question submitted yet.
    AwaitingInput,
    /// Debaters are exchanging turns.
    Running,
    /// Debate over (cap, concession, or stop); verdict not yet delivered.
    AwaitingVerdict,
    /// Judge call in flight.
    Verdict,
    /// Verdict recorded. Only post-hoc analysis remains.
    Finished,
}

impl DebatePhase {
    /// Whether this is the terminal phase of a debate.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Valid successor phases.
    pub fn valid_transitions(self) -> &'static [DebatePhase] {
        match self {
            Self::AwaitingInput => &[Self::Running],
            Self::Running => &[Self::Running, Self::AwaitingVerdict],
            Self::AwaitingVerdict => &[Self::Verdict],
            Self::Verdict => &[Self::Finished, Self::AwaitingVerdict],
            Self::Finished => &[],
        }
    }

    /// Whether `to` is a legal successor of this phase.
    pub fn can_transition_to(self, to: DebatePhase) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AwaitingInput => "awaiting_input",
            Self::Running => "running",
            Self::AwaitingVerdict => "awaiting_verdict",
            Self::Verdict => "verdict",
            Self::Finished => "finished",
        };
        write!(f, "{}", name)
    }
}
