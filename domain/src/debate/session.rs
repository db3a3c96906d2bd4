//! Debate session entity.
//!
//! [`DebateSession`] owns the transcript and enforces every structural
//! invariant of a debate: the transcript starts with a user turn,
//! debater turns strictly alternate starting with the strategist, the
//! turn cap is never exceeded, and exactly one judge turn ends a
//! finished debate. It is exclusively owned by the orchestrator; other
//! components only ever receive views of it.

use super::concession::ConcessionPhrases;
use super::phase::DebatePhase;
use super::role::Role;
use super::turn::Turn;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Termination and concession rules for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateSettings {
    /// Cap on strategist/critic turns (user and judge turns don't count).
    pub max_turns: u32,
    /// A concession is ignored before this many debater turns.
    pub min_turns_before_concession: u32,
    /// Phrases that signal a voluntary concession by the critic.
    pub concession_phrases: ConcessionPhrases,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            max_turns: 10,
            min_turns_before_concession: 3,
            concession_phrases: ConcessionPhrases::default_set(),
        }
    }
}

/// A single in-memory debate session.
#[derive(Debug, Clone)]
pub struct DebateSession {
    transcript: Vec<Turn>,
    turn_count: u32,
    phase: DebatePhase,
    settings: DebateSettings,
}

impl DebateSession {
    pub fn new(settings: DebateSettings) -> Self {
        Self {
            transcript: Vec::new(),
            turn_count: 0,
            phase: DebatePhase::AwaitingInput,
            settings,
        }
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn settings(&self) -> &DebateSettings {
        &self.settings
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.transcript.last()
    }

    /// The first user turn, i.e. the question the verdict must answer.
    pub fn original_question(&self) -> Option<&str> {
        self.transcript
            .iter()
            .find(|t| t.speaker == Role::User)
            .map(|t| t.content.as_str())
    }

    /// The debating persona that speaks next.
    pub fn next_speaker(&self) -> Role {
        match self.transcript.last() {
            Some(turn) => Role::next_speaker(turn.speaker),
            None => Role::Strategist,
        }
    }

    /// Whether no further debater turn may be appended.
    pub fn at_turn_cap(&self) -> bool {
        self.turn_count >= self.settings.max_turns
    }

    /// Whether the critic's latest turn is a concession that counts.
    ///
    /// Requires the last turn to be the critic's, a recognized phrase in
    /// its content, and the turn count to have reached the floor.
    pub fn critic_conceded(&self) -> bool {
        match self.transcript.last() {
            Some(turn) if turn.speaker == Role::Critic => {
                self.turn_count >= self.settings.min_turns_before_concession
                    && self.settings.concession_phrases.detect(&turn.content)
            }
            _ => false,
        }
    }

    /// Append a user turn.
    ///
    /// Starts the debate when the session is fresh. A mid-debate user
    /// turn redirects the discussion; the turn count only resets when
    /// this is the very first turn of the transcript (the original
    /// arena's literal behavior).
    pub fn push_user(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptySubmission);
        }
        match self.phase {
            DebatePhase::AwaitingInput | DebatePhase::Running => {}
            other => return Err(DomainError::WrongPhase(other)),
        }

        if self.transcript.is_empty() {
            self.turn_count = 0;
        }
        self.transcript.push(Turn::user(content));
        self.phase = DebatePhase::Running;
        Ok(())
    }

    /// Append a strategist or critic turn and count it.
    pub fn push_debater(&mut self, speaker: Role, content: impl Into<String>) -> Result<(), DomainError> {
        if self.phase != DebatePhase::Running {
            return Err(DomainError::WrongPhase(self.phase));
        }
        let expected = self.next_speaker();
        if !speaker.is_debater() || speaker != expected {
            return Err(DomainError::OutOfOrderTurn {
                expected,
                actual: speaker,
            });
        }
        if self.at_turn_cap() {
            return Err(DomainError::TurnCapReached(self.settings.max_turns));
        }

        self.transcript.push(Turn::new(speaker, content));
        self.turn_count += 1;
        Ok(())
    }

    /// End the exchange phase (turn cap, concession, or manual stop).
    pub fn request_verdict(&mut self) -> Result<(), DomainError> {
        self.transition(DebatePhase::AwaitingVerdict)
    }

    /// Mark the judge call as in flight.
    pub fn begin_verdict(&mut self) -> Result<(), DomainError> {
        self.transition(DebatePhase::Verdict)
    }

    /// Return to the retryable state after a failed judge call.
    ///
    /// The transcript is untouched: no partial judge turn is recorded.
    pub fn verdict_failed(&mut self) -> Result<(), DomainError> {
        self.transition(DebatePhase::AwaitingVerdict)
    }

    /// Record the judge's verdict and finish the debate.
    pub fn record_verdict(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        if self.phase != DebatePhase::Verdict {
            return Err(DomainError::WrongPhase(self.phase));
        }
        if self.transcript.iter().any(|t| t.speaker == Role::Judge) {
            return Err(DomainError::VerdictAlreadyRecorded);
        }
        self.transcript.push(Turn::judge(content));
        self.transition(DebatePhase::Finished)
    }

    /// Judge context: `[Label] : content` lines over the debate turns,
    /// in transcript order. Judge turns are excluded by construction.
    pub fn judge_context(&self) -> String {
        let mut context = String::new();
        for turn in &self.transcript {
            if matches!(turn.speaker, Role::User | Role::Strategist | Role::Critic) {
                context.push_str(&format!("[{}] : {}\n", turn.speaker.label(), turn.content));
            }
        }
        context
    }

    /// Pair the i-th strategist turn with the i-th critic turn.
    pub fn rounds(&self) -> Vec<(&str, &str)> {
        let strategist: Vec<&str> = self.contents_of(Role::Strategist);
        let critic: Vec<&str> = self.contents_of(Role::Critic);
        strategist.into_iter().zip(critic).collect()
    }

    fn contents_of(&self, role: Role) -> Vec<&str> {
        self.transcript
            .iter()
            .filter(|t| t.speaker == role)
            .map(|t| t.content.as_str())
            .collect()
    }

    fn transition(&mut self, to: DebatePhase) -> Result<(), DomainError> {
        if !self.phase.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}

impl Default for DebateSession {
    fn default() -> Self {
        Self::new(DebateSettings::default())
    }
}
