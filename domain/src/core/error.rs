//! Domain error types

use crate::debate::phase::DebatePhase;
use crate::debate::role::Role;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Empty submission")]
    EmptySubmission,

    #[error("Turn cap reached ({0} debater turns)")]
    TurnCapReached(u32),

    #[error("Out-of-order turn: expected {expected}, got {actual}")]
    OutOfOrderTurn { expected: Role, actual: Role },

    #[error("A verdict has already been recorded")]
    VerdictAlreadyRecorded,

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        from: DebatePhase,
        to: DebatePhase,
    },

    #[error("Operation not allowed in phase {0}")]
    WrongPhase(DebatePhase),
}
