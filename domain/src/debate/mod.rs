//! Debate entities and turn-taking rules

pub mod concession;
pub mod directive;
pub mod phase;
pub mod role;
pub mod session;
pub mod turn;
