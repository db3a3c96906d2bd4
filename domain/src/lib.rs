//! Domain layer for debate-arena
//!
//! This crate contains the core entities and pure debate logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! A debate is a turn-taking exchange between two personas over a user
//! question:
//!
//! - **Strategist**: opens with a plan and counter-attacks criticism
//! - **Critic**: audits the plan and defends a cautious alternative
//! - **Judge**: speaks exactly once, anchoring the verdict to the
//!   user's original question
//!
//! The [`DebateSession`] entity owns the transcript and enforces the
//! turn-taking invariants; everything else here is deterministic
//! construction (prompts, history views, exports) or pure text
//! classification (concession phrases, search directives, language).

pub mod chat;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod transcript;
pub mod util;

// Re-export commonly used types
pub use chat::{
    entities::{ChatRole, Message},
    stream::StreamEvent,
};
pub use core::{
    error::DomainError,
    language::{detect_language, Language},
};
pub use debate::{
    concession::ConcessionPhrases,
    directive::{parse_search_directive, SEARCH_MARKER},
    phase::DebatePhase,
    role::{strip_attribution, Role},
    session::{DebateSession, DebateSettings},
    turn::Turn,
};
pub use prompt::{
    history::{build_history, REQUEST_MARKER},
    persona::PersonaPrompt,
};
pub use transcript::export::{parse_transcript, render_transcript, ExportBlock};
pub use util::{head_chars, tail_chars};
