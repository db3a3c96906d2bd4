//! Debate presentation port
//!
//! Callbacks for progress and streamed text during a debate.
//! Implementations live in the presentation layer (console, etc.);
//! the orchestrator's correctness never depends on whether anything
//! is rendered.

use arena_domain::{DebatePhase, Role};

/// Callback surface for debate progress and streamed output
pub trait DebatePresenter: Send + Sync {
    /// Called when a persona starts generating a turn.
    fn on_turn_start(&self, _role: Role, _model: &str) {}

    /// Called for each text chunk while a turn is streaming.
    fn on_turn_chunk(&self, _role: Role, _chunk: &str) {}

    /// Called when a turn's text is fully assembled.
    fn on_turn_complete(&self, _role: Role) {}

    /// Called when the search decision emits a query.
    fn on_search_query(&self, _role: Role, _query: &str) {}

    /// Called after the search completes; `found` is false when the
    /// provider returned nothing (or failed).
    fn on_search_result(&self, _role: Role, _found: bool) {}

    /// Called on every state-machine transition.
    fn on_phase_change(&self, _phase: DebatePhase) {}
}

/// No-op presenter for tests and quiet mode
pub struct NoPresenter;

impl DebatePresenter for NoPresenter {}
