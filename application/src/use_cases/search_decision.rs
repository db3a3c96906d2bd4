//! Search decision agent
//!
//! Asks a model whether the next persona needs external evidence and,
//! if so, what to search for. Availability of evidence is best-effort:
//! any failure of the classification call is an implicit `Pass`.

use crate::ports::persona_client::PersonaClient;
use arena_domain::{parse_search_directive, tail_chars, PersonaPrompt, Role};
use std::sync::Arc;
use tracing::debug;

/// Only the tail of the context is sent to the decision call.
/// A cost/latency bound, not a correctness requirement.
pub const DECISION_CONTEXT_CHARS: usize = 500;

/// Outcome of a search decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDecision {
    /// Search the web with this query before generating the turn.
    Search(String),
    /// Generate from the persona's own reasoning.
    Pass,
}

/// Classifies "needs external evidence" vs "pass" for the next turn.
///
/// Prefers `primary` and falls back to `fallback` when the preferred
/// backend is not configured. With neither available, every decision
/// is a `Pass`.
pub struct SearchDecisionAgent {
    primary: Option<Arc<dyn PersonaClient>>,
    fallback: Option<Arc<dyn PersonaClient>>,
}

impl SearchDecisionAgent {
    pub fn new(
        primary: Option<Arc<dyn PersonaClient>>,
        fallback: Option<Arc<dyn PersonaClient>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Agent that never searches (for tests and `--no-search`).
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    pub async fn decide(&self, persona: Role, recent_context: &str) -> SearchDecision {
        let Some(client) = self.primary.as_ref().or(self.fallback.as_ref()) else {
            return SearchDecision::Pass;
        };

        let context = tail_chars(recent_context, DECISION_CONTEXT_CHARS);
        let prompt = PersonaPrompt::search_decision(persona, context);

        match client.generate(&prompt, &[]).await {
            Ok(response) => match parse_search_directive(&response) {
                Some(query) => SearchDecision::Search(query),
                None => SearchDecision::Pass,
            },
            Err(e) => {
                debug!("Search decision call failed, passing: {}", e);
                SearchDecision::Pass
            }
        }
    }
}
