//! Concession phrase detection.
//!
//! A critic turn containing one of a configured set of phrases signals
//! voluntary termination of the debate. Detection is a pure substring
//! check so it can be verified independently of the orchestrator; the
//! minimum-turn floor before a concession is honored lives in
//! [`DebateSettings`](super::session::DebateSettings), not here.

use serde::{Deserialize, Serialize};

/// The recognized set of concession phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcessionPhrases {
    phrases: Vec<String>,
}

impl ConcessionPhrases {
    pub fn new(phrases: Vec<String>) -> Self {
        Self { phrases }
    }

    /// The built-in phrase set (Korean surrender formulas).
    pub fn default_set() -> Self {
        Self::new(vec![
            "패배를 인정".to_string(),
            "네 말이 맞다".to_string(),
            "전적으로 동의".to_string(),
        ])
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Whether `text` contains any recognized concession phrase.
    pub fn detect(&self, text: &str) -> bool {
        self.phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

impl Default for ConcessionPhrases {
    fn default() -> Self {
        Self::default_set()
    }
}
