//! TOML configuration schema.
//!
//! # Example
//!
//! ```toml
//! [debate]
//! max_turns = 10
//! min_turns_before_concession = 3
//!
//! [models]
//! strategist = "openai:gpt-4o"
//! critic = "gemini:gemini-2.0-flash"
//! judge = "anthropic:claude-sonnet-4-5"
//!
//! [search]
//! enabled = true
//! max_results = 3
//!
//! [timeouts]
//! generation_secs = 120
//! search_secs = 30
//!
//! [export]
//! dir = "exports"
//! ```

use crate::providers::{ModelSpec, ProviderKind, SpecError};
use arena_domain::{ConcessionPhrases, DebateSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors from validating a loaded configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("models.{field}: {source}")]
    InvalidModelSpec { field: &'static str, source: SpecError },

    #[error("Missing API key for {provider}: set {env}")]
    MissingApiKey { provider: &'static str, env: &'static str },

    #[error("debate.max_turns must be at least 1")]
    ZeroTurnCap,

    #[error("Could not load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Turn-taking limits (`[debate]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateConfig {
    pub max_turns: u32,
    pub min_turns_before_concession: u32,
    /// Override the built-in concession phrase set.
    pub concession_phrases: Option<Vec<String>>,
}

impl Default for DebateConfig {
    fn default() -> Self {
        let defaults = DebateSettings::default();
        Self {
            max_turns: defaults.max_turns,
            min_turns_before_concession: defaults.min_turns_before_concession,
            concession_phrases: None,
        }
    }
}

/// Persona backend bindings (`[models]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub strategist: String,
    pub critic: String,
    pub judge: String,
    /// Backend for the search decision call; defaults to the judge's.
    pub search_decision: Option<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            strategist: "openai:gpt-4o".to_string(),
            critic: "gemini:gemini-2.0-flash".to_string(),
            judge: "anthropic:claude-sonnet-4-5".to_string(),
            search_decision: None,
        }
    }
}

/// Web search augmentation (`[search]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub enabled: bool,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: 3,
        }
    }
}

/// Network timeouts in seconds (`[timeouts]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    /// Per-request limit for persona generation calls.
    pub generation_secs: u64,
    /// Per-request limit for evidence searches.
    pub search_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            generation_secs: 120,
            search_secs: 30,
        }
    }
}

impl TimeoutsConfig {
    pub fn generation(&self) -> Duration {
        Duration::from_secs(self.generation_secs)
    }

    pub fn search(&self) -> Duration {
        Duration::from_secs(self.search_secs)
    }
}

/// Transcript export destination (`[export]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: "exports".to_string(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub debate: DebateConfig,
    pub models: ModelsConfig,
    pub search: SearchConfig,
    pub timeouts: TimeoutsConfig,
    pub export: ExportConfig,
}

/// Parsed and validated persona bindings.
#[derive(Debug, Clone)]
pub struct ResolvedModels {
    pub strategist: ModelSpec,
    pub critic: ModelSpec,
    pub judge: ModelSpec,
    /// Backend for the search decision call. The judge's unless
    /// overridden in `[models]`.
    pub search_decision: ModelSpec,
}

impl ResolvedModels {
    /// Every provider referenced by any persona, deduplicated.
    pub fn providers(&self) -> Vec<ProviderKind> {
        let mut providers = vec![
            self.strategist.provider,
            self.critic.provider,
            self.judge.provider,
            self.search_decision.provider,
        ];
        providers.sort_by_key(|p| p.as_str());
        providers.dedup();
        providers
    }
}

impl FileConfig {
    /// Parse the model spec strings, rejecting malformed entries.
    pub fn resolve_models(&self) -> Result<ResolvedModels, ConfigError> {
        let parse = |field: &'static str, value: &str| -> Result<ModelSpec, ConfigError> {
            value
                .parse()
                .map_err(|source| ConfigError::InvalidModelSpec { field, source })
        };

        let judge = parse("judge", &self.models.judge)?;
        let search_decision = match self.models.search_decision.as_deref() {
            Some(s) => parse("search_decision", s)?,
            None => judge.clone(),
        };

        Ok(ResolvedModels {
            strategist: parse("strategist", &self.models.strategist)?,
            critic: parse("critic", &self.models.critic)?,
            judge,
            search_decision,
        })
    }

    /// Check that every referenced provider has an API key in the
    /// environment. Must pass before a session starts; a missing key
    /// is a configuration error, never a mid-debate failure.
    pub fn resolve_api_keys(
        models: &ResolvedModels,
        env: &HashMap<String, String>,
    ) -> Result<HashMap<&'static str, String>, ConfigError> {
        let mut keys = HashMap::new();
        for provider in models.providers() {
            let var = provider.api_key_env();
            match env.get(var).filter(|v| !v.trim().is_empty()) {
                Some(key) => {
                    keys.insert(var, key.clone());
                }
                None => {
                    return Err(ConfigError::MissingApiKey {
                        provider: provider.as_str(),
                        env: var,
                    });
                }
            }
        }
        Ok(keys)
    }

    /// Build domain settings, rejecting degenerate limits.
    pub fn to_settings(&self) -> Result<DebateSettings, ConfigError> {
        if self.debate.max_turns == 0 {
            return Err(ConfigError::ZeroTurnCap);
        }

        let concession_phrases = match &self.debate.concession_phrases {
            Some(phrases) => ConcessionPhrases::new(phrases.clone()),
            None => ConcessionPhrases::default_set(),
        };

        Ok(DebateSettings {
            max_turns: self.debate.max_turns,
            min_turns_before_concession: self.debate.min_turns_before_concession,
            concession_phrases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_built_in_limits() {
        let config = FileConfig::default();
        assert_eq!(config.debate.max_turns, 10);
        assert_eq!(config.debate.min_turns_before_concession, 3);
        assert!(config.search.enabled);
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.timeouts.generation(), Duration::from_secs(120));
        assert_eq!(config.timeouts.search(), Duration::from_secs(30));
    }

    #[test]
    fn decision_backend_defaults_to_the_judges() {
        let config = FileConfig::default();
        let models = config.resolve_models().unwrap();
        assert_eq!(models.search_decision, models.judge);
    }

    #[test]
    fn decision_backend_override_is_honored() {
        let toml_str = r#"
[models]
search_decision = "openai:gpt-4o-mini"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let models = config.resolve_models().unwrap();
        assert_ne!(models.search_decision, models.judge);
        assert_eq!(models.search_decision.model, "gpt-4o-mini");
    }

    #[test]
    fn timeouts_section_overrides_defaults() {
        let toml_str = r#"
[timeouts]
generation_secs = 45
search_secs = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timeouts.generation(), Duration::from_secs(45));
        assert_eq!(config.timeouts.search(), Duration::from_secs(5));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let toml_str = r#"
[debate]
max_turns = 6

[models]
judge = "openai:gpt-4o"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.debate.max_turns, 6);
        assert_eq!(config.debate.min_turns_before_concession, 3);
        assert_eq!(config.models.judge, "openai:gpt-4o");
        assert_eq!(config.models.critic, ModelsConfig::default().critic);
    }

    #[test]
    fn malformed_model_spec_is_rejected() {
        let toml_str = r#"
[models]
critic = "not-a-spec"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let err = config.resolve_models().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidModelSpec { field: "critic", .. }
        ));
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = FileConfig::default();
        let models = config.resolve_models().unwrap();

        let env = HashMap::new();
        let err = FileConfig::resolve_api_keys(&models, &env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn all_keys_present_resolves() {
        let config = FileConfig::default();
        let models = config.resolve_models().unwrap();

        let env: HashMap<String, String> = [
            ("OPENAI_API_KEY", "sk-1"),
            ("GEMINI_API_KEY", "g-1"),
            ("ANTHROPIC_API_KEY", "a-1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let keys = FileConfig::resolve_api_keys(&models, &env).unwrap();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = FileConfig::default();
        let models = config.resolve_models().unwrap();

        let env: HashMap<String, String> = [
            ("OPENAI_API_KEY", "  "),
            ("GEMINI_API_KEY", "g-1"),
            ("ANTHROPIC_API_KEY", "a-1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert!(FileConfig::resolve_api_keys(&models, &env).is_err());
    }

    #[test]
    fn zero_turn_cap_is_rejected() {
        let config = FileConfig {
            debate: DebateConfig {
                max_turns: 0,
                ..DebateConfig::default()
            },
            ..FileConfig::default()
        };
        assert!(matches!(config.to_settings(), Err(ConfigError::ZeroTurnCap)));
    }

    #[test]
    fn custom_concession_phrases_flow_into_settings() {
        let toml_str = r#"
[debate]
concession_phrases = ["I concede", "you win"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let settings = config.to_settings().unwrap();
        assert!(settings.concession_phrases.detect("Fine, I concede."));
        assert!(!settings.concession_phrases.detect("패배를 인정"));
    }
}
