//! Infrastructure layer for debate-arena
//!
//! External adapters: model provider clients, web search, file text
//! extraction, configuration loading, and transcript persistence.

pub mod config;
pub mod extract;
pub mod logging;
pub mod providers;
pub mod search;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use extract::FileTextExtractor;
pub use logging::FileTranscriptWriter;
pub use providers::{
    create_client, AnthropicClient, GeminiClient, ModelSpec, OpenAiClient, ProviderKind,
    SpecError,
};
pub use search::DuckDuckGoSearch;
