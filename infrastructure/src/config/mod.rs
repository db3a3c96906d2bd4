//! Configuration: TOML file schema, multi-source loading, validation.

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigError, DebateConfig, ExportConfig, FileConfig, ModelsConfig, SearchConfig,
};
pub use loader::ConfigLoader;
