//! Configuration file loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ARENA_`-prefixed environment variables
    ///    (nested keys use `__`, e.g. `ARENA_DEBATE__MAX_TURNS=6`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./arena.toml` or `./.arena.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/debate-arena/config.toml`
    /// 5. Fallback: `~/.config/debate-arena/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["arena.toml", ".arena.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("ARENA_").split("__"))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/debate-arena/config.toml if set,
    /// otherwise falls back to ~/.config/debate-arena/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("debate-arena").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["arena.toml", ".arena.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.debate.max_turns, 10);
        assert!(config.search.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("debate-arena"));
    }

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.toml");
        std::fs::write(
            &path,
            "[debate]\nmax_turns = 4\n\n[search]\nenabled = false\n",
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.debate.max_turns, 4);
        assert!(!config.search.enabled);
        // Untouched sections keep defaults
        assert_eq!(config.debate.min_turns_before_concession, 3);
    }

    #[test]
    fn test_env_vars_override_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("arena.toml", "[debate]\nmax_turns = 4\n")?;
            jail.set_env("ARENA_DEBATE__MAX_TURNS", "7");
            jail.set_env("ARENA_SEARCH__ENABLED", "false");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.debate.max_turns, 7);
            assert!(!config.search.enabled);
            Ok(())
        });
    }
}
