//! Configuration management for the finlit client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default Supabase URL (can be overridden at compile time via FINLIT_SUPABASE_URL).
pub const DEFAULT_SUPABASE_URL: &str = match option_env!("FINLIT_SUPABASE_URL") {
    Some(url) => url,
    None => "https://finlit.supabase.co",
};

/// Default Supabase anon key (can be overridden at compile time via FINLIT_SUPABASE_ANON_KEY).
pub const DEFAULT_SUPABASE_ANON_KEY: &str = match option_env!("FINLIT_SUPABASE_ANON_KEY") {
    Some(key) => key,
    None => "anon-key",
};

/// Default backend API URL (can be overridden at compile time via FINLIT_API_URL).
pub const DEFAULT_API_URL: &str = match option_env!("FINLIT_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Supabase project URL.
    #[serde(default = "default_supabase_url")]
    pub supabase_url: String,
    /// Supabase anon API key (public, safe to expose).
    #[serde(default = "default_supabase_anon_key")]
    pub supabase_anon_key: String,
    /// Backend REST API URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_supabase_url() -> String {
    DEFAULT_SUPABASE_URL.to_string()
}

fn default_supabase_anon_key() -> String {
    DEFAULT_SUPABASE_ANON_KEY.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            supabase_url: DEFAULT_SUPABASE_URL.to_string(),
            supabase_anon_key: DEFAULT_SUPABASE_ANON_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file, falling back to defaults.
    ///
    /// Environment variables override whatever was read from disk.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let config_path = paths.config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var("FINLIT_LOG_LEVEL") {
            self.log_level = log_level;
        }
        if let Ok(url) = std::env::var("FINLIT_SUPABASE_URL") {
            self.supabase_url = url;
        }
        if let Ok(key) = std::env::var("FINLIT_SUPABASE_ANON_KEY") {
            self.supabase_anon_key = key;
        }
        if let Ok(url) = std::env::var("FINLIT_API_URL") {
            self.api_url = url;
        }
    }

    /// Validate that the configured endpoints are well-formed URLs.
    pub fn validate(&self) -> CoreResult<()> {
        Url::parse(&self.supabase_url)?;
        Url::parse(&self.api_url)?;
        if self.supabase_anon_key.is_empty() {
            return Err(CoreError::Config("Supabase anon key is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.supabase_url, DEFAULT_SUPABASE_URL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("finlit"));
        let config = Config::load(&paths).unwrap();
        assert_eq!(config.supabase_url, DEFAULT_SUPABASE_URL);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("finlit"));

        let mut config = Config::default();
        config.log_level = "debug".to_string();
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"log_level":"trace"}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.supabase_url, DEFAULT_SUPABASE_URL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = Config::default();
        config.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_anon_key() {
        let mut config = Config::default();
        config.supabase_anon_key = String::new();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
