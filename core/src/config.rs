//! Engine configuration
//!
//! File-based configuration with environment variable overrides. The config
//! file is TOML, looked up under the user config directory by default;
//! everything has a built-in default so no file is required.
//!
//! Environment overrides:
//! - `SMART_ENGINE_ENDPOINT` — analysis endpoint URL
//! - `SMART_ENGINE_TIMEOUT_SECONDS` — transport timeout
//! - `SMART_ENGINE_USE_FALLBACK_CONTENT` — "true"/"false", failure behavior

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Full URL of the analysis endpoint
    pub endpoint: String,
    /// Transport timeout in seconds
    pub timeout_seconds: u64,
    /// On failure, show the fixed fallback analysis (true) or nothing (false)
    pub use_fallback_content: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/api/analyze".to_string(),
            timeout_seconds: 30,
            use_fallback_content: true,
        }
    }
}

impl EngineConfig {
    /// Default config file path (`<config_dir>/smart-engine/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smart-engine").join("config.toml"))
    }

    /// Load configuration
    ///
    /// Reads the given file (or the default path) when it exists, then
    /// applies environment overrides. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(ref path) if path.exists() => {
                debug!("loading config from {}", path.display());
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `SMART_ENGINE_*` environment overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("SMART_ENGINE_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("SMART_ENGINE_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(secs) => self.timeout_seconds = secs,
                Err(_) => warn!("ignoring invalid SMART_ENGINE_TIMEOUT_SECONDS: {}", timeout),
            }
        }
        if let Ok(flag) = std::env::var("SMART_ENGINE_USE_FALLBACK_CONTENT") {
            match flag.parse() {
                Ok(value) => self.use_fallback_content = value,
                Err(_) => warn!(
                    "ignoring invalid SMART_ENGINE_USE_FALLBACK_CONTENT: {}",
                    flag
                ),
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/api/analyze");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.use_fallback_content);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.endpoint, EngineConfig::default().endpoint);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = EngineConfig {
            endpoint: "http://example.com/api/analyze".to_string(),
            timeout_seconds: 5,
            use_fallback_content: false,
        };
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.endpoint, "http://example.com/api/analyze");
        assert_eq!(loaded.timeout_seconds, 5);
        assert!(!loaded.use_fallback_content);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_seconds = 10\n").unwrap();

        let loaded = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.timeout_seconds, 10);
        assert_eq!(loaded.endpoint, EngineConfig::default().endpoint);
        assert!(loaded.use_fallback_content);
    }
}
