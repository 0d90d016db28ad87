//! LogManager configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::message::DEFAULT_MESSAGE_SIZE_LIMIT;

/// LogManager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rendered messages longer than this many characters are compacted
    #[serde(default = "default_message_size_limit")]
    pub message_size_limit: usize,

    /// Monitoring agent configuration
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Which agent notifier to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// "none" discards notices, "log" writes them to the `agent` log target
    pub provider: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: "none".to_string(),
        }
    }
}

fn default_message_size_limit() -> usize {
    DEFAULT_MESSAGE_SIZE_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_size_limit: default_message_size_limit(),
            agent: AgentConfig::default(),
        }
    }
}

/// Caller-supplied overrides; unset fields keep the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub message_size_limit: Option<usize>,
    pub agent_provider: Option<String>,
}

impl ConfigOverrides {
    pub fn message_size_limit(mut self, limit: usize) -> Self {
        self.message_size_limit = Some(limit);
        self
    }

    pub fn agent_provider(mut self, provider: impl Into<String>) -> Self {
        self.agent_provider = Some(provider.into());
        self
    }
}

impl Config {
    /// Apply overrides on top of this config
    pub fn merge(mut self, overrides: &ConfigOverrides) -> Self {
        debug!(?overrides, "Config::merge: called");
        if let Some(limit) = overrides.message_size_limit {
            self.message_size_limit = limit;
        }
        if let Some(provider) = &overrides.agent_provider {
            self.agent.provider = provider.clone();
        }
        self
    }

    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(?config_path, "Config::load: explicit path");
            return Self::load_from_file(config_path)
                .context(format!("Failed to load config from {}", config_path.display()));
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("logmanager").join("config.yml")),
            Some(PathBuf::from("logmanager.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                debug!(?path, "Config::load: found config");
                return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
