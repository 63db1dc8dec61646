//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the generator, the LLM agents it can talk to, and logging.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::paths;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default = "default_agents")]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            agents: default_agents(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Settings for the strategy generator.
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Key into `agents`
    #[serde(default = "default_agent_name")]
    pub agent: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            agent: default_agent_name(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

fn default_agent_name() -> String {
    "gemini".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

pub type AgentsConfig = HashMap<String, AgentConfig>;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>, // e.g. "API_KEY"
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn default_agents() -> AgentsConfig {
    let mut agents = HashMap::new();
    agents.insert(
        default_agent_name(),
        AgentConfig {
            provider: "gemini".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: Some("API_KEY".to_string()),
            timeout: Some(120),
            ..Default::default()
        },
    );
    agents
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: default_filter(),
        }
    }
}

fn default_log_file() -> Option<String> {
    Some(paths::SESSION_LOG.to_string())
}

fn default_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the first of `data/config.yaml` and the
    /// per-user config file that exists is used; if neither does, built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in paths::config_candidates() {
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Resolves the configured agent, honoring a command-line override.
    pub fn agent_name<'a>(&'a self, overridden: Option<&'a str>) -> &'a str {
        overridden.unwrap_or(&self.generator.agent)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.file.as_ref().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_builtin_agent() {
        let config = AppConfig::default();
        assert_eq!(config.generator.agent, "gemini");
        assert_eq!(config.generator.temperature, 0.8);

        let agent = config.agents.get("gemini").unwrap();
        assert_eq!(agent.provider, "gemini");
        assert_eq!(agent.model, "gemini-3-flash-preview");
        assert_eq!(agent.api_key_env.as_deref(), Some("API_KEY"));
    }

    #[test]
    fn test_default_logging() {
        let logging = AppConfig::default().logging;
        assert_eq!(logging.filter, "info");
        assert_eq!(logging.file.as_deref(), Some("data/session.log"));

        let config = AppConfig::from_yaml("logging:\n  file: other.log\n").unwrap();
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "generator:\n  agent: groq\n  temperature: 0.5\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.generator.agent, "groq");
        assert_eq!(config.generator.temperature, 0.5);
        // Agents section omitted entirely: built-in gemini agent remains
        assert!(config.agents.contains_key("gemini"));
        assert_eq!(config.logging.file.as_deref(), Some(paths::SESSION_LOG));
    }

    #[test]
    fn test_agents_from_yaml() {
        let yaml = r#"
generator:
  agent: fast
agents:
  fast:
    provider: groq
    model: llama-3.3-70b-versatile
    api_key_env: GROQ_API_KEY
    timeout: 30
logging:
  file: null
  filter: debug
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        let agent = config.agents.get("fast").unwrap();
        assert_eq!(agent.provider, "groq");
        assert_eq!(agent.timeout, Some(30));
        assert!(config.logging.file.is_none());
        assert_eq!(config.logging.filter, "debug");
        assert!(config.log_path().is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "generator:\n  temperature: 0.2").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.generator.temperature, 0.2);
        assert_eq!(config.generator.agent, "gemini");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(AppConfig::from_yaml("generator: [not, a, map]").is_err());
    }

    #[test]
    fn test_agent_override() {
        let config = AppConfig::default();
        assert_eq!(config.agent_name(None), "gemini");
        assert_eq!(config.agent_name(Some("other")), "other");
    }
}
