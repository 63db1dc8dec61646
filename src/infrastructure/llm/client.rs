//! # LLM Client
//!
//! Provides the `Client` struct, the entry point for LLM interactions.
//! It routes requests to the appropriate provider based on the agent configuration.

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::llm::providers::{self, ProviderConfig};
use crate::infrastructure::llm::{Context, Error, Provider, Response};

/// Simple LLM client
pub struct Client {
    app_config: AppConfig,
}

impl Client {
    /// Create a new client from application configuration
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }

    /// Resolve an agent name to its provider and provider config
    ///
    /// # Arguments
    /// * `agent_name` - The agent name (e.g., "gemini", "fast-groq")
    pub fn resolve(&self, agent_name: &str) -> Result<(Provider, ProviderConfig), Error> {
        let agent_config = self
            .app_config
            .agents
            .get(agent_name)
            .ok_or_else(|| Error::new(agent_name, "Agent not found"))?;

        let provider = Provider::parse(&agent_config.provider)
            .ok_or_else(|| Error::new(&agent_config.provider, "Unknown provider"))?;

        let provider_config = ProviderConfig::from_agent_config(agent_config)?;
        Ok((provider, provider_config))
    }
}

#[async_trait]
impl LlmProvider for Client {
    async fn chat(&self, agent_name: &str, context: Context) -> Result<Response, Error> {
        let (provider, provider_config) = self.resolve(agent_name)?;
        tracing::debug!(
            "Dispatching chat to agent '{}' via {}",
            agent_name,
            provider.as_str()
        );
        providers::chat(provider, provider_config, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AgentConfig;

    fn config_with(name: &str, agent: AgentConfig) -> AppConfig {
        let mut config = AppConfig::default();
        config.agents.insert(name.to_string(), agent);
        config
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("Google"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("openai"), Some(Provider::OpenAI));
        assert_eq!(Provider::parse("groq"), Some(Provider::Groq));
        assert_eq!(Provider::parse("grok"), Some(Provider::XAI));
        assert_eq!(Provider::parse("unknown"), None);
    }

    #[test]
    fn test_resolve_inline_key() {
        let client = Client::new(config_with(
            "inline",
            AgentConfig {
                provider: "openai".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: Some("sk-test".to_string()),
                ..Default::default()
            },
        ));

        let (provider, config) = client.resolve("inline").unwrap();
        assert_eq!(provider, Provider::OpenAI);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.default_model, "gpt-4o-mini");
    }

    #[test]
    fn test_resolve_unknown_agent() {
        let client = Client::new(AppConfig::default());
        let err = client.resolve("missing").unwrap_err();
        assert_eq!(err.provider, "missing");
        assert_eq!(err.to_string(), "[missing] Agent not found");
    }

    #[test]
    fn test_resolve_unknown_provider() {
        let client = Client::new(config_with(
            "odd",
            AgentConfig {
                provider: "carrier-pigeon".to_string(),
                api_key: Some("k".to_string()),
                ..Default::default()
            },
        ));
        assert!(client.resolve("odd").is_err());
    }

    #[test]
    fn test_resolve_missing_key() {
        let client = Client::new(config_with(
            "nokey",
            AgentConfig {
                provider: "gemini".to_string(),
                ..Default::default()
            },
        ));
        let err = client.resolve("nokey").unwrap_err();
        assert!(err.message.contains("No API key"));
    }
}
