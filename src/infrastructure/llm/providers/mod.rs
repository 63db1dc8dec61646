//! # LLM Providers
//!
//! - Gemini (`generateContent` with a system instruction)
//! - OpenAI-compatible chat completions (OpenAI, Groq, xAI)

mod gemini;
mod openai;

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::StatusCode;

use crate::domain::config::AgentConfig;
use crate::infrastructure::llm::{Context, Error, Provider, Response};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for a provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// Base URL (for non-default endpoints)
    pub base_url: Option<String>,
    /// Default model
    pub default_model: String,
    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl ProviderConfig {
    pub fn from_agent_config(config: &AgentConfig) -> Result<Self, Error> {
        let api_key = if let Some(key) = &config.api_key {
            key.clone()
        } else if let Some(env_var) = &config.api_key_env {
            std::env::var(env_var).map_err(|e| {
                Error::new(
                    &config.provider,
                    format!("API key env var {} not set: {}", env_var, e),
                )
            })?
        } else {
            return Err(Error::new(
                &config.provider,
                "No API key provided - set api_key or api_key_env",
            ));
        };

        Ok(Self {
            api_key,
            base_url: config.endpoint.clone(),
            default_model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    /// The configured model, or the provider's fallback when none is set.
    fn model_or(&self, fallback: &str) -> String {
        if self.default_model.is_empty() {
            fallback.to_string()
        } else {
            self.default_model.clone()
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

// Keeps the API key out of logs and panic messages.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client reused across requests
fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default()
    })
}

/// Builds an error from a non-success response, preferring the API's own
/// `error.message` field when the body is JSON.
fn error_from_body(provider: &str, status: StatusCode, body: &str) -> Error {
    let api_message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match api_message {
        Some(message) => Error::new(provider, format!("HTTP {}: {}", status, message)),
        None => Error::new(provider, format!("HTTP {}: {}", status, body)),
    }
}

/// Execute a chat request with the specified provider
pub async fn chat(
    provider: Provider,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    match provider {
        Provider::Gemini => gemini::chat(config, context).await,
        Provider::OpenAI => openai::chat("openai", config, context).await,
        Provider::Groq => {
            // Groq uses OpenAI-compatible API
            let config = ProviderConfig {
                base_url: Some(
                    config
                        .base_url
                        .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
                ),
                ..config
            };
            openai::chat("groq", config, context).await
        }
        Provider::XAI => {
            // xAI uses OpenAI-compatible API
            let config = ProviderConfig {
                base_url: Some(
                    config
                        .base_url
                        .unwrap_or_else(|| "https://api.x.ai/v1".to_string()),
                ),
                ..config
            };
            openai::chat("xai", config, context).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: "k".to_string(),
            base_url: None,
            default_model: model.to_string(),
            timeout: None,
        }
    }

    #[test]
    fn test_model_precedence() {
        assert_eq!(config("").model_or("fallback"), "fallback");
        assert_eq!(config("configured").model_or("fallback"), "configured");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ProviderConfig {
            api_key: "sk-secret-123".to_string(),
            ..config("gpt-4o-mini")
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret-123"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("gpt-4o-mini"));
    }

    #[test]
    fn test_timeout_default() {
        assert_eq!(config("").request_timeout(), Duration::from_secs(120));
        let custom = ProviderConfig {
            timeout: Some(5),
            ..config("")
        };
        assert_eq!(custom.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_error_from_json_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        let err = error_from_body("gemini", StatusCode::BAD_REQUEST, body);
        assert_eq!(err.provider, "gemini");
        assert!(err.message.contains("API key not valid"));
        assert!(err.message.starts_with("HTTP 400"));
    }

    #[test]
    fn test_error_from_plain_body() {
        let err = error_from_body("openai", StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.message, "HTTP 502 Bad Gateway: upstream down");
    }
}
