//! OpenAI-compatible API provider
//!
//! Supports OpenAI, Groq, xAI and other OpenAI-compatible APIs

use serde::{Deserialize, Serialize};

use super::{ProviderConfig, error_from_body, http_client};
use crate::infrastructure::llm::{Context, Error, Response, TokenUsage};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI API request format
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn build_request(model: String, context: Context) -> OpenAIRequest {
    OpenAIRequest {
        model,
        messages: context
            .messages
            .into_iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.as_str(),
                content: msg.content,
            })
            .collect(),
        temperature: context.temperature,
        max_tokens: context.max_tokens,
    }
}

/// Execute a chat request using an OpenAI-compatible API
pub async fn chat(
    provider: &str,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let model = config.model_or(DEFAULT_MODEL);
    let url = format!("{}/chat/completions", base_url);

    let request = build_request(model.clone(), context);

    let response = http_client()
        .post(&url)
        .bearer_auth(&config.api_key)
        .timeout(config.request_timeout())
        .json(&request)
        .send()
        .await
        .map_err(|e| Error::new(provider, format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(error_from_body(provider, status, &body));
    }

    let openai_response: OpenAIResponse = response
        .json()
        .await
        .map_err(|e| Error::new(provider, format!("Failed to parse response: {}", e)))?;

    let content = openai_response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| Error::new(provider, "No choices in response"))?;

    let usage = openai_response.usage.unwrap_or_default();

    Ok(Response {
        content,
        model: if openai_response.model.is_empty() {
            model
        } else {
            openai_response.model
        },
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
    })
}
