//! # Strategy Generator
//!
//! The production [`Generator`]: renders the strategy prompt from the answers and
//! sends it to the configured LLM agent.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::config::GeneratorConfig;
use crate::domain::traits::{GenerationError, Generator, LlmProvider};
use crate::domain::types::{Answers, RefinementTone};
use crate::infrastructure::llm::Context;
use crate::strings::prompts;

pub struct StrategyGenerator<P: LlmProvider + ?Sized> {
    llm: Arc<P>,
    agent: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl<P: LlmProvider + ?Sized> StrategyGenerator<P> {
    pub fn new(llm: Arc<P>, agent: impl Into<String>, config: &GeneratorConfig) -> Self {
        Self {
            llm,
            agent: agent.into(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    fn build_context(&self, answers: &Answers, tone: Option<RefinementTone>) -> Context {
        Context::new()
            .add_system_message(prompts::system_prompt())
            .add_user_message(prompts::strategy_prompt(answers, tone))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

#[async_trait]
impl<P: LlmProvider + ?Sized> Generator for StrategyGenerator<P> {
    async fn generate(
        &self,
        answers: &Answers,
        tone: Option<RefinementTone>,
    ) -> Result<String, GenerationError> {
        let context = self.build_context(answers, tone);

        let response = self
            .llm
            .chat(&self.agent, context)
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))?;

        if response.content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        tracing::debug!(
            "Agent '{}' answered with model {} ({} prompt + {} completion = {} tokens)",
            self.agent,
            response.model,
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::{Error, MessageRole, Response, TokenUsage};
    use std::sync::Mutex;

    struct ScriptedLlm {
        reply: Result<String, String>,
        seen: Mutex<Vec<(String, Context)>>,
    }

    impl ScriptedLlm {
        fn new(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        async fn chat(&self, agent_name: &str, context: Context) -> Result<Response, Error> {
            self.seen
                .lock()
                .unwrap()
                .push((agent_name.to_string(), context));
            match &self.reply {
                Ok(content) => Ok(Response {
                    content: content.clone(),
                    model: "stub".to_string(),
                    usage: TokenUsage::default(),
                }),
                Err(message) => Err(Error::new("stub", message.clone())),
            }
        }
    }

    fn answers() -> Answers {
        Answers {
            platform: "Reels".to_string(),
            topic: "fitness".to_string(),
            audience: "Beginners".to_string(),
            emotion: "Excitement".to_string(),
            style: "Story".to_string(),
            benefit: "secret trick".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sends_system_and_user_prompt() {
        let llm = ScriptedLlm::new(Ok("A) Titles"));
        let generator = StrategyGenerator::new(llm.clone(), "gemini", &GeneratorConfig::default());

        let document = generator.generate(&answers(), None).await.unwrap();
        assert_eq!(document, "A) Titles");

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (agent, context) = &seen[0];
        assert_eq!(agent, "gemini");
        assert_eq!(context.temperature, Some(0.8));
        assert_eq!(context.messages.len(), 2);
        assert_eq!(context.messages[0].role, MessageRole::System);
        assert_eq!(context.messages[1].role, MessageRole::User);
        assert!(context.messages[1].content.contains("- Platform: Reels"));
        assert!(!context.messages[1].content.contains("Tone Requirement"));
    }

    #[tokio::test]
    async fn test_tone_reaches_prompt() {
        let llm = ScriptedLlm::new(Ok("doc"));
        let generator = StrategyGenerator::new(llm.clone(), "gemini", &GeneratorConfig::default());

        generator
            .generate(&answers(), Some(RefinementTone::Emotional))
            .await
            .unwrap();

        let seen = llm.seen.lock().unwrap();
        assert!(seen[0].1.messages[1].content.contains("more emotional."));
    }

    #[tokio::test]
    async fn test_provider_error_maps_to_generation_error() {
        let llm = ScriptedLlm::new(Err("quota exceeded"));
        let generator = StrategyGenerator::new(llm, "gemini", &GeneratorConfig::default());

        let err = generator.generate(&answers(), None).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::Provider("[stub] quota exceeded".to_string())
        );
        assert_eq!(err.user_message(), crate::strings::messages::GENERATION_FAILED);
    }

    #[tokio::test]
    async fn test_blank_response_is_an_error() {
        let llm = ScriptedLlm::new(Ok("  \n "));
        let generator = StrategyGenerator::new(llm, "gemini", &GeneratorConfig::default());

        assert_eq!(
            generator.generate(&answers(), None).await,
            Err(GenerationError::EmptyResponse)
        );
    }
}
