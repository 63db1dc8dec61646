//! # Domain Traits
//!
//! Abstract interfaces for the wizard's collaborators (LLM, Generator).
//! Allows for pluggable implementations in the Infrastructure layer and stubs in tests.

use async_trait::async_trait;

use crate::domain::types::{Answers, RefinementTone};
use crate::infrastructure::llm::{Context, Error, Response};

/// Abstract interface for an LLM Provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a full chat context to the named agent
    async fn chat(&self, agent_name: &str, context: Context) -> Result<Response, Error>;
}

/// Failure reported by a [`Generator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl GenerationError {
    /// The message shown to the user. Provider detail goes to the log only.
    pub fn user_message(&self) -> &'static str {
        crate::strings::messages::GENERATION_FAILED
    }
}

/// Turns collected answers (plus an optional tone) into a strategy document.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        answers: &Answers,
        tone: Option<RefinementTone>,
    ) -> Result<String, GenerationError>;
}
