//! # Generate Command
//!
//! Answers the whole questionnaire from command-line flags and prints the strategy.
//! Drives the same controller as the console, so the same rules apply: closed-set
//! answers must name (or number) one of the options, and a failed generation is an error.

use anyhow::{Result, anyhow, bail};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::sync::Arc;

use crate::application::formatter::Strategy;
use crate::application::wizard::{Advanced, WizardController};
use crate::domain::types::{Answers, FieldId, Question, RefinementTone, WizardState};
use crate::interface::render;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled, like the interactive result screen
    #[default]
    Text,
    /// Answers plus the extracted titles, hooks and flow
    Json,
    /// The document exactly as generated
    Raw,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Video type (YouTube, Shorts, Reels, TikTok or 1-4)
    #[arg(long)]
    pub platform: String,
    /// Main topic of the video
    #[arg(long)]
    pub topic: String,
    /// Target audience (name or number)
    #[arg(long)]
    pub audience: String,
    /// Key emotion to trigger (name or number)
    #[arg(long)]
    pub emotion: String,
    /// Video style (name or number)
    #[arg(long)]
    pub style: String,
    /// One main benefit or surprise
    #[arg(long)]
    pub benefit: String,
    /// Regenerate once with this tone after the first strategy
    #[arg(long, value_enum)]
    pub tone: Option<RefinementTone>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl GenerateArgs {
    fn raw_answer(&self, field: FieldId) -> &str {
        match field {
            FieldId::Platform => &self.platform,
            FieldId::Topic => &self.topic,
            FieldId::Audience => &self.audience,
            FieldId::Emotion => &self.emotion,
            FieldId::Style => &self.style,
            FieldId::Benefit => &self.benefit,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    answers: &'a Answers,
    tone: Option<RefinementTone>,
    strategy: Strategy,
    document: &'a str,
}

pub async fn handle_generate(wizard: Arc<WizardController>, args: GenerateArgs) -> Result<()> {
    let document = produce(&wizard, &args).await?;

    match args.format {
        OutputFormat::Text => println!("{}", render::result(&document)),
        OutputFormat::Raw => println!("{}", document),
        OutputFormat::Json => {
            let answers = wizard.answers().await;
            let output = JsonOutput {
                answers: &answers,
                tone: args.tone,
                strategy: Strategy::from_document(&document),
                document: &document,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Walks the wizard to a result and returns the final document.
async fn produce(wizard: &WizardController, args: &GenerateArgs) -> Result<String> {
    wizard.start().await?;

    let mut finished = None;
    for question in wizard.questions() {
        let value = resolve_answer(question, args.raw_answer(question.field))?;
        wizard.set_answer(question.field, value).await?;

        match wizard.advance().await? {
            Advanced::Step(step) => tracing::debug!("Answered '{}', now at step {}", question.field, step),
            Advanced::Finished(state) => finished = Some(state),
        }
    }

    let mut state = finished.ok_or_else(|| anyhow!("Questionnaire ended without generating"))?;

    if let Some(tone) = args.tone {
        into_document(state).map_err(anyhow::Error::msg)?;
        state = wizard.regenerate(Some(tone)).await?;
    }

    into_document(state).map_err(anyhow::Error::msg)
}

fn resolve_answer(question: &Question, raw: &str) -> Result<String> {
    match question.options {
        Some(options) => question.match_option(raw).map(str::to_string).ok_or_else(|| {
            anyhow!(
                "Invalid --{} '{}'. Expected one of: {}",
                question.field,
                raw,
                options.join(", ")
            )
        }),
        None if raw.trim().is_empty() => bail!("--{} must not be empty", question.field),
        None => Ok(raw.trim().to_string()),
    }
}

fn into_document(state: WizardState) -> Result<String, String> {
    match state {
        WizardState::Result(document) => Ok(document),
        WizardState::Failed(message) => Err(message),
        other => Err(format!("Generation ended in unexpected state: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::wizard::tests::StubGenerator;
    use crate::domain::catalog::QUESTIONS;
    use crate::domain::traits::GenerationError;
    use crate::strings::messages;

    fn args() -> GenerateArgs {
        GenerateArgs {
            platform: "tiktok".to_string(),
            topic: " AI tools ".to_string(),
            audience: "2".to_string(),
            emotion: "Shock".to_string(),
            style: "5".to_string(),
            benefit: "Save time".to_string(),
            tone: None,
            format: OutputFormat::Raw,
        }
    }

    #[tokio::test]
    async fn test_produce_fills_every_answer() {
        let stub = StubGenerator::returning(vec![Ok("A) Titles".into())]);
        let wizard = WizardController::new(stub.clone());

        let document = produce(&wizard, &args()).await.unwrap();
        assert_eq!(document, "A) Titles");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let (answers, tone) = &calls[0];
        assert_eq!(answers.platform, "TikTok");
        assert_eq!(answers.topic, "AI tools");
        assert_eq!(answers.audience, "Beginners");
        assert_eq!(answers.emotion, "Shock");
        assert_eq!(answers.style, "Opinion");
        assert_eq!(*tone, None);
    }

    #[tokio::test]
    async fn test_tone_regenerates_once() {
        let stub = StubGenerator::returning(vec![Ok("first".into()), Ok("second".into())]);
        let wizard = WizardController::new(stub.clone());
        let args = GenerateArgs {
            tone: Some(RefinementTone::Professional),
            ..args()
        };

        assert_eq!(produce(&wizard, &args).await.unwrap(), "second");
        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1, Some(RefinementTone::Professional));
    }

    #[tokio::test]
    async fn test_invalid_option_stops_before_generating() {
        let stub = StubGenerator::returning(vec![]);
        let wizard = WizardController::new(stub.clone());
        let args = GenerateArgs {
            audience: "Robots".to_string(),
            ..args()
        };

        let err = produce(&wizard, &args).await.unwrap_err();
        assert!(err.to_string().contains("Invalid --audience 'Robots'"));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_generation_is_an_error() {
        let stub = StubGenerator::returning(vec![Err(GenerationError::EmptyResponse)]);
        let wizard = WizardController::new(stub);

        let err = produce(&wizard, &args()).await.unwrap_err();
        assert_eq!(err.to_string(), messages::GENERATION_FAILED);
    }

    #[test]
    fn test_blank_free_text_is_rejected() {
        let topic = &QUESTIONS[1];
        assert!(resolve_answer(topic, "  ").is_err());
        assert_eq!(resolve_answer(topic, "fitness").unwrap(), "fitness");
    }
}
