//! # Prompts
//!
//! Prompt templates sent to the text-generation provider and the renderer that fills them.

use crate::domain::types::{Answers, RefinementTone};

pub const SYSTEM_TEMPLATE: &str = include_str!("../../prompts/system.md");
pub const STRATEGY_TEMPLATE: &str = include_str!("../../prompts/strategy.md");

/// A builder for rendering prompts with context.
///
/// Placeholders are `{{KEY}}`. Rendering is a single pass over the template, so
/// substituted values are never themselves scanned for placeholders.
pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    pub fn render(self) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start..].find("}}") else {
                break;
            };
            let key = &rest[start + 2..start + len];
            result.push_str(&rest[..start]);

            match self.replacements.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => result.push_str(value),
                None => {
                    tracing::warn!("Unreplaced placeholder in prompt: {{{{{}}}}}", key);
                    result.push_str(&rest[start..start + len + 2]);
                }
            }
            rest = &rest[start + len + 2..];
        }

        result.push_str(rest);
        result
    }
}

pub fn system_prompt() -> String {
    SYSTEM_TEMPLATE.trim_end().to_string()
}

pub fn tone_requirement(tone: Option<RefinementTone>) -> String {
    match tone {
        Some(tone) => format!(
            "- NEW Tone Requirement: Make the titles and hooks more {}.",
            tone.as_str()
        ),
        None => String::new(),
    }
}

pub fn strategy_prompt(answers: &Answers, tone: Option<RefinementTone>) -> String {
    PromptRenderer::new(STRATEGY_TEMPLATE)
        .set("PLATFORM", answers.platform.trim())
        .set("TOPIC", answers.topic.trim())
        .set("AUDIENCE", answers.audience.trim())
        .set("EMOTION", answers.emotion.trim())
        .set("STYLE", answers.style.trim())
        .set("BENEFIT", answers.benefit.trim())
        .set("TONE_REQUIREMENT", tone_requirement(tone))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Answers {
        Answers {
            platform: "TikTok".to_string(),
            topic: "AI tools".to_string(),
            audience: "Students".to_string(),
            emotion: "Curiosity".to_string(),
            style: "Tutorial".to_string(),
            benefit: "Save time".to_string(),
        }
    }

    #[test]
    fn test_renderer_single_pass() {
        let out = PromptRenderer::new("a={{A}} b={{B}}")
            .set("A", "{{B}}")
            .set("B", "2")
            .render();
        assert_eq!(out, "a={{B}} b=2");
    }

    #[test]
    fn test_renderer_leaves_unknown_placeholders() {
        let out = PromptRenderer::new("x {{MISSING}} y {{").render();
        assert_eq!(out, "x {{MISSING}} y {{");
    }

    #[test]
    fn test_strategy_prompt_contains_answers() {
        let prompt = strategy_prompt(&answers(), None);
        assert!(prompt.contains("- Platform: TikTok"));
        assert!(prompt.contains("- Topic: AI tools"));
        assert!(prompt.contains("- Audience: Students"));
        assert!(prompt.contains("- Key Emotion: Curiosity"));
        assert!(prompt.contains("- Style: Tutorial"));
        assert!(prompt.contains("- Main Benefit: Save time"));
        assert!(prompt.contains("optimized for TikTok"));
        assert!(!prompt.contains("Tone Requirement"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_strategy_prompt_with_tone() {
        let prompt = strategy_prompt(&answers(), Some(RefinementTone::Shocking));
        assert!(prompt.contains("- NEW Tone Requirement: Make the titles and hooks more shocking."));
    }

    #[test]
    fn test_prompt_requests_three_sections() {
        let prompt = strategy_prompt(&answers(), None);
        assert!(prompt.contains("\nA) 5 Viral Video Titles"));
        assert!(prompt.contains("\nB) 3 Scroll-Stopping Hooks"));
        assert!(prompt.contains("\nC) Suggested Video Flow:"));
    }

    #[test]
    fn test_system_prompt() {
        assert!(system_prompt().starts_with("You are \"ViralForge\""));
    }
}
