//! # Domain Types
//!
//! Shared value types for the wizard: the answer record and its field identifiers,
//! the refinement tone, the wizard state and the question catalog entry.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifies one field of [`Answers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Platform,
    Topic,
    Audience,
    Emotion,
    Style,
    Benefit,
}

impl FieldId {
    pub const ALL: [FieldId; 6] = [
        FieldId::Platform,
        FieldId::Topic,
        FieldId::Audience,
        FieldId::Emotion,
        FieldId::Style,
        FieldId::Benefit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Platform => "platform",
            FieldId::Topic => "topic",
            FieldId::Audience => "audience",
            FieldId::Emotion => "emotion",
            FieldId::Style => "style",
            FieldId::Benefit => "benefit",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// The six collected answers. All fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Answers {
    pub platform: String,
    pub topic: String,
    pub audience: String,
    pub emotion: String,
    pub style: String,
    pub benefit: String,
}

impl Answers {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Platform => &self.platform,
            FieldId::Topic => &self.topic,
            FieldId::Audience => &self.audience,
            FieldId::Emotion => &self.emotion,
            FieldId::Style => &self.style,
            FieldId::Benefit => &self.benefit,
        }
    }

    /// Writes exactly one field; no other field is touched.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::Platform => &mut self.platform,
            FieldId::Topic => &mut self.topic,
            FieldId::Audience => &mut self.audience,
            FieldId::Emotion => &mut self.emotion,
            FieldId::Style => &mut self.style,
            FieldId::Benefit => &mut self.benefit,
        };
        *slot = value.into();
    }

    pub fn is_answered(&self, field: FieldId) -> bool {
        !self.get(field).trim().is_empty()
    }

    pub fn is_complete(&self) -> bool {
        FieldId::ALL.iter().all(|field| self.is_answered(*field))
    }

    pub fn is_empty(&self) -> bool {
        *self == Answers::default()
    }
}

/// Optional modifier for a regeneration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RefinementTone {
    Shocking,
    Emotional,
    Professional,
}

impl RefinementTone {
    pub const ALL: [RefinementTone; 3] = [
        RefinementTone::Shocking,
        RefinementTone::Emotional,
        RefinementTone::Professional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementTone::Shocking => "shocking",
            RefinementTone::Emotional => "emotional",
            RefinementTone::Professional => "professional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RefinementTone::Shocking => "Shocking",
            RefinementTone::Emotional => "Emotional",
            RefinementTone::Professional => "Professional",
        }
    }
}

impl fmt::Display for RefinementTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefinementTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RefinementTone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone '{}'", s))
    }
}

/// Where the wizard currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    Intro,
    Asking(usize),
    Generating,
    Result(String),
    Failed(String),
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Intro => "intro",
            WizardState::Asking(_) => "asking",
            WizardState::Generating => "generating",
            WizardState::Result(_) => "result",
            WizardState::Failed(_) => "failed",
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, WizardState::Generating)
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Asking(step) => write!(f, "asking({})", step),
            other => f.write_str(other.name()),
        }
    }
}

/// A static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub field: FieldId,
    pub prompt: &'static str,
    /// `Some` for closed-set questions, `None` for free text
    pub options: Option<&'static [&'static str]>,
    pub placeholder: Option<&'static str>,
}

impl Question {
    pub fn is_free_text(&self) -> bool {
        self.options.is_none()
    }

    /// Resolves user input against the closed set: either the 1-based number or the
    /// label itself (case-insensitive). Free-text questions never match.
    pub fn match_option(&self, input: &str) -> Option<&'static str> {
        let options = self.options?;
        let input = input.trim();

        if let Ok(index) = input.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| options.get(i).copied());
        }

        options
            .iter()
            .copied()
            .find(|opt| opt.eq_ignore_ascii_case(input))
    }
}

/// Consistent read of the controller, taken under a single lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub state: WizardState,
    pub answers: Answers,
    pub progress: u8,
    pub total: usize,
}
