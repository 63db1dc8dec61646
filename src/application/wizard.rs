//! # Wizard Controller
//!
//! Drives the user through the question catalog, then asks the [`Generator`] for a
//! strategy document. State and answers live behind one lock so every operation sees
//! and leaves them consistent. The lock is released while the generator runs; the
//! visible state during that time is `Generating`, which rejects further triggers.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::catalog::QUESTIONS;
use crate::domain::traits::Generator;
use crate::domain::types::{
    Answers, FieldId, Question, RefinementTone, WizardSnapshot, WizardState,
};

/// Why an operation was refused. A rejection never changes state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("'{field}' must be answered before continuing")]
    IncompleteAnswer { field: FieldId },
    #[error("cannot {action} while {state}")]
    IllegalTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("current step expects '{expected}', got '{actual}'")]
    FieldMismatch { expected: FieldId, actual: FieldId },
    #[error("a generation is already in flight")]
    Busy,
}

/// Outcome of a successful [`WizardController::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advanced {
    /// Moved to the question at this index
    Step(usize),
    /// The last question was answered; carries the state after generation
    Finished(WizardState),
}

/// Outcome of a successful [`WizardController::spawn_advance`].
#[derive(Debug)]
pub enum Spawned {
    Step(usize),
    /// Resolves to the state after generation, or `None` if a restart made it stale
    Generating(JoinHandle<Option<WizardState>>),
}

enum Begun {
    Step(usize),
    Generate(Pending),
}

struct Pending {
    answers: Answers,
    tone: Option<RefinementTone>,
    epoch: u64,
}

struct Inner {
    state: WizardState,
    answers: Answers,
    /// Bumped on restart; a generation started under an older epoch is stale.
    epoch: u64,
}

pub struct WizardController {
    generator: Arc<dyn Generator>,
    questions: &'static [Question],
    inner: Mutex<Inner>,
}

impl WizardController {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self::with_questions(generator, &QUESTIONS)
    }

    pub fn with_questions(generator: Arc<dyn Generator>, questions: &'static [Question]) -> Self {
        Self {
            generator,
            questions,
            inner: Mutex::new(Inner {
                state: WizardState::Intro,
                answers: Answers::default(),
                epoch: 0,
            }),
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub async fn state(&self) -> WizardState {
        self.inner.lock().await.state.clone()
    }

    pub async fn answers(&self) -> Answers {
        self.inner.lock().await.answers.clone()
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        let inner = self.inner.lock().await;
        WizardSnapshot {
            state: inner.state.clone(),
            answers: inner.answers.clone(),
            progress: self.progress_for(&inner.state),
            total: self.total(),
        }
    }

    pub async fn progress(&self) -> u8 {
        let inner = self.inner.lock().await;
        self.progress_for(&inner.state)
    }

    /// The question being asked, if any.
    pub async fn current_question(&self) -> Option<(usize, Question)> {
        match self.inner.lock().await.state {
            WizardState::Asking(step) => self.questions.get(step).map(|q| (step, *q)),
            _ => None,
        }
    }

    fn progress_for(&self, state: &WizardState) -> u8 {
        match state {
            WizardState::Intro => 0,
            WizardState::Asking(step) => percentage(*step, self.total()),
            WizardState::Generating | WizardState::Result(_) | WizardState::Failed(_) => 100,
        }
    }

    /// `Intro -> Asking(0)`, clearing any previous answers.
    pub async fn start(&self) -> Result<(), Rejection> {
        let mut inner = self.inner.lock().await;
        if inner.state != WizardState::Intro {
            return Err(illegal("start", &inner.state));
        }
        if self.questions.is_empty() {
            return Err(illegal("start", &inner.state));
        }

        inner.answers = Answers::default();
        transition(&mut inner, WizardState::Asking(0));
        Ok(())
    }

    /// Writes the answer for the current step. Does not advance.
    pub async fn set_answer(&self, field: FieldId, value: impl Into<String>) -> Result<(), Rejection> {
        let mut inner = self.inner.lock().await;
        let step = match inner.state {
            WizardState::Asking(step) => step,
            ref other => return Err(illegal("answer", other)),
        };

        let expected = self.questions[step].field;
        if expected != field {
            return Err(Rejection::FieldMismatch {
                expected,
                actual: field,
            });
        }

        inner.answers.set(field, value);
        Ok(())
    }

    /// Moves to the next question, or on the last one, generates the strategy.
    ///
    /// Only the last question is checked for a non-empty answer. Generation runs
    /// with the full answer set and no tone.
    pub async fn advance(&self) -> Result<Advanced, Rejection> {
        match self.begin_advance().await? {
            Begun::Step(step) => Ok(Advanced::Step(step)),
            Begun::Generate(pending) => Ok(Advanced::Finished(self.settle(pending).await)),
        }
    }

    /// Regenerates from a result or a failure, optionally biased toward a tone.
    ///
    /// A failed regeneration replaces the previous result with `Failed`.
    pub async fn regenerate(&self, tone: Option<RefinementTone>) -> Result<WizardState, Rejection> {
        let pending = self.begin_regenerate(tone).await?;
        Ok(self.settle(pending).await)
    }

    /// Like [`advance`](Self::advance), but the generation runs on its own task.
    /// `Generating` is already the visible state when this returns.
    pub async fn spawn_advance(self: &Arc<Self>) -> Result<Spawned, Rejection> {
        match self.begin_advance().await? {
            Begun::Step(step) => Ok(Spawned::Step(step)),
            Begun::Generate(pending) => Ok(Spawned::Generating(self.spawn_completion(pending))),
        }
    }

    /// Like [`regenerate`](Self::regenerate), but the generation runs on its own task.
    pub async fn spawn_regenerate(
        self: &Arc<Self>,
        tone: Option<RefinementTone>,
    ) -> Result<JoinHandle<Option<WizardState>>, Rejection> {
        let pending = self.begin_regenerate(tone).await?;
        Ok(self.spawn_completion(pending))
    }

    /// Any state `-> Intro`, answers cleared. An in-flight generation is orphaned:
    /// its response is dropped when it arrives.
    pub async fn restart(&self) {
        let mut inner = self.inner.lock().await;
        inner.answers = Answers::default();
        inner.epoch += 1;
        transition(&mut inner, WizardState::Intro);
    }

    async fn begin_advance(&self) -> Result<Begun, Rejection> {
        let mut inner = self.inner.lock().await;
        let step = match inner.state {
            WizardState::Asking(step) => step,
            WizardState::Generating => return Err(Rejection::Busy),
            ref other => return Err(illegal("advance", other)),
        };

        if step + 1 < self.questions.len() {
            transition(&mut inner, WizardState::Asking(step + 1));
            return Ok(Begun::Step(step + 1));
        }

        let field = self.questions[step].field;
        if !inner.answers.is_answered(field) {
            return Err(Rejection::IncompleteAnswer { field });
        }
        if !inner.answers.is_complete() {
            tracing::warn!("Generating with unanswered questions");
        }

        Ok(Begun::Generate(begin_generation(&mut inner, None)))
    }

    async fn begin_regenerate(&self, tone: Option<RefinementTone>) -> Result<Pending, Rejection> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            WizardState::Result(_) | WizardState::Failed(_) => {}
            WizardState::Generating => return Err(Rejection::Busy),
            ref other => return Err(illegal("regenerate", other)),
        }

        Ok(begin_generation(&mut inner, tone))
    }

    fn spawn_completion(self: &Arc<Self>, pending: Pending) -> JoinHandle<Option<WizardState>> {
        let wizard = Arc::clone(self);
        tokio::spawn(async move { wizard.complete(pending).await })
    }

    /// Completes a generation and returns the state it ended in, whatever the outcome.
    async fn settle(&self, pending: Pending) -> WizardState {
        match self.complete(pending).await {
            Some(state) => state,
            None => self.state().await,
        }
    }

    async fn complete(&self, pending: Pending) -> Option<WizardState> {
        match pending.tone {
            Some(tone) => tracing::info!("Generating strategy (tone: {})", tone),
            None => tracing::info!("Generating strategy"),
        }

        let outcome = self.generator.generate(&pending.answers, pending.tone).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != pending.epoch {
            tracing::debug!("Discarding generation result from a previous session");
            return None;
        }

        let next = match outcome {
            Ok(document) => {
                tracing::info!("Strategy generated ({} bytes)", document.len());
                WizardState::Result(document)
            }
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                WizardState::Failed(e.user_message().to_string())
            }
        };

        transition(&mut inner, next.clone());
        Some(next)
    }
}

/// Marks the wizard busy and captures what the generator needs.
fn begin_generation(inner: &mut Inner, tone: Option<RefinementTone>) -> Pending {
    transition(inner, WizardState::Generating);
    Pending {
        answers: inner.answers.clone(),
        tone,
        epoch: inner.epoch,
    }
}

fn transition(inner: &mut Inner, next: WizardState) {
    tracing::debug!("Wizard: {} -> {}", inner.state, next);
    inner.state = next;
}

fn illegal(action: &'static str, state: &WizardState) -> Rejection {
    Rejection::IllegalTransition {
        action,
        state: state.name(),
    }
}

fn percentage(step: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((100.0 * step as f64) / total as f64).round() as u8
}
