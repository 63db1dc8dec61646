//! # Console Session
//!
//! Line-oriented front end for the wizard. Each input line is interpreted against the
//! current state and answered with rendered text. Generations run on their own task;
//! their rendered outcome arrives later through the session's output channel so input
//! stays responsive.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::wizard::{Rejection, Spawned, WizardController};
use crate::domain::types::{RefinementTone, WizardState};
use crate::interface::render;
use crate::strings::{help, messages};

/// What the caller should do with one handled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Show(String),
    /// Nothing to print (e.g. a trigger ignored while generating)
    Silent,
    Quit,
}

pub struct ConsoleSession {
    wizard: Arc<WizardController>,
    output: mpsc::UnboundedSender<String>,
}

impl ConsoleSession {
    pub fn new(wizard: Arc<WizardController>, output: mpsc::UnboundedSender<String>) -> Self {
        Self { wizard, output }
    }

    /// The current screen.
    pub async fn screen(&self) -> String {
        let snapshot = self.wizard.snapshot().await;
        render::screen(&snapshot, self.wizard.questions())
    }

    pub async fn handle_line(&self, line: &str) -> Reply {
        let input = line.trim();

        if let Some(command) = input.strip_prefix('.') {
            return self.handle_command(command.trim()).await;
        }

        match self.wizard.state().await {
            WizardState::Intro => self.start().await,
            WizardState::Asking(step) => self.answer(step, input).await,
            WizardState::Generating => Reply::Silent,
            WizardState::Result(_) | WizardState::Failed(_) => self.refine(input).await,
        }
    }

    async fn handle_command(&self, command: &str) -> Reply {
        match command.to_lowercase().as_str() {
            "quit" | "exit" => Reply::Quit,
            "help" => Reply::Show(help::MAIN.to_string()),
            "start" => self.start().await,
            "restart" | "new" => {
                self.wizard.restart().await;
                Reply::Show(format!("{}\n\n{}", messages::RESTARTED, self.screen().await))
            }
            "retry" => self.regenerate(None).await,
            other => match other.parse::<RefinementTone>() {
                Ok(tone) => self.regenerate(Some(tone)).await,
                Err(_) => Reply::Show(messages::UNKNOWN_COMMAND.to_string()),
            },
        }
    }

    async fn start(&self) -> Reply {
        match self.wizard.start().await {
            Ok(()) => Reply::Show(self.screen().await),
            Err(rejection) => self.rejected(rejection),
        }
    }

    async fn answer(&self, step: usize, input: &str) -> Reply {
        let Some(question) = self.wizard.questions().get(step).copied() else {
            return Reply::Silent;
        };

        let value = match question.options {
            Some(options) => match question.match_option(input) {
                Some(option) => option.to_string(),
                None => {
                    return Reply::Show(format!(
                        "{}\n\n{}",
                        messages::invalid_selection(options.len()),
                        self.screen().await
                    ));
                }
            },
            None if input.is_empty() => return Reply::Show(messages::EMPTY_ANSWER.to_string()),
            None => input.to_string(),
        };

        if let Err(rejection) = self.wizard.set_answer(question.field, value).await {
            return self.rejected(rejection);
        }

        match self.wizard.spawn_advance().await {
            Ok(Spawned::Step(_)) => Reply::Show(self.screen().await),
            Ok(Spawned::Generating(handle)) => {
                self.forward(handle);
                Reply::Show(self.screen().await)
            }
            Err(rejection) => self.rejected(rejection),
        }
    }

    /// After a result: a tone number or name regenerates, a blank line redraws.
    async fn refine(&self, input: &str) -> Reply {
        if input.is_empty() {
            return Reply::Show(self.screen().await);
        }

        let tone = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| RefinementTone::ALL.get(i).copied())
            .or_else(|| input.parse::<RefinementTone>().ok());

        match tone {
            Some(tone) => self.regenerate(Some(tone)).await,
            None => Reply::Show(messages::UNKNOWN_COMMAND.to_string()),
        }
    }

    async fn regenerate(&self, tone: Option<RefinementTone>) -> Reply {
        match self.wizard.spawn_regenerate(tone).await {
            Ok(handle) => {
                self.forward(handle);
                Reply::Show(self.screen().await)
            }
            Err(rejection) => self.rejected(rejection),
        }
    }

    /// Delivers the rendered outcome of a background generation.
    fn forward(&self, handle: JoinHandle<Option<WizardState>>) {
        let output = self.output.clone();
        tokio::spawn(async move {
            match handle.await {
                Ok(Some(state)) => {
                    if let Some(rendered) = render::outcome(&state) {
                        let _ = output.send(rendered);
                    }
                }
                Ok(None) => tracing::debug!("Stale generation finished, nothing to show"),
                Err(e) => {
                    tracing::error!("Generation task failed: {}", e);
                    let _ = output.send(render::failed(messages::UNEXPECTED_ERROR));
                }
            }
        });
    }

    fn rejected(&self, rejection: Rejection) -> Reply {
        tracing::debug!("Rejected: {}", rejection);
        match rejection {
            Rejection::Busy => Reply::Silent,
            Rejection::IncompleteAnswer { field } => Reply::Show(messages::cannot_advance(field)),
            Rejection::IllegalTransition { action, state } => {
                Reply::Show(messages::not_available(action, state))
            }
            Rejection::FieldMismatch { .. } => Reply::Show(rejection.to_string()),
        }
    }
}

/// Runs the interactive wizard on stdin/stdout until `.quit` or end of input.
pub async fn run(wizard: Arc<WizardController>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ConsoleSession::new(wizard.clone(), tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", session.screen().await);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match session.handle_line(&line).await {
                    Reply::Show(text) => println!("\n{}", text),
                    Reply::Silent => {}
                    Reply::Quit => {
                        println!("{}", messages::GOODBYE);
                        return Ok(());
                    }
                }
            }
            Some(rendered) = rx.recv() => {
                println!("\n{}", rendered);
            }
        }
    }

    // Input closed (e.g. piped answers): let an in-flight generation finish.
    if wizard.state().await.is_generating() {
        if let Some(rendered) = rx.recv().await {
            println!("\n{}", rendered);
        }
    }

    Ok(())
}
