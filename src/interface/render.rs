//! # Rendering
//!
//! Turns wizard snapshots into styled terminal text. Styling goes through `console`,
//! which drops the escape codes automatically when stdout is not a terminal.

use console::style;

use crate::application::formatter::{self, DocLine};
use crate::domain::types::{Answers, Question, RefinementTone, WizardSnapshot, WizardState};
use crate::strings::{messages, wizard};

const BAR_WIDTH: usize = 24;

/// Renders whatever the wizard is currently showing.
pub fn screen(snapshot: &WizardSnapshot, questions: &[Question]) -> String {
    match &snapshot.state {
        WizardState::Intro => intro(),
        WizardState::Asking(step) => match questions.get(*step) {
            Some(question) => question_card(
                *step,
                question,
                &snapshot.answers,
                snapshot.total,
                snapshot.progress,
            ),
            None => String::new(),
        },
        WizardState::Generating => generating(snapshot.progress),
        WizardState::Result(document) => result(document),
        WizardState::Failed(message) => failed(message),
    }
}

/// Renders the state a background generation settled in. `None` when there is
/// nothing new to show (the result was discarded by a restart).
pub fn outcome(state: &WizardState) -> Option<String> {
    match state {
        WizardState::Result(document) => Some(result(document)),
        WizardState::Failed(message) => Some(failed(message)),
        _ => None,
    }
}

pub fn intro() -> String {
    format!(
        "{}\n{}\n\n{}\n{}",
        style(wizard::TITLE).bold().magenta(),
        wizard::TAGLINE,
        style(wizard::START_HINT).dim(),
        style(wizard::FOOTER).dim()
    )
}

pub fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}

pub fn question_card(
    step: usize,
    question: &Question,
    answers: &Answers,
    total: usize,
    percent: u8,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n",
        style(messages::step_badge(step + 1, total)).cyan().bold(),
        style(progress_bar(percent)).dim()
    ));
    out.push_str(&format!(
        "{}\n",
        style(format!("{}. {}", step + 1, question.prompt)).bold()
    ));

    let current = answers.get(question.field);
    match question.options {
        Some(options) => {
            for (i, option) in options.iter().enumerate() {
                let marker = if *option == current { "●" } else { " " };
                out.push_str(&format!("  {} {}) {}\n", marker, i + 1, option));
            }
        }
        None => {
            if let Some(placeholder) = question.placeholder {
                out.push_str(&format!("  {}\n", style(placeholder).dim().italic()));
            }
            if !current.is_empty() {
                out.push_str(&format!("  current: {}\n", current));
            }
        }
    }

    let action = if step + 1 == total {
        wizard::FINISH_LABEL
    } else {
        wizard::CONTINUE_LABEL
    };
    out.push_str(&format!("{}", style(format!("[Enter] {}", action)).dim()));
    out
}

pub fn generating(percent: u8) -> String {
    format!(
        "{} {}",
        style(messages::GENERATING).yellow().bold(),
        style(format!("{}%", percent)).dim()
    )
}

pub fn section_header(label: char, title: &str) -> String {
    format!(
        "\n{} {}",
        style(format!(" {} ", label)).black().on_cyan().bold(),
        style(title).bold().underlined()
    )
}

pub fn document_line(line: &DocLine) -> String {
    match line {
        DocLine::Header { label, text } => section_header(*label, text),
        DocLine::Item(text) => format!("  {} {}", style("•").cyan(), text),
        DocLine::Prose(text) => text.clone(),
    }
}

pub fn result(document: &str) -> String {
    let mut out = format!("{}\n", style(wizard::RESULT_TITLE).bold().magenta());
    for section in formatter::sections(&formatter::classify(document)) {
        if let Some(label) = section.label {
            out.push_str(&section_header(label, &section.title));
            out.push('\n');
        }
        for line in &section.lines {
            out.push_str(&document_line(line));
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&refine_menu());
    out
}

pub fn refine_menu() -> String {
    let tones: Vec<String> = RefinementTone::ALL
        .iter()
        .enumerate()
        .map(|(i, tone)| format!("{}) {}", i + 1, tone.label()))
        .collect();
    format!(
        "{} {}\n{}",
        style(wizard::REFINE_HINT).bold(),
        tones.join("   "),
        style(wizard::RESTART_HINT).dim()
    )
}

pub fn failed(message: &str) -> String {
    format!(
        "{} {}\n{}",
        style("✗").red().bold(),
        style(message).red(),
        style(wizard::FAILED_HINT).dim()
    )
}

pub fn catalog(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!("{}. [{}] {}\n", i + 1, question.field, question.prompt));
        match (question.options, question.placeholder) {
            (Some(options), _) => out.push_str(&format!("   options: {}\n", options.join(", "))),
            (None, Some(placeholder)) => out.push_str(&format!("   free text, {}\n", placeholder)),
            (None, None) => out.push_str("   free text\n"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::QUESTIONS;

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).into_owned()
    }

    #[test]
    fn test_progress_bar_bounds() {
        let empty = progress_bar(0);
        assert!(empty.ends_with("  0%"));
        assert!(!empty.contains('█'));

        let full = progress_bar(100);
        assert!(full.ends_with("100%"));
        assert!(!full.contains('░'));
        assert_eq!(full.chars().filter(|c| *c == '█').count(), BAR_WIDTH);
    }

    #[test]
    fn test_question_card_lists_options() {
        let mut answers = Answers::default();
        answers.set(QUESTIONS[0].field, "Reels");
        let card = plain(question_card(0, &QUESTIONS[0], &answers, QUESTIONS.len(), 0));

        assert!(card.contains("Step 1 of 6"));
        assert!(card.contains("1. What type of video is this?"));
        assert!(card.contains("1) YouTube"));
        assert!(card.contains("● 3) Reels"));
        assert!(card.contains(wizard::CONTINUE_LABEL));
    }

    #[test]
    fn test_last_question_card() {
        let card = plain(question_card(5, &QUESTIONS[5], &Answers::default(), QUESTIONS.len(), 83));
        assert!(card.contains("Step 6 of 6"));
        assert!(card.contains("e.g. Save time"));
        assert!(card.contains(wizard::FINISH_LABEL));
    }

    #[test]
    fn test_screen_shows_snapshot_progress() {
        let snapshot = WizardSnapshot {
            state: WizardState::Asking(5),
            answers: Answers::default(),
            progress: 83,
            total: QUESTIONS.len(),
        };
        let card = plain(screen(&snapshot, &QUESTIONS));
        assert!(card.contains(" 83%"));

        let skewed = WizardSnapshot { progress: 40, ..snapshot };
        let card = plain(screen(&skewed, &QUESTIONS));
        assert!(card.contains(" 40%"));
        assert!(!card.contains(" 83%"));
    }

    #[test]
    fn test_result_headers_use_section_titles() {
        let out = plain(result("intro line\nB)   Hooks  \n1. Wait for it"));
        assert!(out.contains("intro line"));
        assert!(out.contains(" B  Hooks\n"));
        assert!(out.contains("• Wait for it"));
    }

    #[test]
    fn test_result_rendering() {
        let out = plain(result("A) Titles\n- first\n\nSome prose"));
        assert!(out.contains(" A  Titles"));
        assert!(out.contains("• first"));
        assert!(out.contains("Some prose"));
        assert!(out.contains("1) Shocking"));
        assert!(out.contains("3) Professional"));
    }

    #[test]
    fn test_outcome_skips_non_terminal_states() {
        assert!(outcome(&WizardState::Intro).is_none());
        assert!(outcome(&WizardState::Generating).is_none());
        assert!(plain(outcome(&WizardState::Failed("nope".into())).unwrap()).contains("nope"));
    }

    #[test]
    fn test_catalog_listing() {
        let out = catalog(&QUESTIONS);
        assert!(out.contains("1. [platform] What type of video is this?"));
        assert!(out.contains("options: YouTube, Shorts, Reels, TikTok"));
        assert!(out.contains("free text, e.g. AI tools"));
    }
}
