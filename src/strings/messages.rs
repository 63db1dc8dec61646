//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.

use crate::domain::types::FieldId;

pub const GENERATION_FAILED: &str = "Failed to generate content. Please try again.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";
pub const EMPTY_ANSWER: &str = "Please enter an answer before continuing.";
pub const GENERATING: &str = "Forging viral potential...";
pub const RESTARTED: &str = "Starting over.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type `.help` for the list.";
pub const GOODBYE: &str = "Bye!";

pub fn invalid_selection(count: usize) -> String {
    format!("Invalid selection. Please choose 1-{count} or type the option name.")
}

pub fn cannot_advance(field: FieldId) -> String {
    format!("Cannot continue: '{field}' is still empty.")
}

pub fn not_available(action: &str, state: &str) -> String {
    format!("`.{action}` is not available while {state}.")
}

pub fn step_badge(step: usize, total: usize) -> String {
    format!("Step {step} of {total}")
}
