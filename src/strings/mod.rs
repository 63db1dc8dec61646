//! # Strings Module
//!
//! Centralizes user-facing strings and prompt templates.

pub mod help;
pub mod messages;
pub mod prompts;
pub mod wizard;
