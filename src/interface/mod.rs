//! # Interface Layer
//!
//! Everything that talks to the terminal: the interactive console, the
//! non-interactive subcommands and the shared rendering helpers.

pub mod commands;
pub mod console;
pub mod render;
