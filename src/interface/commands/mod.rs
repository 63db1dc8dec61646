//! # Command Handlers
//!
//! One handler per CLI subcommand. The interactive wizard lives in
//! [`console`](crate::interface::console); these are the non-interactive entry points.

pub mod generate;
pub mod questions;
