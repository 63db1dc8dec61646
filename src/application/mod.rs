//! # Application Layer
//!
//! Contains the core logic of the wizard: the step controller, the strategy
//! generator that feeds it, and the formatter for generated documents.

pub mod formatter;
pub mod generator;
pub mod wizard;
