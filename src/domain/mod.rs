//! # Domain Layer
//!
//! Core definitions, types, and traits that define the wizard's domain.
//! Independent of specific frameworks (mostly), serving as the contract for other layers.

pub mod catalog;
pub mod config;
pub mod paths;
pub mod traits;
pub mod types;
