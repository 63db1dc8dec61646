//! # Wizard Strings
//!
//! Static copy for the intro screen and the steps around the questions.

pub const TITLE: &str = "ViralForge";
pub const TAGLINE: &str = "Craft scroll-stopping titles and hooks that dominate the algorithm.";
pub const START_HINT: &str = "Press Enter (or type `.start`) to forge your strategy.";
pub const CONTINUE_LABEL: &str = "Continue";
pub const FINISH_LABEL: &str = "Forge My Strategy";
pub const RESULT_TITLE: &str = "Your Viral Strategy";
pub const REFINE_HINT: &str = "Refine the tone:";
pub const FAILED_HINT: &str = "Type `.retry` (or a tone command) to try again, or `.restart` to start over.";
pub const RESTART_HINT: &str = "`.restart` to start over";
pub const FOOTER: &str = "ViralForge - Engine for Viral Creators";
