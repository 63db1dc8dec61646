//! # Paths
//!
//! Centralized definitions for where configuration and logs are located.

use std::path::PathBuf;

pub const DATA_DIR: &str = "data";
pub const CONFIG_FILE: &str = "config.yaml";
pub const SESSION_LOG: &str = "data/session.log";
pub const APP_DIR: &str = "viralforge";

/// Returns the relative path to the local config file (e.g. "data/config.yaml")
pub fn local_config() -> PathBuf {
    PathBuf::from(DATA_DIR).join(CONFIG_FILE)
}

/// Returns the per-user config file, if the platform has a config directory
pub fn user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Config files to probe, in priority order
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![local_config()];
    if let Some(user) = user_config() {
        candidates.push(user);
    }
    candidates
}
