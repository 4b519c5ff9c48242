//! Session configuration.

use std::path::PathBuf;

/// Default preset file name, resolved against the working directory.
const DEFAULT_PRESET_FILE: &str = "mirrorlab_presets.json";
/// Default number of snapshots kept for undo.
const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Runtime configuration for an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Where user presets are persisted.
    pub preset_path: PathBuf,
    /// Maximum snapshots retained in the undo history (at least 1).
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preset_path: std::env::var_os("MIRRORLAB_PRESET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PRESET_FILE)),
            history_limit: std::env::var("MIRRORLAB_HISTORY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }
}
