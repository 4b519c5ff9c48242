//! Where user presets live between sessions.
//!
//! The store sees only user presets; built-ins are never written.

use std::path::{Path, PathBuf};

use mirrorlab_core::Preset;
use mirrorlab_core::presets::{parse_presets, presets_to_json};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::Result;

/// Persistence port for user presets.
pub trait PresetStore: Send + Sync {
    /// Read every stored preset. An empty store yields an empty list.
    fn load(&self) -> Result<Vec<Preset>>;

    /// Replace the stored collection with `presets`.
    fn save(&self, presets: &[Preset]) -> Result<()>;
}

/// Presets kept in a JSON array file.
#[derive(Debug, Clone)]
pub struct JsonFilePresetStore {
    path: PathBuf,
}

impl JsonFilePresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PresetStore for JsonFilePresetStore {
    fn load(&self) -> Result<Vec<Preset>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preset file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let presets = parse_presets(&json)?;
        info!(
            path = %self.path.display(),
            count = presets.len(),
            "loaded presets"
        );
        Ok(presets)
    }

    fn save(&self, presets: &[Preset]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, presets_to_json(presets)?)?;
        debug!(path = %self.path.display(), count = presets.len(), "saved presets");
        Ok(())
    }
}

/// In-process store, used by tests and hosts without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    presets: Mutex<Vec<Preset>>,
    saves: Mutex<usize>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets(presets: Vec<Preset>) -> Self {
        Self {
            presets: Mutex::new(presets),
            saves: Mutex::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    pub fn snapshot(&self) -> Vec<Preset> {
        self.presets.lock().clone()
    }
}

impl PresetStore for MemoryPresetStore {
    fn load(&self) -> Result<Vec<Preset>> {
        Ok(self.presets.lock().clone())
    }

    fn save(&self, presets: &[Preset]) -> Result<()> {
        *self.presets.lock() = presets.to_vec();
        *self.saves.lock() += 1;
        Ok(())
    }
}
