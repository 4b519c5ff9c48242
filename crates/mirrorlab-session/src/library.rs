//! The preset library: built-in presets followed by user presets.

use mirrorlab_core::Preset;
use mirrorlab_core::presets::builtin_presets;
use tracing::debug;

use crate::error::{Result, SessionError};

/// Built-ins are fixed; user presets may be added and removed.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    builtin: Vec<Preset>,
    custom: Vec<Preset>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self {
            builtin: builtin_presets(),
            custom: Vec::new(),
        }
    }
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// All presets, built-ins first, each group in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.custom.iter())
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtin.iter().any(|p| p.id == id)
    }

    /// User presets only; this is what gets persisted.
    pub fn custom_presets(&self) -> &[Preset] {
        &self.custom
    }

    /// Add a user preset. Ids must be unique across the whole library.
    pub fn save(&mut self, preset: Preset) -> Result<()> {
        if self.contains(&preset.id) {
            return Err(SessionError::DuplicatePreset(preset.id));
        }
        debug!(id = %preset.id, name = %preset.name, "saving preset");
        self.custom.push(preset);
        Ok(())
    }

    /// Remove a user preset and return it.
    pub fn delete(&mut self, id: &str) -> Result<Preset> {
        if self.is_builtin(id) {
            return Err(SessionError::BuiltinPreset(id.to_string()));
        }
        let Some(pos) = self.custom.iter().position(|p| p.id == id) else {
            return Err(SessionError::UnknownPreset(id.to_string()));
        };
        debug!(id, "deleting preset");
        Ok(self.custom.remove(pos))
    }

    /// Merge presets read from storage, skipping any whose id is already
    /// present. Returns how many were added.
    pub fn merge_loaded(&mut self, loaded: impl IntoIterator<Item = Preset>) -> usize {
        let mut added = 0;
        for preset in loaded {
            if self.contains(&preset.id) {
                debug!(id = %preset.id, "skipping loaded preset with existing id");
                continue;
            }
            self.custom.push(preset);
            added += 1;
        }
        added
    }
}
