//! The adjustment store: a reducer from commands to snapshots.
//!
//! Every command produces a [`Transition`] telling the caller what changed,
//! so side effects (re-render, persist) happen outside the reducer.

use std::sync::Arc;

use mirrorlab_core::{AdjustmentEdit, Adjustments, Preset};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::history::EditHistory;
use crate::library::PresetLibrary;

/// Commands accepted by [`AdjustmentStore::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorCommand {
    /// Apply an edit to the current snapshot and record it.
    Edit(AdjustmentEdit),
    Undo,
    Redo,
    /// Add a user preset to the library.
    SavePreset(Preset),
    /// Remove a user preset by id.
    DeletePreset(String),
    /// A new source image was imported; history restarts at identity.
    NewImage,
}

/// What a dispatched command changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// The current snapshot is different; the preview needs a render.
    pub adjustments_changed: bool,
    /// The user preset collection is different; it needs persisting.
    pub presets_changed: bool,
}

impl Transition {
    const NONE: Self = Self {
        adjustments_changed: false,
        presets_changed: false,
    };
    const ADJUSTMENTS: Self = Self {
        adjustments_changed: true,
        presets_changed: false,
    };
    const PRESETS: Self = Self {
        adjustments_changed: false,
        presets_changed: true,
    };
}

/// Current snapshot, its undo history, and the preset library.
#[derive(Debug, Clone)]
pub struct AdjustmentStore {
    history: EditHistory,
    library: PresetLibrary,
}

impl Default for AdjustmentStore {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl AdjustmentStore {
    pub fn new(history_limit: usize) -> Self {
        Self {
            history: EditHistory::new(history_limit),
            library: PresetLibrary::new(),
        }
    }

    /// The snapshot a render should use.
    pub fn current(&self) -> Arc<Adjustments> {
        Arc::clone(self.history.current())
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn library(&self) -> &PresetLibrary {
        &self.library
    }

    /// Put back a library captured before a preset command, used when the
    /// change could not be persisted.
    pub fn restore_library(&mut self, library: PresetLibrary) {
        self.library = library;
    }

    /// Merge presets read from storage. Returns how many were added.
    pub fn load_presets(&mut self, presets: Vec<Preset>) -> usize {
        let added = self.library.merge_loaded(presets);
        info!(added, total = self.library.len(), "preset library loaded");
        added
    }

    /// Apply `command`. Preset rule violations are errors and leave the
    /// store untouched.
    pub fn dispatch(&mut self, command: EditorCommand) -> Result<Transition> {
        match command {
            EditorCommand::Edit(edit) => {
                let current = self.history.current();
                let next = edit.apply(current);
                if next == **current {
                    debug!(?edit, "edit left snapshot unchanged");
                    return Ok(Transition::NONE);
                }
                self.history.push(next);
                Ok(Transition::ADJUSTMENTS)
            }
            EditorCommand::Undo => Ok(if self.history.undo() {
                Transition::ADJUSTMENTS
            } else {
                Transition::NONE
            }),
            EditorCommand::Redo => Ok(if self.history.redo() {
                Transition::ADJUSTMENTS
            } else {
                Transition::NONE
            }),
            EditorCommand::SavePreset(preset) => {
                self.library.save(preset)?;
                Ok(Transition::PRESETS)
            }
            EditorCommand::DeletePreset(id) => {
                self.library.delete(&id)?;
                Ok(Transition::PRESETS)
            }
            EditorCommand::NewImage => {
                self.history.clear();
                Ok(Transition::ADJUSTMENTS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use mirrorlab_core::ScalarField;

    fn scalar(field: ScalarField, value: f32) -> EditorCommand {
        EditorCommand::Edit(AdjustmentEdit::Scalar { field, value })
    }

    #[test]
    fn test_edit_pushes_snapshot() {
        let mut store = AdjustmentStore::default();
        let t = store.dispatch(scalar(ScalarField::Contrast, 25.0)).unwrap();
        assert_eq!(t, Transition::ADJUSTMENTS);
        assert_eq!(store.current().contrast, 25.0);
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_noop_edit_is_not_recorded() {
        let mut store = AdjustmentStore::default();
        let t = store.dispatch(scalar(ScalarField::Contrast, 0.0)).unwrap();
        assert_eq!(t, Transition::NONE);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_undo_redo_transitions() {
        let mut store = AdjustmentStore::default();
        assert_eq!(store.dispatch(EditorCommand::Undo).unwrap(), Transition::NONE);
        store.dispatch(scalar(ScalarField::Vignette, 40.0)).unwrap();
        assert_eq!(
            store.dispatch(EditorCommand::Undo).unwrap(),
            Transition::ADJUSTMENTS
        );
        assert_eq!(store.current().vignette, 0.0);
        store.dispatch(EditorCommand::Redo).unwrap();
        assert_eq!(store.current().vignette, 40.0);
    }

    #[test]
    fn test_preset_commands_flag_persistence() {
        let mut store = AdjustmentStore::default();
        let preset = Preset::new("p", "P", Adjustments::default());
        assert_eq!(
            store.dispatch(EditorCommand::SavePreset(preset.clone())).unwrap(),
            Transition::PRESETS
        );
        assert!(matches!(
            store.dispatch(EditorCommand::SavePreset(preset)),
            Err(SessionError::DuplicatePreset(_))
        ));
        assert_eq!(
            store
                .dispatch(EditorCommand::DeletePreset("p".into()))
                .unwrap(),
            Transition::PRESETS
        );
    }

    #[test]
    fn test_apply_preset_then_reset() {
        let mut store = AdjustmentStore::default();
        let vivid = store.library().get("vivid").unwrap().adjustments.clone();
        store
            .dispatch(EditorCommand::Edit(AdjustmentEdit::ApplyPreset(vivid.clone())))
            .unwrap();
        assert_eq!(*store.current(), vivid);
        store
            .dispatch(EditorCommand::Edit(AdjustmentEdit::Reset))
            .unwrap();
        assert_eq!(*store.current(), Adjustments::default());
        assert_eq!(store.history().len(), 3);
    }

    #[test]
    fn test_new_image_resets_history() {
        let mut store = AdjustmentStore::default();
        store.dispatch(scalar(ScalarField::Exposure, 1.0)).unwrap();
        store.dispatch(EditorCommand::NewImage).unwrap();
        assert_eq!(*store.current(), Adjustments::default());
        assert!(!store.history().can_undo());
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_string(&EditorCommand::DeletePreset("x".into())).unwrap();
        assert_eq!(json, r#"{"type":"DeletePreset","data":"x"}"#);
        let back: EditorCommand = serde_json::from_str(r#"{"type":"Undo"}"#).unwrap();
        assert_eq!(back, EditorCommand::Undo);
    }
}
