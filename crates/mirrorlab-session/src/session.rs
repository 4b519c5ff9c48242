//! An editing session: store, preset persistence, curve editor, and preview
//! scheduler wired together.
//!
//! Side effects follow the reducer. A command is dispatched to the
//! [`AdjustmentStore`]; if the snapshot changed a render is submitted, and if
//! the user presets changed they are written through the [`PresetStore`].

use std::sync::Arc;

use mirrorlab_core::grading::curve_edit::Axis;
use mirrorlab_core::{AdjustmentEdit, Adjustments, CurveChannel, PixelBuffer, Point};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::SessionConfig;
use crate::curve_editor::ToneCurveEditor;
use crate::error::{Result, SessionError};
use crate::library::PresetLibrary;
use crate::persistence::{JsonFilePresetStore, PresetStore};
use crate::scheduler::{RenderScheduler, RenderedFrame};
use crate::store::{AdjustmentStore, EditorCommand, Transition};

pub struct EditorSession {
    store: AdjustmentStore,
    presets: Arc<dyn PresetStore>,
    scheduler: RenderScheduler,
    curve_editor: ToneCurveEditor,
}

impl EditorSession {
    /// Open a session persisting presets to `config.preset_path`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(config: &SessionConfig) -> Self {
        Self::with_store(
            Arc::new(JsonFilePresetStore::new(&config.preset_path)),
            config.history_limit,
        )
    }

    /// Open a session over any preset store.
    ///
    /// A store that fails to load is logged and the session starts with the
    /// built-in presets only.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_store(presets: Arc<dyn PresetStore>, history_limit: usize) -> Self {
        let mut store = AdjustmentStore::new(history_limit);
        match presets.load() {
            Ok(loaded) => {
                store.load_presets(loaded);
            }
            Err(e) => warn!("failed to load user presets: {e}"),
        }
        Self {
            store,
            presets,
            scheduler: RenderScheduler::spawn(),
            curve_editor: ToneCurveEditor::new(),
        }
    }

    pub fn adjustments(&self) -> Arc<Adjustments> {
        self.store.current()
    }

    pub fn store(&self) -> &AdjustmentStore {
        &self.store
    }

    pub fn library(&self) -> &PresetLibrary {
        self.store.library()
    }

    pub fn curve_editor(&self) -> &ToneCurveEditor {
        &self.curve_editor
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RenderedFrame>>> {
        self.scheduler.subscribe()
    }

    /// Load a new source image. History restarts at identity and an identity
    /// preview is queued.
    pub fn import(&mut self, image: PixelBuffer) -> Result<Transition> {
        info!(
            width = image.width(),
            height = image.height(),
            "importing image"
        );
        self.scheduler.set_source(image);
        self.curve_editor = ToneCurveEditor::new();
        self.dispatch(EditorCommand::NewImage)
    }

    /// Run `command` through the store, then render and persist as needed.
    ///
    /// A preset change that fails to persist is rolled back, so the library
    /// always matches what the store last accepted.
    pub fn dispatch(&mut self, command: EditorCommand) -> Result<Transition> {
        let previous_library = matches!(
            command,
            EditorCommand::SavePreset(_) | EditorCommand::DeletePreset(_)
        )
        .then(|| self.store.library().clone());

        let transition = self.store.dispatch(command)?;
        if transition.adjustments_changed {
            self.scheduler.submit(self.store.current());
        }
        if transition.presets_changed
            && let Err(e) = self.presets.save(self.store.library().custom_presets())
        {
            error!("failed to persist presets, rolling back: {e}");
            if let Some(library) = previous_library {
                self.store.restore_library(library);
            }
            return Err(e);
        }
        Ok(transition)
    }

    pub fn edit(&mut self, edit: AdjustmentEdit) -> Result<Transition> {
        self.dispatch(EditorCommand::Edit(edit))
    }

    pub fn undo(&mut self) -> Result<Transition> {
        self.dispatch(EditorCommand::Undo)
    }

    pub fn redo(&mut self) -> Result<Transition> {
        self.dispatch(EditorCommand::Redo)
    }

    /// Apply a library preset's adjustments as one undoable edit.
    pub fn apply_preset(&mut self, id: &str) -> Result<Transition> {
        let Some(preset) = self.store.library().get(id) else {
            return Err(SessionError::UnknownPreset(id.to_string()));
        };
        let adjustments = preset.adjustments.clone();
        self.edit(AdjustmentEdit::ApplyPreset(adjustments))
    }

    pub fn select_curve_channel(&mut self, channel: CurveChannel) {
        self.curve_editor.select_channel(channel);
    }

    pub fn curve_press(&mut self, click: Point) -> Result<Transition> {
        let current = self.store.current();
        let edit = self.curve_editor.press(&current.curve, click);
        self.dispatch_curve(edit)
    }

    pub fn curve_drag(&mut self, coord: Point) -> Result<Transition> {
        let current = self.store.current();
        let edit = self.curve_editor.drag(&current.curve, coord)?;
        self.dispatch_curve(edit)
    }

    pub fn curve_release(&mut self) {
        self.curve_editor.release();
    }

    pub fn curve_set_axis(&mut self, axis: Axis, value: f32) -> Result<Transition> {
        let current = self.store.current();
        let edit = self.curve_editor.set_axis(&current.curve, axis, value)?;
        self.dispatch_curve(edit)
    }

    pub fn curve_reset(&mut self) -> Result<Transition> {
        let edit = self.curve_editor.reset_channel();
        self.edit(edit)
    }

    /// Close the preview worker.
    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
    }

    fn dispatch_curve(&mut self, edit: Option<AdjustmentEdit>) -> Result<Transition> {
        match edit {
            Some(edit) => self.edit(edit),
            None => Ok(Transition::default()),
        }
    }
}
