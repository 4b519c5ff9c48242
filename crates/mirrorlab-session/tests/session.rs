//! Session-level behavior: rendering, presets, and curve gestures together.
//!
//! Run with: `cargo test -p mirrorlab-session`

use std::sync::Arc;

use mirrorlab_core::grading::curve_edit::Axis;
use mirrorlab_core::{
    AdjustmentEdit, Adjustments, CurveChannel, PixelBuffer, Point, Preset, ScalarField,
};
use mirrorlab_session::persistence::{JsonFilePresetStore, MemoryPresetStore, PresetStore};
use parking_lot::Mutex;
use mirrorlab_session::{EditorCommand, EditorSession, RenderScheduler, SessionError};

fn gray(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::filled(width, height, [100, 120, 140, 255])
}

/// Loads nothing and fails every save while `full` is set.
#[derive(Default)]
struct FullDiskStore {
    full: Mutex<bool>,
    saved: Mutex<Vec<Preset>>,
}

impl PresetStore for FullDiskStore {
    fn load(&self) -> mirrorlab_session::error::Result<Vec<Preset>> {
        Ok(Vec::new())
    }

    fn save(&self, presets: &[Preset]) -> mirrorlab_session::error::Result<()> {
        if *self.full.lock() {
            return Err(std::io::Error::other("disk full").into());
        }
        *self.saved.lock() = presets.to_vec();
        Ok(())
    }
}

fn memory_session() -> (EditorSession, Arc<MemoryPresetStore>) {
    let store = Arc::new(MemoryPresetStore::new());
    let session = EditorSession::with_store(store.clone(), 50);
    (session, store)
}

#[tokio::test]
async fn test_last_submission_wins() {
    let scheduler = RenderScheduler::spawn();
    scheduler.set_source(gray(8, 8));

    let mut last = 0;
    for step in 1..=20 {
        last = scheduler.submit(Arc::new(Adjustments {
            contrast: step as f32,
            ..Default::default()
        }));
    }
    assert_eq!(last, 20);

    let mut frames = scheduler.subscribe();
    let frame = frames
        .wait_for(|f| f.as_ref().is_some_and(|f| f.generation == last))
        .await
        .unwrap()
        .clone()
        .unwrap();
    assert_eq!(frame.adjustments.contrast, 20.0);
    assert_eq!(scheduler.latest_frame().unwrap().generation, 20);
    scheduler.shutdown().await;
}

#[tokio::test]
async fn test_import_and_edit_render_newest_snapshot() {
    let (mut session, _) = memory_session();
    session.import(PixelBuffer::filled(2, 2, [128, 128, 128, 255])).unwrap();
    session
        .edit(AdjustmentEdit::Scalar {
            field: ScalarField::Exposure,
            value: 1.0,
        })
        .unwrap();

    let newest = session.scheduler().latest_generation();
    let mut frames = session.subscribe();
    let frame = frames
        .wait_for(|f| f.as_ref().is_some_and(|f| f.generation == newest))
        .await
        .unwrap()
        .clone()
        .unwrap();
    assert!(frame.image.pixels().iter().all(|p| *p == [255, 255, 255, 255]));
    session.shutdown().await;
}

#[tokio::test]
async fn test_preset_changes_are_persisted() {
    let (mut session, store) = memory_session();
    let preset = Preset::new(
        "punchy",
        "Punchy",
        Adjustments {
            contrast: 45.0,
            ..Default::default()
        },
    );
    session
        .dispatch(EditorCommand::SavePreset(preset.clone()))
        .unwrap();
    assert_eq!(store.snapshot(), vec![preset]);

    // Rejected commands never reach the store.
    assert!(matches!(
        session.dispatch(EditorCommand::DeletePreset("natural".into())),
        Err(SessionError::BuiltinPreset(_))
    ));
    assert_eq!(store.save_count(), 1);

    session
        .dispatch(EditorCommand::DeletePreset("punchy".into()))
        .unwrap();
    assert!(store.snapshot().is_empty());
    assert_eq!(store.save_count(), 2);
    session.shutdown().await;
}

#[tokio::test]
async fn test_failed_preset_save_is_rolled_back() {
    let store = Arc::new(FullDiskStore::default());
    *store.full.lock() = true;
    let mut session = EditorSession::with_store(store.clone(), 10);
    let preset = Preset::new("mine", "Mine", Adjustments::default());

    let err = session
        .dispatch(EditorCommand::SavePreset(preset.clone()))
        .unwrap_err();
    assert!(matches!(err, SessionError::Io(_)), "{err}");
    assert!(!session.library().contains("mine"));

    // Once the disk recovers the same save goes through.
    *store.full.lock() = false;
    session
        .dispatch(EditorCommand::SavePreset(preset.clone()))
        .unwrap();
    assert_eq!(*store.saved.lock(), vec![preset]);

    // A failed delete keeps the preset.
    *store.full.lock() = true;
    assert!(
        session
            .dispatch(EditorCommand::DeletePreset("mine".into()))
            .is_err()
    );
    assert!(session.library().contains("mine"));
    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_submitters_still_render_newest() {
    let scheduler = RenderScheduler::spawn();
    scheduler.set_source(gray(4, 4));

    std::thread::scope(|scope| {
        for thread in 0..8 {
            let scheduler = &scheduler;
            scope.spawn(move || {
                for step in 0..50 {
                    scheduler.submit(Arc::new(Adjustments {
                        contrast: (thread * 10 + step % 10) as f32,
                        ..Default::default()
                    }));
                }
            });
        }
    });

    let newest = scheduler.latest_generation();
    assert_eq!(newest, 400);
    let mut frames = scheduler.subscribe();
    frames
        .wait_for(|f| f.as_ref().is_some_and(|f| f.generation == newest))
        .await
        .unwrap();
    scheduler.shutdown().await;
}

#[tokio::test]
async fn test_loaded_presets_skip_builtin_ids() {
    let store = Arc::new(MemoryPresetStore::with_presets(vec![
        Preset::new("vivid", "Shadowed", Adjustments::default()),
        Preset::new("mine", "Mine", Adjustments::default()),
    ]));
    let session = EditorSession::with_store(store, 10);
    assert_eq!(session.library().custom_presets().len(), 1);
    assert_eq!(session.library().get("vivid").unwrap().name, "Vivid");
    session.shutdown().await;
}

#[tokio::test]
async fn test_apply_preset_is_undoable() {
    let (mut session, _) = memory_session();
    session.apply_preset("vintage-warm").unwrap();
    assert_eq!(session.adjustments().temperature, 20.0);
    session.undo().unwrap();
    assert_eq!(*session.adjustments(), Adjustments::default());
    assert!(matches!(
        session.apply_preset("missing"),
        Err(SessionError::UnknownPreset(_))
    ));
    session.shutdown().await;
}

#[tokio::test]
async fn test_curve_gestures_flow_into_history() {
    let (mut session, _) = memory_session();
    session.select_curve_channel(CurveChannel::Blue);

    let t = session.curve_press(Point::new(0.6, 0.2)).unwrap();
    assert!(t.adjustments_changed);
    assert_eq!(session.adjustments().curve.blue.len(), 6);

    session.curve_drag(Point::new(0.65, 0.1)).unwrap();
    session.curve_release();
    session.curve_set_axis(Axis::X, 0.0).unwrap();

    let blue = session.adjustments().curve.blue.clone();
    assert!(blue.windows(2).all(|w| w[0].x <= w[1].x));
    let current = session.adjustments();
    assert_eq!(
        session.curve_editor().selected_point(&current.curve),
        Some(Point::new(0.0, 0.1))
    );

    session.curve_reset().unwrap();
    assert_eq!(session.adjustments().curve.blue, Adjustments::default().curve.blue);
    assert_eq!(session.adjustments().curve.master, Adjustments::default().curve.master);
    session.shutdown().await;
}

#[tokio::test]
async fn test_corrupt_record_in_file_is_skipped() {
    let dir = std::env::temp_dir().join(format!("mirrorlab-session-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("presets.json");
    std::fs::write(
        &path,
        r#"[{"id":"ok","name":"Ok","adjustments":{"grain":5}},{"id":7}]"#,
    )
    .unwrap();

    let store = Arc::new(JsonFilePresetStore::new(&path));
    assert_eq!(store.load().unwrap().len(), 1);
    let session = EditorSession::with_store(store, 10);
    assert_eq!(session.library().get("ok").unwrap().adjustments.grain, 5.0);

    let _ = std::fs::remove_dir_all(&dir);
    session.shutdown().await;
}
