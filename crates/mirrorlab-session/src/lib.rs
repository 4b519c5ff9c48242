//! MirrorLab Session — the adjustment store and its collaborators.
//!
//! Wraps the pure core in the state a host application needs: the edit
//! reducer with undo/redo, the preset library and its persistence port, the
//! interactive tone-curve editor, and a last-writer-wins render scheduler.

pub mod config;
pub mod curve_editor;
pub mod error;
pub mod history;
pub mod library;
pub mod persistence;
pub mod scheduler;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use error::SessionError;
pub use scheduler::{RenderScheduler, RenderedFrame};
pub use session::EditorSession;
pub use store::{AdjustmentStore, EditorCommand, Transition};
