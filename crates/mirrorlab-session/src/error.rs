use mirrorlab_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("preset id already exists: {0}")]
    DuplicatePreset(String),
    #[error("built-in preset cannot be deleted: {0}")]
    BuiltinPreset(String),
    #[error("no preset with id: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
