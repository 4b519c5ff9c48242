//! Error type shared by the core modules.

/// Errors produced by the core domain layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("pixel buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("curve point index {index} out of range (curve has {len} points)")]
    PointIndex { index: usize, len: usize },
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
    #[error("preset data must be a JSON array of records")]
    PresetFormat,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
