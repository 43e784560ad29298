//! Error types for the core analytics pipeline

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the core analytics components
///
/// Per-asset failures are isolated by callers: `InsufficientData` excludes
/// one asset from a run, it never aborts the batch. `MemoryCorrupt` is
/// recovered internally by the memory store and only surfaces in logs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An asset has no usable price point
    #[error("insufficient data for {symbol}: price series is empty")]
    InsufficientData { symbol: String },

    /// A price series violated its ordering contract
    #[error("invalid price series: {0}")]
    InvalidSeries(String),

    /// Persisted memory could not be decoded
    #[error("memory record unreadable: {0}")]
    MemoryCorrupt(String),

    /// Invalid indicator or pipeline configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while persisting memory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
