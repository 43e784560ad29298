//! Error types for report generation

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while producing a report
///
/// Per-asset acquisition and snapshot failures never surface here; the
/// pipeline isolates them and reports the asset as skipped. These variants
/// cover run-level failures only.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Core analytics error
    #[error("core error: {0}")]
    Core(#[from] trend_core::CoreError),

    /// Market data collaborator error
    #[error("market data error: {0}")]
    Market(#[from] trend_market::MarketError),

    /// Narrative collaborator error
    #[error("narrative error: {0}")]
    Llm(#[from] trend_llm::LlmError),

    /// Prompt or document template error
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Invalid report configuration
    #[error("configuration error: {0}")]
    Config(String),
}
