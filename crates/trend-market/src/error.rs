//! Error types for market data acquisition

use thiserror::Error;
use trend_core::CoreError;

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors that can occur while fetching price history
#[derive(Debug, Error)]
pub enum MarketError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// The provider returned no usable points for a symbol
    #[error("no price data available for {0}")]
    EmptySeries(String),

    /// Requested history span could not be expressed
    #[error("invalid history span: {0}")]
    InvalidSpan(String),

    /// The fetched data violated the series contract
    #[error("series error: {0}")]
    Series(#[from] CoreError),
}
