//! Market data acquisition for trend-rs
//!
//! The analytics core consumes already-fetched price history; this crate is
//! the collaborator that fetches it. It provides:
//!
//! - [`MarketDataProvider`]: the narrow async seam the pipeline injects
//! - [`YahooMarketData`]: Yahoo Finance implementation (no API key)
//! - [`CachedMarketData`]: timed-cache wrapper around any provider

pub mod cache;
pub mod error;
pub mod provider;
pub mod yahoo;

// Re-export main types for convenience
pub use cache::{CachedMarketData, QuoteCache, QuoteKey};
pub use error::{MarketError, Result};
pub use provider::{MarketDataProvider, MarketSeries};
pub use yahoo::YahooMarketData;
