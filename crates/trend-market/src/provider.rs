//! Provider trait for market data acquisition

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use trend_core::PriceSeries;

/// Price history for one symbol as delivered by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    /// Ticker symbol the series was fetched for
    pub symbol: String,
    /// Provider-supplied display name, when the source exposes one
    pub display_name: Option<String>,
    /// Chronological price history
    pub series: PriceSeries,
}

/// Trait for market data providers
///
/// Implementations fetch the price history the analytics core consumes.
/// The core assumes completed, ordered batches; any per-symbol concurrency
/// stays behind this seam.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch price history for one symbol covering the trailing `days`
    ///
    /// The span must cover at least the longest configured indicator
    /// warm-up window for the series to produce defined values.
    async fn fetch_series(&self, symbol: &str, days: u32) -> Result<MarketSeries>;

    /// Get the provider name (e.g., "yahoo")
    fn name(&self) -> &str;
}
