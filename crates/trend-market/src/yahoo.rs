//! Yahoo Finance market data provider

use crate::error::{MarketError, Result};
use crate::provider::{MarketDataProvider, MarketSeries};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;
use tracing::{debug, instrument};
use trend_core::{PricePoint, PriceSeries};
use yahoo_finance_api as yahoo;

/// Yahoo Finance provider (no API key required)
#[derive(Debug, Default, Clone)]
pub struct YahooMarketData {}

impl YahooMarketData {
    /// Create a new Yahoo Finance provider
    pub fn new() -> Self {
        Self {}
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<yahoo::Quote>> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::InvalidSpan(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::InvalidSpan(format!("invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        response
            .quotes()
            .map_err(|e| MarketError::YahooFinance(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    #[instrument(skip(self))]
    async fn fetch_series(&self, symbol: &str, days: u32) -> Result<MarketSeries> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(days));

        let mut quotes = self.fetch_history(symbol, start, end).await?;
        if quotes.is_empty() {
            return Err(MarketError::EmptySeries(symbol.to_string()));
        }

        // Yahoo occasionally repeats the in-progress period at the tail;
        // keep one point per timestamp.
        quotes.sort_by_key(|q| q.timestamp);
        quotes.dedup_by_key(|q| q.timestamp);

        let points: Vec<PricePoint> = quotes
            .iter()
            .map(|q| PricePoint {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
                open: q.open,
                close: q.close,
            })
            .collect();
        debug!(symbol, points = points.len(), "fetched price history");

        Ok(MarketSeries {
            symbol: symbol.to_string(),
            // The quote history endpoint carries no company name; callers
            // supply display names through their target configuration.
            display_name: None,
            series: PriceSeries::new(points)?,
        })
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_series() {
        let provider = YahooMarketData::new();
        let fetched = provider.fetch_series("AAPL", 90).await.unwrap();
        assert_eq!(fetched.symbol, "AAPL");
        assert!(fetched.series.len() > 50);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_symbol_is_an_error() {
        let provider = YahooMarketData::new();
        let result = provider.fetch_series("INVALID_SYMBOL_12345", 30).await;
        assert!(result.is_err());
    }
}
