//! Per-asset, per-run snapshot records

use crate::error::{CoreError, Result};
use crate::indicators::IndicatorSet;
use crate::series::PriceSeries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable record of one asset's price and indicator state at run time
///
/// Built once per asset per run from the last element of its price series;
/// never mutated afterwards. Indicator values still inside their warm-up
/// window are simply absent from `indicators`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Ticker symbol
    pub symbol: String,
    /// Human-readable asset name
    pub display_name: String,
    /// Timestamp of the last observation
    pub as_of: DateTime<Utc>,
    /// Closing price of the last observation
    pub last_price: f64,
    /// Close minus open of the last observation
    pub price_change: f64,
    /// Defined indicator values at the last observation
    pub indicators: BTreeMap<String, f64>,
}

impl AssetSnapshot {
    /// Build a snapshot from a series and its computed indicators
    ///
    /// Fails with [`CoreError::InsufficientData`] when the series is empty -
    /// there is no last price to report. This is the only error this stage
    /// raises; missing warm-up data is represented as absent fields.
    pub fn from_series(
        symbol: impl Into<String>,
        display_name: impl Into<String>,
        series: &PriceSeries,
        indicators: &IndicatorSet,
    ) -> Result<Self> {
        let symbol = symbol.into();
        let last = series.last().ok_or_else(|| CoreError::InsufficientData {
            symbol: symbol.clone(),
        })?;

        Ok(Self {
            symbol,
            display_name: display_name.into(),
            as_of: last.timestamp,
            last_price: last.close,
            price_change: last.close - last.open,
            indicators: indicators.values_at(series.len() - 1),
        })
    }
}
