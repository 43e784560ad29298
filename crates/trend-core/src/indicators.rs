//! Indicator engine - derives technical indicator columns from a price series
//!
//! Every column is index-aligned with the input series. Indices inside an
//! indicator's warm-up window hold `None`; callers must treat those as
//! "not yet available", never as zero. Computation is deterministic and
//! performs no I/O.

use crate::error::{CoreError, Result};
use crate::series::PriceSeries;
use std::collections::BTreeMap;

/// Which indicators to compute, with their parameters
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    /// Simple moving average windows
    pub ma_windows: Vec<usize>,
    /// Bollinger band (window, band width in stddevs) pairs
    pub bollinger: Vec<(usize, f64)>,
    /// MACD (fast, slow, signal) span triples
    pub macd: Vec<(usize, usize, usize)>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_windows: vec![20, 50],
            bollinger: vec![(20, 2.0)],
            macd: vec![(12, 26, 9)],
        }
    }
}

impl IndicatorConfig {
    /// Create a new configuration builder
    pub fn builder() -> IndicatorConfigBuilder {
        IndicatorConfigBuilder::default()
    }

    /// Longest warm-up length across all configured indicators
    ///
    /// EMAs are seeded from the first value, so MACD contributes a warm-up
    /// of one point; moving averages and bands contribute their window.
    pub fn max_warmup(&self) -> usize {
        let ma = self.ma_windows.iter().copied().max().unwrap_or(0);
        let bb = self.bollinger.iter().map(|&(w, _)| w).max().unwrap_or(0);
        let macd = usize::from(!self.macd.is_empty());
        ma.max(bb).max(macd)
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<()> {
        if let Some(&w) = self.ma_windows.iter().find(|&&w| w == 0) {
            return Err(CoreError::Config(format!("MA window must be >= 1, got {w}")));
        }
        for &(w, k) in &self.bollinger {
            if w < 2 {
                return Err(CoreError::Config(format!(
                    "Bollinger window must be >= 2, got {w}"
                )));
            }
            if !k.is_finite() || k <= 0.0 {
                return Err(CoreError::Config(format!(
                    "Bollinger band width must be positive, got {k}"
                )));
            }
        }
        for &(fast, slow, signal) in &self.macd {
            if fast == 0 || slow == 0 || signal == 0 {
                return Err(CoreError::Config(
                    "MACD spans must be >= 1".to_string(),
                ));
            }
            if fast >= slow {
                return Err(CoreError::Config(format!(
                    "MACD fast span {fast} must be shorter than slow span {slow}"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`IndicatorConfig`]
#[derive(Debug, Default)]
pub struct IndicatorConfigBuilder {
    ma_windows: Vec<usize>,
    bollinger: Vec<(usize, f64)>,
    macd: Vec<(usize, usize, usize)>,
}

impl IndicatorConfigBuilder {
    /// Add a simple moving average window
    pub fn ma_window(mut self, window: usize) -> Self {
        self.ma_windows.push(window);
        self
    }

    /// Add a Bollinger band configuration
    pub fn bollinger(mut self, window: usize, width: f64) -> Self {
        self.bollinger.push((window, width));
        self
    }

    /// Add a MACD configuration
    pub fn macd(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        self.macd.push((fast, slow, signal));
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<IndicatorConfig> {
        let config = IndicatorConfig {
            ma_windows: self.ma_windows,
            bollinger: self.bollinger,
            macd: self.macd,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Named indicator columns, index-aligned with the source series
///
/// `None` marks an index inside the indicator's warm-up window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    columns: BTreeMap<String, Vec<Option<f64>>>,
    len: usize,
}

impl IndicatorSet {
    fn with_len(len: usize) -> Self {
        Self {
            columns: BTreeMap::new(),
            len,
        }
    }

    fn insert(&mut self, name: String, column: Vec<Option<f64>>) {
        debug_assert_eq!(column.len(), self.len);
        self.columns.insert(name, column);
    }

    /// Number of rows (same as the source series length)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A single column by name
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// All defined values at one index
    ///
    /// Warm-up entries are absent from the map rather than zero-filled.
    pub fn values_at(&self, index: usize) -> BTreeMap<String, f64> {
        self.columns
            .iter()
            .filter_map(|(name, col)| {
                col.get(index).copied().flatten().map(|v| (name.clone(), v))
            })
            .collect()
    }
}

/// Compute all configured indicators over a price series
///
/// An empty series yields empty columns for every indicator; a constant
/// series yields zero-width bands and a zero MACD histogram. Both are valid
/// outputs, not faults.
pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> IndicatorSet {
    let closes = series.closes();
    let mut set = IndicatorSet::with_len(closes.len());

    for &window in &config.ma_windows {
        set.insert(format!("ma_{window}"), moving_average(&closes, window));
    }

    for &(window, width) in &config.bollinger {
        let ma = moving_average(&closes, window);
        let sd = rolling_std(&closes, window);
        let band = |sign: f64| -> Vec<Option<f64>> {
            ma.iter()
                .zip(&sd)
                .map(|(m, s)| match (m, s) {
                    (Some(m), Some(s)) => Some(m + sign * width * s),
                    _ => None,
                })
                .collect()
        };
        set.insert(format!("bb_{window}_{width}_upper"), band(1.0));
        set.insert(format!("bb_{window}_{width}_lower"), band(-1.0));
    }

    for &(fast, slow, signal) in &config.macd {
        let fast_ema = ema(&closes, fast);
        let slow_ema = ema(&closes, slow);
        let macd: Vec<f64> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(f, s)| f - s)
            .collect();
        let signal_line = ema(&macd, signal);
        let histogram: Vec<f64> = macd
            .iter()
            .zip(&signal_line)
            .map(|(m, s)| m - s)
            .collect();

        let prefix = format!("macd_{fast}_{slow}_{signal}");
        set.insert(format!("{prefix}_signal"), defined(signal_line));
        set.insert(format!("{prefix}_hist"), defined(histogram));
        set.insert(prefix, defined(macd));
    }

    set
}

fn defined(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

/// Simple moving average over a trailing window
///
/// Index `i` is defined once `i + 1 >= window`.
fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Rolling population standard deviation over a trailing window
fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
            continue;
        }
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window as f64;
        out.push(Some(var.sqrt()));
    }
    out
}

/// Exponential moving average with smoothing `2 / (span + 1)`
///
/// Seeded from the first value; defined at every index, no look-ahead.
fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = None;
    for &value in values {
        let next = match current {
            None => value,
            Some(prev) => prev * (1.0 - alpha) + value * alpha,
        };
        current = Some(next);
        out.push(next);
    }
    out
}
