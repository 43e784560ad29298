//! Configuration for report runs

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use trend_core::IndicatorConfig;

/// One asset the report covers
///
/// Target order is significant: the payload and the rendered document
/// follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Ticker symbol
    pub symbol: String,
    /// Human-readable name; falls back to the provider's name, then the
    /// symbol itself
    pub display_name: Option<String>,
}

impl TargetSpec {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: None,
        }
    }

    pub fn named(symbol: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: Some(display_name.into()),
        }
    }
}

/// Configuration for one report pipeline
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Ordered target list
    pub targets: Vec<TargetSpec>,

    /// Indicators to compute per asset
    pub indicators: IndicatorConfig,

    /// Trailing price history span, in calendar days
    pub history_days: u32,

    /// Path of the persisted memory file
    pub memory_path: PathBuf,

    /// Model passed to the narrative provider
    pub model: String,

    /// Token budget for the narrative
    pub max_narrative_tokens: usize,

    /// Sampling temperature for the narrative
    pub temperature: Option<f32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            indicators: IndicatorConfig::default(),
            history_days: 120,
            memory_path: PathBuf::from("data/memory.json"),
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_narrative_tokens: 1500,
            temperature: None,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(ReportError::Config("target list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target.symbol.as_str()) {
                return Err(ReportError::Config(format!(
                    "duplicate target symbol: {}",
                    target.symbol
                )));
            }
        }

        self.indicators
            .validate()
            .map_err(|e| ReportError::Config(e.to_string()))?;

        // Floor, not a guarantee: the span is calendar days while warm-up
        // counts trading points, so callers should leave margin.
        let warmup = self.indicators.max_warmup();
        if (self.history_days as usize) < warmup {
            return Err(ReportError::Config(format!(
                "history span of {} days cannot cover a warm-up of {} points",
                self.history_days, warmup
            )));
        }

        if self.max_narrative_tokens == 0 {
            return Err(ReportError::Config(
                "max_narrative_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`ReportConfig`]
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    targets: Vec<TargetSpec>,
    indicators: Option<IndicatorConfig>,
    history_days: Option<u32>,
    memory_path: Option<PathBuf>,
    model: Option<String>,
    max_narrative_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl ReportConfigBuilder {
    /// Add a target asset
    pub fn target(mut self, target: TargetSpec) -> Self {
        self.targets.push(target);
        self
    }

    /// Add target symbols without display names
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(symbols.into_iter().map(TargetSpec::new));
        self
    }

    /// Set the indicator configuration
    pub fn indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = Some(indicators);
        self
    }

    /// Set the trailing history span in days
    pub fn history_days(mut self, days: u32) -> Self {
        self.history_days = Some(days);
        self
    }

    /// Set the memory file path
    pub fn memory_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.memory_path = Some(path.into());
        self
    }

    /// Set the narrative model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the narrative token budget
    pub fn max_narrative_tokens(mut self, tokens: usize) -> Self {
        self.max_narrative_tokens = Some(tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ReportConfig> {
        let defaults = ReportConfig::default();

        let config = ReportConfig {
            targets: self.targets,
            indicators: self.indicators.unwrap_or(defaults.indicators),
            history_days: self.history_days.unwrap_or(defaults.history_days),
            memory_path: self.memory_path.unwrap_or(defaults.memory_path),
            model: self.model.unwrap_or(defaults.model),
            max_narrative_tokens: self
                .max_narrative_tokens
                .unwrap_or(defaults.max_narrative_tokens),
            temperature: self.temperature.or(defaults.temperature),
        };

        config.validate()?;
        Ok(config)
    }
}
