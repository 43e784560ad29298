//! The report pipeline
//!
//! One run per invocation: fetch price history for every target, derive
//! indicators and snapshots, reconcile against the prior cycle's memory,
//! generate the narrative, render the document and persist the new memory.
//! Collaborators are injected so variants differ by configuration, not by
//! copied scripts.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::prompt::{self, ANALYST_SYSTEM};
use crate::render::DocumentRenderer;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use trend_core::{
    AssetSnapshot, MemoryRecord, MemoryStore, ReportPayload, indicators, payload, reconcile,
};
use trend_llm::{NarrativeProvider, NarrativeRequest};
use trend_market::MarketDataProvider;

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The structured payload handed to the collaborators
    pub payload: ReportPayload,
    /// Narrative text from the provider
    pub narrative: String,
    /// Rendered document
    pub document: String,
    /// Symbols excluded from this run (failed fetch or empty series)
    pub skipped: Vec<String>,
}

/// Dependency-injected report pipeline
pub struct ReportPipeline {
    config: ReportConfig,
    market: Arc<dyn MarketDataProvider>,
    narrative: Arc<dyn NarrativeProvider>,
    renderer: Box<dyn DocumentRenderer>,
    store: Box<dyn MemoryStore>,
}

impl ReportPipeline {
    pub fn new(
        config: ReportConfig,
        market: Arc<dyn MarketDataProvider>,
        narrative: Arc<dyn NarrativeProvider>,
        renderer: Box<dyn DocumentRenderer>,
        store: Box<dyn MemoryStore>,
    ) -> Self {
        Self {
            config,
            market,
            narrative,
            renderer,
            store,
        }
    }

    /// Run one report cycle
    ///
    /// Per-asset failures are isolated: a symbol with no usable data is
    /// skipped and the run continues for the rest. Memory is saved only
    /// after the document is produced, so a failed run leaves the prior
    /// record untouched for the next cycle.
    #[instrument(skip(self), fields(targets = self.config.targets.len()))]
    pub async fn run(&self) -> Result<RunReport> {
        let memory = self.store.load();
        if memory.is_empty() {
            info!("no prior memory; reconciliation starts fresh");
        }

        let (snapshots, skipped) = self.collect_snapshots().await;
        let deltas = reconcile::reconcile(&snapshots, &memory);
        let generated_at = Utc::now();
        let payload = payload::assemble(&snapshots, deltas, generated_at);

        let rendered_prompt =
            prompt::analyst_prompt(&payload, memory.narrative_excerpt.as_deref())?;
        let response = self
            .narrative
            .narrate(NarrativeRequest {
                model: self.config.model.clone(),
                system: Some(ANALYST_SYSTEM.to_string()),
                prompt: rendered_prompt,
                max_tokens: self.config.max_narrative_tokens,
                temperature: self.config.temperature,
            })
            .await?;

        let document = self.renderer.render(&payload, &response.text)?;

        let record =
            MemoryRecord::from_snapshots(&snapshots, generated_at, Some(&response.text));
        self.store.save(&record)?;

        info!(
            assets = payload.assets.len(),
            skipped = skipped.len(),
            narrative_tokens = response.usage.output_tokens,
            "report cycle complete"
        );

        Ok(RunReport {
            payload,
            narrative: response.text,
            document,
            skipped,
        })
    }

    /// Fetch all targets concurrently, then build snapshots sequentially
    ///
    /// The core consumes the completed, ordered batch; concurrency stops at
    /// the acquisition seam.
    async fn collect_snapshots(&self) -> (Vec<AssetSnapshot>, Vec<String>) {
        let fetches = self.config.targets.iter().map(|target| {
            self.market
                .fetch_series(&target.symbol, self.config.history_days)
        });
        let results = join_all(fetches).await;

        let mut snapshots = Vec::with_capacity(self.config.targets.len());
        let mut skipped = Vec::new();

        for (target, result) in self.config.targets.iter().zip(results) {
            let fetched = match result {
                Ok(fetched) => fetched,
                Err(err) => {
                    warn!(symbol = %target.symbol, error = %err, "skipping asset: fetch failed");
                    skipped.push(target.symbol.clone());
                    continue;
                }
            };

            let set = indicators::compute(&fetched.series, &self.config.indicators);
            let display_name = target
                .display_name
                .clone()
                .or(fetched.display_name)
                .unwrap_or_else(|| target.symbol.clone());

            match AssetSnapshot::from_series(&target.symbol, display_name, &fetched.series, &set)
            {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(err) => {
                    warn!(symbol = %target.symbol, error = %err, "skipping asset: no usable data");
                    skipped.push(target.symbol.clone());
                }
            }
        }

        (snapshots, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetSpec;
    use crate::render::MarkdownRenderer;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::collections::HashMap;
    use tempfile::TempDir;
    use trend_core::{JsonMemoryStore, PricePoint, PriceSeries, RelativeError};
    use trend_llm::{LlmError, NarrativeResponse, TokenUsage};
    use trend_market::{MarketError, MarketSeries};

    fn series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + Duration::days(i as i64),
                open: close - 0.5,
                close,
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    /// Market fake serving canned series per symbol
    struct ScriptedMarket {
        series: HashMap<String, Vec<f64>>,
    }

    impl ScriptedMarket {
        fn new(entries: &[(&str, &[f64])]) -> Self {
            Self {
                series: entries
                    .iter()
                    .map(|&(symbol, closes)| (symbol.to_string(), closes.to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for ScriptedMarket {
        async fn fetch_series(
            &self,
            symbol: &str,
            _days: u32,
        ) -> trend_market::Result<MarketSeries> {
            let closes = self
                .series
                .get(symbol)
                .ok_or_else(|| MarketError::EmptySeries(symbol.to_string()))?;
            Ok(MarketSeries {
                symbol: symbol.to_string(),
                display_name: None,
                series: series(closes),
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    /// Narrative fake echoing a fixed string
    struct CannedNarrator;

    #[async_trait]
    impl NarrativeProvider for CannedNarrator {
        async fn narrate(
            &self,
            _request: NarrativeRequest,
        ) -> trend_llm::Result<NarrativeResponse> {
            Ok(NarrativeResponse {
                text: "Steady climb on both names.".to_string(),
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct FailingNarrator;

    #[async_trait]
    impl NarrativeProvider for FailingNarrator {
        async fn narrate(
            &self,
            _request: NarrativeRequest,
        ) -> trend_llm::Result<NarrativeResponse> {
            Err(LlmError::RequestFailed("provider down".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn config(dir: &TempDir, symbols: &[&str]) -> ReportConfig {
        ReportConfig::builder()
            .symbols(symbols.iter().copied())
            .history_days(30)
            .indicators(
                trend_core::IndicatorConfig::builder()
                    .ma_window(3)
                    .macd(2, 4, 3)
                    .build()
                    .unwrap(),
            )
            .memory_path(dir.path().join("memory.json"))
            .build()
            .unwrap()
    }

    fn pipeline(
        config: ReportConfig,
        market: ScriptedMarket,
        narrative: Arc<dyn NarrativeProvider>,
    ) -> ReportPipeline {
        let store = Box::new(JsonMemoryStore::new(config.memory_path.clone()));
        ReportPipeline::new(
            config,
            Arc::new(market),
            narrative,
            Box::new(MarkdownRenderer::new()),
            store,
        )
    }

    #[tokio::test]
    async fn test_run_produces_payload_and_memory() {
        let dir = TempDir::new().unwrap();
        let market = ScriptedMarket::new(&[("AAA", &[1.0, 2.0, 3.0, 4.0]), ("BBB", &[9.0, 8.0])]);
        let pipeline = pipeline(config(&dir, &["AAA", "BBB"]), market, Arc::new(CannedNarrator));

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.payload.assets.len(), 2);
        assert_eq!(report.payload.assets[0].symbol, "AAA");
        assert!(report.skipped.is_empty());
        assert!(report.document.contains("Steady climb"));

        let saved = JsonMemoryStore::new(dir.path().join("memory.json")).load();
        assert_eq!(saved.assets.len(), 2);
        assert_eq!(saved.assets["AAA"].last_price, 4.0);
        assert!(saved.narrative_excerpt.is_some());
    }

    #[tokio::test]
    async fn test_bad_asset_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let market = ScriptedMarket::new(&[("AAA", &[1.0, 2.0, 3.0])]);
        let pipeline = pipeline(
            config(&dir, &["AAA", "MISSING"]),
            market,
            Arc::new(CannedNarrator),
        );

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.payload.assets.len(), 1);
        assert_eq!(report.skipped, vec!["MISSING".to_string()]);
    }

    #[tokio::test]
    async fn test_second_run_reconciles_against_first() {
        let dir = TempDir::new().unwrap();

        let first = pipeline(
            config(&dir, &["AAA"]),
            ScriptedMarket::new(&[("AAA", &[90.0, 95.0, 100.0])]),
            Arc::new(CannedNarrator),
        );
        first.run().await.unwrap();

        let second = pipeline(
            config(&dir, &["AAA", "BBB"]),
            ScriptedMarket::new(&[("AAA", &[100.0, 105.0, 110.0]), ("BBB", &[50.0, 50.0])]),
            Arc::new(CannedNarrator),
        );
        let report = second.run().await.unwrap();

        let aaa = &report.payload.assets[0];
        let delta = aaa.delta.as_ref().unwrap();
        assert_eq!(delta.prior_price, 100.0);
        assert_eq!(delta.absolute_error, 10.0);
        assert_eq!(delta.relative_error, RelativeError::Defined(0.1));

        // First sight: no delta for the newly added symbol
        assert!(report.payload.assets[1].delta.is_none());
    }

    #[tokio::test]
    async fn test_failed_narrative_leaves_memory_untouched() {
        let dir = TempDir::new().unwrap();

        let first = pipeline(
            config(&dir, &["AAA"]),
            ScriptedMarket::new(&[("AAA", &[90.0, 95.0, 100.0])]),
            Arc::new(CannedNarrator),
        );
        first.run().await.unwrap();
        let before = JsonMemoryStore::new(dir.path().join("memory.json")).load();

        let failing = pipeline(
            config(&dir, &["AAA"]),
            ScriptedMarket::new(&[("AAA", &[100.0, 101.0, 102.0])]),
            Arc::new(FailingNarrator),
        );
        assert!(failing.run().await.is_err());

        let after = JsonMemoryStore::new(dir.path().join("memory.json")).load();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_run_with_no_usable_assets_still_completes() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(
            config(&dir, &["AAA"]),
            ScriptedMarket::new(&[]),
            Arc::new(CannedNarrator),
        );

        let report = pipeline.run().await.unwrap();
        assert!(report.payload.assets.is_empty());
        assert_eq!(report.skipped, vec!["AAA".to_string()]);
    }

    #[test]
    fn test_target_display_name_wins() {
        // Covered through config: the pipeline prefers the configured
        // display name over the provider's.
        let target = TargetSpec::named("AAA", "Asset A");
        assert_eq!(target.display_name.as_deref(), Some("Asset A"));
    }
}
