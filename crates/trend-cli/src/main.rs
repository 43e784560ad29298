//! Command-line interface for trend-rs
//!
//! Runs one report cycle: fetch, analyze, reconcile, narrate, render, and
//! persist the new memory. Scheduling belongs to whatever invokes this
//! binary (cron, CI, a shell loop).

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use trend_core::JsonMemoryStore;
use trend_llm::{AnthropicProvider, NarrativeProvider, NullProvider};
use trend_market::{CachedMarketData, YahooMarketData};
use trend_report::{MarkdownRenderer, ReportConfig, ReportPipeline};

#[derive(Parser, Debug)]
#[command(name = "trend-cli")]
#[command(about = "Generate a market trend report", long_about = None)]
struct Args {
    /// Target symbols, in report order (comma-separated or repeated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    symbols: Vec<String>,

    /// Trailing price history span, in days
    #[arg(long, default_value_t = 120)]
    days: u32,

    /// Memory file path
    #[arg(long, default_value = "data/memory.json")]
    memory: PathBuf,

    /// Output document path
    #[arg(short, long, default_value = "out/report.md")]
    output: PathBuf,

    /// Also write the raw payload JSON next to the document
    #[arg(long)]
    payload: bool,

    /// Narrative model
    #[arg(long, default_value = "claude-sonnet-4-5-20250929")]
    model: String,

    /// Skip narrative generation (offline run)
    #[arg(long)]
    skip_narrative: bool,
}

fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trend_utils::init_tracing();

    let args = Args::parse();

    let config = ReportConfig::builder()
        .symbols(args.symbols)
        .history_days(args.days)
        .memory_path(args.memory)
        .model(args.model)
        .build()?;
    let store = Box::new(JsonMemoryStore::new(config.memory_path.clone()));

    let market = Arc::new(CachedMarketData::new(
        YahooMarketData::new(),
        Duration::from_secs(60),
    ));
    let narrative: Arc<dyn NarrativeProvider> = if args.skip_narrative {
        Arc::new(NullProvider::new())
    } else {
        Arc::new(AnthropicProvider::from_env()?)
    };
    info!(narrator = narrative.name(), "starting report cycle");

    let pipeline = ReportPipeline::new(
        config,
        market,
        narrative,
        Box::new(MarkdownRenderer::new()),
        store,
    );
    let report = pipeline.run().await?;

    if !report.skipped.is_empty() {
        warn!(skipped = ?report.skipped, "some symbols were excluded from this run");
    }

    write_output(&args.output, &report.document)?;
    info!(path = %args.output.display(), "report written");

    if args.payload {
        let path = args.output.with_extension("json");
        write_output(&path, &serde_json::to_string_pretty(&report.payload)?)?;
        info!(path = %path.display(), "payload written");
    }

    Ok(())
}
