//! Report generation for trend-rs
//!
//! Wires the analytics core to its collaborators:
//!
//! - [`config`]: the target list and run parameters
//! - [`prompt`]: the minijinja analyst prompt fed to the narrative provider
//! - [`render`]: the document renderer seam and Markdown implementation
//! - [`pipeline`]: one dependency-injected report cycle
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trend_core::JsonMemoryStore;
//! use trend_llm::AnthropicProvider;
//! use trend_market::YahooMarketData;
//! use trend_report::{MarkdownRenderer, ReportConfig, ReportPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ReportConfig::builder()
//!         .symbols(["AAPL", "MSFT"])
//!         .build()?;
//!     let store = Box::new(JsonMemoryStore::new(config.memory_path.clone()));
//!
//!     let pipeline = ReportPipeline::new(
//!         config,
//!         Arc::new(YahooMarketData::new()),
//!         Arc::new(AnthropicProvider::from_env()?),
//!         Box::new(MarkdownRenderer::new()),
//!         store,
//!     );
//!     let report = pipeline.run().await?;
//!     println!("{}", report.document);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod render;

// Re-export main types for convenience
pub use config::{ReportConfig, TargetSpec};
pub use error::{ReportError, Result};
pub use pipeline::{ReportPipeline, RunReport};
pub use render::{DocumentRenderer, MarkdownRenderer};
