//! Core analytics for trend-rs
//!
//! This crate turns per-asset price history into a structured,
//! self-correcting report payload:
//!
//! - [`indicators`]: pure derivation of technical indicator columns
//!   (moving averages, Bollinger bands, MACD) with explicit warm-up gaps
//! - [`snapshot`]: immutable per-asset, per-run price + indicator records
//! - [`memory`]: the single persisted prior-cycle record and its store seam
//! - [`reconcile`]: deltas between current snapshots and prior memory
//! - [`payload`]: the ordered, serializable structure handed to narrative
//!   and rendering collaborators
//!
//! Everything here is synchronous and, apart from the file-backed memory
//! store, free of I/O. Fetching quotes, generating narrative text and
//! rendering documents live in the collaborator crates.

pub mod error;
pub mod indicators;
pub mod memory;
pub mod payload;
pub mod reconcile;
pub mod series;
pub mod snapshot;

// Re-export main types for convenience
pub use error::{CoreError, Result};
pub use indicators::{IndicatorConfig, IndicatorSet};
pub use memory::{AssetMemory, Direction, JsonMemoryStore, MemoryRecord, MemoryStore};
pub use payload::{AssetReport, ReportPayload};
pub use reconcile::{Delta, RelativeError, reconcile};
pub use series::{PricePoint, PriceSeries};
pub use snapshot::AssetSnapshot;
