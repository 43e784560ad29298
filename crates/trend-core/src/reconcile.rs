//! Reconciliation of current snapshots against prior memory
//!
//! The produced deltas are the error signal driving reflective analysis in
//! the narrative prompt. They are derived per run and never persisted.

use crate::memory::{Direction, MemoryRecord};
use crate::snapshot::AssetSnapshot;
use serde::ser::Serializer;
use serde::Serialize;

/// Relative error with an explicit sentinel for a zero prior price
///
/// Serializes as a bare number, or the string `"undefined"` when the
/// denominator was zero - never infinity, never an exception.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelativeError {
    Defined(f64),
    Undefined,
}

impl Serialize for RelativeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Defined(value) => serializer.serialize_f64(*value),
            Self::Undefined => serializer.serialize_str("undefined"),
        }
    }
}

/// Discrepancy between a symbol's current and previously recorded price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    /// Ticker symbol, always present in the current snapshot set
    pub symbol: String,
    /// Price recorded by the prior cycle
    pub prior_price: f64,
    /// Price observed this cycle
    pub current_price: f64,
    /// `current_price - prior_price`
    pub absolute_error: f64,
    /// Absolute error relative to the prior price
    pub relative_error: RelativeError,
    /// Whether the observed move matched the recorded forecast direction;
    /// unset when no prior directional claim exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction_agreement: Option<bool>,
}

/// Compare current snapshots against the prior memory record
///
/// One delta per symbol present in both, in snapshot order. Symbols new to
/// this run (first sight) and symbols dropped from the target list produce
/// no delta and no error.
pub fn reconcile(snapshots: &[AssetSnapshot], memory: &MemoryRecord) -> Vec<Delta> {
    snapshots
        .iter()
        .filter_map(|snap| {
            let prior = memory.assets.get(&snap.symbol)?;
            let absolute_error = snap.last_price - prior.last_price;
            let relative_error = if prior.last_price == 0.0 {
                RelativeError::Undefined
            } else {
                RelativeError::Defined(absolute_error / prior.last_price)
            };
            // No agreement is invented when the prior cycle made no
            // directional claim.
            let direction_agreement = prior
                .outlook
                .map(|outlook| Direction::of_change(absolute_error) == outlook);

            Some(Delta {
                symbol: snap.symbol.clone(),
                prior_price: prior.last_price,
                current_price: snap.last_price,
                absolute_error,
                relative_error,
                direction_agreement,
            })
        })
        .collect()
}
