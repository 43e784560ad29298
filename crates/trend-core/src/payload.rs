//! Report payload assembly
//!
//! Merges the run's snapshots and deltas into the single structure handed
//! to the narrative and rendering collaborators. No numeric computation
//! happens here; this stage only shapes a stable, self-describing payload.

use crate::reconcile::Delta;
use crate::snapshot::AssetSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// One asset's entry in the report payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub indicators: BTreeMap<String, f64>,
    /// Reconciliation result; absent for first-sight symbols
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
}

/// The structured document handed to downstream collaborators
///
/// Asset order follows the snapshot order, which in turn follows the
/// caller's target configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPayload {
    pub generated_at: DateTime<Utc>,
    pub assets: Vec<AssetReport>,
}

/// Merge snapshots and deltas into one ordered payload
pub fn assemble(
    snapshots: &[AssetSnapshot],
    deltas: Vec<Delta>,
    generated_at: DateTime<Utc>,
) -> ReportPayload {
    let mut by_symbol: HashMap<String, Delta> = deltas
        .into_iter()
        .map(|delta| (delta.symbol.clone(), delta))
        .collect();

    let assets = snapshots
        .iter()
        .map(|snap| AssetReport {
            symbol: snap.symbol.clone(),
            name: snap.display_name.clone(),
            price: snap.last_price,
            change: snap.price_change,
            indicators: snap.indicators.clone(),
            delta: by_symbol.remove(&snap.symbol),
        })
        .collect();

    ReportPayload {
        generated_at,
        assets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::RelativeError;
    use chrono::TimeZone;

    fn snapshot(symbol: &str, price: f64) -> AssetSnapshot {
        AssetSnapshot {
            symbol: symbol.to_string(),
            display_name: format!("{symbol} Inc"),
            as_of: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
            last_price: price,
            price_change: 1.0,
            indicators: BTreeMap::new(),
        }
    }

    fn delta(symbol: &str) -> Delta {
        Delta {
            symbol: symbol.to_string(),
            prior_price: 1.0,
            current_price: 2.0,
            absolute_error: 1.0,
            relative_error: RelativeError::Defined(1.0),
            direction_agreement: None,
        }
    }

    #[test]
    fn test_assemble_preserves_snapshot_order() {
        let snapshots = vec![snapshot("ZZZ", 1.0), snapshot("AAA", 2.0), snapshot("MMM", 3.0)];
        let payload = assemble(&snapshots, Vec::new(), Utc::now());
        let order: Vec<&str> = payload.assets.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(order, vec!["ZZZ", "AAA", "MMM"]);
    }

    #[test]
    fn test_assemble_attaches_deltas_by_symbol() {
        let snapshots = vec![snapshot("AAA", 2.0), snapshot("BBB", 3.0)];
        let payload = assemble(&snapshots, vec![delta("BBB")], Utc::now());

        assert!(payload.assets[0].delta.is_none());
        assert_eq!(
            payload.assets[1].delta.as_ref().map(|d| d.symbol.as_str()),
            Some("BBB")
        );
    }

    #[test]
    fn test_payload_serializes_self_describing() {
        let payload = assemble(&[snapshot("AAA", 2.0)], vec![delta("AAA")], Utc::now());
        let value = serde_json::to_value(&payload).unwrap();
        let asset = &value["assets"][0];
        assert_eq!(asset["symbol"], "AAA");
        assert_eq!(asset["name"], "AAA Inc");
        assert_eq!(asset["delta"]["relative_error"], 1.0);
    }
}
