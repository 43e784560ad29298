//! Run-to-run feedback memory
//!
//! Exactly one memory record exists at a time: the state persisted by the
//! previous cycle. It is read at run start and fully overwritten at run
//! end. A missing or unreadable record degrades reconciliation to first-run
//! behavior instead of blocking report generation.

use crate::error::{CoreError, Result};
use crate::snapshot::AssetSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Upper bound on the persisted narrative excerpt, in characters
pub const MAX_EXCERPT_CHARS: usize = 2000;

/// A directional forecast recorded by a prior cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// Direction implied by a signed price change
    pub fn of_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// Per-symbol state carried over from the previous cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMemory {
    /// Last price reported for the symbol
    pub last_price: f64,
    /// Timestamp that price was reported for
    pub as_of_date: DateTime<Utc>,
    /// Directional forecast, when the prior cycle recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlook: Option<Direction>,
}

/// The single persisted prior-cycle record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// When the record was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,
    /// Short excerpt of the prior cycle's narrative, for prompt context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_excerpt: Option<String>,
    /// Symbol-keyed prior state
    #[serde(default)]
    pub assets: BTreeMap<String, AssetMemory>,
}

impl MemoryRecord {
    /// Build the record to persist at the end of a run
    ///
    /// The excerpt is truncated to [`MAX_EXCERPT_CHARS`] on a char boundary.
    /// No outlook is recorded here; callers that persist a directional claim
    /// set [`AssetMemory::outlook`] themselves.
    pub fn from_snapshots(
        snapshots: &[AssetSnapshot],
        as_of: DateTime<Utc>,
        narrative_excerpt: Option<&str>,
    ) -> Self {
        let assets = snapshots
            .iter()
            .map(|snap| {
                (
                    snap.symbol.clone(),
                    AssetMemory {
                        last_price: snap.last_price,
                        as_of_date: snap.as_of,
                        outlook: None,
                    },
                )
            })
            .collect();

        Self {
            as_of: Some(as_of),
            narrative_excerpt: narrative_excerpt.map(truncate_excerpt),
            assets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn truncate_excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_EXCERPT_CHARS {
        text.to_string()
    } else {
        text.chars().take(MAX_EXCERPT_CHARS).collect()
    }
}

/// Persistence seam for the feedback memory
///
/// Injected into the pipeline so no in-process global holds state between
/// runs. Single-writer usage: one run loads at start and saves at end.
pub trait MemoryStore: Send + Sync {
    /// The most recently persisted record, or the empty record if none
    /// exists or the stored form is unreadable
    fn load(&self) -> MemoryRecord;

    /// Persist the full record, replacing any prior content
    fn save(&self, record: &MemoryRecord) -> Result<()>;
}

/// File-backed memory store (one JSON document)
pub struct JsonMemoryStore {
    path: PathBuf,
}

impl JsonMemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<MemoryRecord> {
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw)
            .map_err(|e| CoreError::MemoryCorrupt(format!("{}: {e}", self.path.display())))
    }
}

impl MemoryStore for JsonMemoryStore {
    fn load(&self) -> MemoryRecord {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no prior memory, starting empty");
            return MemoryRecord::default();
        }
        match self.read() {
            Ok(record) => record,
            Err(err) => {
                // Corruption must not block report generation; degrade to
                // first-run behavior.
                warn!(path = %self.path.display(), error = %err, "memory unreadable, starting empty");
                MemoryRecord::default()
            }
        }
    }

    fn save(&self, record: &MemoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write the full document aside, then rename: the next run sees
        // either the complete new state or the untouched prior one.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record() -> MemoryRecord {
        let mut assets = BTreeMap::new();
        assets.insert(
            "AAA".to_string(),
            AssetMemory {
                last_price: 100.0,
                as_of_date: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                outlook: Some(Direction::Up),
            },
        );
        MemoryRecord {
            as_of: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            narrative_excerpt: Some("markets were calm".to_string()),
            assets,
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonMemoryStore::new(dir.path().join("memory.json"));

        let record = record();
        store.save(&record).unwrap();
        assert_eq!(store.load(), record);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonMemoryStore::new(dir.path().join("absent.json"));
        let loaded = store.load();
        assert!(loaded.is_empty());
        assert!(loaded.narrative_excerpt.is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        fs::write(&path, "{not json at all").unwrap();

        let store = JsonMemoryStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_replaces_prior_content() {
        let dir = TempDir::new().unwrap();
        let store = JsonMemoryStore::new(dir.path().join("memory.json"));

        store.save(&record()).unwrap();
        let replacement = MemoryRecord::default();
        store.save(&replacement).unwrap();
        assert_eq!(store.load(), replacement);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonMemoryStore::new(dir.path().join("nested/state/memory.json"));
        store.save(&MemoryRecord::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_excerpt_truncated() {
        let long = "x".repeat(MAX_EXCERPT_CHARS + 500);
        let record = MemoryRecord::from_snapshots(&[], Utc::now(), Some(&long));
        assert_eq!(
            record.narrative_excerpt.unwrap().chars().count(),
            MAX_EXCERPT_CHARS
        );
    }

    #[test]
    fn test_direction_of_change() {
        assert_eq!(Direction::of_change(0.5), Direction::Up);
        assert_eq!(Direction::of_change(-0.5), Direction::Down);
        assert_eq!(Direction::of_change(0.0), Direction::Flat);
    }
}
