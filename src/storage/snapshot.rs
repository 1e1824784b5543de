use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tokio::fs;
use tracing::warn;

use crate::crawler::models::{FloorPlan, Snapshot};

/// Reads and writes the most recent listing set as a JSON blob keyed by
/// nothing but the file path. The snapshot is the diff baseline for the next
/// run; it is overwritten in full after every successful extraction.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing or malformed snapshot reads as "no prior data"; the run
    /// then classifies as changed instead of failing.
    pub async fn load(&self) -> Option<Snapshot> {
        let raw = fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable snapshot");
                None
            }
        }
    }

    pub async fn save(&self, floor_plans: &[FloorPlan]) -> Result<()> {
        let snapshot = Snapshot {
            timestamp: Utc::now(),
            floor_plans: floor_plans.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}
