use std::path::PathBuf;

use tracing::debug;

use crate::error::ScheduleError;
use crate::models::ScheduleSnapshot;

/// Best-effort durable copy of the latest snapshot. Written by the refresher
/// after every successful fetch; never read back on the cache-miss path (a
/// cold start always refetches). Failures are the caller's to log, not to
/// propagate.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn save(&self, snapshot: &ScheduleSnapshot) -> Result<(), ScheduleError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, body).await?;

        debug!(path = %self.path.display(), "schedule snapshot persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn save_writes_parseable_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("schedule.json");
        let store = SnapshotStore::new(&path);

        let snapshot = ScheduleSnapshot::new("https://example.test", Utc::now(), vec![]);
        store.save(&snapshot).await.expect("save should succeed");

        let raw = std::fs::read(&path).expect("file should exist");
        let parsed: ScheduleSnapshot = serde_json::from_slice(&raw).expect("valid json");
        assert_eq!(parsed.source_url, "https://example.test");
    }

    #[tokio::test]
    async fn save_overwrites_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("schedule.json");
        let store = SnapshotStore::new(&path);

        let first = ScheduleSnapshot::new("https://first.test", Utc::now(), vec![]);
        let second = ScheduleSnapshot::new("https://second.test", Utc::now(), vec![]);
        store.save(&first).await.expect("first save");
        store.save(&second).await.expect("second save");

        let raw = std::fs::read(&path).expect("file should exist");
        let parsed: ScheduleSnapshot = serde_json::from_slice(&raw).expect("valid json");
        assert_eq!(parsed.source_url, "https://second.test");
    }
}
