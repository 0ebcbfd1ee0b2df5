// JSON file feed - Serves a readings snapshot loaded from disk
use crate::application::reading_feed::{FeedSnapshot, ReadingFeed};
use crate::domain::error::ChartError;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
    state: Arc<RwLock<FeedSnapshot>>,
}

impl FileFeed {
    /// Starts in the loading state until the first `refresh` completes.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Arc::new(RwLock::new(FeedSnapshot::loading())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Reading>, ChartError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ChartError::FeedRead {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| ChartError::FeedParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Reload the file. On failure the previous readings stay in place, but
    /// the feed leaves the loading state so the widget does not spin forever.
    pub async fn refresh(&self) -> Result<usize, ChartError> {
        match self.load().await {
            Ok(readings) => {
                let count = readings.len();
                *self.state.write().await = FeedSnapshot::ready(readings);
                tracing::info!("Loaded {} readings from {}", count, self.path.display());
                Ok(count)
            }
            Err(e) => {
                self.state.write().await.is_loading = false;
                Err(e)
            }
        }
    }

    /// Load in the background, then reload every `every` if given.
    pub fn spawn(&self, every: Option<Duration>) -> JoinHandle<()> {
        let feed = self.clone();

        tokio::spawn(async move {
            if let Err(e) = feed.refresh().await {
                tracing::error!("Initial feed load failed: {:#}", anyhow::Error::new(e));
            }

            let Some(every) = every else {
                return;
            };

            let mut ticker = tokio::time::interval(every);
            // First tick fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = feed.refresh().await {
                    tracing::warn!("Feed refresh failed, keeping previous readings: {:#}", anyhow::Error::new(e));
                }
            }
        })
    }
}

#[async_trait]
impl ReadingFeed for FileFeed {
    async fn snapshot(&self) -> FeedSnapshot {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("aquarium-chart-{}-{}.json", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const READINGS: &str = r#"[
        {"timestamp":"2026-10-16T11:00:00Z","temperature":22.5,"ph":6.8,"tdsLevel":450},
        {"timestamp":"2026-10-16T10:00:00Z","temperature":22.4,"ph":6.9,"tdsLevel":452}
    ]"#;

    #[tokio::test]
    async fn test_loading_until_first_refresh() {
        let path = scratch_file("first-refresh", READINGS);
        let feed = FileFeed::new(&path);

        assert!(feed.snapshot().await.is_loading);
        assert_eq!(feed.refresh().await.unwrap(), 2);

        let snapshot = feed.snapshot().await;
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.readings.len(), 2);
        assert_eq!(snapshot.readings[0].acidity, 6.8);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_readings() {
        let path = scratch_file("keeps-previous", READINGS);
        let feed = FileFeed::new(&path);
        feed.refresh().await.unwrap();

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(feed.refresh().await, Err(ChartError::FeedParse { .. })));
        assert_eq!(feed.snapshot().await.readings.len(), 2);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_stops_loading() {
        let feed = FileFeed::new(std::env::temp_dir().join("aquarium-chart-does-not-exist.json"));

        assert!(matches!(feed.refresh().await, Err(ChartError::FeedRead { .. })));
        let snapshot = feed.snapshot().await;
        assert!(!snapshot.is_loading);
        assert!(snapshot.readings.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_loads_in_background() {
        let path = scratch_file("spawned", READINGS);
        let feed = FileFeed::new(&path);

        feed.spawn(None).await.unwrap();
        assert_eq!(feed.snapshot().await, FeedSnapshot::ready(feed.load().await.unwrap()));

        std::fs::remove_file(path).unwrap();
    }
}
