// Feed trait for the readings handed to the chart widget
use crate::domain::reading::Reading;
use async_trait::async_trait;

/// Inputs for one render pass: the readings plus whether they are still
/// being fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub readings: Vec<Reading>,
    pub is_loading: bool,
}

impl FeedSnapshot {
    pub fn loading() -> Self {
        Self {
            readings: Vec::new(),
            is_loading: true,
        }
    }

    pub fn ready(readings: Vec<Reading>) -> Self {
        Self {
            readings,
            is_loading: false,
        }
    }
}

#[async_trait]
pub trait ReadingFeed: Send + Sync {
    /// Current readings, newest first unless configured otherwise
    async fn snapshot(&self) -> FeedSnapshot;
}
