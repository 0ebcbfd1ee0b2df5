// Error types shared by the widget, the feed and the HTTP layer
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown range '{0}', expected one of 24h, 7d, 30d")]
    UnknownRange(String),

    #[error("unknown input order '{0}', expected newest_first or oldest_first")]
    UnknownInputOrder(String),

    #[error("failed to read readings from {}", path.display())]
    FeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse readings from {}", path.display())]
    FeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
