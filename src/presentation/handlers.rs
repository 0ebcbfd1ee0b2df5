// HTTP request handlers
use crate::domain::range::RangeSelection;
use crate::infrastructure::http_response::{accepts_brotli, svg_response};
use crate::infrastructure::svg_renderer::render_svg;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the multi-metric chart for the selected range
pub async fn multi_metric_chart(
    Query(query): Query<RangeQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let mut widget = state.widget.clone();

    if let Some(label) = query.range.as_deref() {
        match label.parse::<RangeSelection>() {
            Ok(range) => widget.set_range(range),
            Err(e) => {
                tracing::debug!("Rejecting chart request: {}", e);
                return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
        }
    }

    let snapshot = state.feed.snapshot().await;
    tracing::debug!(
        "Rendering chart for range {} ({} readings, loading={})",
        widget.range(),
        snapshot.readings.len(),
        snapshot.is_loading
    );
    let view = widget.render(&snapshot.readings, snapshot.is_loading, Utc::now());
    let svg = match render_svg(&view, &state.layout) {
        Ok(svg) => svg,
        Err(e) => {
            tracing::error!("Failed to render chart: {:#}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match svg_response(svg, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_widget::ChartWidget;
    use crate::application::reading_feed::{FeedSnapshot, ReadingFeed};
    use crate::domain::reading::Reading;
    use crate::infrastructure::svg_renderer::Layout;
    use async_trait::async_trait;
    use chrono::Duration;

    struct StaticFeed(FeedSnapshot);

    #[async_trait]
    impl ReadingFeed for StaticFeed {
        async fn snapshot(&self) -> FeedSnapshot {
            self.0.clone()
        }
    }

    fn state(snapshot: FeedSnapshot) -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            feed: Arc::new(StaticFeed(snapshot)),
            widget: ChartWidget::default(),
            layout: Layout::default(),
        }))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn three_days_old() -> FeedSnapshot {
        let timestamp = (Utc::now() - Duration::days(3)).to_rfc3339();
        FeedSnapshot::ready(vec![Reading::new(timestamp, 23.0, 7.1, 420.0)])
    }

    #[tokio::test]
    async fn test_default_range_hides_old_reading() {
        let response = multi_metric_chart(
            Query(RangeQuery { range: None }),
            HeaderMap::new(),
            state(three_days_old()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("No sensor data available"));
        assert!(!body.contains("<polyline"));
    }

    #[tokio::test]
    async fn test_week_range_shows_old_reading() {
        let response = multi_metric_chart(
            Query(RangeQuery { range: Some("7d".to_string()) }),
            HeaderMap::new(),
            state(three_days_old()),
        )
        .await;

        let body = body_text(response).await;
        assert!(body.contains("class='plot'"));
        assert_eq!(body.matches("<g class='point'>").count(), 1);
        assert!(body.contains("TDS Level: 420 ppm"));
    }

    #[tokio::test]
    async fn test_loading_feed_renders_spinner() {
        let response = multi_metric_chart(
            Query(RangeQuery { range: None }),
            HeaderMap::new(),
            state(FeedSnapshot::loading()),
        )
        .await;

        let body = body_text(response).await;
        assert!(body.contains("class='spinner'"));
    }

    #[tokio::test]
    async fn test_unknown_range_is_bad_request() {
        let response = multi_metric_chart(
            Query(RangeQuery { range: Some("1y".to_string()) }),
            HeaderMap::new(),
            state(FeedSnapshot::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("unknown range '1y'"));
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }
}
