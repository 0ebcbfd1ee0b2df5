// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_widget::ChartWidget;
use crate::infrastructure::config::load_chart_config;
use crate::infrastructure::file_feed::FileFeed;
use crate::infrastructure::svg_renderer::Layout;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, multi_metric_chart};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_chart_config()?;

    // Start the feed in the background; requests see the loading state until it lands
    let feed = FileFeed::new(config.feed.path.clone());
    feed.spawn(config.feed.refresh_interval());
    tracing::info!("Serving readings from {}", feed.path().display());

    let widget = ChartWidget::new(
        config.display.default_range,
        config.display.input_order,
        config.display.offset()?,
    );

    let state = Arc::new(AppState {
        feed: Arc::new(feed),
        widget,
        layout: Layout::new(config.display.width, config.display.height),
    });

    // Compression is handled in the response builder, not by a layer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/widgets/multi-metric", get(multi_metric_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting aquarium-chart service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
