// Application state for HTTP handlers
use crate::application::chart_widget::ChartWidget;
use crate::application::reading_feed::ReadingFeed;
use crate::infrastructure::svg_renderer::Layout;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<dyn ReadingFeed>,
    /// Template cloned per request; the selector only changes the copy.
    pub widget: ChartWidget,
    pub layout: Layout,
}
