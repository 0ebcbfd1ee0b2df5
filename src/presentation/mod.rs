// Presentation layer - HTTP surface for the chart widget
pub mod app_state;
pub mod handlers;
