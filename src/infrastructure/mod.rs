// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_feed;
pub mod http_response;
pub mod svg_renderer;
