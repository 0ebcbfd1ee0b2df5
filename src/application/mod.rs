// Application layer - Widget derivation and the feed it reads from
pub mod chart_widget;
pub mod reading_feed;
