use crate::application::chart_widget::InputOrder;
use crate::domain::range::RangeSelection;
use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    #[serde(default = "default_feed_path")]
    pub path: PathBuf,
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    #[serde(default)]
    pub default_range: RangeSelection,
    #[serde(default)]
    pub input_order: InputOrder,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_feed_path() -> PathBuf {
    PathBuf::from("data/readings.json")
}

fn default_width() -> u32 {
    720
}

fn default_height() -> u32 {
    256
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            path: default_feed_path(),
            refresh_secs: None,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_range: RangeSelection::default(),
            input_order: InputOrder::default(),
            utc_offset_minutes: 0,
            width: default_width(),
            height: default_height(),
        }
    }
}

impl FeedSettings {
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

impl DisplaySettings {
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .with_context(|| format!("utc_offset_minutes {} is out of range", self.utc_offset_minutes))
    }
}

/// `CHART__SECTION__KEY` variables, e.g. `CHART__DISPLAY__DEFAULT_RANGE=7d`.
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("CHART")
        .separator("__")
        .try_parsing(true)
}

/// Reads `config/chart.*` (optional) and `CHART__SECTION__KEY` overrides.
pub fn load_chart_config() -> anyhow::Result<ChartConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/chart").required(false))
        .add_source(env_overrides())
        .build()?;

    Ok(settings.try_deserialize()?)
}
