// Look-back window selected on the chart
use super::error::ChartError;
use chrono::Duration;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum RangeSelection {
    #[default]
    LastDay,
    LastWeek,
    LastMonth,
}

impl RangeSelection {
    pub fn all() -> &'static [RangeSelection] {
        &[
            RangeSelection::LastDay,
            RangeSelection::LastWeek,
            RangeSelection::LastMonth,
        ]
    }

    pub fn window_hours(&self) -> i64 {
        match self {
            RangeSelection::LastDay => 24,
            RangeSelection::LastWeek => 24 * 7,
            RangeSelection::LastMonth => 24 * 30,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::hours(self.window_hours())
    }

    /// Label used by the selector and the `range` query parameter.
    pub fn label(&self) -> &'static str {
        match self {
            RangeSelection::LastDay => "24h",
            RangeSelection::LastWeek => "7d",
            RangeSelection::LastMonth => "30d",
        }
    }
}

impl fmt::Display for RangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RangeSelection {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeSelection::all()
            .iter()
            .copied()
            .find(|r| r.label() == s.trim())
            .ok_or_else(|| ChartError::UnknownRange(s.to_string()))
    }
}

impl TryFrom<String> for RangeSelection {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
