// Chart widget - Derives the multi-metric view from a batch of readings
use crate::domain::chart::{ChartView, DisplayPoint, LineChart};
use crate::domain::error::ChartError;
use crate::domain::range::RangeSelection;
use crate::domain::reading::Reading;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::str::FromStr;

/// Order in which the feed hands over readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum InputOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl FromStr for InputOrder {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest_first" => Ok(InputOrder::NewestFirst),
            "oldest_first" => Ok(InputOrder::OldestFirst),
            other => Err(ChartError::UnknownInputOrder(other.to_string())),
        }
    }
}

impl TryFrom<String> for InputOrder {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone)]
pub struct ChartWidget {
    range: RangeSelection,
    input_order: InputOrder,
    offset: FixedOffset,
}

impl ChartWidget {
    pub fn new(range: RangeSelection, input_order: InputOrder, offset: FixedOffset) -> Self {
        Self {
            range,
            input_order,
            offset,
        }
    }

    pub fn range(&self) -> RangeSelection {
        self.range
    }

    /// Applied when the user picks another window in the selector.
    pub fn set_range(&mut self, range: RangeSelection) {
        if range != self.range {
            tracing::debug!("Range changed from {} to {}", self.range, range);
        }
        self.range = range;
    }

    /// Readings inside the selected window, mapped for plotting and ordered
    /// oldest first.
    pub fn derive(&self, readings: &[Reading], now: DateTime<Utc>) -> Vec<DisplayPoint> {
        let cutoff = now - self.range.window();

        let mut points: Vec<DisplayPoint> = readings
            .iter()
            .filter(|reading| match reading.instant(self.offset) {
                Some(instant) => instant >= cutoff,
                None => {
                    tracing::debug!("Dropping reading with unparsable timestamp {:?}", reading.timestamp);
                    false
                }
            })
            .map(|reading| DisplayPoint::from_reading(reading, self.offset))
            .collect();

        if self.input_order == InputOrder::NewestFirst {
            points.reverse();
        }

        points
    }

    pub fn render(&self, readings: &[Reading], is_loading: bool, now: DateTime<Utc>) -> ChartView {
        if is_loading {
            return ChartView::Loading { range: self.range };
        }

        let points = self.derive(readings, now);
        tracing::debug!(
            "Derived {} of {} readings for range {}",
            points.len(),
            readings.len(),
            self.range
        );

        if points.is_empty() {
            ChartView::Empty { range: self.range }
        } else {
            ChartView::Chart(LineChart::new(self.range, points))
        }
    }
}

impl Default for ChartWidget {
    fn default() -> Self {
        Self::new(
            RangeSelection::default(),
            InputOrder::default(),
            Utc.fix(),
        )
    }
}
