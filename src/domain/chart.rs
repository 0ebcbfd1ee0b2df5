// Chart view models derived from readings on every render
use super::range::RangeSelection;
use super::reading::Reading;
use chrono::FixedOffset;

/// pH is multiplied by this factor before plotting.
pub const ACIDITY_SCALE: f64 = 10.0;
/// Dissolved solids (ppm) are divided by this factor before plotting.
pub const SOLIDS_SCALE: f64 = 10.0;

pub const INVALID_TIME_LABEL: &str = "Invalid Date";
pub const NO_DATA_MESSAGE: &str = "No sensor data available";

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPoint {
    pub time_label: String,
    pub temperature: f64,
    pub scaled_acidity: f64,
    pub scaled_solids: f64,
}

impl DisplayPoint {
    pub fn from_reading(reading: &Reading, offset: FixedOffset) -> Self {
        let time_label = reading
            .instant(offset)
            .map(|t| t.with_timezone(&offset).format("%H:%M").to_string())
            .unwrap_or_else(|| INVALID_TIME_LABEL.to_string());

        Self {
            time_label,
            temperature: reading.temperature,
            scaled_acidity: reading.acidity * ACIDITY_SCALE,
            scaled_solids: reading.dissolved_solids_level / SOLIDS_SCALE,
        }
    }

    /// Tooltip rows in original units: the time header followed by one
    /// `(series name, formatted value)` pair per series.
    pub fn tooltip(&self) -> (String, Vec<(&'static str, String)>) {
        let rows = SeriesKey::ALL
            .iter()
            .map(|key| (key.name(), key.format_tooltip(key.value(self))))
            .collect();

        (format!("Time: {}", self.time_label), rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKey {
    Temperature,
    Acidity,
    DissolvedSolids,
}

impl SeriesKey {
    pub const ALL: [SeriesKey; 3] = [
        SeriesKey::Temperature,
        SeriesKey::Acidity,
        SeriesKey::DissolvedSolids,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SeriesKey::Temperature => "temperature",
            SeriesKey::Acidity => "ph",
            SeriesKey::DissolvedSolids => "tdsLevel",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SeriesKey::Temperature => "Temperature",
            SeriesKey::Acidity => "pH",
            SeriesKey::DissolvedSolids => "TDS Level",
        }
    }

    pub fn legend_label(&self) -> &'static str {
        match self {
            SeriesKey::Temperature => "Temperature",
            SeriesKey::Acidity => "pH (×10)",
            SeriesKey::DissolvedSolids => "TDS Level (÷10)",
        }
    }

    /// Line color as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SeriesKey::Temperature => (0xef, 0x44, 0x44),
            SeriesKey::Acidity => (0x8b, 0x5c, 0xf6),
            SeriesKey::DissolvedSolids => (0x10, 0xb9, 0x81),
        }
    }

    /// Plotted (scaled) value of this series at a point.
    pub fn value(&self, point: &DisplayPoint) -> f64 {
        match self {
            SeriesKey::Temperature => point.temperature,
            SeriesKey::Acidity => point.scaled_acidity,
            SeriesKey::DissolvedSolids => point.scaled_solids,
        }
    }

    /// Undo the plot scaling and format in the series' own unit.
    pub fn format_tooltip(&self, plotted: f64) -> String {
        match self {
            SeriesKey::Temperature => format!("{:.1}°C", plotted),
            SeriesKey::Acidity => format!("{:.1}", plotted / ACIDITY_SCALE),
            SeriesKey::DissolvedSolids => format!("{:.0} ppm", plotted * SOLIDS_SCALE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub range: RangeSelection,
    pub points: Vec<DisplayPoint>,
}

impl LineChart {
    pub fn new(range: RangeSelection, points: Vec<DisplayPoint>) -> Self {
        Self { range, points }
    }

    pub fn series(&self) -> &'static [SeriesKey] {
        &SeriesKey::ALL
    }

    /// Smallest and largest plotted value across all series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .flat_map(|p| SeriesKey::ALL.iter().map(move |k| k.value(p)))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// What the widget shows for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Loading { range: RangeSelection },
    Empty { range: RangeSelection },
    Chart(LineChart),
}

impl ChartView {
    pub fn range(&self) -> RangeSelection {
        match self {
            ChartView::Loading { range } | ChartView::Empty { range } => *range,
            ChartView::Chart(chart) => chart.range,
        }
    }

    pub fn points(&self) -> &[DisplayPoint] {
        match self {
            ChartView::Chart(chart) => &chart.points,
            _ => &[],
        }
    }
}
