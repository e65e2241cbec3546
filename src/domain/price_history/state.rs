//! Historical chart state — series derivation, time-field toggle, click-to-inspect.
//!
//! Pure state: no rendering. [`super::HistoricalChart`] pairs it with a chart handle.

use super::PricePoint;
use crate::chart::LineChartSpec;
use chrono::{DateTime, Utc};

/// Series title of the historical chart.
pub const HISTORY_SERIES_TITLE: &str = "Close Price (USDT)";

/// Which candle timestamp to plot against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeField {
    Open,
    #[default]
    Close,
}

impl TimeField {
    pub fn toggled(self) -> Self {
        match self {
            TimeField::Open => TimeField::Close,
            TimeField::Close => TimeField::Open,
        }
    }
}

/// Chart-ready series derived from points and a time field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// Date-only axis labels.
    pub labels: Vec<String>,
    /// Closing prices.
    pub values: Vec<f64>,
    /// Full timestamps behind each label.
    pub timestamps: Vec<DateTime<Utc>>,
}

impl ChartSeries {
    pub fn from_points(points: &[PricePoint], field: TimeField) -> Self {
        let timestamps: Vec<DateTime<Utc>> = points.iter().map(|p| p.time(field)).collect();
        Self {
            labels: timestamps.iter().map(format_date).collect(),
            values: points.iter().map(|p| p.close).collect(),
            timestamps,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The point the user last clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl Selection {
    /// Readout line shown under the chart.
    pub fn describe(&self) -> String {
        format!("{} - Close: {}", format_datetime(&self.timestamp), self.price)
    }
}

/// State of the historical chart component.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    points: Vec<PricePoint>,
    field: TimeField,
    series: ChartSeries,
    selected: Option<Selection>,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the point array. The selection refers to the old data and is cleared.
    pub fn set_points(&mut self, points: Vec<PricePoint>) {
        self.points = points;
        self.selected = None;
        self.recompute();
    }

    /// Switch the plotted time field. Returns `true` if it changed.
    pub fn set_time_field(&mut self, field: TimeField) -> bool {
        if self.field == field {
            return false;
        }
        self.field = field;
        self.recompute();
        true
    }

    /// Handle a click. `None` or an out-of-range index (a click outside any
    /// point) leaves the previous selection untouched.
    pub fn click(&mut self, index: Option<usize>) -> Option<&Selection> {
        if let Some(i) = index {
            if let (Some(ts), Some(price)) = (self.series.timestamps.get(i), self.series.values.get(i)) {
                self.selected = Some(Selection {
                    timestamp: *ts,
                    price: *price,
                });
            }
        }
        self.selected.as_ref()
    }

    /// Tooltip text for a hovered point: full date-time and price.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let ts = self.series.timestamps.get(index)?;
        let price = self.series.values.get(index)?;
        Some(format!("{}: {}", format_datetime(ts), price))
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn time_field(&self) -> TimeField {
        self.field
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    pub fn to_spec(&self) -> LineChartSpec {
        LineChartSpec {
            title: HISTORY_SERIES_TITLE.to_string(),
            labels: self.series.labels.clone(),
            values: self.series.values.clone(),
            show_points: true,
        }
    }

    fn recompute(&mut self) {
        self.series = ChartSeries::from_points(&self.points, self.field);
    }
}

/// Date-only label (UTC).
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Full date-time (UTC).
pub fn format_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
