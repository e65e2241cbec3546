//! Price history domain — historical OHLC points and their chart.

pub mod chart;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use chart::HistoricalChart;
pub use state::{ChartSeries, ChartState, Selection, TimeField};

/// A single OHLC-like point, received verbatim from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub open_time: DateTime<Utc>,
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub close_time: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<f64>,
    pub trades: Option<u64>,
}

impl PricePoint {
    /// Timestamp of this point for the chosen time field.
    pub fn time(&self, field: TimeField) -> DateTime<Utc> {
        match field {
            TimeField::Open => self.open_time,
            TimeField::Close => self.close_time,
        }
    }
}

/// A converted `/prices` response.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub symbol: Option<String>,
    pub pair: Option<String>,
    pub interval: Option<String>,
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
    pub points: Vec<PricePoint>,
    /// The response body exactly as received.
    pub raw: serde_json::Value,
}

impl PriceHistory {
    /// Pretty-printed raw body, as shown in the "Raw API Response" panel.
    pub fn raw_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

/// Why a wire point could not become a [`PricePoint`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointError {
    #[error("point has neither open_time nor close_time")]
    MissingTimestamp,
    #[error("point has no close price")]
    MissingClose,
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}
