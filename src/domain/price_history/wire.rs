//! Wire types for the historical price endpoint (REST).

use crate::shared::serde_util::timestamp_ms_opt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// REST response for `GET /prices/{symbol}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub pair: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub start_ms: Option<i64>,
    #[serde(default)]
    pub end_ms: Option<i64>,
    #[serde(default)]
    pub count: Option<usize>,
    pub points: Vec<WirePoint>,
}

/// One entry of `points`.
///
/// Exchange-backed symbols send kline objects; the stablecoin feed sends
/// bare `[epoch_seconds, price]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePoint {
    Sample(i64, f64),
    Kline(KlineRow),
}

/// A kline object as mapped by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineRow {
    #[serde(default, with = "timestamp_ms_opt")]
    pub open_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp_ms_opt")]
    pub close_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub quote_volume: Option<f64>,
    #[serde(default)]
    pub trades: Option<u64>,
}
