//! Conversions from wire types to domain types for price history.

use super::wire::{KlineRow, PricesResponse, WirePoint};
use super::{PointError, PriceHistory, PricePoint};
use chrono::{DateTime, Utc};

/// Sample timestamps below this are epoch seconds, not milliseconds.
const SECONDS_CUTOFF: i64 = 100_000_000_000;

impl TryFrom<KlineRow> for PricePoint {
    type Error = PointError;

    fn try_from(row: KlineRow) -> Result<Self, Self::Error> {
        let close = row.close.ok_or(PointError::MissingClose)?;
        let (open_time, close_time) = match (row.open_time, row.close_time) {
            (Some(o), Some(c)) => (o, c),
            (Some(o), None) => (o, o),
            (None, Some(c)) => (c, c),
            (None, None) => return Err(PointError::MissingTimestamp),
        };

        Ok(Self {
            open_time,
            close_time,
            open: row.open.unwrap_or(close),
            close,
            high: row.high,
            low: row.low,
            volume: row.volume,
            trades: row.trades,
        })
    }
}

impl TryFrom<WirePoint> for PricePoint {
    type Error = PointError;

    fn try_from(point: WirePoint) -> Result<Self, Self::Error> {
        match point {
            WirePoint::Kline(row) => row.try_into(),
            WirePoint::Sample(ts, price) => {
                let millis = if ts.abs() < SECONDS_CUTOFF { ts * 1000 } else { ts };
                let time = DateTime::<Utc>::from_timestamp_millis(millis)
                    .ok_or(PointError::InvalidTimestamp(ts))?;
                Ok(Self {
                    open_time: time,
                    close_time: time,
                    open: price,
                    close: price,
                    high: None,
                    low: None,
                    volume: None,
                    trades: None,
                })
            }
        }
    }
}

impl PriceHistory {
    /// Convert a wire response, keeping `raw` as the untouched body.
    ///
    /// Points that cannot be placed on a time axis are dropped with a warning.
    pub fn from_wire(resp: PricesResponse, raw: serde_json::Value) -> Self {
        let total = resp.points.len();
        let points: Vec<PricePoint> = resp
            .points
            .into_iter()
            .filter_map(|p| match PricePoint::try_from(p) {
                Ok(point) => Some(point),
                Err(e) => {
                    tracing::warn!("Dropping price point: {}", e);
                    None
                }
            })
            .collect();

        if let Some(count) = resp.count {
            if count != total {
                tracing::debug!(count, received = total, "Point count mismatch in /prices response");
            }
        }

        Self {
            symbol: resp.symbol,
            pair: resp.pair,
            interval: resp.interval,
            start_ms: resp.start_ms,
            end_ms: resp.end_ms,
            points,
            raw,
        }
    }
}

impl TryFrom<serde_json::Value> for PriceHistory {
    type Error = serde_json::Error;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        let resp: PricesResponse = serde_json::from_value(raw.clone())?;
        Ok(Self::from_wire(resp, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kline_response_conversion() {
        let raw = json!({
            "symbol": "BTC",
            "pair": "BTCUSDT",
            "interval": "1h",
            "start_ms": 1700000000000i64,
            "end_ms": 1700007200000i64,
            "count": 2,
            "points": [
                {"open_time": 1700000000000i64, "open": 100.0, "high": 110.0, "low": 95.0,
                 "close": 105.0, "volume": 12.5, "close_time": 1700003599999i64,
                 "quote_volume": 1300.0, "trades": 42, "taker_buy_base": 1.0, "taker_buy_quote": 2.0},
                {"open_time": 1700003600000i64, "open": 105.0, "close": 107.5,
                 "close_time": 1700007199999i64}
            ]
        });
        let history = PriceHistory::try_from(raw.clone()).unwrap();
        assert_eq!(history.pair.as_deref(), Some("BTCUSDT"));
        assert_eq!(history.points.len(), 2);
        assert_eq!(history.points[0].close, 105.0);
        assert_eq!(history.points[0].trades, Some(42));
        assert_eq!(history.points[1].close_time.timestamp_millis(), 1_700_007_199_999);
        assert_eq!(history.raw, raw);
    }

    #[test]
    fn test_sample_pairs_are_seconds() {
        let raw = json!({"symbol": "cUSD", "points": [[1695000000, 0.9998], [1695028800, 1.0001]]});
        let history = PriceHistory::try_from(raw).unwrap();
        assert_eq!(history.points.len(), 2);
        let first = &history.points[0];
        assert_eq!(first.close_time.timestamp_millis(), 1_695_000_000_000);
        assert_eq!(first.open_time, first.close_time);
        assert_eq!(first.open, 0.9998);
    }

    #[test]
    fn test_close_only_row_falls_back() {
        let raw = json!({"points": [{"close_time": 1695000000000i64, "close": 1.0}]});
        let history = PriceHistory::try_from(raw).unwrap();
        let p = &history.points[0];
        assert_eq!(p.open_time, p.close_time);
        assert_eq!(p.open, 1.0);
    }

    #[test]
    fn test_row_without_time_is_dropped() {
        let raw = json!({"points": [{"close": 1.0}, {"open_time": 1695000000000i64, "close": 2.0}]});
        let history = PriceHistory::try_from(raw).unwrap();
        assert_eq!(history.points.len(), 1);
        assert_eq!(history.points[0].close, 2.0);
    }

    #[test]
    fn test_row_without_close_is_dropped() {
        let raw = json!({"points": [
            {"open_time": 1695000000000i64, "open": 1.0},
            {"open_time": 1695003600000i64, "close": 2.0}
        ]});
        let history = PriceHistory::try_from(raw).unwrap();
        assert_eq!(history.points.len(), 1);
        assert_eq!(history.points[0].close, 2.0);
    }

    #[test]
    fn test_missing_points_is_error() {
        assert!(PriceHistory::try_from(json!({"symbol": "BTC"})).is_err());
    }
}
