//! Query form domain — inputs, local validation, interval availability.

pub mod interval;
pub mod state;

use crate::error::ValidationError;
use crate::shared::{Interval, Symbol};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub use interval::{IntervalAvailability, IntervalLimits};
pub use state::{QueryAction, QueryState, RequestId};

/// A validated historical price query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuery {
    pub symbol: Symbol,
    pub interval: Interval,
    /// Start, UNIX milliseconds (UTC).
    pub start_ms: i64,
    /// End, UNIX milliseconds (UTC).
    pub end_ms: i64,
}

impl PriceQuery {
    /// Query-string parameters in the order the backend documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("startTime", self.start_ms.to_string()),
            ("endTime", self.end_ms.to_string()),
            ("interval", self.interval.as_str().to_string()),
        ]
    }
}

/// Check a start/end pair before anything is sent.
///
/// Both bounds must be present and `end > start`. Floor-limited symbols must
/// also stay within `[floor, now]`.
pub fn validate_range(
    symbol: Symbol,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if e > s => (s, e),
        _ => return Err(ValidationError::InvalidRange),
    };

    if let Some(floor) = symbol.data_floor() {
        if start < floor {
            return Err(ValidationError::BeforeDataFloor {
                symbol: symbol.to_string(),
                floor: floor.format("%Y-%m-%d").to_string(),
            });
        }
        if end > now {
            return Err(ValidationError::EndInFuture {
                symbol: symbol.to_string(),
            });
        }
    }

    Ok((start, end))
}

/// Parse a form datetime value.
///
/// Accepts RFC 3339, `datetime-local` style `YYYY-MM-DDTHH:MM[:SS]` (taken as
/// UTC, the space-separated variant too) and bare dates. An empty value clears
/// the bound.
pub fn parse_datetime_input(input: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(Some(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| ValidationError::UnparsableDateTime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_end_before_or_equal_start_rejected() {
        let now = utc(2025, 1, 1);
        let t = utc(2024, 6, 1);
        assert_eq!(
            validate_range(Symbol::Btc, Some(t), Some(t), now),
            Err(ValidationError::InvalidRange)
        );
        assert_eq!(
            validate_range(Symbol::Btc, Some(t), Some(t - Duration::hours(1)), now),
            Err(ValidationError::InvalidRange)
        );
    }

    #[test]
    fn test_missing_bounds_rejected() {
        let now = utc(2025, 1, 1);
        assert_eq!(
            validate_range(Symbol::Eth, None, Some(now), now),
            Err(ValidationError::InvalidRange)
        );
        assert_eq!(
            validate_range(Symbol::Eth, Some(now), None, now),
            Err(ValidationError::InvalidRange)
        );
    }

    #[test]
    fn test_cusd_floor_and_future() {
        let now = utc(2025, 1, 1);
        let before_floor = validate_range(Symbol::CUsd, Some(utc(2020, 1, 1)), Some(utc(2021, 1, 1)), now);
        assert!(matches!(before_floor, Err(ValidationError::BeforeDataFloor { .. })));

        let future = validate_range(Symbol::CUsd, Some(utc(2024, 1, 1)), Some(utc(2025, 2, 1)), now);
        assert!(matches!(future, Err(ValidationError::EndInFuture { .. })));

        assert!(validate_range(Symbol::CUsd, Some(utc(2024, 1, 1)), Some(now), now).is_ok());
    }

    #[test]
    fn test_btc_is_not_floor_limited() {
        let now = utc(2025, 1, 1);
        assert!(validate_range(Symbol::Btc, Some(utc(2019, 1, 1)), Some(utc(2026, 1, 1)), now).is_ok());
    }

    #[test]
    fn test_query_pairs() {
        let q = PriceQuery {
            symbol: Symbol::Btc,
            interval: Interval::Hour1,
            start_ms: 1,
            end_ms: 2,
        };
        let pairs = q.query_pairs();
        assert_eq!(pairs[0], ("startTime", "1".to_string()));
        assert_eq!(pairs[1], ("endTime", "2".to_string()));
        assert_eq!(pairs[2], ("interval", "1h".to_string()));
    }

    #[test]
    fn test_parse_datetime_local() {
        let dt = parse_datetime_input("2024-03-05T14:30").unwrap().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap());

        let dt = parse_datetime_input("2024-03-05 14:30:15").unwrap().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 15).unwrap());

        let dt = parse_datetime_input("2024-03-05T14:30:00+02:00").unwrap().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap());

        let dt = parse_datetime_input("2024-03-05").unwrap().unwrap();
        assert_eq!(dt, utc(2024, 3, 5));
    }

    #[test]
    fn test_parse_datetime_empty_and_garbage() {
        assert_eq!(parse_datetime_input("  ").unwrap(), None);
        assert!(matches!(
            parse_datetime_input("next tuesday"),
            Err(ValidationError::UnparsableDateTime(_))
        ));
    }
}
