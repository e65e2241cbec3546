//! Shared types and utilities used across all domain modules.
//!
//! `Symbol` and `Interval` serialize to exactly the strings the backend uses in
//! paths and query parameters, so they can be used directly in wire types.

pub mod fmt;
pub mod serde_util;

use crate::error::ValidationError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// Asset symbol supported by the price backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[default]
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "cUSD")]
    CUsd,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Btc, Symbol::Eth, Symbol::CUsd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::CUsd => "cUSD",
        }
    }

    /// Earliest instant the backend has data for, if the symbol is floor-limited.
    ///
    /// Only cUSD is bounded: its history starts at the Celo mainnet stablecoin launch.
    pub fn data_floor(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::CUsd => Utc.with_ymd_and_hms(2020, 4, 22, 0, 0, 0).single(),
            Self::Btc | Self::Eth => None,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(Self::Btc),
            "ETH" => Ok(Self::Eth),
            "CUSD" => Ok(Self::CUsd),
            _ => Err(ValidationError::UnknownSymbol(s.to_string())),
        }
    }
}

// ─── Interval ────────────────────────────────────────────────────────────────

/// Candle interval offered by the query form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[default]
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "8h")]
    Hour8,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl Interval {
    /// Every interval, finest first.
    pub const ALL: [Interval; 14] = [
        Interval::Minute1,
        Interval::Minute5,
        Interval::Minute15,
        Interval::Minute30,
        Interval::Hour1,
        Interval::Hour2,
        Interval::Hour4,
        Interval::Hour6,
        Interval::Hour8,
        Interval::Hour12,
        Interval::Day1,
        Interval::Day3,
        Interval::Week1,
        Interval::Month1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour8 => "8h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
            Self::Day3 => "3d",
            Self::Week1 => "1w",
            Self::Month1 => "1M",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownInterval(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_serde() {
        let s: Symbol = serde_json::from_str("\"cUSD\"").unwrap();
        assert_eq!(s, Symbol::CUsd);
        assert_eq!(serde_json::to_string(&Symbol::Eth).unwrap(), "\"ETH\"");
    }

    #[test]
    fn test_symbol_from_str_case_insensitive() {
        assert_eq!("cusd".parse::<Symbol>().unwrap(), Symbol::CUsd);
        assert_eq!("btc".parse::<Symbol>().unwrap(), Symbol::Btc);
        assert!("DOGE".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_only_cusd_has_floor() {
        assert!(Symbol::CUsd.data_floor().is_some());
        assert!(Symbol::Btc.data_floor().is_none());
    }

    #[test]
    fn test_interval_serde_and_parse() {
        let i: Interval = serde_json::from_str("\"1M\"").unwrap();
        assert_eq!(i, Interval::Month1);
        assert_eq!("1m".parse::<Interval>().unwrap(), Interval::Minute1);
        assert_eq!("15m".parse::<Interval>().unwrap(), Interval::Minute15);
        assert!("2m".parse::<Interval>().is_err());
    }

    #[test]
    fn test_interval_order_is_fine_to_coarse() {
        for pair in Interval::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Interval::default(), Interval::Hour1);
    }
}
