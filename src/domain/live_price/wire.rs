//! Wire types for the live price socket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One inbound text frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceFrame {
    Error(ErrorFrame),
    Tick(TickFrame),
}

/// `{"error": "..."}` sent by the backend when an upstream fetch fails.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorFrame {
    pub error: String,
}

/// `{"symbol", "pair", "price", "timestamp"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickFrame {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub pair: Option<String>,
    #[serde(deserialize_with = "price")]
    pub price: f64,
    #[serde(with = "crate::shared::serde_util::timestamp_flexible")]
    pub timestamp: DateTime<Utc>,
}

/// Price as a JSON number or a numeric string.
fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
