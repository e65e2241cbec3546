//! Live price domain — streamed ticks, connection status, rolling chart buffer.

#[cfg(all(feature = "http", feature = "ws-native"))]
pub mod client;
mod convert;
pub mod panel;
pub mod state;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use panel::LivePricePanel;
pub use state::{LiveHistory, LivePriceState, LIVE_WINDOW};

/// One streamed price update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveTick {
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub symbol: Option<String>,
    pub pair: Option<String>,
}

impl LiveTick {
    /// Wall-clock label used on the chart axis and next to the latest price.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Connection status shown above the live chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LiveStatus {
    #[default]
    Connecting,
    Connected,
    /// The backend sent an `{error}` frame; holds its text.
    Rejected(String),
    /// Transport failure.
    Error,
    Disconnected,
}

impl LiveStatus {
    /// Whether the socket is considered done.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LiveStatus::Error | LiveStatus::Disconnected)
    }
}

impl fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveStatus::Connecting => f.write_str("connecting..."),
            LiveStatus::Connected => f.write_str("connected"),
            LiveStatus::Rejected(msg) => f.write_str(msg),
            LiveStatus::Error => f.write_str("error"),
            LiveStatus::Disconnected => f.write_str("disconnected"),
        }
    }
}
