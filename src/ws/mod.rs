//! WebSocket layer — connection state, events, config.
//!
//! The transport lives in `native.rs` (`ws-native` feature, `tokio-tungstenite`).
//! The live-price stream is receive-only: the client never sends application
//! messages, it only opens and closes the socket.

#[cfg(feature = "ws-native")]
pub mod native;

use std::time::Duration;

// ─── WsEvent ─────────────────────────────────────────────────────────────────

/// High-level events emitted by the WS client to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum WsEvent {
    /// Connection established.
    Connected,
    /// A text frame from the server, unparsed.
    Message(String),
    /// Transport failure. Always followed by `Disconnected`.
    Error(String),
    /// Connection closed, by either side.
    Disconnected { code: Option<u16>, reason: String },
}

// ─── ReadyState ──────────────────────────────────────────────────────────────

/// Socket lifecycle, mirroring the browser `WebSocket.readyState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl From<u16> for ReadyState {
    fn from(v: u16) -> Self {
        match v {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

// ─── WsConfig ────────────────────────────────────────────────────────────────

/// Configuration for one WS connection.
#[derive(Debug, Clone, PartialEq)]
pub struct WsConfig {
    /// Full endpoint URL, e.g. `ws://localhost:8000/ws/prices/BTC/latest`.
    pub url: String,
    pub connect_timeout: Duration,
    /// How long `disconnect` waits for the close handshake before aborting.
    pub close_timeout: Duration,
}

impl WsConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
            close_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_from_u16() {
        assert_eq!(ReadyState::from(0), ReadyState::Connecting);
        assert_eq!(ReadyState::from(1), ReadyState::Open);
        assert_eq!(ReadyState::from(2), ReadyState::Closing);
        assert_eq!(ReadyState::from(3), ReadyState::Closed);
        assert_eq!(ReadyState::from(42), ReadyState::Closed);
    }

    #[test]
    fn test_config_new_keeps_default_timeout() {
        let config = WsConfig::new("ws://example.test/ws/prices/ETH/latest");
        assert_eq!(config.url, "ws://example.test/ws/prices/ETH/latest");
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.close_timeout, Duration::from_secs(5));
    }
}
