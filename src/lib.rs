//! # Cryptodash SDK
//!
//! A Rust client for the crypto price / TVL dashboard backend: historical
//! candles, protocol TVL and a live price socket, plus the state that a
//! dashboard UI keeps around them.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared types, formatting, domain models and UI state (no I/O)
//! 2. **Chart** — `ChartSurface` seam and the owned `ChartSlot` handle
//! 3. **HTTP API** — `DashboardHttp`, one request per call, no retries
//! 4. **WebSocket** — `tokio-tungstenite` client for the live price stream
//! 5. **High-Level Client** — `DashboardClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptodash_sdk::prelude::*;
//!
//! let client = DashboardClient::from_env()?;
//!
//! let mut form = QueryState::new();
//! form.apply(QueryAction::SetSymbol(Symbol::Eth));
//! form.set_start_input("2024-01-01T00:00")?;
//! form.set_end_input("2024-01-08T00:00")?;
//! client.prices().submit(&mut form, chrono::Utc::now()).await?;
//!
//! let mut tvl = TvlSearchState::new();
//! tvl.set_query("aave");
//! client.tvl().search(&mut tvl).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared symbol/interval types, serde helpers and number formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Default endpoints and environment variable names.
pub mod network;

/// Backend base URLs.
pub mod config;

// ── Layer 2: Chart ───────────────────────────────────────────────────────────

/// Rendering seam for line charts.
pub mod chart;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the price and TVL endpoints.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: WebSocket ───────────────────────────────────────────────────────

/// WebSocket client: events, connection state, config.
pub mod ws;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types
    pub use crate::shared::{Interval, Symbol};

    // Query form
    pub use crate::domain::query::{
        IntervalAvailability, IntervalLimits, PriceQuery, QueryAction, QueryState, RequestId,
    };

    // Historical prices
    pub use crate::domain::price_history::{
        ChartSeries, ChartState, HistoricalChart, PriceHistory, PricePoint, Selection, TimeField,
    };

    // Live prices
    pub use crate::domain::live_price::{
        LiveHistory, LivePricePanel, LivePriceState, LiveStatus, LiveTick,
    };

    // TVL
    pub use crate::domain::tvl::{ChainTvl, ProtocolHealth, TvlSearch, TvlSearchState};

    // Charts
    pub use crate::chart::{ChartSlot, ChartSurface, LineChartSpec, UpdateMode};

    // Errors
    pub use crate::error::{HttpError, SdkError, ValidationError, WsError};

    // Config + network
    pub use crate::config::DashboardConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{DashboardClient, DashboardClientBuilder, PricesClient, TvlClient};
    #[cfg(all(feature = "http", feature = "ws-native"))]
    pub use crate::client::{LiveFeed, LiveMount, LivePricesClient};

    // WebSocket types
    pub use crate::ws::{ReadyState, WsConfig, WsEvent};
}
