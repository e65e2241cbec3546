//! High-level client — `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use crate::config::DashboardConfig;
use crate::domain::price_history::client::PriceHistoryClient;
use crate::domain::tvl::client::Tvl;
use crate::error::SdkError;
use crate::http::DashboardHttp;
use crate::ws::WsConfig;

use std::time::Duration;

// Re-export sub-client types for convenience.
#[cfg(feature = "ws-native")]
pub use crate::domain::live_price::client::{LiveFeed, LiveMount, LivePrices as LivePricesClient};
pub use crate::domain::price_history::client::PriceHistoryClient as PricesClient;
pub use crate::domain::tvl::client::Tvl as TvlClient;

/// The primary entry point for talking to the dashboard backend.
///
/// Provides nested sub-client accessors for each domain:
/// `client.prices()`, `client.tvl()`, `client.live()`.
#[derive(Clone)]
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
    pub(crate) ws_base: String,
    pub(crate) ws_config: WsConfig,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    /// Client for the endpoints named by `API_BASE` / `WS_BASE`.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::builder().config(DashboardConfig::from_env()?).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn tvl(&self) -> Tvl<'_> {
        Tvl { client: self }
    }

    #[cfg(feature = "ws-native")]
    pub fn live(&self) -> crate::domain::live_price::client::LivePrices<'_> {
        crate::domain::live_price::client::LivePrices { client: self }
    }

    pub fn api_base(&self) -> &str {
        self.http.base_url()
    }

    pub fn ws_base(&self) -> &str {
        &self.ws_base
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DashboardClientBuilder {
    api_base: String,
    ws_base: String,
    ws_connect_timeout: Duration,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        let defaults = DashboardConfig::default();
        Self {
            api_base: defaults.api_base,
            ws_base: defaults.ws_base,
            ws_connect_timeout: WsConfig::default().connect_timeout,
        }
    }
}

impl DashboardClientBuilder {
    pub fn api_base(mut self, url: &str) -> Self {
        self.api_base = url.to_string();
        self
    }

    pub fn ws_base(mut self, url: &str) -> Self {
        self.ws_base = url.to_string();
        self
    }

    /// Use both base URLs from `config`.
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.api_base = config.api_base;
        self.ws_base = config.ws_base;
        self
    }

    pub fn ws_connect_timeout(mut self, timeout: Duration) -> Self {
        self.ws_connect_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<DashboardClient, SdkError> {
        let config = DashboardConfig::new(&self.api_base, &self.ws_base)?;
        Ok(DashboardClient {
            http: DashboardHttp::new(&config)?,
            ws_config: WsConfig {
                url: config.ws_base.clone(),
                connect_timeout: self.ws_connect_timeout,
                ..WsConfig::default()
            },
            ws_base: config.ws_base,
        })
    }
}
