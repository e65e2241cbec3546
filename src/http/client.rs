//! Low-level HTTP client — `DashboardHttp`.
//!
//! One method per backend endpoint. Returns wire types or raw JSON
//! (conversion to domain types happens in the sub-clients). No retries: every
//! call is exactly one request.

use crate::config::DashboardConfig;
use crate::domain::query::PriceQuery;
use crate::domain::tvl::wire::TvlHealthResponse;
use crate::error::HttpError;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Low-level HTTP client for the dashboard REST API.
#[derive(Clone)]
pub struct DashboardHttp {
    base_url: String,
    client: Client,
}

/// Best-effort shape of an error body.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl DashboardHttp {
    pub fn new(config: &DashboardConfig) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(4);
        }

        Ok(Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Prices ───────────────────────────────────────────────────────────

    /// `GET /prices/{symbol}` — raw response body, kept verbatim for display.
    pub async fn get_prices(&self, query: &PriceQuery) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}/prices/{}", self.base_url, query.symbol.as_str());
        let req = self.client.get(&url).query(&query.query_pairs());
        self.send(req, &url).await
    }

    // ── TVL ──────────────────────────────────────────────────────────────

    /// `GET /tvl/{protocol}/health`.
    pub async fn get_tvl_health(&self, protocol: &str) -> Result<TvlHealthResponse, HttpError> {
        let url = format!(
            "{}/tvl/{}/health",
            self.base_url,
            urlencoding::encode(protocol)
        );
        self.send(self.client.get(&url), &url).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, HttpError> {
        tracing::debug!(url, "GET");
        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let body_text = resp.text().await.unwrap_or_default();
        let detail = parse_detail(&body_text);
        tracing::debug!(status = status.as_u16(), ?detail, "Request to {} failed", url);
        Err(HttpError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Pull `detail` out of an error body. Non-JSON bodies yield `None`; a
/// non-string detail (e.g. a validation error list) is kept as its JSON text.
fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
