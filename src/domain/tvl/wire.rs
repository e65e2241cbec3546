//! Wire types for the TVL health endpoint.

use serde::{Deserialize, Serialize};

/// `GET /tvl/{protocol}/health` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvlHealthResponse {
    pub protocol: String,
    #[serde(default)]
    pub total_tvl: Option<f64>,
    /// `[chain, tvl]` pairs in backend order.
    #[serde(default)]
    pub chains: Vec<(String, Option<f64>)>,
}
