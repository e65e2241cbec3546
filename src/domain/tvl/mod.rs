//! TVL domain — protocol health lookup and its display state.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::fmt::compact_usd;
use serde::{Deserialize, Serialize};

pub use state::{TvlSearch, TvlSearchState, CHAIN_PREVIEW_LEN};

/// Total and per-chain TVL of one protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolHealth {
    pub protocol: String,
    pub total_tvl: f64,
    pub chains: Vec<ChainTvl>,
}

/// TVL on a single chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTvl {
    pub chain: String,
    pub tvl: f64,
}

impl ProtocolHealth {
    pub fn heading(&self) -> String {
        format!("Protocol: {}", self.protocol)
    }

    /// e.g. `Total TVL: $105.6B`.
    pub fn total_display(&self) -> String {
        format!("Total TVL: {}", compact_usd(self.total_tvl))
    }
}

impl ChainTvl {
    /// e.g. `Ethereum - $90B`.
    pub fn display(&self) -> String {
        format!("{} - {}", self.chain, compact_usd(self.tvl))
    }
}
