//! Conversions from TVL wire types to domain types.

use super::wire::TvlHealthResponse;
use super::{ChainTvl, ProtocolHealth};

impl From<TvlHealthResponse> for ProtocolHealth {
    /// Missing values count as zero; chain order is kept.
    fn from(resp: TvlHealthResponse) -> Self {
        Self {
            protocol: resp.protocol,
            total_tvl: resp.total_tvl.unwrap_or(0.0),
            chains: resp
                .chains
                .into_iter()
                .map(|(chain, tvl)| ChainTvl {
                    chain,
                    tvl: tvl.unwrap_or(0.0),
                })
                .collect(),
        }
    }
}
