//! TVL sub-client — protocol health lookups.

use super::{ProtocolHealth, TvlSearchState};
use crate::client::DashboardClient;
use crate::error::SdkError;

/// Sub-client for TVL operations.
pub struct Tvl<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Tvl<'a> {
    /// Total and per-chain TVL of `protocol`.
    pub async fn health(&self, protocol: &str) -> Result<ProtocolHealth, SdkError> {
        let resp = self.client.http.get_tvl_health(protocol).await?;
        Ok(resp.into())
    }

    /// Run the search box's current query and store the outcome.
    ///
    /// An empty query does nothing.
    pub async fn search(&self, state: &mut TvlSearchState) {
        let Some(search) = state.begin() else {
            return;
        };
        tracing::debug!(protocol = search.protocol(), "Searching protocol TVL");
        let outcome = self.health(search.protocol()).await;
        state.finish(&search, outcome);
    }
}
