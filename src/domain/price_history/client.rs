//! Price history sub-client — candle queries and the form submission cycle.

use super::PriceHistory;
use crate::client::DashboardClient;
use crate::domain::query::{PriceQuery, QueryState};
use crate::error::SdkError;
use chrono::{DateTime, Utc};

/// Sub-client for historical price operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> PriceHistoryClient<'a> {
    /// Fetch and convert one validated query.
    pub async fn get(&self, query: &PriceQuery) -> Result<PriceHistory, SdkError> {
        let raw = self.client.http.get_prices(query).await?;
        Ok(PriceHistory::try_from(raw)?)
    }

    /// Raw response body for a query, unconverted.
    pub async fn get_raw(&self, query: &PriceQuery) -> Result<serde_json::Value, SdkError> {
        Ok(self.client.http.get_prices(query).await?)
    }

    /// Validate the form, issue the request and store the outcome.
    ///
    /// A validation failure is recorded on the form and returned without any
    /// network call.
    pub async fn submit(&self, form: &mut QueryState, now: DateTime<Utc>) -> Result<(), SdkError> {
        let (id, query) = form.submit(now)?;
        tracing::debug!(
            request = id.value(),
            symbol = %query.symbol,
            interval = %query.interval,
            "Submitting price query"
        );
        let result = self.get(&query).await;
        form.resolve(id, result);
        Ok(())
    }
}
