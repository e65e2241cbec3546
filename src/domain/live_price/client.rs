//! Live price sub-client — opens the per-symbol price socket.

use super::LivePricePanel;
use crate::chart::ChartSurface;
use crate::client::DashboardClient;
use crate::error::SdkError;
use crate::shared::Symbol;
use crate::ws::native::WsClient;
use crate::ws::{WsConfig, WsEvent};

/// Sub-client for the live price stream.
pub struct LivePrices<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> LivePrices<'a> {
    /// Endpoint for `symbol`: `{ws_base}/ws/prices/{symbol}/latest`.
    pub fn url(&self, symbol: Symbol) -> String {
        feed_url(&self.client.ws_base, symbol)
    }

    /// Open a socket for `symbol`. Events start with `Connected`, or with
    /// `Error` + `Disconnected` if the server cannot be reached.
    pub async fn open(&self, symbol: Symbol) -> Result<LiveFeed, SdkError> {
        open_feed(&self.client.ws_config, &self.client.ws_base, symbol).await
    }

    /// Mount a live panel for `symbol` on `surface` and open its socket.
    ///
    /// The returned [`LiveMount`] owns both, so the socket lives exactly as
    /// long as the panel is mounted.
    pub async fn mount<S: ChartSurface>(
        &self,
        surface: S,
        symbol: Symbol,
    ) -> Result<LiveMount<S>, SdkError> {
        let feed = self.open(symbol).await?;
        Ok(LiveMount {
            panel: LivePricePanel::new(surface, symbol),
            feed: Some(feed),
            ws_config: self.client.ws_config.clone(),
            ws_base: self.client.ws_base.clone(),
        })
    }
}

fn feed_url(ws_base: &str, symbol: Symbol) -> String {
    format!("{}/ws/prices/{}/latest", ws_base, symbol.as_str())
}

async fn open_feed(base: &WsConfig, ws_base: &str, symbol: Symbol) -> Result<LiveFeed, SdkError> {
    let config = WsConfig {
        url: feed_url(ws_base, symbol),
        ..base.clone()
    };
    let mut ws = WsClient::new(config);
    ws.connect().await?;
    tracing::debug!(%symbol, url = ws.url(), "Opened live price feed");
    Ok(LiveFeed { symbol, ws })
}

/// One open live price socket. Dropping it aborts the connection.
pub struct LiveFeed {
    symbol: Symbol,
    ws: WsClient,
}

impl LiveFeed {
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub async fn next_event(&self) -> Option<WsEvent> {
        self.ws.next_event().await
    }

    /// Wait for one event and feed it to `panel`.
    ///
    /// Returns `false` once the socket is closed and no more events will come.
    pub async fn pump<S: ChartSurface>(&self, panel: &mut LivePricePanel<S>) -> bool {
        match self.ws.next_event().await {
            Some(event) => {
                panel.apply(&event);
                !matches!(event, WsEvent::Disconnected { .. })
            }
            None => false,
        }
    }

    /// Feed events to `panel` until the socket closes.
    pub async fn run<S: ChartSurface>(&self, panel: &mut LivePricePanel<S>) {
        while self.pump(panel).await {}
    }

    /// Close the socket (unmount or symbol change).
    pub async fn close(mut self) -> Result<(), SdkError> {
        tracing::debug!(symbol = %self.symbol, "Closing live price feed");
        Ok(self.ws.disconnect().await?)
    }
}

/// A mounted live price panel together with its socket.
///
/// Changing the symbol closes the old socket before the new one opens;
/// unmounting closes the socket and releases the chart. Dropping the mount
/// aborts the socket and releases the chart as well.
pub struct LiveMount<S: ChartSurface> {
    panel: LivePricePanel<S>,
    feed: Option<LiveFeed>,
    ws_config: WsConfig,
    ws_base: String,
}

impl<S: ChartSurface> LiveMount<S> {
    pub fn panel(&self) -> &LivePricePanel<S> {
        &self.panel
    }

    /// Symbol of the open socket, if one is open.
    pub fn feed_symbol(&self) -> Option<Symbol> {
        self.feed.as_ref().map(LiveFeed::symbol)
    }

    /// Wait for one event and feed it to the panel. `false` once the socket
    /// is closed.
    pub async fn pump(&mut self) -> bool {
        match &self.feed {
            Some(feed) => feed.pump(&mut self.panel).await,
            None => false,
        }
    }

    /// Feed events to the panel until the socket closes.
    pub async fn run(&mut self) {
        while self.pump().await {}
    }

    /// Switch to `symbol`: reset the panel, close the old socket, open a new
    /// one. Returns `false` if the symbol did not change.
    pub async fn set_symbol(&mut self, symbol: Symbol) -> Result<bool, SdkError> {
        if !self.panel.set_symbol(symbol) {
            return Ok(false);
        }
        if let Some(old) = self.feed.take() {
            old.close().await?;
        }
        self.feed = Some(open_feed(&self.ws_config, &self.ws_base, symbol).await?);
        Ok(true)
    }

    /// Close the socket and release the chart.
    pub async fn unmount(mut self) -> Result<(), SdkError> {
        self.panel.unmount();
        match self.feed.take() {
            Some(feed) => feed.close().await,
            None => Ok(()),
        }
    }
}
