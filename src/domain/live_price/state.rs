//! Live price state containers — app-owned, SDK-provided update logic.

use super::wire::PriceFrame;
use super::{LiveStatus, LiveTick};
use crate::chart::LineChartSpec;
use crate::shared::Symbol;
use crate::ws::WsEvent;
use std::collections::VecDeque;

/// Number of ticks kept for the live chart.
pub const LIVE_WINDOW: usize = 100;

/// Rolling tick buffer, oldest first.
#[derive(Debug, Clone)]
pub struct LiveHistory {
    ticks: VecDeque<LiveTick>,
    max_size: usize,
}

impl Default for LiveHistory {
    fn default() -> Self {
        Self::new(LIVE_WINDOW)
    }
}

impl LiveHistory {
    pub fn new(max_size: usize) -> Self {
        Self {
            ticks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Append a tick, evicting the oldest once over capacity.
    pub fn push(&mut self, tick: LiveTick) {
        self.ticks.push_back(tick);
        while self.ticks.len() > self.max_size {
            self.ticks.pop_front();
        }
    }

    pub fn ticks(&self) -> &VecDeque<LiveTick> {
        &self.ticks
    }

    pub fn latest(&self) -> Option<&LiveTick> {
        self.ticks.back()
    }

    pub fn labels(&self) -> Vec<String> {
        self.ticks.iter().map(LiveTick::time_label).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.price).collect()
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

/// State of the live price panel for one symbol.
#[derive(Debug, Clone)]
pub struct LivePriceState {
    symbol: Symbol,
    status: LiveStatus,
    latest: Option<LiveTick>,
    history: LiveHistory,
}

impl LivePriceState {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            status: LiveStatus::Connecting,
            latest: None,
            history: LiveHistory::default(),
        }
    }

    /// Apply a socket event. Returns `true` if the chart must be redrawn.
    pub fn apply(&mut self, event: &WsEvent) -> bool {
        match event {
            WsEvent::Connected => {
                self.status = LiveStatus::Connected;
                false
            }
            WsEvent::Message(text) => self.handle_frame(text),
            WsEvent::Error(reason) => {
                tracing::debug!(symbol = %self.symbol, "Live feed error: {}", reason);
                self.status = LiveStatus::Error;
                false
            }
            WsEvent::Disconnected { .. } => {
                self.status = LiveStatus::Disconnected;
                false
            }
        }
    }

    /// Handle one raw text frame. Returns `true` if a tick was appended.
    ///
    /// `{error}` frames replace the status text and leave the buffer alone.
    /// Frames that are not JSON, or match neither shape, are dropped.
    pub fn handle_frame(&mut self, text: &str) -> bool {
        let frame: PriceFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(symbol = %self.symbol, "Dropping live frame: {} (raw: {})", e, text);
                return false;
            }
        };

        match frame {
            PriceFrame::Error(err) => {
                tracing::warn!(symbol = %self.symbol, "Live feed reported: {}", err.error);
                self.status = LiveStatus::Rejected(err.error);
                false
            }
            PriceFrame::Tick(tick) => {
                self.push(tick.into());
                true
            }
        }
    }

    /// Record a tick as the latest value and append it to the buffer.
    pub fn push(&mut self, tick: LiveTick) {
        self.latest = Some(tick.clone());
        self.history.push(tick);
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn status(&self) -> &LiveStatus {
        &self.status
    }

    pub fn latest(&self) -> Option<&LiveTick> {
        self.latest.as_ref()
    }

    /// Latest price with exactly two decimals and no grouping, e.g. `67000.50`.
    pub fn latest_price_display(&self) -> Option<String> {
        self.latest.as_ref().map(|t| format!("{:.2}", t.price))
    }

    pub fn latest_time_display(&self) -> Option<String> {
        self.latest.as_ref().map(LiveTick::time_label)
    }

    pub fn history(&self) -> &LiveHistory {
        &self.history
    }

    pub fn chart_title(&self) -> String {
        format!("{} Price (last {} updates)", self.symbol, LIVE_WINDOW)
    }

    pub fn to_spec(&self) -> LineChartSpec {
        LineChartSpec {
            title: self.chart_title(),
            labels: self.history.labels(),
            values: self.history.values(),
            show_points: false,
        }
    }
}
