//! Live price panel: [`LivePriceState`] plus the chart it feeds.

use super::state::LivePriceState;
use crate::chart::{ChartSlot, ChartSurface, UpdateMode};
use crate::shared::Symbol;
use crate::ws::WsEvent;

/// Live price chart bound to a rendering surface.
///
/// The chart object is created once per symbol and updated in place without
/// animation on every tick. Changing the symbol starts over with fresh state
/// and a fresh chart.
pub struct LivePricePanel<S: ChartSurface> {
    state: LivePriceState,
    slot: ChartSlot<S>,
}

impl<S: ChartSurface> LivePricePanel<S> {
    /// Mount the panel for `symbol`, creating an empty chart.
    pub fn new(surface: S, symbol: Symbol) -> Self {
        let mut panel = Self {
            state: LivePriceState::new(symbol),
            slot: ChartSlot::new(surface),
        };
        panel.slot.replace(&panel.state.to_spec());
        panel
    }

    /// Feed one socket event through the state and redraw if a tick landed.
    pub fn apply(&mut self, event: &WsEvent) {
        if self.state.apply(event) {
            self.redraw();
        }
    }

    /// Switch to another symbol. Returns `true` if it changed, in which case
    /// the old socket has to be replaced; `LiveMount::set_symbol` does both.
    pub fn set_symbol(&mut self, symbol: Symbol) -> bool {
        if self.state.symbol() == symbol {
            return false;
        }
        tracing::debug!(from = %self.state.symbol(), to = %symbol, "Live panel symbol changed");
        self.state = LivePriceState::new(symbol);
        self.slot.replace(&self.state.to_spec());
        true
    }

    pub fn state(&self) -> &LivePriceState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        self.slot.surface()
    }

    /// Tear the chart down (component unmount).
    pub fn unmount(&mut self) {
        self.slot.release();
    }

    fn redraw(&mut self) {
        // No chart after unmount; the state still records the tick.
        self.slot.update(&self.state.to_spec(), UpdateMode::Immediate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::testing::{RecordingSurface, SurfaceCall};

    fn tick_frame(price: f64) -> WsEvent {
        WsEvent::Message(format!(
            r#"{{"symbol":"BTC","pair":"BTCUSDT","price":{},"timestamp":1717000000000}}"#,
            price
        ))
    }

    #[test]
    fn test_mount_creates_empty_chart() {
        let (surface, calls) = RecordingSurface::new();
        let _panel = LivePricePanel::new(surface, Symbol::Btc);
        let first = calls.borrow()[0].clone();
        match first {
            SurfaceCall::Create { spec, .. } => {
                assert_eq!(spec.title, "BTC Price (last 100 updates)");
                assert!(spec.values.is_empty());
            }
            other => panic!("expected Create, got {other:?}"),
        };
    }

    #[test]
    fn test_tick_updates_in_place_without_animation() {
        let (surface, calls) = RecordingSurface::new();
        let mut panel = LivePricePanel::new(surface, Symbol::Btc);
        panel.apply(&WsEvent::Connected);
        panel.apply(&tick_frame(100.0));
        panel.apply(&tick_frame(101.0));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 3);
        match &calls[2] {
            SurfaceCall::Update { id, spec, mode } => {
                assert_eq!(*id, 1);
                assert_eq!(*mode, UpdateMode::Immediate);
                assert_eq!(spec.values, vec![100.0, 101.0]);
            }
            other => panic!("expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_error_frame_skips_chart_update() {
        let (surface, calls) = RecordingSurface::new();
        let mut panel = LivePricePanel::new(surface, Symbol::Btc);
        panel.apply(&tick_frame(100.0));
        panel.apply(&WsEvent::Message(r#"{"error":"Unexpected error: boom"}"#.into()));

        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(panel.state().status().to_string(), "Unexpected error: boom");
    }

    #[test]
    fn test_symbol_change_resets_and_recreates() {
        let (surface, calls) = RecordingSurface::new();
        let mut panel = LivePricePanel::new(surface, Symbol::Btc);
        panel.apply(&tick_frame(100.0));

        assert!(!panel.set_symbol(Symbol::Btc));
        assert!(panel.set_symbol(Symbol::Eth));
        assert!(panel.state().history().is_empty());

        let calls = calls.borrow();
        assert_eq!(calls[calls.len() - 2], SurfaceCall::Destroy { id: 1 });
        match calls.last() {
            Some(SurfaceCall::Create { id, spec }) => {
                assert_eq!(*id, 2);
                assert_eq!(spec.title, "ETH Price (last 100 updates)");
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn test_tick_after_unmount_touches_no_chart() {
        let (surface, calls) = RecordingSurface::new();
        let mut panel = LivePricePanel::new(surface, Symbol::Btc);
        panel.unmount();
        panel.apply(&tick_frame(1.0));
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(panel.state().history().len(), 1);
    }
}
