//! Conversions from live price wire frames.

use super::wire::TickFrame;
use super::LiveTick;

impl From<TickFrame> for LiveTick {
    fn from(frame: TickFrame) -> Self {
        Self {
            timestamp: frame.timestamp,
            price: frame.price,
            symbol: frame.symbol,
            pair: frame.pair,
        }
    }
}
