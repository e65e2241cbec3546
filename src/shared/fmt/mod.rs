//! Human-readable number formatting for dashboard display.

pub mod compact;

pub use compact::compact_usd;
