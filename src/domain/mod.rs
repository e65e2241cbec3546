//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching backend payloads
//! - `convert.rs` — `TryFrom`/`From` conversions
//! - `state.rs` — App-owned state containers with update methods
//! - `client.rs` — Sub-client with network methods
//!
//! `query` is the exception: it holds the form state that drives
//! `price_history` and has no wire format of its own.

pub mod live_price;
pub mod price_history;
pub mod query;
pub mod tvl;
