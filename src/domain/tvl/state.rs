//! TVL search state — query, outcome, chain list expansion.

use super::{ChainTvl, ProtocolHealth};
use crate::error::{HttpError, SdkError};

/// Chains shown before the list is expanded.
pub const CHAIN_PREVIEW_LEN: usize = 10;

/// A search started by [`TvlSearchState::begin`]: the protocol that was
/// requested, tagged so that only the latest search can store its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvlSearch {
    protocol: String,
    seq: u64,
}

impl TvlSearch {
    pub fn protocol(&self) -> &str {
        &self.protocol
    }
}

/// State of the protocol TVL search box and its result.
#[derive(Debug, Clone, Default)]
pub struct TvlSearchState {
    pub query: String,
    pub loading: bool,
    pub result: Option<ProtocolHealth>,
    pub error: Option<String>,
    show_all: bool,
    next_search: u64,
    in_flight: Option<u64>,
}

impl TvlSearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Start a search. Returns the search to run, or `None` for an empty
    /// query, in which case nothing changes.
    pub fn begin(&mut self) -> Option<TvlSearch> {
        let protocol = self.query.trim();
        if protocol.is_empty() {
            return None;
        }
        let protocol = protocol.to_string();
        self.next_search += 1;
        self.in_flight = Some(self.next_search);
        self.loading = true;
        self.error = None;
        self.result = None;
        self.show_all = false;
        Some(TvlSearch {
            protocol,
            seq: self.next_search,
        })
    }

    /// Store the outcome of `search`.
    ///
    /// Messages name the protocol that was requested, not whatever the box
    /// holds now. Outcomes of superseded searches are dropped; returns
    /// whether this one was applied.
    pub fn finish(&mut self, search: &TvlSearch, outcome: Result<ProtocolHealth, SdkError>) -> bool {
        if self.in_flight != Some(search.seq) {
            tracing::warn!(protocol = %search.protocol, "Discarding stale TVL response");
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        match outcome {
            Ok(health) => self.result = Some(health),
            Err(e) => self.error = Some(failure_message(&search.protocol, &e)),
        }
        true
    }

    /// Chains to render: the first [`CHAIN_PREVIEW_LEN`] unless expanded.
    pub fn visible_chains(&self) -> &[ChainTvl] {
        let chains = self.result.as_ref().map(|r| r.chains.as_slice()).unwrap_or(&[]);
        if self.show_all {
            chains
        } else {
            &chains[..chains.len().min(CHAIN_PREVIEW_LEN)]
        }
    }

    /// Whether the chain list has more entries than the preview.
    pub fn has_more(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|r| r.chains.len() > CHAIN_PREVIEW_LEN)
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Flip between preview and full list. No-op when there is nothing hidden.
    pub fn toggle_show_all(&mut self) {
        if self.has_more() {
            self.show_all = !self.show_all;
        }
    }

    /// Label of the expand/collapse control, absent when not needed.
    pub fn toggle_label(&self) -> Option<&'static str> {
        if !self.has_more() {
            return None;
        }
        Some(if self.show_all { "Show Less" } else { "Show More" })
    }
}

/// Message shown for a failed lookup.
///
/// Non-2xx answers name the status and the protocol, followed by the backend
/// detail if any. Transport failures show their own message.
pub fn failure_message(query: &str, err: &SdkError) -> String {
    match err {
        SdkError::Http(HttpError::Status { status, detail }) => format!(
            "Error: {} Could not find protocol \"{}\". {}",
            status,
            query,
            detail.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string(),
        other => other.user_message(),
    }
}
