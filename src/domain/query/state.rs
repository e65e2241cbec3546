//! Query form state — reducer over form edits, submissions and their results.

use super::interval::{IntervalAvailability, IntervalLimits};
use super::{parse_datetime_input, validate_range, PriceQuery};
use crate::domain::price_history::PriceHistory;
use crate::error::{SdkError, ValidationError};
use crate::shared::{Interval, Symbol};
use chrono::{DateTime, Utc};

/// Tag of one submission. Later submissions get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Edits the user can make to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    SetSymbol(Symbol),
    SetInterval(Interval),
    SetStart(Option<DateTime<Utc>>),
    SetEnd(Option<DateTime<Utc>>),
}

/// State of the query form, owned by the form.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub symbol: Symbol,
    pub interval: Interval,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub loading: bool,
    pub response: Option<PriceHistory>,
    pub error: Option<String>,
    limits: IntervalLimits,
    selectable: Vec<Interval>,
    next_request: u64,
    in_flight: Option<RequestId>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_limits(IntervalLimits::default())
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: IntervalLimits) -> Self {
        let selectable = limits.available(None);
        Self {
            symbol: Symbol::default(),
            interval: Interval::default(),
            start: None,
            end: None,
            loading: false,
            response: None,
            error: None,
            limits,
            selectable,
            next_request: 0,
            in_flight: None,
        }
    }

    /// Apply a form edit. Returns `false` if the edit was refused.
    ///
    /// Range edits recompute interval availability and may silently replace
    /// the current interval with the coarsest one still allowed.
    pub fn apply(&mut self, action: QueryAction) -> bool {
        match action {
            QueryAction::SetSymbol(symbol) => {
                self.symbol = symbol;
                true
            }
            QueryAction::SetInterval(interval) => {
                if !self.selectable.contains(&interval) {
                    tracing::debug!(%interval, "Interval not selectable for current range");
                    return false;
                }
                self.interval = interval;
                true
            }
            QueryAction::SetStart(start) => {
                self.start = start;
                self.refresh_intervals();
                true
            }
            QueryAction::SetEnd(end) => {
                self.end = end;
                self.refresh_intervals();
                true
            }
        }
    }

    /// Set the start bound from raw form text.
    pub fn set_start_input(&mut self, input: &str) -> Result<(), ValidationError> {
        let start = parse_datetime_input(input)?;
        self.apply(QueryAction::SetStart(start));
        Ok(())
    }

    /// Set the end bound from raw form text.
    pub fn set_end_input(&mut self, input: &str) -> Result<(), ValidationError> {
        let end = parse_datetime_input(input)?;
        self.apply(QueryAction::SetEnd(end));
        Ok(())
    }

    /// Intervals the current range allows, finest first.
    pub fn selectable_intervals(&self) -> &[Interval] {
        &self.selectable
    }

    /// Current range length, when both bounds are set.
    pub fn span(&self) -> Option<chrono::Duration> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(e - s),
            _ => None,
        }
    }

    /// Start a submission.
    ///
    /// Clears the previous result. On a validation failure the message is
    /// stored in `error`, no query is produced, and any request still in
    /// flight is abandoned so its response cannot land next to the error.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<(RequestId, PriceQuery), ValidationError> {
        self.error = None;
        self.response = None;

        let (start, end) = match validate_range(self.symbol, self.start, self.end, now) {
            Ok(range) => range,
            Err(e) => {
                self.in_flight = None;
                self.loading = false;
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.in_flight = Some(id);
        self.loading = true;

        Ok((
            id,
            PriceQuery {
                symbol: self.symbol,
                interval: self.interval,
                start_ms: start.timestamp_millis(),
                end_ms: end.timestamp_millis(),
            },
        ))
    }

    /// Store the outcome of submission `id`.
    ///
    /// Results of anything but the latest submission are discarded so a slow
    /// stale response can never overwrite a newer one. Returns whether the
    /// result was applied.
    pub fn resolve(&mut self, id: RequestId, result: Result<PriceHistory, SdkError>) -> bool {
        if self.in_flight != Some(id) {
            tracing::warn!(
                request = id.value(),
                latest = self.next_request,
                "Discarding stale price response"
            );
            return false;
        }

        self.in_flight = None;
        self.loading = false;
        match result {
            Ok(history) => {
                tracing::debug!(points = history.points.len(), "Price response stored");
                self.response = Some(history);
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Pretty-printed raw response body of the current result.
    pub fn raw_json(&self) -> Option<String> {
        self.response.as_ref().map(PriceHistory::raw_pretty)
    }

    fn refresh_intervals(&mut self) {
        let IntervalAvailability {
            selectable,
            selected,
            downgraded_from,
        } = self.limits.reconcile(self.interval, self.span());

        if let Some(previous) = downgraded_from {
            tracing::debug!(from = %previous, to = %selected, "Interval downgraded for range");
        }
        self.selectable = selectable;
        self.interval = selected;
    }
}
