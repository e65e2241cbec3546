//! Interval availability — which candle intervals a time range allows.

use crate::shared::Interval;
use chrono::Duration;

/// Maximum supported range per interval. `None` means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalLimits {
    limits: Vec<(Interval, Option<Duration>)>,
}

impl Default for IntervalLimits {
    fn default() -> Self {
        Self::new([
            (Interval::Minute1, Some(Duration::days(7))),
            (Interval::Minute5, Some(Duration::days(30))),
            (Interval::Minute15, Some(Duration::days(60))),
            (Interval::Minute30, Some(Duration::days(120))),
            (Interval::Hour1, Some(Duration::days(365))),
            (Interval::Hour2, Some(Duration::days(730))),
            (Interval::Hour4, Some(Duration::days(1460))),
            (Interval::Hour6, None),
            (Interval::Hour8, None),
            (Interval::Hour12, None),
            (Interval::Day1, None),
            (Interval::Day3, None),
            (Interval::Week1, None),
            (Interval::Month1, None),
        ])
    }
}

/// Result of reconciling the current interval against a range.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalAvailability {
    /// Selectable intervals, finest first.
    pub selectable: Vec<Interval>,
    /// The interval to use after reconciliation.
    pub selected: Interval,
    /// Set when `selected` replaced an interval the range no longer allows.
    pub downgraded_from: Option<Interval>,
}

impl IntervalLimits {
    /// Build a table; entries are kept in fine-to-coarse order regardless of input order.
    pub fn new(limits: impl IntoIterator<Item = (Interval, Option<Duration>)>) -> Self {
        let mut limits: Vec<_> = limits.into_iter().collect();
        limits.sort_by_key(|(interval, _)| *interval);
        limits.dedup_by_key(|(interval, _)| *interval);
        Self { limits }
    }

    /// Intervals known to this table, finest first.
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.limits.iter().map(|(i, _)| *i)
    }

    /// Maximum range for `interval`: `None` if the table lacks it,
    /// `Some(None)` if unbounded.
    pub fn max_range(&self, interval: Interval) -> Option<Option<Duration>> {
        self.limits
            .iter()
            .find(|(i, _)| *i == interval)
            .map(|(_, max)| *max)
    }

    /// Intervals whose maximum range is at least `span`. With no span every
    /// interval is available.
    pub fn available(&self, span: Option<Duration>) -> Vec<Interval> {
        self.limits
            .iter()
            .filter(|(_, max)| match (span, max) {
                (None, _) | (_, None) => true,
                (Some(span), Some(max)) => *max >= span,
            })
            .map(|(i, _)| *i)
            .collect()
    }

    /// Filter for `span` and replace `current` with the coarsest remaining
    /// option if it is no longer allowed.
    pub fn reconcile(&self, current: Interval, span: Option<Duration>) -> IntervalAvailability {
        let selectable = self.available(span);
        if selectable.contains(&current) {
            return IntervalAvailability {
                selectable,
                selected: current,
                downgraded_from: None,
            };
        }

        match selectable.last().copied() {
            Some(coarsest) => IntervalAvailability {
                selectable,
                selected: coarsest,
                downgraded_from: Some(current),
            },
            // Nothing fits: keep the current interval and let the backend decide.
            None => IntervalAvailability {
                selectable,
                selected: current,
                downgraded_from: None,
            },
        }
    }
}
