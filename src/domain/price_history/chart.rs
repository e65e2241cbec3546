//! Historical chart component: [`ChartState`] plus the chart object drawn from it.

use super::state::{ChartState, Selection, TimeField};
use super::PricePoint;
use crate::chart::{ChartSlot, ChartSurface};

/// Historical price chart bound to a rendering surface.
///
/// Every change of points or time field destroys the previous chart object
/// and creates a new one; the old object is never fed new series.
pub struct HistoricalChart<S: ChartSurface> {
    state: ChartState,
    slot: ChartSlot<S>,
}

impl<S: ChartSurface> HistoricalChart<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: ChartState::new(),
            slot: ChartSlot::new(surface),
        }
    }

    pub fn set_points(&mut self, points: Vec<PricePoint>) {
        tracing::debug!(points = points.len(), "Rendering historical chart");
        self.state.set_points(points);
        self.render();
    }

    /// Switch the time field; re-renders only if it actually changed.
    pub fn set_time_field(&mut self, field: TimeField) {
        if self.state.set_time_field(field) {
            self.render();
        }
    }

    pub fn toggle_time_field(&mut self) {
        let next = self.state.time_field().toggled();
        self.set_time_field(next);
    }

    pub fn click(&mut self, index: Option<usize>) -> Option<&Selection> {
        self.state.click(index)
    }

    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.state.tooltip(index)
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        self.slot.surface()
    }

    /// Tear the chart down (component unmount).
    pub fn unmount(&mut self) {
        self.slot.release();
    }

    fn render(&mut self) {
        self.slot.replace(&self.state.to_spec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::testing::{RecordingSurface, SurfaceCall};
    use chrono::{TimeZone, Utc};

    fn points(n: usize) -> Vec<PricePoint> {
        (0..n)
            .map(|i| {
                let open = Utc.timestamp_millis_opt(1_700_000_000_000 + i as i64 * 3_600_000).unwrap();
                PricePoint {
                    open_time: open,
                    close_time: open + chrono::Duration::milliseconds(3_599_999),
                    open: 100.0 + i as f64,
                    close: 101.0 + i as f64,
                    high: None,
                    low: None,
                    volume: None,
                    trades: None,
                }
            })
            .collect()
    }

    #[test]
    fn test_new_points_recreate_chart() {
        let (surface, calls) = RecordingSurface::new();
        let mut chart = HistoricalChart::new(surface);
        chart.set_points(points(2));
        chart.set_points(points(3));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], SurfaceCall::Destroy { id: 1 });
        match &calls[2] {
            SurfaceCall::Create { id, spec } => {
                assert_eq!(*id, 2);
                assert_eq!(spec.values, vec![101.0, 102.0, 103.0]);
                assert_eq!(spec.title, "Close Price (USDT)");
            }
            other => panic!("expected Create, got {other:?}"),
        }
        assert!(!calls.iter().any(|c| matches!(c, SurfaceCall::Update { .. })));
    }

    #[test]
    fn test_time_field_toggle_recreates_only_on_change() {
        let (surface, calls) = RecordingSurface::new();
        let mut chart = HistoricalChart::new(surface);
        chart.set_points(points(1));
        chart.set_time_field(TimeField::Close);
        assert_eq!(calls.borrow().len(), 1);

        chart.toggle_time_field();
        assert_eq!(chart.state().time_field(), TimeField::Open);
        assert_eq!(calls.borrow().len(), 3);
    }

    #[test]
    fn test_click_does_not_rerender() {
        let (surface, calls) = RecordingSurface::new();
        let mut chart = HistoricalChart::new(surface);
        chart.set_points(points(2));
        let sel = chart.click(Some(1)).copied().unwrap();
        assert_eq!(sel.price, 102.0);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_unmount_releases_chart() {
        let (surface, calls) = RecordingSurface::new();
        let mut chart = HistoricalChart::new(surface);
        chart.set_points(points(1));
        chart.unmount();
        assert_eq!(calls.borrow().last(), Some(&SurfaceCall::Destroy { id: 1 }));
        drop(chart);
        assert_eq!(calls.borrow().len(), 2);
    }
}
