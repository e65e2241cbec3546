//! Chart handle — the seam between dashboard state and a rendering backend.
//!
//! A [`ChartSurface`] knows how to create, update and destroy chart objects.
//! A [`ChartSlot`] owns at most one chart object on that surface: replacing it
//! always destroys the previous object first, and dropping the slot destroys
//! whatever is left.

/// How an in-place update should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Let the renderer animate the transition.
    Animated,
    /// Redraw immediately without animation.
    Immediate,
}

/// Everything a renderer needs to draw one line series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineChartSpec {
    /// Series label (legend / title).
    pub title: String,
    /// X-axis labels, one per value.
    pub labels: Vec<String>,
    /// Y values.
    pub values: Vec<f64>,
    /// Whether individual points are drawn (and therefore clickable).
    pub show_points: bool,
}

/// A rendering backend that owns chart objects.
pub trait ChartSurface {
    type Chart;

    fn create(&mut self, spec: &LineChartSpec) -> Self::Chart;

    fn update(&mut self, chart: &mut Self::Chart, spec: &LineChartSpec, mode: UpdateMode);

    fn destroy(&mut self, chart: Self::Chart);
}

/// Owned handle to the single chart object of a component.
pub struct ChartSlot<S: ChartSurface> {
    surface: S,
    chart: Option<S::Chart>,
}

impl<S: ChartSurface> ChartSlot<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            chart: None,
        }
    }

    /// Destroy the current chart (if any), then create a fresh one from `spec`.
    pub fn replace(&mut self, spec: &LineChartSpec) {
        self.release();
        self.chart = Some(self.surface.create(spec));
    }

    /// Update the live chart in place. Returns `false` when no chart exists.
    pub fn update(&mut self, spec: &LineChartSpec, mode: UpdateMode) -> bool {
        match self.chart.as_mut() {
            Some(chart) => {
                self.surface.update(chart, spec, mode);
                true
            }
            None => false,
        }
    }

    /// Destroy the current chart, leaving the slot empty.
    pub fn release(&mut self) {
        if let Some(old) = self.chart.take() {
            self.surface.destroy(old);
        }
    }

    pub fn is_active(&self) -> bool {
        self.chart.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ChartSurface> Drop for ChartSlot<S> {
    fn drop(&mut self) {
        self.release();
    }
}
