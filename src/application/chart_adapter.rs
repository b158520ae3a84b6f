//! Owning wrapper around one chart instance per canvas.

use crate::domain::errors::AppResult;
use crate::domain::logging::LogComponent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Doughnut,
}

pub const ALLOCATION_PALETTE: [&str; 6] = ["#36A2EB", "#FFCD56", "#4BC0C0", "#FF6384", "#9966FF", "#FF9F40"];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Stroke colour for line charts.
    pub color: String,
    pub fill: bool,
    /// Fixed value axis, e.g. `0..100` for RSI. `None` fits the data.
    pub y_range: Option<(f64, f64)>,
    /// Segment colours for doughnuts, cycled.
    pub palette: Vec<String>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            color: "#3B82F6".to_string(),
            fill: true,
            y_range: None,
            palette: ALLOCATION_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Labels plus one numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub kind: ChartKind,
    pub series_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub style: ChartStyle,
}

impl ChartDataset {
    pub fn line(series_label: &str, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            kind: ChartKind::Line,
            series_label: series_label.to_string(),
            labels,
            values,
            style: ChartStyle::default(),
        }
    }

    pub fn doughnut(series_label: &str, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            ..Self::line(series_label, labels, values)
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.style.color = color.to_string();
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.style.y_range = Some((min, max));
        self
    }

    /// Same kind and series: the existing instance can be updated in place.
    pub fn is_compatible(&self, other: &ChartDataset) -> bool {
        self.kind == other.kind && self.series_label == other.series_label
    }

    pub fn len(&self) -> usize {
        self.labels.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a point and drops the oldest ones beyond `max_points`.
    pub fn push(&mut self, label: String, value: f64, max_points: usize) {
        self.labels.push(label);
        self.values.push(value);
        let overflow = self.labels.len().saturating_sub(max_points);
        if overflow > 0 {
            self.labels.drain(..overflow);
        }
        let overflow = self.values.len().saturating_sub(max_points);
        if overflow > 0 {
            self.values.drain(..overflow);
        }
    }
}

/// Drawing library seam. One instance corresponds to one live chart on a canvas.
pub trait ChartBackend {
    type Instance;

    fn create(&self, dataset: &ChartDataset) -> AppResult<Self::Instance>;
    fn update(&self, instance: &mut Self::Instance, dataset: &ChartDataset) -> AppResult<()>;
    fn destroy(&self, instance: Self::Instance);
}

struct LiveChart<I> {
    instance: I,
    dataset: ChartDataset,
}

/// Holds at most one chart instance; destroys before it ever creates a second.
pub struct ChartHandle<B: ChartBackend> {
    name: &'static str,
    backend: B,
    live: Option<LiveChart<B::Instance>>,
}

impl<B: ChartBackend> ChartHandle<B> {
    pub fn new(name: &'static str, backend: B) -> Self {
        Self {
            name,
            backend,
            live: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn dataset(&self) -> Option<&ChartDataset> {
        self.live.as_ref().map(|live| &live.dataset)
    }

    /// Create when absent, update in place when compatible, otherwise destroy then create.
    pub fn render(&mut self, dataset: ChartDataset) -> AppResult<()> {
        if let Some(live) = self.live.as_mut() {
            if live.dataset.is_compatible(&dataset) {
                self.backend.update(&mut live.instance, &dataset)?;
                live.dataset = dataset;
                return Ok(());
            }
            crate::log_debug!(
                LogComponent::Application("Chart"),
                "{}: dataset shape changed, recreating",
                self.name,
            );
            self.dispose();
        }

        let instance = self.backend.create(&dataset)?;
        self.live = Some(LiveChart { instance, dataset });
        Ok(())
    }

    /// Rolling append for live series. No-op until the chart has been rendered once.
    pub fn push_point(&mut self, label: String, value: f64, max_points: usize) -> AppResult<()> {
        let Some(live) = self.live.as_mut() else {
            crate::log_warn!(
                LogComponent::Application("Chart"),
                "{}: push_point before first render",
                self.name,
            );
            return Ok(());
        };
        live.dataset.push(label, value, max_points);
        self.backend.update(&mut live.instance, &live.dataset)
    }

    pub fn dispose(&mut self) {
        if let Some(live) = self.live.take() {
            self.backend.destroy(live.instance);
        }
    }
}

impl<B: ChartBackend> Drop for ChartHandle<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
