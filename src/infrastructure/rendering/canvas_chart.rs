use std::f64::consts::PI;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::application::chart_adapter::{ChartBackend, ChartDataset, ChartKind};
use crate::domain::{
    errors::{AppError, AppResult},
    logging::LogComponent,
};

/// Plot area inside the canvas, after padding for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl ScaleParams {
    pub fn fit(canvas_width: f64, canvas_height: f64, values: &[f64], y_range: Option<(f64, f64)>) -> Self {
        let padding = 24.0;
        let text_space = 48.0;
        let (mut min_value, mut max_value) = y_range.unwrap_or_else(|| {
            values
                .iter()
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
        });
        if !min_value.is_finite() || !max_value.is_finite() {
            min_value = 0.0;
            max_value = 1.0;
        }
        if (max_value - min_value).abs() < f64::EPSILON {
            min_value -= 1.0;
            max_value += 1.0;
        }
        Self {
            left: padding + text_space,
            top: padding,
            width: (canvas_width - padding * 2.0 - text_space).max(1.0),
            height: (canvas_height - padding * 2.0).max(1.0),
            min_value,
            max_value,
        }
    }

    /// Y grows downward on a canvas.
    pub fn y(&self, value: f64) -> f64 {
        self.top + (self.max_value - value) / (self.max_value - self.min_value) * self.height
    }

    pub fn x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            self.left + self.width / 2.0
        } else {
            self.left + index as f64 * self.width / (count - 1) as f64
        }
    }
}

pub fn line_points(values: &[f64], scale: &ScaleParams) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (scale.x(i, values.len()), scale.y(*v)))
        .collect()
}

/// `(start, end)` angles in radians, starting at twelve o'clock. Negative values count as zero.
pub fn doughnut_arcs(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = -PI / 2.0;
    values
        .iter()
        .map(|v| {
            let end = start + v.max(0.0) / total * 2.0 * PI;
            let arc = (start, end);
            start = end;
            arc
        })
        .collect()
}

/// Live chart drawn on a canvas 2D context.
pub struct CanvasChart {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

/// Draws line and doughnut charts with the 2D canvas API.
pub struct CanvasChartBackend {
    canvas: HtmlCanvasElement,
}

impl CanvasChartBackend {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    pub fn from_id(canvas_id: &str) -> AppResult<Self> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(canvas_id))
            .ok_or_else(|| AppError::dom(format!("canvas #{} not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::dom(format!("#{} is not a canvas", canvas_id)))?;
        Ok(Self::new(canvas))
    }

    fn context(&self) -> AppResult<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .map_err(|_| AppError::dom("failed to get 2D context"))?
            .ok_or_else(|| AppError::dom("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::dom("failed to cast to 2D context"))
    }

    fn draw(&self, chart: &CanvasChart, dataset: &ChartDataset) -> AppResult<()> {
        chart.context.clear_rect(0.0, 0.0, chart.width, chart.height);
        if dataset.is_empty() {
            return Ok(());
        }
        let result = match dataset.kind {
            ChartKind::Line => self.draw_line(chart, dataset),
            ChartKind::Doughnut => self.draw_doughnut(chart, dataset),
        };
        result.map_err(|err| AppError::dom(format!("{:?}", err)))
    }

    fn draw_line(&self, chart: &CanvasChart, dataset: &ChartDataset) -> Result<(), JsValue> {
        let ctx = &chart.context;
        let values = &dataset.values[..dataset.len()];
        let scale = ScaleParams::fit(chart.width, chart.height, values, dataset.style.y_range);
        let points = line_points(values, &scale);

        ctx.set_fill_style_str("#6b7280");
        ctx.set_font("11px sans-serif");
        ctx.fill_text(&format!("{:.2}", scale.max_value), 4.0, scale.top + 4.0)?;
        ctx.fill_text(&format!("{:.2}", scale.min_value), 4.0, scale.top + scale.height)?;

        if dataset.style.fill {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                ctx.begin_path();
                ctx.move_to(first.0, scale.top + scale.height);
                for (x, y) in &points {
                    ctx.line_to(*x, *y);
                }
                ctx.line_to(last.0, scale.top + scale.height);
                ctx.close_path();
                ctx.set_global_alpha(0.1);
                ctx.set_fill_style_str(&dataset.style.color);
                ctx.fill();
                ctx.set_global_alpha(1.0);
            }
        }

        ctx.set_stroke_style_str(&dataset.style.color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(*x, *y);
            } else {
                ctx.line_to(*x, *y);
            }
        }
        ctx.stroke();

        // first and last labels only; the axis is too narrow for more
        ctx.set_fill_style_str("#6b7280");
        if let (Some(first), Some(last)) = (dataset.labels.first(), dataset.labels.last()) {
            let baseline = scale.top + scale.height + 16.0;
            ctx.fill_text(first, scale.left, baseline)?;
            if dataset.len() > 1 {
                ctx.fill_text(last, scale.left + scale.width - 48.0, baseline)?;
            }
        }
        Ok(())
    }

    fn draw_doughnut(&self, chart: &CanvasChart, dataset: &ChartDataset) -> Result<(), JsValue> {
        let ctx = &chart.context;
        let legend_height = 18.0 * dataset.labels.len().min(6) as f64;
        let cx = chart.width / 2.0;
        let cy = legend_height + (chart.height - legend_height) / 2.0;
        let outer = ((chart.height - legend_height).min(chart.width) / 2.0 - 8.0).max(4.0);
        let inner = outer * 0.55;
        let palette = &dataset.style.palette;

        for (i, (start, end)) in doughnut_arcs(&dataset.values).into_iter().enumerate() {
            let color = palette.get(i % palette.len().max(1)).map(String::as_str).unwrap_or("#9ca3af");
            ctx.begin_path();
            ctx.arc(cx, cy, outer, start, end)?;
            ctx.arc_with_anticlockwise(cx, cy, inner, end, start, true)?;
            ctx.close_path();
            ctx.set_fill_style_str(color);
            ctx.fill();
        }

        ctx.set_font("11px sans-serif");
        for (i, label) in dataset.labels.iter().take(6).enumerate() {
            let color = palette.get(i % palette.len().max(1)).map(String::as_str).unwrap_or("#9ca3af");
            let y = 4.0 + i as f64 * 18.0;
            ctx.set_fill_style_str(color);
            ctx.fill_rect(8.0, y, 12.0, 12.0);
            ctx.set_fill_style_str("#374151");
            ctx.fill_text(label, 26.0, y + 10.0)?;
        }
        Ok(())
    }
}

impl ChartBackend for CanvasChartBackend {
    type Instance = CanvasChart;

    fn create(&self, dataset: &ChartDataset) -> AppResult<CanvasChart> {
        let context = self.context()?;
        let chart = CanvasChart {
            context,
            width: self.canvas.width() as f64,
            height: self.canvas.height() as f64,
        };
        crate::log_debug!(
            LogComponent::Infrastructure("CanvasChart"),
            "📈 create {:?} '{}' ({} points)",
            dataset.kind,
            dataset.series_label,
            dataset.len(),
        );
        self.draw(&chart, dataset)?;
        Ok(chart)
    }

    fn update(&self, instance: &mut CanvasChart, dataset: &ChartDataset) -> AppResult<()> {
        self.draw(instance, dataset)
    }

    fn destroy(&self, instance: CanvasChart) {
        instance.context.clear_rect(0.0, 0.0, instance.width, instance.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_range_maps_extremes_to_plot_edges() {
        let scale = ScaleParams::fit(400.0, 200.0, &[30.0, 70.0], Some((0.0, 100.0)));
        assert_eq!(scale.y(100.0), scale.top);
        assert_eq!(scale.y(0.0), scale.top + scale.height);
    }

    #[test]
    fn flat_series_still_has_a_range() {
        let scale = ScaleParams::fit(400.0, 200.0, &[5.0, 5.0], None);
        assert!(scale.max_value > scale.min_value);
    }

    #[test]
    fn arcs_cover_full_circle() {
        let arcs = doughnut_arcs(&[1.0, 1.0, 2.0]);
        assert_eq!(arcs.len(), 3);
        let sweep = arcs.last().unwrap().1 - arcs.first().unwrap().0;
        assert!((sweep - 2.0 * PI).abs() < 1e-9);
        assert!(doughnut_arcs(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn single_point_is_centered() {
        let scale = ScaleParams::fit(400.0, 200.0, &[1.0], None);
        let points = line_points(&[1.0], &scale);
        assert_eq!(points[0].0, scale.left + scale.width / 2.0);
    }
}
