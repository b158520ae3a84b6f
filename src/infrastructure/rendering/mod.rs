pub mod canvas_chart;

pub use canvas_chart::{CanvasChart, CanvasChartBackend};
