mod common;

use common::{ChartEvent, RecordingBackend};

use quantumbotx_web::application::chart_adapter::{ChartDataset, ChartHandle};

fn labels(n: usize) -> Vec<String> {
    (1..=n).map(|step| step.to_string()).collect()
}

#[test]
fn repeated_renders_update_the_same_instance() {
    let backend = RecordingBackend::default();
    let mut chart = ChartHandle::new("price-chart", backend.clone());

    for round in 0..5 {
        let values = vec![1.0 + round as f64, 2.0, 3.0];
        chart.render(ChartDataset::line("EURUSD", labels(3), values)).unwrap();
        assert_eq!(backend.live(), 1);
    }

    assert_eq!(backend.created(), 1);
    assert!(chart.is_live());
    assert_eq!(backend.last_dataset().unwrap().values, vec![5.0, 2.0, 3.0]);
}

#[test]
fn shape_change_destroys_before_creating() {
    let backend = RecordingBackend::default();
    let mut chart = ChartHandle::new("portfolio-allocation", backend.clone());

    chart.render(ChartDataset::line("Total P/L ($)", labels(2), vec![1.0, 2.0])).unwrap();
    chart
        .render(ChartDataset::doughnut("Alokasi Aset", vec!["EURUSD".into()], vec![100.0]))
        .unwrap();

    let events = backend.events();
    assert!(matches!(events[0], ChartEvent::Create(_)));
    assert_eq!(events[1], ChartEvent::Destroy(1));
    assert!(matches!(events[2], ChartEvent::Create(_)));
    assert_eq!(backend.live(), 1);
}

#[test]
fn rolling_window_keeps_the_newest_points() {
    let backend = RecordingBackend::default();
    let mut chart = ChartHandle::new("portfolio-pnl", backend.clone());
    chart.render(ChartDataset::line("Total P/L ($)", Vec::new(), Vec::new())).unwrap();

    for step in 0..65 {
        chart.push_point(format!("t{}", step), step as f64, 60).unwrap();
    }

    let dataset = chart.dataset().unwrap();
    assert_eq!(dataset.len(), 60);
    assert_eq!(dataset.labels.first().map(String::as_str), Some("t5"));
    assert_eq!(dataset.values.last(), Some(&64.0));
    assert_eq!(backend.created(), 1);
}

#[test]
fn push_before_first_render_is_ignored() {
    let backend = RecordingBackend::default();
    let mut chart = ChartHandle::new("idle", backend.clone());

    chart.push_point("t0".into(), 1.0, 60).unwrap();

    assert!(backend.events().is_empty());
    assert!(!chart.is_live());
}

#[test]
fn dropping_the_handle_destroys_the_instance() {
    let backend = RecordingBackend::default();
    {
        let mut chart = ChartHandle::new("rsi-chart", backend.clone());
        chart
            .render(ChartDataset::line("RSI", labels(2), vec![30.0, 70.0]).with_y_range(0.0, 100.0))
            .unwrap();
        assert_eq!(backend.live(), 1);
    }
    assert_eq!(backend.live(), 0);
}
