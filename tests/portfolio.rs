mod common;

use common::{ChartEvent, MemoryTarget, MockTransport, RecordingBackend, api};
use futures::executor::block_on;
use serde_json::json;

use quantumbotx_web::application::chart_adapter::ChartKind;
use quantumbotx_web::presentation::pages::{PortfolioPage, portfolio::ALLOCATION_SERIES};
use quantumbotx_web::presentation::renderers::portfolio::NO_POSITIONS;

fn positions(profits: &[f64]) -> serde_json::Value {
    let rows: Vec<_> = profits
        .iter()
        .enumerate()
        .map(|(i, profit)| {
            json!({ "symbol": format!("SYM{}", i), "type": i % 2, "volume": 0.1, "price_open": 1.1, "profit": profit })
        })
        .collect();
    json!(rows)
}

#[test]
fn each_cycle_updates_summary_trend_and_rolling_chart() {
    let transport = MockTransport::new();
    transport
        .ok("GET", "/api/portfolio/open-positions", positions(&[10.0, 2.5]))
        .ok("GET", "/api/portfolio/open-positions", positions(&[4.0]))
        .ok("GET", "/api/portfolio/allocation", json!({ "labels": ["XAUUSD", "EURUSD"], "values": [0.6, 0.4] }));
    let table = MemoryTarget::new();
    let summary = MemoryTarget::new();
    let pnl = RecordingBackend::default();
    let allocation = RecordingBackend::default();
    let page = PortfolioPage::new(api(transport), table.clone(), summary.clone(), pnl.clone(), allocation.clone());

    assert_eq!(pnl.created(), 1);

    block_on(page.unit().refresh());
    assert!(table.html().contains("SYM0"));
    assert!(summary.html().contains("+12.50"));
    assert!(summary.html().contains("fa-arrow-up"));

    block_on(page.unit().refresh());
    assert!(summary.html().contains("+4.00"));
    assert!(summary.html().contains("fa-arrow-down"));

    assert_eq!(pnl.created(), 1);
    let line = pnl.last_dataset().unwrap();
    assert_eq!(line.values, vec![12.5, 4.0]);
    assert_eq!(line.labels.len(), 2);

    let doughnut = allocation.last_dataset().unwrap();
    assert_eq!(doughnut.kind, ChartKind::Doughnut);
    assert_eq!(doughnut.series_label, ALLOCATION_SERIES);
    assert_eq!(allocation.created(), 1);
    assert!(matches!(allocation.events().last(), Some(ChartEvent::Update(_))));
}

#[test]
fn missing_allocation_still_renders_positions() {
    let transport = MockTransport::new();
    transport
        .ok("GET", "/api/portfolio/open-positions", positions(&[-3.0]))
        .status("GET", "/api/portfolio/allocation", 500, json!({ "error": "MT5 offline" }));
    let table = MemoryTarget::new();
    let summary = MemoryTarget::new();
    let allocation = RecordingBackend::default();
    let page = PortfolioPage::new(
        api(transport),
        table.clone(),
        summary.clone(),
        RecordingBackend::default(),
        allocation.clone(),
    );

    block_on(page.unit().refresh());

    assert!(table.html().contains("SYM0"));
    assert!(summary.html().contains("-3.00"));
    assert!(allocation.events().is_empty());
}

#[test]
fn no_open_positions_shows_the_placeholder_and_a_flat_total() {
    let transport = MockTransport::new();
    transport
        .ok("GET", "/api/portfolio/open-positions", json!([]))
        .ok("GET", "/api/portfolio/allocation", json!({ "labels": [], "values": [] }));
    let table = MemoryTarget::new();
    let summary = MemoryTarget::new();
    let page = PortfolioPage::new(
        api(transport),
        table.clone(),
        summary.clone(),
        RecordingBackend::default(),
        RecordingBackend::default(),
    );

    block_on(page.unit().refresh());

    assert!(table.html().contains(NO_POSITIONS));
    assert!(summary.html().contains("+0.00"));
    assert!(summary.html().contains("fa-minus"));
}

#[test]
fn positions_failure_leaves_the_charts_alone() {
    let transport = MockTransport::new();
    transport.offline("GET", "/api/portfolio/open-positions");
    let table = MemoryTarget::new();
    let summary = MemoryTarget::new();
    let pnl = RecordingBackend::default();
    let page = PortfolioPage::new(api(transport), table.clone(), summary.clone(), pnl.clone(), RecordingBackend::default());

    block_on(page.unit().refresh());

    assert!(table.html().contains("Gagal memuat data"));
    assert_eq!(summary.writes(), 0);
    assert_eq!(pnl.events().len(), 1);
}
