mod common;

use std::rc::Rc;

use common::{MemoryTarget, MockTransport, api};
use futures::executor::block_on;
use quickcheck_macros::quickcheck;
use serde_json::json;

use quantumbotx_web::application::{
    poll_unit::RenderTarget,
    history_sort::{SortColumn, SortDirection, SortState},
};
use quantumbotx_web::domain::portfolio::{Deal, DealType};
use quantumbotx_web::presentation::pages::HistoryPage;

fn deals() -> serde_json::Value {
    json!([
        { "symbol": "XAUUSD", "type": 1, "volume": 0.02, "profit": -4.5, "time": 1_700_000_300, "magic": 7 },
        { "symbol": "EURUSD", "type": 0, "volume": 0.10, "profit": 12.0, "time": 1_700_000_100, "magic": 3 },
        { "symbol": "GBPUSD", "type": 0, "volume": 0.05, "profit": 3.25, "time": 1_700_000_200, "magic": 5 }
    ])
}

fn page() -> (HistoryPage, Rc<MemoryTarget>, Vec<(SortColumn, Rc<MemoryTarget>)>) {
    let transport = MockTransport::new();
    transport.ok("GET", "/api/history", deals());
    let table = MemoryTarget::new();
    let glyphs: Vec<(SortColumn, Rc<MemoryTarget>)> =
        [SortColumn::Symbol, SortColumn::Profit].into_iter().map(|column| (column, MemoryTarget::new())).collect();
    let targets = glyphs
        .iter()
        .map(|(column, target)| (*column, target.clone() as Rc<dyn RenderTarget>))
        .collect();
    (HistoryPage::new(api(transport), table.clone(), targets), table, glyphs)
}

fn row_order(html: &str, symbols: &[&str]) -> Vec<usize> {
    symbols.iter().map(|symbol| html.find(symbol).unwrap()).collect()
}

#[test]
fn rows_keep_server_order_until_a_header_is_clicked() {
    let (page, table, _) = page();
    block_on(page.unit().refresh());

    let html = table.html();
    let positions = row_order(&html, &["XAUUSD", "EURUSD", "GBPUSD"]);
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[test]
fn clicking_a_header_sorts_locally_and_flips_its_glyph() {
    let (page, table, glyphs) = page();
    block_on(page.unit().refresh());

    page.sort_by(SortColumn::Profit);
    let html = table.html();
    let positions = row_order(&html, &["XAUUSD", "GBPUSD", "EURUSD"]);
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
    assert_eq!(glyphs[1].1.html(), "▲");
    assert_eq!(glyphs[0].1.html(), "");

    page.sort_by(SortColumn::Profit);
    let html = table.html();
    let positions = row_order(&html, &["EURUSD", "GBPUSD", "XAUUSD"]);
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
    assert_eq!(glyphs[1].1.html(), "▼");
    assert_eq!(page.sort_state().active(), Some((SortColumn::Profit, SortDirection::Descending)));
}

#[test]
fn switching_columns_starts_ascending_without_refetching() {
    let (page, table, glyphs) = page();
    block_on(page.unit().refresh());
    let writes = table.writes();

    page.sort_by(SortColumn::Profit);
    page.sort_by(SortColumn::Symbol);

    assert_eq!(table.writes(), writes + 2);
    assert_eq!(glyphs[0].1.html(), "▲");
    assert_eq!(glyphs[1].1.html(), "");
    let html = table.html();
    let positions = row_order(&html, &["EURUSD", "GBPUSD", "XAUUSD"]);
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[test]
fn sort_survives_the_next_refresh() {
    let (page, table, _) = page();
    block_on(page.unit().refresh());
    page.sort_by(SortColumn::Symbol);

    block_on(page.unit().refresh());

    let html = table.html();
    let positions = row_order(&html, &["EURUSD", "GBPUSD", "XAUUSD"]);
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[quickcheck]
fn profit_sort_is_ordered_and_toggles_back(profits: Vec<i32>) -> bool {
    let mut rows: Vec<Deal> = profits
        .iter()
        .enumerate()
        .map(|(index, profit)| Deal {
            symbol: format!("S{}", index),
            kind: DealType::Buy,
            profit: *profit as f64,
            ..Deal::default()
        })
        .collect();

    let mut state = SortState::default();
    state.toggle(SortColumn::Profit);
    state.apply(&mut rows);
    let ascending = rows.windows(2).all(|pair| pair[0].profit <= pair[1].profit);

    state.toggle(SortColumn::Profit);
    state.apply(&mut rows);
    let descending = rows.windows(2).all(|pair| pair[0].profit >= pair[1].profit);

    ascending && descending && rows.len() == profits.len()
}
