mod common;

use common::{MemoryTarget, MockTransport, RecordingModal, api};
use futures::executor::block_on;
use serde_json::json;

use quantumbotx_web::presentation::pages::{CryptoPage, ForexPage, StocksPage};
use quantumbotx_web::presentation::renderers::market::{NO_CRYPTO, PROFILE_LOADING};

#[test]
fn forex_board_lists_pairs_in_symbol_order() {
    let transport = MockTransport::new();
    transport.ok(
        "GET",
        "/api/forex-data",
        json!({
            "USDJPY": { "name": "USDJPY", "bid": 151.234, "ask": 151.251, "spread": 17, "digits": 3 },
            "EURUSD": { "name": "EURUSD", "bid": 1.08512, "ask": 1.08527, "spread": 15, "digits": 5 }
        }),
    );
    let table = MemoryTarget::new();
    let page = ForexPage::new(api(transport), table.clone(), RecordingModal::new());

    block_on(page.unit().refresh());

    let html = table.html();
    assert!(html.find("EURUSD").unwrap() < html.find("USDJPY").unwrap());
    assert!(html.contains("17.0 pips"));
    assert!(html.contains("151.251"));
}

#[test]
fn forex_profile_fills_the_modal() {
    let transport = MockTransport::new();
    transport.ok(
        "GET",
        "/api/forex/EURUSD/profile",
        json!({
            "symbol": "EURUSD", "name": "Euro vs US Dollar", "currency_base": "EUR", "currency_profit": "USD",
            "digits": 5, "spread": 15, "trade_contract_size": 100000, "volume_min": 0.01, "volume_max": 100,
            "volume_step": 0.01, "margin_initial": 0, "margin_maintenance": 0
        }),
    );
    let modal = RecordingModal::new();
    let page = ForexPage::new(api(transport), MemoryTarget::new(), modal.clone());

    block_on(page.profile().open("EURUSD"));

    assert!(modal.open.get());
    assert_eq!(*modal.title.borrow(), "Euro vs US Dollar");
    let body = modal.body.borrow();
    assert!(body.contains("<strong>Contract Size:</strong> 100000"));
    assert!(body.contains("<strong>Min Volume:</strong> 0.01"));

    page.profile().close();
    assert!(!modal.open.get());
}

#[test]
fn stock_profile_failure_shows_the_error_in_the_modal() {
    let transport = MockTransport::new();
    transport
        .ok("GET", "/api/stocks", json!([{ "symbol": "AAPL", "last_price": 190.5, "change": 1.2, "time": "16:00" }]))
        .status("GET", "/api/stocks/AAPL/profile", 404, json!({ "error": "Simbol tidak ditemukan" }));
    let table = MemoryTarget::new();
    let modal = RecordingModal::new();
    let page = StocksPage::new(api(transport), table.clone(), modal.clone());

    block_on(page.unit().refresh());
    assert!(table.html().contains("▲ 1.2"));

    block_on(page.profile().open("AAPL"));

    assert!(modal.open.get());
    assert_eq!(*modal.title.borrow(), "Error");
    assert_eq!(*modal.body.borrow(), "Simbol tidak ditemukan");
    assert_ne!(*modal.title.borrow(), PROFILE_LOADING);
}

#[test]
fn crypto_board_colours_changes_by_sign() {
    let transport = MockTransport::new();
    transport
        .ok(
            "GET",
            "/api/crypto",
            json!([
                { "name": "Bitcoin", "symbol": "BTC", "price": "$64,210.00", "change": "+2.10%", "market_cap": "$1.2T" },
                { "name": "Ethereum", "symbol": "ETH", "price": "$3,120.00", "change": "-0.80%", "market_cap": "$370B" }
            ]),
        )
        .ok("GET", "/api/crypto", json!([]));
    let table = MemoryTarget::new();
    let page = CryptoPage::new(api(transport), table.clone());

    block_on(page.unit().refresh());
    let html = table.html();
    assert!(html.contains(r#"text-green-600 font-medium">+2.10%"#));
    assert!(html.contains(r#"text-red-600 font-medium">-0.80%"#));

    block_on(page.unit().refresh());
    assert!(table.html().contains(NO_CRYPTO));
}
