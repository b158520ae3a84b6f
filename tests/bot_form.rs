mod common;

use std::rc::Rc;

use common::{MemoryTarget, MockTransport, RecordingFeedback, RecordingFormView, api};
use futures::executor::block_on;
use serde_json::json;

use quantumbotx_web::application::{
    bot_form::{FormMode, ModalState, PARAMS_FAILED, PARAMS_NONE, TITLE_CREATE, TITLE_EDIT},
    feedback::ToastKind,
};
use quantumbotx_web::infrastructure::{api::QuantumApi, http::HttpMethod};
use quantumbotx_web::presentation::pages::{BotAction, BotsPage, bots::CONFIRM_DELETE};

struct Fixture {
    api: Rc<QuantumApi<MockTransport>>,
    page: BotsPage<MockTransport, RecordingFormView>,
    view: Rc<RecordingFormView>,
    table: Rc<MemoryTarget>,
    feedback: Rc<RecordingFeedback>,
}

impl Fixture {
    fn new(transport: MockTransport) -> Self {
        let api = api(transport);
        let view = RecordingFormView::new();
        let table = MemoryTarget::new();
        let feedback = RecordingFeedback::new();
        let page = BotsPage::new(api.clone(), table.clone(), view.clone(), feedback.clone());
        Self { api, page, view, table, feedback }
    }

    fn transport(&self) -> &MockTransport {
        self.api.transport()
    }
}

fn fill_xauusd(view: &RecordingFormView) {
    view.type_field("name", "XAUUSD Hybrid H1");
    view.type_field("market", "XAUUSD");
    view.type_field("strategy", "MA_CROSSOVER");
}

#[test]
fn creating_a_bot_posts_the_draft_then_refreshes_the_table() {
    let transport = MockTransport::new();
    transport
        .ok("GET", "/api/strategies/MA_CROSSOVER/params", json!([]))
        .ok("POST", "/api/bots", json!({ "message": "Bot berhasil dibuat", "bot_id": 9 }))
        .ok(
            "GET",
            "/api/bots",
            json!([{ "id": 9, "name": "XAUUSD Hybrid H1", "market": "XAUUSD", "status": "Dijeda" }]),
        );
    let fx = Fixture::new(transport);
    let (view, table, feedback) = (&fx.view, &fx.table, &fx.feedback);
    let form = fx.page.form().clone();

    form.open_create();
    assert!(view.open.get());
    assert_eq!(*view.title.borrow(), TITLE_CREATE);
    assert_eq!(view.field("lot_size").as_deref(), Some("0.01"));
    assert_eq!(view.field("sl_pips").as_deref(), Some("100"));
    assert_eq!(view.field("timeframe").as_deref(), Some("H1"));

    fill_xauusd(view);
    block_on(form.select_strategy("MA_CROSSOVER")).unwrap();
    assert_eq!(view.params_message.borrow().as_deref(), Some(PARAMS_NONE));

    block_on(form.submit()).unwrap();

    let transport = fx.transport();
    assert_eq!(
        transport.calls(),
        vec!["GET /api/strategies/MA_CROSSOVER/params", "POST /api/bots", "GET /api/bots"]
    );
    let requests = transport.requests();
    let post = &requests[1];
    assert_eq!(post.method, HttpMethod::Post);
    assert_eq!(
        post.json_body(),
        Some(&json!({
            "name": "XAUUSD Hybrid H1",
            "market": "XAUUSD",
            "lot_size": 0.01,
            "sl_pips": 100,
            "tp_pips": 200,
            "timeframe": "H1",
            "check_interval_seconds": 60,
            "strategy": "MA_CROSSOVER"
        }))
    );
    assert!(!view.open.get());
    assert_eq!(form.state(), ModalState::Closed);
    assert_eq!(feedback.last(), Some(("✅ Bot berhasil dibuat".to_string(), ToastKind::Success)));
    assert!(table.html().contains("XAUUSD Hybrid H1"));
}

#[test]
fn server_rejection_keeps_the_modal_open_with_the_message() {
    let transport = MockTransport::new();
    transport.status("POST", "/api/bots", 400, json!({ "error": "Nama bot sudah dipakai" }));
    let fx = Fixture::new(transport);
    let (view, table, feedback) = (&fx.view, &fx.table, &fx.feedback);
    let form = fx.page.form().clone();

    form.open_create();
    fill_xauusd(view);
    let err = block_on(form.submit()).unwrap_err();

    assert_eq!(err.user_message(), "Nama bot sudah dipakai");
    assert!(view.open.get());
    assert_eq!(form.state(), ModalState::Open(FormMode::Create));
    assert_eq!(view.error.borrow().as_deref(), Some("Nama bot sudah dipakai"));
    assert!(!view.busy.get());
    assert_eq!(form.last_error().as_deref(), Some("Nama bot sudah dipakai"));
    assert_eq!(table.writes(), 0);
    assert!(feedback.toasts().is_empty());
}

#[test]
fn invalid_fields_never_reach_the_network() {
    let fx = Fixture::new(MockTransport::new());
    let view = &fx.view;
    let form = fx.page.form().clone();

    form.open_create();
    fill_xauusd(view);
    view.type_field("lot_size", "-1");
    assert!(block_on(form.submit()).is_err());

    view.type_field("lot_size", "0.02");
    view.type_field("name", "   ");
    assert!(block_on(form.submit()).is_err());

    assert!(fx.transport().requests().is_empty());
    assert_eq!(view.error.borrow().as_deref(), Some("Nama bot wajib diisi."));
    assert!(view.open.get());
}

#[test]
fn editing_prefills_fields_then_parameters_in_schema_order() {
    let transport = MockTransport::new();
    transport
        .ok(
            "GET",
            "/api/bots/42",
            json!({
                "id": 42,
                "name": "EURUSD Scalper",
                "market": "EURUSD",
                "strategy": "MA_CROSSOVER",
                "lot_size": 0.1,
                "sl_pips": 50,
                "tp_pips": 120,
                "timeframe": "M15",
                "check_interval_seconds": 30,
                "strategy_params": "{\"fast_period\": 12, \"use_filter\": true}"
            }),
        )
        .ok(
            "GET",
            "/api/strategies/MA_CROSSOVER/params",
            json!([
                { "name": "fast_period", "label": "Fast MA", "type": "number", "default": 10 },
                { "name": "use_filter", "label": "Filter", "type": "boolean", "default": false }
            ]),
        )
        .ok("PUT", "/api/bots/42", json!({ "message": "Bot diperbarui" }))
        .ok("GET", "/api/bots", json!([]));
    let fx = Fixture::new(transport);
    let (view, feedback) = (&fx.view, &fx.feedback);
    let form = fx.page.form().clone();

    block_on(fx.page.handle_action(BotAction::Edit(42)));

    assert_eq!(*view.title.borrow(), TITLE_EDIT);
    assert_eq!(form.state(), ModalState::Open(FormMode::Edit { id: 42 }));
    assert_eq!(view.field("name").as_deref(), Some("EURUSD Scalper"));
    assert_eq!(view.field("sl_pips").as_deref(), Some("50"));
    assert_eq!(view.inputs.borrow().len(), 2);
    assert_eq!(view.param("fast_period").as_deref(), Some("12"));
    assert_eq!(view.param("use_filter").as_deref(), Some("true"));

    view.type_field("tp_pips", "150");
    block_on(form.submit()).unwrap();

    let transport = fx.transport();
    let put = transport
        .requests()
        .into_iter()
        .find(|request| request.method == HttpMethod::Put)
        .unwrap();
    assert_eq!(put.path, "/api/bots/42");
    let body = put.json_body().unwrap();
    assert_eq!(body["tp_pips"], json!(150));
    assert_eq!(body["strategy_params"], json!({ "fast_period": 12, "use_filter": true }));
    assert_eq!(feedback.last(), Some(("✅ Bot diperbarui".to_string(), ToastKind::Success)));
}

#[test]
fn weekly_and_monthly_bots_save_unchanged_from_the_edit_modal() {
    for (id, timeframe) in [(7u64, "W1"), (8, "MN1")] {
        let transport = MockTransport::new();
        let path = format!("/api/bots/{}", id);
        transport
            .ok(
                "GET",
                &path,
                json!({
                    "id": id,
                    "name": "Gold Swing",
                    "market": "XAUUSD",
                    "strategy": "MA_CROSSOVER",
                    "lot_size": 0.05,
                    "sl_pips": 300,
                    "tp_pips": 600,
                    "timeframe": timeframe,
                    "check_interval_seconds": 3600
                }),
            )
            .ok("GET", "/api/strategies/MA_CROSSOVER/params", json!([]))
            .ok("PUT", &path, json!({ "message": "Bot diperbarui" }))
            .ok("GET", "/api/bots", json!([]));
        let fx = Fixture::new(transport);
        let form = fx.page.form().clone();

        block_on(fx.page.handle_action(BotAction::Edit(id)));
        assert_eq!(fx.view.field("timeframe").as_deref(), Some(timeframe));
        block_on(form.submit()).unwrap();

        let put = fx
            .transport()
            .requests()
            .into_iter()
            .find(|request| request.method == HttpMethod::Put)
            .unwrap();
        assert_eq!(put.path, path);
        assert_eq!(put.json_body().unwrap()["timeframe"], json!(timeframe));
    }
}

#[test]
fn missing_bot_on_edit_is_reported_once() {
    let transport = MockTransport::new();
    transport.status("GET", "/api/bots/9", 404, json!({ "error": "Bot tidak ditemukan" }));
    let fx = Fixture::new(transport);

    block_on(fx.page.handle_action(BotAction::Edit(9)));

    assert_eq!(
        fx.feedback.toasts(),
        vec![("❌ Gagal memuat data bot: Bot tidak ditemukan".to_string(), ToastKind::Error)]
    );
    assert_eq!(fx.page.form().state(), ModalState::Closed);
    assert_eq!(fx.transport().calls(), vec!["GET /api/bots/9"]);
}

#[test]
fn failed_schema_load_shows_the_failure_message() {
    let transport = MockTransport::new();
    transport.offline("GET", "/api/strategies/RSI_BREAKOUT/params");
    let fx = Fixture::new(transport);
    let view = &fx.view;
    let form = fx.page.form().clone();

    form.open_create();
    assert!(block_on(form.select_strategy("RSI_BREAKOUT")).is_err());

    assert_eq!(view.params_message.borrow().as_deref(), Some(PARAMS_FAILED));
    assert!(form.schema().is_empty());
}

#[test]
fn strategy_list_failure_is_flagged_on_the_form() {
    let transport = MockTransport::new();
    transport.status("GET", "/api/strategies", 503, json!({}));
    let fx = Fixture::new(transport);

    assert!(block_on(fx.page.form().load_strategies()).is_err());
    assert!(fx.view.strategies_failed.get());
}

#[test]
fn refused_delete_sends_nothing() {
    let fx = Fixture::new(MockTransport::new());
    fx.feedback.answer(false);

    block_on(fx.page.handle_action(BotAction::Delete(5)));

    assert_eq!(fx.feedback.confirms(), vec![CONFIRM_DELETE.to_string()]);
    assert!(fx.transport().requests().is_empty());
    assert!(fx.feedback.toasts().is_empty());
}

#[test]
fn confirmed_delete_toasts_and_reloads_the_table() {
    let transport = MockTransport::new();
    transport
        .ok("DELETE", "/api/bots/5", json!({ "message": "Bot dihapus" }))
        .ok("GET", "/api/bots", json!([]));
    let fx = Fixture::new(transport);
    fx.feedback.answer(true);

    block_on(fx.page.handle_action(BotAction::Delete(5)));

    assert_eq!(fx.transport().calls(), vec!["DELETE /api/bots/5", "GET /api/bots"]);
    assert_eq!(fx.feedback.last(), Some(("✅ Bot dihapus".to_string(), ToastKind::Success)));
    assert_eq!(fx.table.writes(), 1);
}

#[test]
fn start_and_stop_report_the_server_reply() {
    let transport = MockTransport::new();
    transport
        .ok("POST", "/api/bots/3/start", json!({}))
        .status("POST", "/api/bots/3/stop", 500, json!({ "error": "MT5 tidak terhubung" }))
        .ok("GET", "/api/bots", json!([]));
    let fx = Fixture::new(transport);

    block_on(fx.page.handle_action(BotAction::Start(3)));
    block_on(fx.page.handle_action(BotAction::Stop(3)));

    assert_eq!(
        fx.feedback.toasts(),
        vec![
            ("✅ Operasi berhasil".to_string(), ToastKind::Success),
            ("❌ MT5 tidak terhubung".to_string(), ToastKind::Error),
        ]
    );
    assert_eq!(fx.transport().count("GET /api/bots"), 1);
}
