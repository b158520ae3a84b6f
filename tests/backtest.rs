mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{MemoryTarget, MockTransport, RecordingBackend, RecordingFeedback, RecordingVisibility, api};
use futures::executor::block_on;
use serde_json::{Value, json};

use quantumbotx_web::application::{
    bot_form::{PARAMS_FAILED, PARAMS_NONE},
    feedback::ToastKind,
};
use quantumbotx_web::domain::{
    bots::{ParamInput, StrategyInfo},
    errors::AppError,
};
use quantumbotx_web::infrastructure::http::{FormValue, RequestBody};
use quantumbotx_web::presentation::pages::{
    BacktestPage,
    backtest::{BacktestForm, BacktestTargets, EQUITY_SERIES},
};
use quantumbotx_web::presentation::renderers::backtest::RUN_FAILED;

#[derive(Default)]
struct FakeForm {
    strategies: RefCell<Vec<StrategyInfo>>,
    failed: Cell<bool>,
    inputs: RefCell<Vec<(String, String)>>,
    message: RefCell<Option<String>>,
    stops: RefCell<(String, String)>,
    running: RefCell<Vec<bool>>,
}

impl BacktestForm for FakeForm {
    fn set_strategies(&self, strategies: &[StrategyInfo]) {
        *self.strategies.borrow_mut() = strategies.to_vec();
    }

    fn strategies_failed(&self) {
        self.failed.set(true);
    }

    fn render_params(&self, inputs: &[ParamInput]) {
        *self.message.borrow_mut() = None;
        *self.inputs.borrow_mut() = inputs
            .iter()
            .map(|input| {
                let value = match input {
                    ParamInput::Number { value, .. } | ParamInput::Text { value, .. } => value.clone(),
                    ParamInput::Checkbox { checked, .. } => checked.to_string(),
                    ParamInput::Select { selected, .. } => selected.clone(),
                };
                (input.name().to_string(), value)
            })
            .collect();
    }

    fn show_params_message(&self, message: &str) {
        self.inputs.borrow_mut().clear();
        *self.message.borrow_mut() = Some(message.to_string());
    }

    fn param_values(&self) -> Vec<(String, String)> {
        self.inputs.borrow().clone()
    }

    fn stop_values(&self) -> (String, String) {
        self.stops.borrow().clone()
    }

    fn set_running(&self, running: bool) {
        self.running.borrow_mut().push(running);
    }
}

struct Fixture {
    page: BacktestPage<MockTransport, FakeForm, RecordingBackend>,
    form: Rc<FakeForm>,
    summary: Rc<MemoryTarget>,
    log: Rc<MemoryTarget>,
    results: Rc<RecordingVisibility>,
    chart: RecordingBackend,
    feedback: Rc<RecordingFeedback>,
}

impl Fixture {
    fn new(transport: MockTransport) -> Self {
        let form = Rc::new(FakeForm::default());
        *form.stops.borrow_mut() = ("2.0".to_string(), "4".to_string());
        let summary = MemoryTarget::new();
        let log = MemoryTarget::new();
        let results = RecordingVisibility::new(false);
        let chart = RecordingBackend::default();
        let feedback = RecordingFeedback::new();
        let targets = BacktestTargets {
            summary: summary.clone(),
            log: log.clone(),
            results: results.clone(),
        };
        let page = BacktestPage::new(api(transport), form.clone(), targets, chart.clone(), feedback.clone());
        Self { page, form, summary, log, results, chart, feedback }
    }
}

fn csv() -> FormValue {
    FormValue::Text("time,open,high,low,close\n".to_string())
}

#[test]
fn parameters_merge_stops_with_the_strategy_inputs() {
    let transport = MockTransport::new();
    transport.ok(
        "GET",
        "/api/strategies/RSI_BREAKOUT/params",
        json!([
            { "name": "rsi_period", "type": "number", "default": 14 },
            { "name": "mode", "type": "select", "options": ["fast", "slow"], "default": "slow" }
        ]),
    );
    let fx = Fixture::new(transport);

    block_on(fx.page.select_strategy("RSI_BREAKOUT"));
    let params = fx.page.collect_params();

    assert_eq!(params.get("sl_pips"), Some(&json!(2.0)));
    assert_eq!(params.get("tp_pips"), Some(&json!(4.0)));
    assert_eq!(params.get("rsi_period"), Some(&json!(14.0)));
    assert_eq!(params.get("mode"), Some(&json!("slow")));
}

#[test]
fn strategy_without_parameters_says_so() {
    let transport = MockTransport::new();
    transport
        .ok("GET", "/api/strategies/MA_CROSSOVER/params", json!([]))
        .offline("GET", "/api/strategies/BROKEN/params");
    let fx = Fixture::new(transport);

    block_on(fx.page.select_strategy("MA_CROSSOVER"));
    assert_eq!(fx.form.message.borrow().as_deref(), Some(PARAMS_NONE));

    block_on(fx.page.select_strategy("BROKEN"));
    assert_eq!(fx.form.message.borrow().as_deref(), Some(PARAMS_FAILED));
}

#[test]
fn run_without_a_strategy_is_refused_locally() {
    let fx = Fixture::new(MockTransport::new());

    let err = block_on(fx.page.run(csv(), "")).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(fx.feedback.last(), Some(("Pilih sebuah strategi".to_string(), ToastKind::Error)));
    assert!(fx.form.running.borrow().is_empty());
}

#[test]
fn successful_run_shows_summary_curve_and_trades() {
    let transport = MockTransport::new();
    transport.ok(
        "POST",
        "/api/backtest/run",
        json!({
            "instrument": "XAUUSD",
            "total_profit_usd": 420.5,
            "net_profit_after_costs": 390.25,
            "total_spread_costs": 30.25,
            "max_drawdown_percent": 7.5,
            "win_rate_percent": 55.0,
            "total_trades": 20,
            "wins": 11,
            "losses": 9,
            "equity_curve": [10000.0, 10120.0, 10390.25],
            "trades": [{ "position_type": "BUY", "entry": 2300.1, "exit": 2310.4, "profit": 103.0, "reason": "TP" }]
        }),
    );
    let fx = Fixture::new(transport);

    let result = block_on(fx.page.run(csv(), "MA_CROSSOVER")).unwrap();

    assert_eq!(result.total_trades, 20);
    assert_eq!(*fx.form.running.borrow(), vec![true, false]);
    assert!(fx.results.is_visible());
    let summary = fx.summary.html();
    assert!(summary.contains("XAUUSD"));
    assert!(summary.contains("390.25 $"));
    assert!(summary.contains("-30.25 $"));
    assert!(fx.log.html().contains("Reason: TP"));

    let curve = fx.chart.last_dataset().unwrap();
    assert_eq!(curve.series_label, EQUITY_SERIES);
    assert_eq!(curve.labels, vec!["1", "2", "3"]);
    assert_eq!(curve.values, vec![10000.0, 10120.0, 10390.25]);
}

#[test]
fn run_sends_the_file_strategy_and_json_params() {
    let transport = MockTransport::new();
    transport.ok("POST", "/api/backtest/run", json!({}));
    let api = api(transport);
    let form = Rc::new(FakeForm::default());
    *form.stops.borrow_mut() = ("1.5".to_string(), "3".to_string());
    let targets = BacktestTargets {
        summary: MemoryTarget::new(),
        log: MemoryTarget::new(),
        results: RecordingVisibility::new(false),
    };
    let page = BacktestPage::new(api.clone(), form, targets, RecordingBackend::default(), RecordingFeedback::new());

    block_on(page.run(csv(), "MA_CROSSOVER")).unwrap();

    let requests = api.transport().requests();
    let RequestBody::Multipart(fields) = &requests[0].body else {
        panic!("expected a multipart body, got {:?}", requests[0].body);
    };
    let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["file", "strategy", "params"]);
    assert_eq!(fields[1].1, FormValue::Text("MA_CROSSOVER".to_string()));
    let FormValue::Text(params) = &fields[2].1 else {
        panic!("params should be text");
    };
    let params: Value = serde_json::from_str(params).unwrap();
    assert_eq!(params, json!({ "sl_pips": 1.5, "tp_pips": 3.0 }));
}

#[test]
fn unreachable_server_gets_the_connection_message() {
    let transport = MockTransport::new();
    transport.offline("POST", "/api/backtest/run");
    let fx = Fixture::new(transport);

    assert!(block_on(fx.page.run(csv(), "MA_CROSSOVER")).is_err());

    assert_eq!(fx.feedback.last(), Some((RUN_FAILED.to_string(), ToastKind::Error)));
    assert!(!fx.results.is_visible());
    assert_eq!(fx.summary.writes(), 0);
    assert_eq!(*fx.form.running.borrow(), vec![true, false]);
}

#[test]
fn server_side_failure_shows_its_message() {
    let transport = MockTransport::new();
    transport.status("POST", "/api/backtest/run", 400, json!({ "error": "Kolom 'close' tidak ditemukan" }));
    let fx = Fixture::new(transport);

    assert!(block_on(fx.page.run(csv(), "MA_CROSSOVER")).is_err());

    assert_eq!(
        fx.feedback.last(),
        Some(("Error: Kolom 'close' tidak ditemukan".to_string(), ToastKind::Error))
    );
    assert!(fx.chart.events().is_empty());
}
