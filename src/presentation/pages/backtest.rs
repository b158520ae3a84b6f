//! Backtester: strategy picker with its parameter block, a multipart run of
//! the uploaded CSV, and the result summary, equity curve and trade log.

use std::cell::Cell;
use std::rc::Rc;

use crate::application::{
    bot_form::{PARAMS_FAILED, PARAMS_LOADING, PARAMS_NONE},
    chart_adapter::{ChartBackend, ChartDataset},
    feedback::{Feedback, ToastKind},
    poll_unit::{PageScope, RenderTarget},
};
use crate::domain::{
    backtest::{BacktestResult, backtest_param},
    bots::{ParamInput, ParamMap, StrategyInfo},
    errors::{AppError, AppResult},
    logging::LogComponent,
};
use crate::infrastructure::{
    api::{BacktestUpload, QuantumApi},
    http::{FormValue, HttpTransport},
};
use crate::presentation::renderers::backtest::{RUN_FAILED, result_summary, trade_log};

use super::{SharedChart, Visibility, shared_chart};

pub const EQUITY_SERIES: &str = "Equity Curve";

/// The backtest form's DOM surface.
pub trait BacktestForm {
    fn set_strategies(&self, strategies: &[StrategyInfo]);
    fn strategies_failed(&self);
    fn render_params(&self, inputs: &[ParamInput]);
    fn show_params_message(&self, message: &str);
    /// Name and raw text of every generated parameter input.
    fn param_values(&self) -> Vec<(String, String)>;
    /// Raw SL and TP multiplier fields.
    fn stop_values(&self) -> (String, String);
    /// Disables the run button and shows the spinner while a run is in flight.
    fn set_running(&self, running: bool);
}

pub struct BacktestTargets {
    pub summary: Rc<dyn RenderTarget>,
    pub log: Rc<dyn RenderTarget>,
    pub results: Rc<dyn Visibility>,
}

pub struct BacktestPage<T, F, B: ChartBackend> {
    api: Rc<QuantumApi<T>>,
    form: Rc<F>,
    targets: BacktestTargets,
    equity: SharedChart<B>,
    feedback: Rc<dyn Feedback>,
    schema_ticket: Cell<u64>,
}

impl<T, F, B> BacktestPage<T, F, B>
where
    T: HttpTransport + 'static,
    F: BacktestForm + 'static,
    B: ChartBackend + 'static,
{
    pub fn new(
        api: Rc<QuantumApi<T>>,
        form: Rc<F>,
        targets: BacktestTargets,
        equity_backend: B,
        feedback: Rc<dyn Feedback>,
    ) -> Self {
        Self {
            api,
            form,
            targets,
            equity: shared_chart("backtest-equity", equity_backend),
            feedback,
            schema_ticket: Cell::new(0),
        }
    }

    pub fn equity_chart(&self) -> &SharedChart<B> {
        &self.equity
    }

    pub async fn load_strategies(&self) -> AppResult<()> {
        match self.api.strategies().await {
            Ok(strategies) => {
                self.form.set_strategies(&strategies);
                Ok(())
            }
            Err(err) => {
                crate::log_error!(
                    LogComponent::Presentation("Backtest"),
                    "strategy list unavailable: {}",
                    err,
                );
                self.form.strategies_failed();
                Err(err)
            }
        }
    }

    /// Rebuilds the parameter block; a newer selection supersedes one in flight.
    pub async fn select_strategy(&self, strategy_id: &str) {
        let ticket = self.schema_ticket.get() + 1;
        self.schema_ticket.set(ticket);

        if strategy_id.is_empty() {
            self.form.render_params(&[]);
            return;
        }
        self.form.show_params_message(PARAMS_LOADING);

        let result = self.api.strategy_params(strategy_id).await;
        if self.schema_ticket.get() != ticket {
            return;
        }
        match result {
            Ok(schema) if schema.is_empty() => self.form.show_params_message(PARAMS_NONE),
            Ok(schema) => {
                let inputs: Vec<ParamInput> = schema.iter().map(ParamInput::from).collect();
                self.form.render_params(&inputs);
            }
            Err(err) => {
                crate::log_error!(
                    LogComponent::Presentation("Backtest"),
                    "params for {} unavailable: {}",
                    strategy_id,
                    err,
                );
                self.form.show_params_message(PARAMS_FAILED);
            }
        }
    }

    /// SL/TP plus every strategy input; numeric text is sent as a number.
    pub fn collect_params(&self) -> ParamMap {
        let (sl, tp) = self.form.stop_values();
        let mut params = ParamMap::new();
        params.insert("sl_pips".to_string(), backtest_param(&sl));
        params.insert("tp_pips".to_string(), backtest_param(&tp));
        for (name, raw) in self.form.param_values() {
            params.insert(name, backtest_param(&raw));
        }
        params
    }

    pub async fn run(&self, file: FormValue, strategy: &str) -> AppResult<BacktestResult> {
        if strategy.is_empty() {
            let err = AppError::Validation("Pilih sebuah strategi".to_string());
            self.feedback.notify(&err.user_message(), ToastKind::Error);
            return Err(err);
        }

        let upload = BacktestUpload {
            file,
            strategy: strategy.to_string(),
            params: self.collect_params(),
        };
        self.targets.results.set_visible(false);
        self.form.set_running(true);
        let result = self.api.run_backtest(upload).await;
        self.form.set_running(false);

        match result {
            Ok(result) => {
                self.show_result(&result);
                Ok(result)
            }
            Err(err) => {
                crate::log_error!(LogComponent::Presentation("Backtest"), "run failed: {}", err);
                let message = match &err {
                    AppError::Network(_) => RUN_FAILED.to_string(),
                    other => format!("Error: {}", other.user_message()),
                };
                self.feedback.notify(&message, ToastKind::Error);
                Err(err)
            }
        }
    }

    pub fn show_result(&self, result: &BacktestResult) {
        self.targets.results.set_visible(true);
        self.targets.summary.write(&result_summary(result));

        let labels = (1..=result.equity_curve.len()).map(|step| step.to_string()).collect();
        let dataset = ChartDataset::line(EQUITY_SERIES, labels, result.equity_curve.clone()).with_color("#4F46E5");
        if let Err(err) = self.equity.borrow_mut().render(dataset) {
            crate::log_error!(LogComponent::Presentation("Backtest"), "equity chart: {}", err);
        }

        self.targets.log.write(&trade_log(result));
    }

    pub fn mount(self: Rc<Self>, scope: &PageScope) {
        scope.spawn("backtest-strategies", async move {
            let _ = self.load_strategies().await;
        });
    }
}
