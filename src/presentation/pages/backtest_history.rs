//! Saved backtest runs: newest-first list on the left, the selected run's
//! summary and equity curve on the right.

use std::cell::RefCell;
use std::rc::Rc;

use crate::application::{
    chart_adapter::{ChartBackend, ChartDataset},
    poll_unit::{PageScope, PollUnit, RenderTarget},
};
use crate::domain::{
    backtest::{BacktestRun, sort_newest_first},
    logging::LogComponent,
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::renderers::{RunListPresenter, backtest::run_detail};
use crate::time_utils::format_timestamp_text;

use super::{SharedChart, Visibility, shared_chart};

pub struct RunDetailTargets {
    pub id: Rc<dyn RenderTarget>,
    pub timestamp: Rc<dyn RenderTarget>,
    pub summary: Rc<dyn RenderTarget>,
    pub placeholder: Rc<dyn Visibility>,
    pub view: Rc<dyn Visibility>,
}

pub struct BacktestHistoryPage<B: ChartBackend> {
    unit: PollUnit<Vec<BacktestRun>>,
    runs: Rc<RefCell<Vec<BacktestRun>>>,
    detail: RunDetailTargets,
    equity: SharedChart<B>,
}

impl<B: ChartBackend + 'static> BacktestHistoryPage<B> {
    pub fn new<T: HttpTransport + 'static>(
        api: Rc<QuantumApi<T>>,
        list: Rc<dyn RenderTarget>,
        detail: RunDetailTargets,
        equity_backend: B,
    ) -> Self {
        let runs = Rc::new(RefCell::new(Vec::new()));
        let cache = runs.clone();
        let unit = PollUnit::new(
            "backtest-history",
            move || {
                let api = api.clone();
                let cache = cache.clone();
                async move {
                    let mut fetched = api.backtest_history().await?;
                    sort_newest_first(&mut fetched);
                    *cache.borrow_mut() = fetched.clone();
                    Ok(fetched)
                }
            },
            Rc::new(RunListPresenter),
            list,
        );

        Self {
            unit,
            runs,
            detail,
            equity: shared_chart("backtest-history-equity", equity_backend),
        }
    }

    pub fn unit(&self) -> &PollUnit<Vec<BacktestRun>> {
        &self.unit
    }

    pub fn equity_chart(&self) -> &SharedChart<B> {
        &self.equity
    }

    /// Shows the run at `index` in list order. Out-of-range clicks are ignored.
    pub fn select(&self, index: usize) -> bool {
        let runs = self.runs.borrow();
        let Some(run) = runs.get(index) else {
            crate::log_warn!(LogComponent::Presentation("BacktestHistory"), "no run at index {}", index);
            return false;
        };

        self.detail.placeholder.set_visible(false);
        self.detail.view.set_visible(true);
        let id = run.id.map(|id| id.to_string()).unwrap_or_else(|| "N/A".to_string());
        self.detail.id.write(&id);
        self.detail.timestamp.write(&format_timestamp_text(&run.timestamp));
        self.detail.summary.write(&run_detail(run));

        let mut chart = self.equity.borrow_mut();
        if run.equity_curve.is_empty() {
            chart.dispose();
        } else {
            let labels = (1..=run.equity_curve.len()).map(|step| step.to_string()).collect();
            let dataset = ChartDataset::line("Equity Curve", labels, run.equity_curve.clone());
            if let Err(err) = chart.render(dataset) {
                crate::log_error!(LogComponent::Presentation("BacktestHistory"), "equity chart: {}", err);
            }
        }
        true
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
    }
}
