//! Portfolio page. One cycle fetches open positions and then the allocation;
//! after the table is written the P/L summary, the rolling P/L chart and the
//! allocation doughnut follow from the same snapshot.

use std::cell::Cell;
use std::rc::Rc;

use crate::application::{
    chart_adapter::{ChartBackend, ChartDataset},
    poll_unit::{PageScope, PollUnit, Presenter, RenderTarget},
};
use crate::config::client_config;
use crate::domain::{
    errors::AppError,
    logging::LogComponent,
    portfolio::{Allocation, PnlTrend, Position, total_profit},
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::renderers::{PositionsPresenter, portfolio::pnl_summary};
use crate::time_utils::{format_clock_label, now_millis};

use super::{SharedChart, shared_chart};

pub const PNL_SERIES: &str = "Total P/L ($)";
pub const ALLOCATION_SERIES: &str = "Alokasi Aset";

/// Positions plus the allocation fetched right after them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioSnapshot {
    pub positions: Vec<Position>,
    pub allocation: Option<Allocation>,
}

struct SnapshotPresenter;

impl Presenter<PortfolioSnapshot> for SnapshotPresenter {
    fn present(&self, data: &PortfolioSnapshot) -> String {
        PositionsPresenter.present(&data.positions)
    }

    fn is_empty(&self, data: &PortfolioSnapshot) -> bool {
        PositionsPresenter.is_empty(&data.positions)
    }

    fn empty(&self) -> String {
        PositionsPresenter.empty()
    }

    fn error(&self, err: &AppError) -> String {
        PositionsPresenter.error(err)
    }
}

pub struct PortfolioPage<B: ChartBackend> {
    unit: PollUnit<PortfolioSnapshot>,
    pnl_chart: SharedChart<B>,
    allocation_chart: SharedChart<B>,
}

impl<B: ChartBackend + 'static> PortfolioPage<B> {
    pub fn new<T: HttpTransport + 'static>(
        api: Rc<QuantumApi<T>>,
        table: Rc<dyn RenderTarget>,
        summary: Rc<dyn RenderTarget>,
        pnl_backend: B,
        allocation_backend: B,
    ) -> Self {
        let config = client_config();
        let pnl_chart = shared_chart("portfolio-pnl", pnl_backend);
        let allocation_chart = shared_chart("portfolio-allocation", allocation_backend);

        if let Err(err) = pnl_chart
            .borrow_mut()
            .render(ChartDataset::line(PNL_SERIES, Vec::new(), Vec::new()).with_color("#4BC0C0"))
        {
            crate::log_error!(LogComponent::Presentation("Portfolio"), "P/L chart: {}", err);
        }

        let previous_total = Rc::new(Cell::new(0.0));
        let max_points = config.max_chart_points;
        let pnl = pnl_chart.clone();
        let allocation = allocation_chart.clone();

        let unit = PollUnit::new(
            "portfolio",
            move || {
                let api = api.clone();
                async move {
                    let positions = api.open_positions().await?;
                    let allocation = match api.allocation().await {
                        Ok(allocation) => Some(allocation),
                        Err(err) => {
                            crate::log_error!(
                                LogComponent::Presentation("Portfolio"),
                                "allocation unavailable: {}",
                                err,
                            );
                            None
                        }
                    };
                    Ok(PortfolioSnapshot { positions, allocation })
                }
            },
            Rc::new(SnapshotPresenter),
            table,
        )
        .every(config.portfolio_interval)
        .after_render(move |snapshot: &PortfolioSnapshot| {
            let total = total_profit(&snapshot.positions);
            let trend = PnlTrend::between(previous_total.replace(total), total);
            summary.write(&pnl_summary(total, trend));

            let label = format_clock_label(now_millis());
            if let Err(err) = pnl.borrow_mut().push_point(label, total, max_points) {
                crate::log_error!(LogComponent::Presentation("Portfolio"), "P/L point: {}", err);
            }

            if let Some(data) = &snapshot.allocation {
                let dataset = ChartDataset::doughnut(ALLOCATION_SERIES, data.labels.clone(), data.values.clone());
                if let Err(err) = allocation.borrow_mut().render(dataset) {
                    crate::log_error!(LogComponent::Presentation("Portfolio"), "allocation chart: {}", err);
                }
            }
        });

        Self { unit, pnl_chart, allocation_chart }
    }

    pub fn unit(&self) -> &PollUnit<PortfolioSnapshot> {
        &self.unit
    }

    pub fn pnl_chart(&self) -> &SharedChart<B> {
        &self.pnl_chart
    }

    pub fn allocation_chart(&self) -> &SharedChart<B> {
        &self.allocation_chart
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
    }
}
