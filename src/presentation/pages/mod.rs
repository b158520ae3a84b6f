//! One controller per page. Each owns its polling units, chart handles and
//! DOM surfaces; the `wasm_api` entry points wire them to the live document.

use std::cell::RefCell;
use std::rc::Rc;

use crate::application::chart_adapter::{ChartBackend, ChartDataset, ChartHandle};
use crate::application::poll_unit::UnitView;
use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;

pub mod backtest;
pub mod backtest_history;
pub mod bot_detail;
pub mod bots;
pub mod dashboard;
pub mod history;
pub mod market;
pub mod notifications;
pub mod portfolio;
pub mod profile;
pub mod settings;

pub use backtest::BacktestPage;
pub use backtest_history::BacktestHistoryPage;
pub use bot_detail::BotDetailPage;
pub use bots::{BotAction, BotsPage};
pub use dashboard::DashboardPage;
pub use history::HistoryPage;
pub use market::{CryptoPage, ForexPage, ProfileModal, StocksPage};
pub use notifications::{NotificationsPage, UnreadBadge};
pub use portfolio::PortfolioPage;
pub use profile::ProfilePage;
pub use settings::SettingsPage;

/// Something that can be shown or hidden (badge dot, spinner, result panel).
pub trait Visibility {
    fn set_visible(&self, visible: bool);
}

/// A modal with a title line and a markup body.
pub trait ModalSurface {
    fn show(&self);
    fn hide(&self);
    fn set_title(&self, title: &str);
    fn set_body(&self, markup: &str);
}

pub type SharedChart<B> = Rc<RefCell<ChartHandle<B>>>;

pub fn shared_chart<B: ChartBackend>(name: &'static str, backend: B) -> SharedChart<B> {
    Rc::new(RefCell::new(ChartHandle::new(name, backend)))
}

/// Feeds a polling unit's data into a chart instead of a markup container.
pub struct ChartView<T, B: ChartBackend> {
    chart: SharedChart<B>,
    build: Box<dyn Fn(&T) -> ChartDataset>,
}

impl<T, B: ChartBackend> ChartView<T, B> {
    pub fn new(chart: SharedChart<B>, build: impl Fn(&T) -> ChartDataset + 'static) -> Self {
        Self { chart, build: Box::new(build) }
    }
}

impl<T, B: ChartBackend> UnitView<T> for ChartView<T, B> {
    fn show(&self, data: &T) {
        let dataset = (self.build)(data);
        if let Err(err) = self.chart.borrow_mut().render(dataset) {
            crate::log_error!(LogComponent::Presentation("Chart"), "render failed: {}", err);
        }
    }

    fn fail(&self, err: &AppError) {
        crate::log_error!(LogComponent::Presentation("Chart"), "chart data unavailable: {}", err);
    }
}
