//! Presenters: entity lists to markup, one container per presenter.

pub mod backtest;
pub mod bot_detail;
pub mod bots;
pub mod dashboard;
pub mod history;
pub mod market;
pub mod notifications;
pub mod portfolio;

pub use backtest::RunListPresenter;
pub use bot_detail::{ActivityLogPresenter, AnalysisPresenter, BotHeaderPresenter, BotParametersPresenter, FundamentalsPresenter};
pub use bots::BotTablePresenter;
pub use dashboard::{AccountPresenter, MentorPresenter, RecentActivityPresenter, StatsPresenter};
pub use history::DealTablePresenter;
pub use market::{CryptoPresenter, ForexPresenter, StocksPresenter};
pub use notifications::NotificationsPresenter;
pub use portfolio::PositionsPresenter;
