//! Dashboard: stats and account cards, recent activity, the price and RSI
//! charts, and the AI mentor panel with its emotion check-in.

use std::rc::Rc;

use crate::application::{
    chart_adapter::{ChartBackend, ChartDataset},
    feedback::{Feedback, ToastKind},
    poll_unit::{PageScope, PollUnit, RenderTarget},
};
use crate::config::client_config;
use crate::domain::{
    dashboard::{AccountInfo, ChartData, DashboardStats, Emotion, MentorSummary, RsiData},
    logging::LogComponent,
    notifications::UnreadNotification,
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::renderers::{
    AccountPresenter, MentorPresenter, RecentActivityPresenter, StatsPresenter, dashboard::emotion_picker,
};

use super::{ChartView, ModalSurface, SharedChart, shared_chart};

pub const DEFAULT_SYMBOL: &str = "EURUSD";
pub const EMOTION_UPDATED: &str = "Status emosi berhasil diupdate!";
pub const EMOTION_FAILED: &str = "Gagal update status emosi";

pub struct DashboardTargets {
    pub stats: Rc<dyn RenderTarget>,
    pub account: Rc<dyn RenderTarget>,
    pub activity: Rc<dyn RenderTarget>,
    pub mentor: Rc<dyn RenderTarget>,
}

pub struct DashboardPage<T, B: ChartBackend> {
    api: Rc<QuantumApi<T>>,
    stats: PollUnit<DashboardStats>,
    account: PollUnit<AccountInfo>,
    activity: PollUnit<Vec<UnreadNotification>>,
    mentor: PollUnit<MentorSummary>,
    price: PollUnit<ChartData>,
    rsi: PollUnit<RsiData>,
    price_chart: SharedChart<B>,
    rsi_chart: SharedChart<B>,
    emotion_modal: Rc<dyn ModalSurface>,
    feedback: Rc<dyn Feedback>,
}

impl<T: HttpTransport + 'static, B: ChartBackend + 'static> DashboardPage<T, B> {
    pub fn new(
        api: Rc<QuantumApi<T>>,
        targets: DashboardTargets,
        price_backend: B,
        rsi_backend: B,
        emotion_modal: Rc<dyn ModalSurface>,
        feedback: Rc<dyn Feedback>,
    ) -> Self {
        let config = client_config();

        let stats_api = api.clone();
        let stats = PollUnit::new(
            "dashboard-stats",
            move || {
                let api = stats_api.clone();
                async move { api.dashboard_stats().await }
            },
            Rc::new(StatsPresenter),
            targets.stats,
        )
        .every(config.dashboard_stats_interval);

        let account_api = api.clone();
        let account = PollUnit::new(
            "dashboard-account",
            move || {
                let api = account_api.clone();
                async move { api.account_info().await }
            },
            Rc::new(AccountPresenter),
            targets.account,
        )
        .every(config.dashboard_account_interval);

        let activity_api = api.clone();
        let activity = PollUnit::new(
            "recent-activity",
            move || {
                let api = activity_api.clone();
                async move { api.unread_notifications().await }
            },
            Rc::new(RecentActivityPresenter),
            targets.activity,
        )
        .every(config.dashboard_stats_interval);

        let mentor_api = api.clone();
        let mentor = PollUnit::new(
            "ai-mentor",
            move || {
                let api = mentor_api.clone();
                async move { api.mentor_summary().await }
            },
            Rc::new(MentorPresenter),
            targets.mentor,
        );

        let price_chart = shared_chart("price-chart", price_backend);
        let price_api = api.clone();
        let price = PollUnit::with_view(
            "price-chart",
            move || {
                let api = price_api.clone();
                async move { api.chart_data(DEFAULT_SYMBOL).await }
            },
            Rc::new(ChartView::new(price_chart.clone(), |data: &ChartData| {
                ChartDataset::line(DEFAULT_SYMBOL, data.labels.clone(), data.data.clone()).with_color("#3B82F6")
            })),
        );

        let rsi_chart = shared_chart("rsi-chart", rsi_backend);
        let rsi_api = api.clone();
        let rsi = PollUnit::with_view(
            "rsi-chart",
            move || {
                let api = rsi_api.clone();
                async move { api.rsi_data(DEFAULT_SYMBOL).await }
            },
            Rc::new(ChartView::new(rsi_chart.clone(), |data: &RsiData| {
                ChartDataset::line("RSI", data.timestamps.clone(), data.rsi_values.clone())
                    .with_color("#4BC0C0")
                    .with_y_range(0.0, 100.0)
            })),
        );

        Self {
            api,
            stats,
            account,
            activity,
            mentor,
            price,
            rsi,
            price_chart,
            rsi_chart,
            emotion_modal,
            feedback,
        }
    }

    pub fn stats(&self) -> &PollUnit<DashboardStats> {
        &self.stats
    }

    pub fn account(&self) -> &PollUnit<AccountInfo> {
        &self.account
    }

    pub fn activity(&self) -> &PollUnit<Vec<UnreadNotification>> {
        &self.activity
    }

    pub fn mentor(&self) -> &PollUnit<MentorSummary> {
        &self.mentor
    }

    pub fn price(&self) -> &PollUnit<ChartData> {
        &self.price
    }

    pub fn rsi(&self) -> &PollUnit<RsiData> {
        &self.rsi
    }

    pub fn price_chart(&self) -> &SharedChart<B> {
        &self.price_chart
    }

    pub fn rsi_chart(&self) -> &SharedChart<B> {
        &self.rsi_chart
    }

    pub fn mount(&self, scope: &PageScope) {
        for handle in [
            self.stats.start(),
            self.account.start(),
            self.activity.start(),
            self.mentor.start(),
            self.price.start(),
            self.rsi.start(),
        ] {
            scope.track(handle);
        }
    }

    pub fn open_emotion_picker(&self) {
        self.emotion_modal.set_title("🎯 Update Status Emosi");
        self.emotion_modal.set_body(&emotion_picker());
        self.emotion_modal.show();
    }

    pub fn close_emotion_picker(&self) {
        self.emotion_modal.hide();
    }

    /// Posts today's emotion, then reloads the mentor panel.
    pub async fn update_emotion(&self, emotion: Emotion) {
        match self.api.update_emotion(emotion).await {
            Ok(reply) if reply.success != Some(false) => {
                self.feedback.notify(EMOTION_UPDATED, ToastKind::Success);
                self.mentor.refresh().await;
            }
            Ok(_) => self.feedback.notify(EMOTION_FAILED, ToastKind::Error),
            Err(err) => {
                crate::log_error!(LogComponent::Presentation("Dashboard"), "emotion update failed: {}", err);
                self.feedback.notify(EMOTION_FAILED, ToastKind::Error);
            }
        }
        self.close_emotion_picker();
    }
}
