//! Notification list and the header's unread badge.

use std::rc::Rc;

use crate::application::poll_unit::{PageScope, PollUnit, RefreshOutcome, RenderTarget, UnitView};
use crate::config::client_config;
use crate::domain::{
    errors::AppError,
    logging::LogComponent,
    notifications::{Notification, UnreadCount},
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::renderers::NotificationsPresenter;

use super::Visibility;

/// Lists every notification once, then marks them read on the server.
pub struct NotificationsPage<T> {
    api: Rc<QuantumApi<T>>,
    unit: PollUnit<Vec<Notification>>,
}

impl<T: HttpTransport + 'static> NotificationsPage<T> {
    pub fn new(api: Rc<QuantumApi<T>>, list: Rc<dyn RenderTarget>) -> Self {
        let fetch_api = api.clone();
        let unit = PollUnit::new(
            "notifications",
            move || {
                let api = fetch_api.clone();
                async move { api.notifications().await }
            },
            Rc::new(NotificationsPresenter),
            list,
        );
        Self { api, unit }
    }

    pub fn unit(&self) -> &PollUnit<Vec<Notification>> {
        &self.unit
    }

    /// Render first so unread items still show in bold, then mark them read.
    pub async fn load_and_mark(&self) -> RefreshOutcome {
        let outcome = self.unit.refresh().await;
        if outcome == RefreshOutcome::Applied {
            match self.api.mark_notifications_read().await {
                Ok(_) => crate::log_debug!(LogComponent::Presentation("Notifications"), "marked as read"),
                Err(err) => crate::log_error!(
                    LogComponent::Presentation("Notifications"),
                    "mark-as-read failed: {}",
                    err,
                ),
            }
        }
        outcome
    }

    pub fn mount(self: Rc<Self>, scope: &PageScope) {
        scope.spawn("notifications", async move {
            self.load_and_mark().await;
        });
    }
}

struct BadgeView {
    dot: Rc<dyn Visibility>,
    on_count: Option<Rc<dyn Fn(u32)>>,
}

impl UnitView<UnreadCount> for BadgeView {
    fn show(&self, data: &UnreadCount) {
        self.dot.set_visible(data.unread_count > 0);
        if let Some(on_count) = &self.on_count {
            on_count(data.unread_count);
        }
    }

    fn fail(&self, _err: &AppError) {
        // keep whatever the badge showed last
    }
}

/// Red dot on the bell icon, polled on every page that has one.
pub struct UnreadBadge {
    unit: PollUnit<UnreadCount>,
}

impl UnreadBadge {
    pub fn new<T: HttpTransport + 'static>(
        api: Rc<QuantumApi<T>>,
        dot: Rc<dyn Visibility>,
        on_count: Option<Rc<dyn Fn(u32)>>,
    ) -> Self {
        let unit = PollUnit::with_view(
            "unread-badge",
            move || {
                let api = api.clone();
                async move { api.unread_count().await }
            },
            Rc::new(BadgeView { dot, on_count }),
        )
        .every(client_config().unread_interval);
        Self { unit }
    }

    pub fn unit(&self) -> &PollUnit<UnreadCount> {
        &self.unit
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
    }
}
