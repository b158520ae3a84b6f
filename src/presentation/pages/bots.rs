//! Bot management page: polled bot table, row actions and the create/edit modal.

use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::application::{
    bot_form::{BotForm, FormView},
    feedback::{Feedback, ToastKind},
    poll_unit::{PageScope, PollUnit, RenderTarget},
};
use crate::config::client_config;
use crate::domain::{
    bots::{Bot, BotId},
    errors::AppResult,
    logging::LogComponent,
};
use crate::infrastructure::{
    api::{QuantumApi, ServerMessage},
    http::HttpTransport,
};
use crate::presentation::renderers::BotTablePresenter;

pub const CONFIRM_DELETE: &str = "Apakah Anda yakin ingin menghapus bot ini?";

/// A click on one of the table's `data-action` buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    Start(BotId),
    Stop(BotId),
    Edit(BotId),
    Delete(BotId),
}

impl BotAction {
    /// From the button's `data-action` and `data-id` attributes.
    pub fn parse(action: &str, id: &str) -> Option<Self> {
        let id: BotId = id.trim().parse().ok()?;
        match action {
            "start" => Some(Self::Start(id)),
            "stop" => Some(Self::Stop(id)),
            "edit" => Some(Self::Edit(id)),
            "delete" => Some(Self::Delete(id)),
            _ => None,
        }
    }
}

pub struct BotsPage<T, V> {
    api: Rc<QuantumApi<T>>,
    list: PollUnit<Vec<Bot>>,
    form: Rc<BotForm<T, V>>,
    feedback: Rc<dyn Feedback>,
}

impl<T: HttpTransport + 'static, V: FormView + 'static> BotsPage<T, V> {
    pub fn new(
        api: Rc<QuantumApi<T>>,
        table: Rc<dyn RenderTarget>,
        view: Rc<V>,
        feedback: Rc<dyn Feedback>,
    ) -> Self {
        let fetch_api = api.clone();
        let list = PollUnit::new(
            "bots",
            move || {
                let api = fetch_api.clone();
                async move { api.list_bots().await }
            },
            Rc::new(BotTablePresenter),
            table,
        )
        .every(client_config().bots_interval);

        let form = BotForm::new(api.clone(), view, feedback.clone());
        let saved_list = list.clone();
        form.on_saved(move || -> LocalBoxFuture<'static, ()> {
            let list = saved_list.clone();
            Box::pin(async move {
                list.refresh().await;
            })
        });

        Self { api, list, form, feedback }
    }

    pub fn list(&self) -> &PollUnit<Vec<Bot>> {
        &self.list
    }

    pub fn form(&self) -> &Rc<BotForm<T, V>> {
        &self.form
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.list.start());
        let form = self.form.clone();
        scope.spawn("strategies", async move {
            if let Err(err) = form.load_strategies().await {
                crate::log_error!(
                    LogComponent::Presentation("BotsPage"),
                    "strategy list unavailable: {}",
                    err,
                );
            }
        });
    }

    /// Runs a row action. Successful commands toast and refresh the table.
    pub async fn handle_action(&self, action: BotAction) {
        let result = match action {
            BotAction::Edit(id) => {
                // The form already reported the failure to the user.
                if let Err(err) = self.form.open_edit(id).await {
                    crate::log_warn!(LogComponent::Presentation("BotsPage"), "edit {} aborted: {}", id, err);
                }
                return;
            }
            BotAction::Delete(id) => {
                if !self.feedback.confirm(CONFIRM_DELETE) {
                    return;
                }
                self.api.delete_bot(id).await
            }
            BotAction::Start(id) => self.api.start_bot(id).await,
            BotAction::Stop(id) => self.api.stop_bot(id).await,
        };
        self.report(action, result).await;
    }

    async fn report(&self, action: BotAction, result: AppResult<ServerMessage>) {
        match result {
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| "Operasi berhasil".to_string());
                self.feedback.notify(&format!("✅ {}", message), ToastKind::Success);
                self.list.refresh().await;
            }
            Err(err) => {
                crate::log_error!(LogComponent::Presentation("BotsPage"), "{:?} failed: {}", action, err);
                self.feedback.notify(&format!("❌ {}", err.user_message()), ToastKind::Error);
            }
        }
    }
}
