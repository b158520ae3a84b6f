//! Create/edit bot modal.
//!
//! `Closed -> Open(mode) -> Submitting -> Closed` on success, back to `Open`
//! with the error shown on failure. The strategy parameter block is generated
//! from the schema served by `/api/strategies/{id}/params`.

use futures::future::LocalBoxFuture;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::feedback::{Feedback, ToastKind};
use crate::domain::{
    bots::{BotDraft, BotId, FormFields, ParamInput, ParamMap, StrategyInfo, StrategyParam, parse_param_value},
    errors::{AppError, AppResult},
    logging::LogComponent,
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};

pub const TITLE_CREATE: &str = "🚀 Buat Bot Baru";
pub const TITLE_EDIT: &str = "✏️ Edit Bot";
pub const PARAMS_LOADING: &str = "Memuat parameter...";
pub const PARAMS_NONE: &str = "Strategi ini tidak memiliki parameter kustom.";
pub const PARAMS_FAILED: &str = "Gagal memuat parameter.";

/// The modal's DOM surface.
pub trait FormView {
    fn open_modal(&self, title: &str);
    fn close_modal(&self);
    fn reset(&self);
    fn set_fields(&self, fields: &FormFields);
    fn read_fields(&self) -> FormFields;
    fn set_strategies(&self, strategies: &[StrategyInfo]);
    fn strategies_failed(&self);
    /// Replaces the parameter block with freshly built inputs.
    fn render_params(&self, inputs: &[ParamInput]);
    fn show_params_message(&self, message: &str);
    fn set_param_value(&self, name: &str, value: &Value);
    /// Raw value of a parameter input; checkboxes read as `"true"`/`"false"`.
    fn read_param(&self, name: &str) -> Option<String>;
    fn show_error(&self, message: &str);
    fn clear_error(&self);
    fn set_busy(&self, busy: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: BotId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

type SavedHook = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

pub struct BotForm<T, V> {
    api: Rc<QuantumApi<T>>,
    view: Rc<V>,
    feedback: Rc<dyn Feedback>,
    state: Cell<ModalState>,
    last_error: RefCell<Option<String>>,
    schema: RefCell<Vec<StrategyParam>>,
    schema_ticket: Cell<u64>,
    on_saved: RefCell<Vec<SavedHook>>,
}

impl<T: HttpTransport, V: FormView> BotForm<T, V> {
    pub fn new(api: Rc<QuantumApi<T>>, view: Rc<V>, feedback: Rc<dyn Feedback>) -> Rc<Self> {
        Rc::new(Self {
            api,
            view,
            feedback,
            state: Cell::new(ModalState::Closed),
            last_error: RefCell::new(None),
            schema: RefCell::new(Vec::new()),
            schema_ticket: Cell::new(0),
            on_saved: RefCell::new(Vec::new()),
        })
    }

    /// Runs after every successful save, typically the bot list refresh.
    pub fn on_saved(&self, hook: impl Fn() -> LocalBoxFuture<'static, ()> + 'static) {
        self.on_saved.borrow_mut().push(Rc::new(hook));
    }

    pub fn state(&self) -> ModalState {
        self.state.get()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    pub fn schema(&self) -> Vec<StrategyParam> {
        self.schema.borrow().clone()
    }

    pub async fn load_strategies(&self) -> AppResult<()> {
        match self.api.strategies().await {
            Ok(strategies) => {
                self.view.set_strategies(&strategies);
                Ok(())
            }
            Err(err) => {
                crate::log_error!(LogComponent::Application("BotForm"), "Error loading strategies: {}", err);
                self.view.strategies_failed();
                Err(err)
            }
        }
    }

    pub fn open_create(&self) {
        self.view.reset();
        self.view.set_fields(&BotDraft::default().to_fields());
        self.clear_params();
        self.view.clear_error();
        *self.last_error.borrow_mut() = None;
        self.state.set(ModalState::Open(FormMode::Create));
        self.view.open_modal(TITLE_CREATE);
    }

    /// Fills the form from the stored bot, then loads its strategy schema and
    /// only after the inputs exist fills the saved parameter values, in schema order.
    pub async fn open_edit(&self, id: BotId) -> AppResult<()> {
        let bot = match self.api.get_bot(id).await {
            Ok(bot) => bot,
            Err(err) => {
                self.feedback.notify(
                    &format!("❌ Gagal memuat data bot: {}", err.user_message()),
                    ToastKind::Error,
                );
                return Err(err);
            }
        };

        self.view.reset();
        self.view.set_fields(&BotDraft::fields_from_bot(&bot));
        self.view.clear_error();
        *self.last_error.borrow_mut() = None;
        self.state.set(ModalState::Open(FormMode::Edit { id }));
        self.view.open_modal(TITLE_EDIT);

        if bot.strategy.is_empty() {
            self.clear_params();
            return Ok(());
        }
        self.select_strategy(&bot.strategy).await?;

        for param in self.schema.borrow().iter() {
            if let Some(value) = bot.strategy_params.get(&param.name) {
                self.view.set_param_value(&param.name, value);
            }
        }
        Ok(())
    }

    /// Regenerates the parameter block for `strategy_id`. A later selection wins
    /// over an earlier one still in flight.
    pub async fn select_strategy(&self, strategy_id: &str) -> AppResult<()> {
        let ticket = self.schema_ticket.get() + 1;
        self.schema_ticket.set(ticket);

        if strategy_id.is_empty() {
            self.clear_params();
            return Ok(());
        }
        self.view.show_params_message(PARAMS_LOADING);

        let result = self.api.strategy_params(strategy_id).await;
        if self.schema_ticket.get() != ticket {
            return Ok(());
        }

        match result {
            Ok(schema) => {
                if schema.is_empty() {
                    self.view.show_params_message(PARAMS_NONE);
                } else {
                    let inputs: Vec<ParamInput> = schema.iter().map(ParamInput::from).collect();
                    self.view.render_params(&inputs);
                }
                *self.schema.borrow_mut() = schema;
                Ok(())
            }
            Err(err) => {
                crate::log_error!(
                    LogComponent::Application("BotForm"),
                    "Failed to load params for {}: {}",
                    strategy_id,
                    err,
                );
                self.schema.borrow_mut().clear();
                self.view.show_params_message(PARAMS_FAILED);
                Err(err)
            }
        }
    }

    pub fn cancel(&self) {
        self.state.set(ModalState::Closed);
        self.view.close_modal();
    }

    /// Validates, sends, and on success closes the modal and runs the saved hooks.
    /// Validation failures never reach the network.
    pub async fn submit(&self) -> AppResult<()> {
        let mode = match self.state.get() {
            ModalState::Open(mode) => mode,
            ModalState::Submitting(_) => return Ok(()),
            ModalState::Closed => {
                return Err(AppError::Validation("Form is not open".into()));
            }
        };

        let draft = match BotDraft::from_fields(&self.view.read_fields(), self.collect_params()) {
            Ok(draft) => draft,
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };

        self.view.clear_error();
        self.state.set(ModalState::Submitting(mode));
        self.view.set_busy(true);

        let result = match mode {
            FormMode::Create => self.api.create_bot(&draft).await,
            FormMode::Edit { id } => self.api.update_bot(id, &draft).await,
        };
        self.view.set_busy(false);

        match result {
            Ok(reply) => {
                self.state.set(ModalState::Closed);
                *self.last_error.borrow_mut() = None;
                self.view.close_modal();
                let message = reply.message.unwrap_or_else(|| "Operasi berhasil".to_string());
                self.feedback.notify(&format!("✅ {}", message), ToastKind::Success);
                let hooks = self.on_saved.borrow().clone();
                for hook in hooks {
                    hook().await;
                }
                Ok(())
            }
            Err(err) => {
                crate::log_error!(LogComponent::Application("BotForm"), "Saving bot failed: {}", err);
                self.state.set(ModalState::Open(mode));
                self.fail(&err);
                Err(err)
            }
        }
    }

    fn fail(&self, err: &AppError) {
        let message = err.user_message();
        self.view.show_error(&message);
        *self.last_error.borrow_mut() = Some(message);
    }

    fn clear_params(&self) {
        self.schema.borrow_mut().clear();
        self.view.render_params(&[]);
    }

    fn collect_params(&self) -> ParamMap {
        self.schema
            .borrow()
            .iter()
            .filter_map(|param| {
                self.view
                    .read_param(&param.name)
                    .map(|raw| (param.name.clone(), parse_param_value(param.kind, &raw)))
            })
            .collect()
    }
}
