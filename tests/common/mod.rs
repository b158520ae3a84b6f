//! In-memory stand-ins for the browser: transport, containers, charts, forms.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::{Value, json};

use quantumbotx_web::application::{
    bot_form::FormView,
    chart_adapter::{ChartBackend, ChartDataset},
    feedback::{Feedback, ToastKind},
    localization::TranslationSurface,
    poll_unit::RenderTarget,
};
use quantumbotx_web::domain::{
    bots::{FormFields, ParamInput, StrategyInfo},
    errors::{AppError, AppResult},
    i18n::Translator,
    preferences::PreferenceStore,
};
use quantumbotx_web::infrastructure::{
    api::QuantumApi,
    http::{ApiRequest, ApiResponse, HttpTransport},
};
use quantumbotx_web::presentation::pages::{ModalSurface, Visibility};

/// Canned responses keyed by `"METHOD /path"`. The last queued reply for a
/// route is sticky, so polling the same route keeps getting it.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<String, VecDeque<AppResult<ApiResponse>>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: &str, path: &str, reply: AppResult<ApiResponse>) {
        self.routes
            .borrow_mut()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(reply);
    }

    pub fn ok(&self, method: &str, path: &str, body: Value) -> &Self {
        self.push(method, path, Ok(ApiResponse::ok(body)));
        self
    }

    pub fn status(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, Ok(ApiResponse::with_status(status, "Error", body)));
        self
    }

    pub fn offline(&self, method: &str, path: &str) -> &Self {
        self.push(method, path, Err(AppError::Network("Failed to fetch".into())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// `"METHOD /path"` of every request, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|made| made.as_str() == call).count()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let key = format!("{} {}", request.method, request.path);
        self.requests.borrow_mut().push(request);
        let mut routes = self.routes.borrow_mut();
        let Some(queue) = routes.get_mut(&key) else {
            return Ok(ApiResponse::with_status(404, "Not Found", json!({ "error": "Not Found" })));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err(AppError::Network("drained".into())))
        } else {
            queue.front().cloned().unwrap_or_else(|| Err(AppError::Network("drained".into())))
        }
    }
}

pub fn api(transport: MockTransport) -> Rc<QuantumApi<MockTransport>> {
    Rc::new(QuantumApi::new(transport))
}

/// Container that remembers every write.
#[derive(Default)]
pub struct MemoryTarget {
    writes: RefCell<Vec<String>>,
}

impl MemoryTarget {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn html(&self) -> String {
        self.writes.borrow().last().cloned().unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl RenderTarget for MemoryTarget {
    fn write(&self, markup: &str) {
        self.writes.borrow_mut().push(markup.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Create(ChartDataset),
    Update(ChartDataset),
    Destroy(u32),
}

/// Chart library double. Instances are numbered; `live()` counts undestroyed ones.
#[derive(Default, Clone)]
pub struct RecordingBackend {
    events: Rc<RefCell<Vec<ChartEvent>>>,
    next_id: Rc<Cell<u32>>,
    live: Rc<Cell<i32>>,
}

impl RecordingBackend {
    pub fn events(&self) -> Vec<ChartEvent> {
        self.events.borrow().clone()
    }

    pub fn live(&self) -> i32 {
        self.live.get()
    }

    pub fn created(&self) -> usize {
        self.events().iter().filter(|event| matches!(event, ChartEvent::Create(_))).count()
    }

    /// Dataset of the most recent create or update.
    pub fn last_dataset(&self) -> Option<ChartDataset> {
        self.events().into_iter().rev().find_map(|event| match event {
            ChartEvent::Create(dataset) | ChartEvent::Update(dataset) => Some(dataset),
            ChartEvent::Destroy(_) => None,
        })
    }
}

impl ChartBackend for RecordingBackend {
    type Instance = u32;

    fn create(&self, dataset: &ChartDataset) -> AppResult<u32> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.live.set(self.live.get() + 1);
        self.events.borrow_mut().push(ChartEvent::Create(dataset.clone()));
        Ok(id)
    }

    fn update(&self, _instance: &mut u32, dataset: &ChartDataset) -> AppResult<()> {
        self.events.borrow_mut().push(ChartEvent::Update(dataset.clone()));
        Ok(())
    }

    fn destroy(&self, instance: u32) {
        self.live.set(self.live.get() - 1);
        self.events.borrow_mut().push(ChartEvent::Destroy(instance));
    }
}

/// Toasts and confirm prompts. `confirm` answers with the preset reply.
pub struct RecordingFeedback {
    toasts: RefCell<Vec<(String, ToastKind)>>,
    confirms: RefCell<Vec<String>>,
    reply: Cell<bool>,
}

impl RecordingFeedback {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            toasts: RefCell::new(Vec::new()),
            confirms: RefCell::new(Vec::new()),
            reply: Cell::new(true),
        })
    }

    pub fn answer(&self, reply: bool) {
        self.reply.set(reply);
    }

    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.toasts.borrow().clone()
    }

    pub fn last(&self) -> Option<(String, ToastKind)> {
        self.toasts.borrow().last().cloned()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&self, message: &str, kind: ToastKind) {
        self.toasts.borrow_mut().push((message.to_string(), kind));
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.reply.get()
    }
}

/// The bot modal as plain state.
#[derive(Default)]
pub struct RecordingFormView {
    pub open: Cell<bool>,
    pub title: RefCell<String>,
    pub fields: RefCell<FormFields>,
    pub strategies: RefCell<Vec<StrategyInfo>>,
    pub strategies_failed: Cell<bool>,
    pub inputs: RefCell<Vec<ParamInput>>,
    pub params_message: RefCell<Option<String>>,
    pub params: RefCell<HashMap<String, String>>,
    pub error: RefCell<Option<String>>,
    pub busy: Cell<bool>,
}

impl RecordingFormView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn type_field(&self, name: &str, value: &str) {
        self.fields.borrow_mut().insert(name.to_string(), value.to_string());
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.params.borrow().get(name).cloned()
    }
}

impl FormView for RecordingFormView {
    fn open_modal(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
        self.open.set(true);
    }

    fn close_modal(&self) {
        self.open.set(false);
    }

    fn reset(&self) {
        self.fields.borrow_mut().clear();
        self.params.borrow_mut().clear();
    }

    fn set_fields(&self, fields: &FormFields) {
        self.fields.borrow_mut().extend(fields.clone());
    }

    fn read_fields(&self) -> FormFields {
        self.fields.borrow().clone()
    }

    fn set_strategies(&self, strategies: &[StrategyInfo]) {
        *self.strategies.borrow_mut() = strategies.to_vec();
    }

    fn strategies_failed(&self) {
        self.strategies_failed.set(true);
    }

    fn render_params(&self, inputs: &[ParamInput]) {
        *self.params_message.borrow_mut() = None;
        *self.inputs.borrow_mut() = inputs.to_vec();
        let mut params = self.params.borrow_mut();
        params.clear();
        for input in inputs {
            let value = match input {
                ParamInput::Number { value, .. } | ParamInput::Text { value, .. } => value.clone(),
                ParamInput::Checkbox { checked, .. } => checked.to_string(),
                ParamInput::Select { selected, .. } => selected.clone(),
            };
            params.insert(input.name().to_string(), value);
        }
    }

    fn show_params_message(&self, message: &str) {
        self.inputs.borrow_mut().clear();
        self.params.borrow_mut().clear();
        *self.params_message.borrow_mut() = Some(message.to_string());
    }

    fn set_param_value(&self, name: &str, value: &Value) {
        let text = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        self.params.borrow_mut().insert(name.to_string(), text);
    }

    fn read_param(&self, name: &str) -> Option<String> {
        self.param(name)
    }

    fn show_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_string());
    }

    fn clear_error(&self) {
        *self.error.borrow_mut() = None;
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with(pairs: &[(&str, &str)]) -> Rc<Self> {
        let store = Self::default();
        for (key, value) in pairs {
            store.values.borrow_mut().insert(key.to_string(), value.to_string());
        }
        Rc::new(store)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

pub struct RecordingVisibility {
    visible: Cell<bool>,
    changes: Cell<u32>,
}

impl RecordingVisibility {
    pub fn new(visible: bool) -> Rc<Self> {
        Rc::new(Self { visible: Cell::new(visible), changes: Cell::new(0) })
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn changes(&self) -> u32 {
        self.changes.get()
    }
}

impl Visibility for RecordingVisibility {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        self.changes.set(self.changes.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingModal {
    pub open: Cell<bool>,
    pub title: RefCell<String>,
    pub body: RefCell<String>,
}

impl RecordingModal {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl ModalSurface for RecordingModal {
    fn show(&self) {
        self.open.set(true);
    }

    fn hide(&self) {
        self.open.set(false);
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn set_body(&self, markup: &str) {
        *self.body.borrow_mut() = markup.to_string();
    }
}

/// Translated text per key, as the document would show it after `apply`.
#[derive(Default)]
pub struct RecordingSurface {
    pub applied: RefCell<HashMap<String, String>>,
    pub keys: Vec<&'static str>,
    pub page_title_key: Option<String>,
    pub title: RefCell<Option<String>>,
}

impl RecordingSurface {
    pub fn new(keys: Vec<&'static str>, page_title_key: Option<&str>) -> Rc<Self> {
        Rc::new(Self {
            keys,
            page_title_key: page_title_key.map(str::to_string),
            ..Self::default()
        })
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.applied.borrow().get(key).cloned()
    }
}

impl TranslationSurface for RecordingSurface {
    fn apply(&self, translator: &Translator) {
        let mut applied = self.applied.borrow_mut();
        for key in &self.keys {
            applied.insert(key.to_string(), translator.t(key).to_string());
        }
    }

    fn page_title_key(&self) -> Option<String> {
        self.page_title_key.clone()
    }

    fn set_document_title(&self, title: &str) {
        *self.title.borrow_mut() = Some(title.to_string());
    }
}
