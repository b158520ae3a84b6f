//! DOM adapters: render targets, the bot modal, i18n scanning and toasts.

use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

use crate::application::{
    bot_form::FormView,
    feedback::{Feedback, ToastKind},
    localization::TranslationSurface,
    poll_unit::RenderTarget,
};
use crate::domain::{
    bots::{FormFields, ParamInput, StrategyInfo, value_text},
    errors::{AppError, AppResult},
    i18n::Translator,
    logging::LogComponent,
};

pub const HIDDEN: &str = "hidden";

pub fn document() -> AppResult<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| AppError::dom("document not available"))
}

pub fn element_by_id(id: &str) -> AppResult<Element> {
    crate::require_element!(document()?, id)
}

pub fn set_hidden(element: &Element, hidden: bool) {
    let classes = element.class_list();
    let result = if hidden { classes.add_1(HIDDEN) } else { classes.remove_1(HIDDEN) };
    if result.is_err() {
        crate::log_warn!(LogComponent::Infrastructure("DOM"), "class toggle failed");
    }
}

/// Container written with one `innerHTML` assignment per render.
#[derive(Debug, Clone)]
pub struct ElementTarget {
    element: Element,
}

impl ElementTarget {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn by_id(id: &str) -> AppResult<Self> {
        element_by_id(id).map(Self::new)
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl RenderTarget for ElementTarget {
    fn write(&self, markup: &str) {
        self.element.set_inner_html(markup);
    }
}

/// Plain-text target, e.g. the bot name header.
#[derive(Debug, Clone)]
pub struct TextTarget {
    element: Element,
}

impl TextTarget {
    pub fn by_id(id: &str) -> AppResult<Self> {
        element_by_id(id).map(|element| Self { element })
    }
}

impl RenderTarget for TextTarget {
    fn write(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

/// Element ids of the bot modal.
#[derive(Debug, Clone)]
pub struct FormIds {
    pub modal: &'static str,
    pub form: &'static str,
    pub title: &'static str,
    pub strategy: &'static str,
    pub params: &'static str,
    pub error: &'static str,
    pub submit: &'static str,
}

impl Default for FormIds {
    fn default() -> Self {
        Self {
            modal: "create-bot-modal",
            form: "create-bot-form",
            title: "modal-title",
            strategy: "strategy",
            params: "strategy-params-container",
            error: "form-error",
            submit: "submit-bot-btn",
        }
    }
}

const BASE_FIELDS: [&str; 8] = [
    "name",
    "market",
    "lot_size",
    "sl_pips",
    "tp_pips",
    "timeframe",
    "check_interval_seconds",
    "strategy",
];

pub(crate) fn named_control(scope: &Element, name: &str) -> Option<Element> {
    scope.query_selector(&format!("[name=\"{}\"]", name)).ok().flatten()
}

pub(crate) fn read_control(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if input.type_() == "checkbox" {
            return Some(input.checked().to_string());
        }
        return Some(input.value());
    }
    element.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

pub(crate) fn write_control(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if input.type_() == "checkbox" {
            input.set_checked(matches!(value, "true" | "1" | "on"));
        } else {
            input.set_value(value);
        }
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

/// Label plus control for one schema field; the control is named and id'd `param-{name}`.
fn build_param_input(document: &Document, input: &ParamInput) -> AppResult<Element> {
    let wrapper = document.create_element("div")?;
    let label = document.create_element("label")?;
    label.set_class_name("block text-sm font-medium text-gray-700");
    label.set_attribute("for", &format!("param-{}", input.name()))?;

    let control: Element = match input {
        ParamInput::Number { label: text, value, step, .. } => {
            label.set_text_content(Some(text.as_str()));
            let field = document.create_element("input")?;
            field.set_attribute("type", "number")?;
            field.set_attribute("step", step)?;
            field.set_attribute("value", value)?;
            field
        }
        ParamInput::Checkbox { label: text, checked, .. } => {
            label.set_text_content(Some(text.as_str()));
            let field = document.create_element("input")?;
            field.set_attribute("type", "checkbox")?;
            if let Some(checkbox) = field.dyn_ref::<HtmlInputElement>() {
                checkbox.set_checked(*checked);
            }
            field
        }
        ParamInput::Select { label: text, options, selected, .. } => {
            label.set_text_content(Some(text.as_str()));
            let field = document.create_element("select")?;
            for option in options {
                let node = HtmlOptionElement::new_with_text_and_value_and_default_selected_and_selected(
                    option,
                    option,
                    false,
                    option == selected,
                )?;
                field.append_child(&node)?;
            }
            field
        }
        ParamInput::Text { label: text, value, .. } => {
            label.set_text_content(Some(text.as_str()));
            let field = document.create_element("input")?;
            field.set_attribute("type", "text")?;
            field.set_attribute("value", value)?;
            field
        }
    };
    control.set_attribute("name", input.name())?;
    control.set_id(&format!("param-{}", input.name()));
    control.set_class_name("mt-1 block w-full rounded-md border-gray-300 shadow-sm sm:text-sm");

    wrapper.append_child(&label)?;
    wrapper.append_child(&control)?;
    Ok(wrapper)
}

pub(crate) fn report(result: AppResult<()>, what: &str) {
    if let Err(err) = result {
        crate::log_error!(LogComponent::Infrastructure("DOM"), "{}: {}", what, err);
    }
}

pub(crate) fn typed<T: JsCast>(id: &str, kind: &str) -> AppResult<T> {
    element_by_id(id)?
        .dyn_into::<T>()
        .map_err(|_| AppError::dom(format!("#{} is not a {}", id, kind)))
}

/// Strategy `<select>` plus the container its parameter inputs are generated into.
/// Shared by the bot modal and the backtest form.
pub struct StrategyPanel {
    document: Document,
    strategy: HtmlSelectElement,
    params: Element,
}

impl StrategyPanel {
    pub fn from_ids(strategy: &str, params: &str) -> AppResult<Self> {
        Ok(Self {
            document: document()?,
            strategy: typed(strategy, "select")?,
            params: element_by_id(params)?,
        })
    }

    pub fn strategy_select(&self) -> &HtmlSelectElement {
        &self.strategy
    }

    fn try_set_strategies(&self, strategies: &[StrategyInfo]) -> AppResult<()> {
        self.strategy
            .set_inner_html(r#"<option value="" disabled selected>Pilih sebuah strategi</option>"#);
        for strategy in strategies {
            let option = HtmlOptionElement::new_with_text_and_value(&strategy.name, &strategy.id)?;
            self.strategy.append_child(&option)?;
        }
        Ok(())
    }

    pub fn set_strategies(&self, strategies: &[StrategyInfo]) {
        report(self.try_set_strategies(strategies), "strategy options");
    }

    pub fn strategies_failed(&self) {
        self.strategy
            .set_inner_html(r#"<option value="">Gagal memuat strategi</option>"#);
    }

    fn try_render_params(&self, inputs: &[ParamInput]) -> AppResult<()> {
        self.params.set_inner_html("");
        for input in inputs {
            let node = build_param_input(&self.document, input)?;
            self.params.append_child(&node)?;
        }
        Ok(())
    }

    pub fn render_params(&self, inputs: &[ParamInput]) {
        report(self.try_render_params(inputs), "parameter inputs");
    }

    pub fn show_message(&self, message: &str) {
        self.params.set_inner_html("");
        let result = self.document.create_element("p").and_then(|paragraph| {
            paragraph.set_class_name("text-sm text-gray-500");
            paragraph.set_text_content(Some(message));
            self.params.append_child(&paragraph).map(|_| ())
        });
        report(result.map_err(AppError::from), "parameter message");
    }

    pub fn set_value(&self, name: &str, value: &str) {
        if let Some(element) = named_control(&self.params, name) {
            write_control(&element, value);
        }
    }

    pub fn value(&self, name: &str) -> Option<String> {
        named_control(&self.params, name).and_then(|element| read_control(&element))
    }

    /// Every generated control as `(name, raw value)`, in document order.
    pub fn values(&self) -> Vec<(String, String)> {
        let Ok(nodes) = self.params.query_selector_all("[name]") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| {
                let name = element.get_attribute("name")?;
                read_control(&element).map(|value| (name, value))
            })
            .collect()
    }
}

pub struct DomFormView {
    modal: Element,
    form: HtmlFormElement,
    title: Element,
    panel: StrategyPanel,
    error: Option<Element>,
    submit: Option<Element>,
}

impl DomFormView {
    pub fn from_ids(ids: &FormIds) -> AppResult<Self> {
        let document = document()?;
        Ok(Self {
            modal: element_by_id(ids.modal)?,
            form: typed(ids.form, "form")?,
            title: element_by_id(ids.title)?,
            panel: StrategyPanel::from_ids(ids.strategy, ids.params)?,
            error: document.get_element_by_id(ids.error),
            submit: document.get_element_by_id(ids.submit),
        })
    }

    pub fn strategy_select(&self) -> &HtmlSelectElement {
        self.panel.strategy_select()
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }
}

impl FormView for DomFormView {
    fn open_modal(&self, title: &str) {
        self.title.set_text_content(Some(title));
        set_hidden(&self.modal, false);
    }

    fn close_modal(&self) {
        set_hidden(&self.modal, true);
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn set_fields(&self, fields: &FormFields) {
        for (name, value) in fields {
            if let Some(element) = named_control(&self.form, name) {
                write_control(&element, value);
            }
        }
    }

    fn read_fields(&self) -> FormFields {
        BASE_FIELDS
            .iter()
            .filter_map(|name| {
                named_control(&self.form, name)
                    .and_then(|element| read_control(&element))
                    .map(|value| (name.to_string(), value))
            })
            .collect()
    }

    fn set_strategies(&self, strategies: &[StrategyInfo]) {
        self.panel.set_strategies(strategies);
    }

    fn strategies_failed(&self) {
        self.panel.strategies_failed();
    }

    fn render_params(&self, inputs: &[ParamInput]) {
        self.panel.render_params(inputs);
    }

    fn show_params_message(&self, message: &str) {
        self.panel.show_message(message);
    }

    fn set_param_value(&self, name: &str, value: &Value) {
        self.panel.set_value(name, &value_text(value));
    }

    fn read_param(&self, name: &str) -> Option<String> {
        self.panel.value(name)
    }

    fn show_error(&self, message: &str) {
        match &self.error {
            Some(error) => {
                error.set_text_content(Some(message));
                set_hidden(error, false);
            }
            None => push_toast_error(message),
        }
    }

    fn clear_error(&self) {
        if let Some(error) = &self.error {
            error.set_text_content(None);
            set_hidden(error, true);
        }
    }

    fn set_busy(&self, busy: bool) {
        if let Some(submit) = &self.submit {
            set_disabled(submit, busy);
        }
    }
}

pub(crate) fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    report(result.map_err(AppError::from), "disabled toggle");
}

fn push_toast_error(message: &str) {
    crate::app::push_toast(&format!("❌ {}", message), ToastKind::Error);
}

/// Rewrites `data-i18n*` targets in the live document.
#[derive(Debug, Clone)]
pub struct DomTranslationSurface {
    document: Document,
}

impl DomTranslationSurface {
    pub fn new() -> AppResult<Self> {
        Ok(Self { document: document()? })
    }

    fn each(&self, selector: &str, mut apply: impl FnMut(&Element)) {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return;
        };
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                apply(&element);
            }
        }
    }
}

impl TranslationSurface for DomTranslationSurface {
    fn apply(&self, translator: &Translator) {
        self.each("[data-i18n]", |element| {
            let Some(key) = element.get_attribute("data-i18n") else { return };
            let text = translator.t(&key);
            let tag = element.tag_name();
            if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
                let _ = element.set_attribute("placeholder", &text);
            } else {
                element.set_text_content(Some(text));
            }
        });
        self.each("[data-i18n-title]", |element| {
            if let Some(key) = element.get_attribute("data-i18n-title") {
                let _ = element.set_attribute("title", &translator.t(&key));
            }
        });
        self.each("[data-i18n-placeholder]", |element| {
            if let Some(key) = element.get_attribute("data-i18n-placeholder") {
                let _ = element.set_attribute("placeholder", &translator.t(&key));
            }
        });
    }

    fn page_title_key(&self) -> Option<String> {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute("data-page-title"))
    }

    fn set_document_title(&self, title: &str) {
        self.document.set_title(title);
    }
}

/// Toasts through the shell's signal stack, confirmations through `window.confirm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFeedback;

impl Feedback for BrowserFeedback {
    fn notify(&self, message: &str, kind: ToastKind) {
        crate::log_info!(LogComponent::Infrastructure("Feedback"), "{}", message);
        crate::app::push_toast(message, kind);
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
