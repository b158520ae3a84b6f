//! Live-document implementations of the page surfaces.

use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::domain::{
    bots::{ParamInput, StrategyInfo},
    errors::AppResult,
    preferences::{UiPreferences, UserProfile},
};
use crate::infrastructure::dom::{StrategyPanel, element_by_id, set_disabled, set_hidden, typed};

use super::pages::{
    ModalSurface, Visibility, backtest::BacktestForm, profile::ProfileView, settings::SettingsView,
};

/// Toggles the `hidden` class.
#[derive(Debug, Clone)]
pub struct ElementVisibility {
    element: Element,
}

impl ElementVisibility {
    pub fn by_id(id: &str) -> AppResult<Self> {
        element_by_id(id).map(|element| Self { element })
    }
}

impl Visibility for ElementVisibility {
    fn set_visible(&self, visible: bool) {
        set_hidden(&self.element, !visible);
    }
}

pub struct DomModal {
    modal: Element,
    title: Element,
    body: Element,
}

impl DomModal {
    pub fn from_ids(modal: &str, title: &str, body: &str) -> AppResult<Self> {
        Ok(Self {
            modal: element_by_id(modal)?,
            title: element_by_id(title)?,
            body: element_by_id(body)?,
        })
    }
}

impl ModalSurface for DomModal {
    fn show(&self) {
        set_hidden(&self.modal, false);
    }

    fn hide(&self) {
        set_hidden(&self.modal, true);
    }

    fn set_title(&self, title: &str) {
        self.title.set_text_content(Some(title));
    }

    fn set_body(&self, markup: &str) {
        self.body.set_inner_html(markup);
    }
}

/// `#backtest-form`: strategy picker, SL/TP multipliers, CSV file and run button.
pub struct DomBacktestForm {
    panel: StrategyPanel,
    stop_loss: HtmlInputElement,
    take_profit: HtmlInputElement,
    file: HtmlInputElement,
    run_button: Element,
    spinner: Element,
}

impl DomBacktestForm {
    pub fn from_document() -> AppResult<Self> {
        Ok(Self {
            panel: StrategyPanel::from_ids("strategy-select", "params-container")?,
            stop_loss: typed("sl_atr_multiplier", "input")?,
            take_profit: typed("tp_atr_multiplier", "input")?,
            file: typed("data-file", "input")?,
            run_button: element_by_id("run-backtest-btn")?,
            spinner: element_by_id("loading-spinner")?,
        })
    }

    pub fn strategy_select(&self) -> &HtmlSelectElement {
        self.panel.strategy_select()
    }

    pub fn selected_file(&self) -> Option<web_sys::File> {
        self.file.files().and_then(|files| files.get(0))
    }
}

impl BacktestForm for DomBacktestForm {
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

    fn param_values(&self) -> Vec<(String, String)> {
        self.panel.values()
    }

    fn stop_values(&self) -> (String, String) {
        (self.stop_loss.value(), self.take_profit.value())
    }

    fn set_running(&self, running: bool) {
        set_hidden(&self.spinner, !running);
        set_disabled(&self.run_button, running);
        self.run_button
            .set_text_content(Some(if running { "Menjalankan..." } else { "Jalankan Backtest" }));
    }
}

pub struct DomSettingsView {
    theme: HtmlSelectElement,
    auto_update: HtmlInputElement,
    notifications: HtmlInputElement,
    demo_mode: HtmlInputElement,
    full_name: HtmlInputElement,
}

impl DomSettingsView {
    pub fn from_document() -> AppResult<Self> {
        Ok(Self {
            theme: typed("theme-select", "select")?,
            auto_update: typed("auto-update", "input")?,
            notifications: typed("email-notifications", "input")?,
            demo_mode: typed("demo-mode", "input")?,
            full_name: typed("full-name-input", "input")?,
        })
    }
}

impl SettingsView for DomSettingsView {
    fn show_preferences(&self, preferences: &UiPreferences) {
        self.theme.set_value(preferences.theme.as_ref());
        self.auto_update.set_checked(preferences.auto_update);
        self.notifications.set_checked(preferences.notifications);
        self.demo_mode.set_checked(preferences.demo_mode);
    }

    fn read_preferences(&self) -> UiPreferences {
        UiPreferences {
            theme: self.theme.value().parse().unwrap_or_default(),
            auto_update: self.auto_update.checked(),
            notifications: self.notifications.checked(),
            demo_mode: self.demo_mode.checked(),
            ..UiPreferences::default()
        }
    }

    fn show_full_name(&self, name: &str) {
        self.full_name.set_value(name);
    }

    fn read_full_name(&self) -> String {
        self.full_name.value()
    }
}

pub struct DomProfileView {
    name: HtmlInputElement,
    email: HtmlInputElement,
    password: HtmlInputElement,
    display_name: Element,
    join_date: Element,
}

impl DomProfileView {
    pub fn from_document() -> AppResult<Self> {
        Ok(Self {
            name: typed("profile-name", "input")?,
            email: typed("profile-email", "input")?,
            password: typed("profile-password", "input")?,
            display_name: element_by_id("profile-display-name")?,
            join_date: element_by_id("profile-join-date")?,
        })
    }
}

impl ProfileView for DomProfileView {
    fn show_profile(&self, profile: &UserProfile) {
        self.name.set_value(&profile.name);
        self.email.set_value(&profile.email);
        self.display_name.set_text_content(Some(&profile.name));
        self.join_date
            .set_text_content(Some(&format!("Bergabung sejak: {}", profile.join_date)));
    }

    fn read_update(&self) -> (String, String) {
        (self.name.value(), self.password.value())
    }

    fn clear_password(&self) {
        self.password.set_value("");
    }
}
