//! Settings page: UI preferences and the display name, both kept in
//! `localStorage`, plus the language picker.

use std::rc::Rc;

use crate::application::{
    feedback::{Feedback, ToastKind},
    localization::Localization,
};
use crate::domain::{
    errors::AppResult,
    preferences::{PreferenceStore, UiPreferences},
};

/// Form controls of the preferences and profile cards.
pub trait SettingsView {
    fn show_preferences(&self, preferences: &UiPreferences);
    /// Theme and flags as currently entered; the language comes from the picker.
    fn read_preferences(&self) -> UiPreferences;
    fn show_full_name(&self, name: &str);
    fn read_full_name(&self) -> String;
}

pub struct SettingsPage<V> {
    store: Rc<dyn PreferenceStore>,
    localization: Rc<Localization>,
    view: Rc<V>,
    feedback: Rc<dyn Feedback>,
}

impl<V: SettingsView> SettingsPage<V> {
    pub fn new(
        store: Rc<dyn PreferenceStore>,
        localization: Rc<Localization>,
        view: Rc<V>,
        feedback: Rc<dyn Feedback>,
    ) -> Self {
        Self { store, localization, view, feedback }
    }

    /// Fills the form from storage and applies the stored language.
    pub fn load(&self) -> UiPreferences {
        let preferences = UiPreferences::load(self.store.as_ref());
        self.view.show_preferences(&preferences);
        if let Some(name) = &preferences.full_name {
            self.view.show_full_name(name);
        }
        self.localization.apply();
        preferences
    }

    pub fn change_language(&self, lang: &str) -> AppResult<()> {
        self.localization.set_language(lang)
    }

    pub fn save_preferences(&self) -> UiPreferences {
        let mut preferences = self.view.read_preferences();
        preferences.language = self.localization.active_language();
        preferences.save(self.store.as_ref());
        self.feedback
            .notify(&self.localization.t("msg.preferences_saved"), ToastKind::Success);
        preferences
    }

    pub fn save_full_name(&self) {
        let name = self.view.read_full_name();
        UiPreferences::save_full_name(self.store.as_ref(), name.trim());
        self.feedback
            .notify(&self.localization.t("msg.profile_saved"), ToastKind::Success);
    }
}
