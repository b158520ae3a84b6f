//! Browser-persisted UI preferences and the user profile.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

pub const KEY_LANGUAGE: &str = "quantumBotX_language";
pub const KEY_THEME: &str = "quantumBotX_theme";
pub const KEY_AUTO_UPDATE: &str = "quantumBotX_autoUpdate";
pub const KEY_NOTIFICATIONS: &str = "quantumBotX_notifications";
pub const KEY_DEMO_MODE: &str = "quantumBotX_demoMode";
pub const KEY_FULL_NAME: &str = "quantumBotX_fullName";

/// String key/value persistence (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiPreferences {
    pub language: String,
    pub theme: Theme,
    pub auto_update: bool,
    pub notifications: bool,
    pub demo_mode: bool,
    pub full_name: Option<String>,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            language: "id".to_string(),
            theme: Theme::Light,
            auto_update: false,
            notifications: false,
            demo_mode: true,
            full_name: None,
        }
    }
}

impl UiPreferences {
    /// Flags are stored as `"true"`/`"false"`; demo mode is on unless explicitly `"false"`.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            language: store.get(KEY_LANGUAGE).unwrap_or(defaults.language),
            theme: store
                .get(KEY_THEME)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
            auto_update: store.get(KEY_AUTO_UPDATE).as_deref() == Some("true"),
            notifications: store.get(KEY_NOTIFICATIONS).as_deref() == Some("true"),
            demo_mode: store.get(KEY_DEMO_MODE).as_deref() != Some("false"),
            full_name: store.get(KEY_FULL_NAME).filter(|name| !name.is_empty()),
        }
    }

    pub fn save(&self, store: &dyn PreferenceStore) {
        store.set(KEY_LANGUAGE, &self.language);
        store.set(KEY_THEME, self.theme.as_ref());
        store.set(KEY_AUTO_UPDATE, bool_text(self.auto_update));
        store.set(KEY_NOTIFICATIONS, bool_text(self.notifications));
        store.set(KEY_DEMO_MODE, bool_text(self.demo_mode));
    }

    pub fn save_full_name(store: &dyn PreferenceStore, name: &str) {
        store.set(KEY_FULL_NAME, name);
    }
}

fn bool_text(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub join_date: String,
}

/// Body of `PUT /api/profile`. The password is sent only when one was typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn new(name: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            password: Some(password.to_string()).filter(|password| !password.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapStore(RefCell<HashMap<String, String>>);

    impl PreferenceStore for MapStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn demo_mode_defaults_on() {
        let store = MapStore::default();
        let prefs = UiPreferences::load(&store);
        assert!(prefs.demo_mode);
        assert_eq!(prefs.language, "id");
        store.set(KEY_DEMO_MODE, "false");
        assert!(!UiPreferences::load(&store).demo_mode);
    }

    #[test]
    fn saved_flags_read_back() {
        let store = MapStore::default();
        let prefs = UiPreferences { theme: Theme::Dark, auto_update: true, ..Default::default() };
        prefs.save(&store);
        assert_eq!(store.get(KEY_THEME).as_deref(), Some("dark"));
        assert_eq!(UiPreferences::load(&store), prefs);
    }

    #[test]
    fn empty_password_is_not_sent() {
        let body = serde_json::to_value(ProfileUpdate::new("Rina ", "")).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Rina"}));
    }
}
