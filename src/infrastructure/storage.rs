use gloo::storage::{LocalStorage, Storage};

use crate::domain::logging::LogComponent;
use crate::domain::preferences::PreferenceStore;

/// `localStorage` with plain string values, readable by the page's other scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPreferenceStore;

impl PreferenceStore for BrowserPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            crate::log_warn!(LogComponent::Infrastructure("Storage"), "could not persist {}", key);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn values_are_stored_unquoted() {
        let store = BrowserPreferenceStore;
        store.set("quantumBotX_theme", "dark");
        assert_eq!(store.get("quantumBotX_theme").as_deref(), Some("dark"));
        assert_eq!(LocalStorage::raw().get_item("quantumBotX_theme").ok().flatten().as_deref(), Some("dark"));
    }
}
