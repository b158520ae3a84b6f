//! Translation tables: `lang -> key -> text`, with fallback to English and then to the key.

mod dictionary;

use std::collections::HashMap;

use super::errors::{AppError, AppResult};

pub const DEFAULT_LANGUAGE: &str = "id";
pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct Translator {
    tables: HashMap<String, HashMap<String, String>>,
    active: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Translator {
    /// Indonesian and English tables, Indonesian active.
    pub fn builtin() -> Self {
        let mut translator = Self::empty(DEFAULT_LANGUAGE);
        for (lang, table) in [("id", dictionary::ID), ("en", dictionary::EN)] {
            for (key, value) in table {
                translator.add_translation(lang, key, value);
            }
        }
        translator
    }

    pub fn empty(active: &str) -> Self {
        Self {
            tables: HashMap::new(),
            active: active.to_string(),
        }
    }

    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// Text for `key` in the active language, else English, else the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(&self.active, key)
            .or_else(|| self.lookup(FALLBACK_LANGUAGE, key))
            .unwrap_or(key)
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.tables
            .get(lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn set_language(&mut self, lang: &str) -> AppResult<()> {
        if !self.is_language_available(lang) {
            return Err(AppError::Validation(format!("Language '{}' not available", lang)));
        }
        self.active = lang.to_string();
        Ok(())
    }

    /// Adds or overrides a key. Unknown languages are created on the fly.
    pub fn add_translation(&mut self, lang: &str, key: &str, value: &str) {
        self.tables
            .entry(lang.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn is_language_available(&self, lang: &str) -> bool {
        self.tables.contains_key(lang)
    }
}

/// Name shown in the language-change toast.
pub fn language_name(lang: &str) -> &'static str {
    match lang {
        "id" => "Indonesia",
        _ => "English",
    }
}
