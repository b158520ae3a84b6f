use std::cell::RefCell;
use std::rc::Rc;

use super::feedback::{Feedback, ToastKind};
use crate::domain::{
    errors::AppResult,
    i18n::{Translator, language_name},
    logging::LogComponent,
    preferences::{KEY_LANGUAGE, PreferenceStore},
};

/// The parts of the page that carry translatable text.
pub trait TranslationSurface {
    /// Rewrites every `data-i18n`, `data-i18n-title` and `data-i18n-placeholder` target.
    fn apply(&self, translator: &Translator);
    /// Key stored in `data-page-title` on the document element, if any.
    fn page_title_key(&self) -> Option<String>;
    fn set_document_title(&self, title: &str);
}

pub struct Localization {
    translator: RefCell<Translator>,
    store: Rc<dyn PreferenceStore>,
    surface: Rc<dyn TranslationSurface>,
    feedback: Rc<dyn Feedback>,
}

impl Localization {
    /// Restores the persisted language when it is one we know.
    pub fn new(
        translator: Translator,
        store: Rc<dyn PreferenceStore>,
        surface: Rc<dyn TranslationSurface>,
        feedback: Rc<dyn Feedback>,
    ) -> Self {
        let localization = Self {
            translator: RefCell::new(translator),
            store,
            surface,
            feedback,
        };
        if let Some(saved) = localization.store.get(KEY_LANGUAGE) {
            let _ = localization.translator.borrow_mut().set_language(&saved);
        }
        localization
    }

    pub fn active_language(&self) -> String {
        self.translator.borrow().active_language().to_string()
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.borrow().t(key).to_string()
    }

    pub fn apply(&self) {
        self.surface.apply(&self.translator.borrow());
    }

    /// Switches, persists, re-applies, retitles the page and confirms with a toast.
    /// Unknown languages are refused with a warning and change nothing.
    pub fn set_language(&self, lang: &str) -> AppResult<()> {
        if let Err(err) = self.translator.borrow_mut().set_language(lang) {
            crate::log_warn!(LogComponent::Application("i18n"), "{}", err);
            return Err(err);
        }
        self.store.set(KEY_LANGUAGE, lang);
        self.apply();
        if let Some(key) = self.surface.page_title_key() {
            let title = self.t(&key);
            self.surface.set_document_title(&title);
        }
        self.feedback
            .notify(&format!("Language: {}", language_name(lang)), ToastKind::Success);
        Ok(())
    }

    pub fn add_translation(&self, lang: &str, key: &str, value: &str) {
        self.translator.borrow_mut().add_translation(lang, key, value);
    }

    pub fn is_language_available(&self, lang: &str) -> bool {
        self.translator.borrow().is_language_available(lang)
    }
}
