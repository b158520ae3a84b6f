use crate::app::Toast;
use crate::domain::i18n::DEFAULT_LANGUAGE;
use leptos::*;
use once_cell::sync::OnceCell;

/// Page-independent UI state shared by the shell components.
pub struct Globals {
    pub language: RwSignal<String>,
    pub unread_count: RwSignal<u32>,
    pub toasts: RwSignal<Vec<Toast>>,
    pub next_toast_id: RwSignal<u64>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        language: create_rw_signal(DEFAULT_LANGUAGE.to_string()),
        unread_count: create_rw_signal(0),
        toasts: create_rw_signal(Vec::new()),
        next_toast_id: create_rw_signal(0),
    })
}

crate::global_signals! {
    pub language => language: String,
    pub unread_count => unread_count: u32,
    pub toasts => toasts: Vec<Toast>,
    pub(crate) next_toast_id => next_toast_id: u64,
}
