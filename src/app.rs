use leptos::*;
use std::rc::Rc;

use crate::{
    application::{feedback::ToastKind, localization::Localization},
    domain::{
        i18n::language_name,
        logging::LogComponent,
    },
    global_state::{language, next_toast_id, toasts},
};

const TOAST_LIFETIME_MS: u32 = 3_000;

/// One transient status message in the corner stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn class(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "p-4 rounded-lg shadow-lg bg-green-500 text-white",
            ToastKind::Error => "p-4 rounded-lg shadow-lg bg-red-500 text-white",
            ToastKind::Info => "p-4 rounded-lg shadow-lg bg-blue-500 text-white",
        }
    }
}

/// Queues a toast and schedules its removal.
pub fn push_toast(message: &str, kind: ToastKind) {
    let id = next_toast_id().get_untracked();
    next_toast_id().set(id + 1);
    toasts().update(|list| {
        list.push(Toast { id, message: message.to_string(), kind });
    });
    gloo_timers::callback::Timeout::new(TOAST_LIFETIME_MS, move || {
        toasts().update(|list| list.retain(|toast| toast.id != id));
    })
    .forget();
}

/// Fixed stack of the live toasts.
#[component]
pub fn ToastStack() -> impl IntoView {
    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2">
            <For
                each=move || toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    view! { <div class=toast.class()>{toast.message.clone()}</div> }
                }
            />
        </div>
    }
}

/// `<select>` bound to the active language.
#[component]
pub fn LanguageSwitcher(localization: Rc<Localization>) -> impl IntoView {
    language().set(localization.active_language());
    let choices = ["id", "en"];

    let on_change = move |ev: ev::Event| {
        let lang = event_target_value(&ev);
        if localization.set_language(&lang).is_ok() {
            crate::log_debug!(LogComponent::Presentation("LanguageSwitcher"), "{}", lang);
            language().set(lang);
        } else {
            language().set(localization.active_language());
        }
    };

    view! {
        <select
            class="border rounded-md px-2 py-1 text-sm"
            on:change=on_change
        >
            {choices
                .into_iter()
                .map(|lang| {
                    view! {
                        <option value=lang selected=move || language().get() == lang>
                            {language_name(lang)}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
