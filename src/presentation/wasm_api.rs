//! JavaScript entry points. Each `mount*` call wires one page controller to
//! the live document; the mounted page lives in a thread-local slot until the
//! next mount or `pagehide`.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use leptos::{IntoView, SignalSet, ev, event_target_value, mount_to, mount_to_body, view};
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlSelectElement};

use crate::app::{LanguageSwitcher, ToastStack};
use crate::application::{
    feedback::{Feedback, ToastKind},
    history_sort::SortColumn,
    localization::Localization,
    poll_unit::{PageScope, RenderTarget},
};
use crate::config::client_config;
use crate::domain::{
    bots::BotId,
    dashboard::Emotion,
    errors::AppResult,
    i18n::Translator,
    logging::LogComponent,
};
use crate::event_utils::{
    EventListenerHandle, EventOptions, closest_with_attribute, element_event_listener,
    event_listener_with_options, window_event_listener_with_options,
};
use crate::global_state::{language, unread_count};
use crate::infrastructure::{
    api::QuantumApi,
    dom::{BrowserFeedback, DomFormView, DomTranslationSurface, ElementTarget, FormIds, TextTarget, element_by_id, typed},
    http::{FormValue, GlooHttpClient},
    rendering::CanvasChartBackend,
    storage::BrowserPreferenceStore,
};

use super::dom_views::{DomBacktestForm, DomModal, DomProfileView, DomSettingsView, ElementVisibility};
use super::pages::{
    BacktestHistoryPage, BacktestPage, BotAction, BotDetailPage, BotsPage, CryptoPage, DashboardPage, ForexPage,
    HistoryPage, NotificationsPage, PortfolioPage, ProfilePage, SettingsPage, StocksPage, UnreadBadge, Visibility,
    backtest::BacktestTargets, backtest_history::RunDetailTargets, bot_detail::BotDetailTargets,
    dashboard::DashboardTargets,
};

const NO_FILE: &str = "Pilih file data CSV terlebih dahulu";

/// Everything one mounted page keeps alive: its task scope, its listeners
/// and the controllers they call into.
struct MountedPage {
    name: &'static str,
    scope: Rc<PageScope>,
    listeners: Vec<EventListenerHandle>,
    retained: Vec<Rc<dyn Any>>,
}

impl MountedPage {
    fn new(name: &'static str) -> Self {
        Self { name, scope: PageScope::new(), listeners: Vec::new(), retained: Vec::new() }
    }

    fn retain<P: 'static>(&mut self, page: Rc<P>) {
        self.retained.push(page);
    }

    fn on_click(&mut self, id: &str, mut handler: impl FnMut() + 'static) -> AppResult<()> {
        let element = element_by_id(id)?;
        self.listeners
            .push(element_event_listener(&element, ev::click, move |_| handler()));
        Ok(())
    }

    /// Delegated click: `handler` gets the closest ancestor of the click target
    /// that carries `attribute`, inside container `id`.
    fn on_marked_click(
        &mut self,
        id: &str,
        attribute: &'static str,
        mut handler: impl FnMut(String) + 'static,
    ) -> AppResult<()> {
        let container = element_by_id(id)?;
        self.listeners.push(element_event_listener(&container, ev::click, move |event| {
            if let Some(value) =
                closest_with_attribute(&event, attribute).and_then(|marked| marked.get_attribute(attribute))
            {
                handler(value);
            }
        }));
        Ok(())
    }

    fn on_change(&mut self, element: &Element, mut handler: impl FnMut(String) + 'static) {
        self.listeners.push(element_event_listener(element, ev::change, move |event| {
            handler(event_target_value(&event));
        }));
    }

    fn on_submit(&mut self, form: &Element, mut handler: impl FnMut() + 'static) {
        self.listeners.push(event_listener_with_options(
            form.unchecked_ref(),
            ev::submit,
            &EventOptions::active(),
            move |event| {
                event.prevent_default();
                handler();
            },
        ));
    }

    fn teardown(self) {
        self.scope.cancel_all();
        crate::log_debug!(
            LogComponent::Presentation("WasmApi"),
            "{} unmounted ({} listeners, {} controllers)",
            self.name,
            self.listeners.len(),
            self.retained.len()
        );
    }
}

thread_local! {
    static CURRENT_PAGE: RefCell<Option<MountedPage>> = const { RefCell::new(None) };
    static SHELL: RefCell<Option<MountedPage>> = const { RefCell::new(None) };
    static LOCALIZATION: RefCell<Option<Rc<Localization>>> = const { RefCell::new(None) };
    static PAGEHIDE: RefCell<Option<EventListenerHandle>> = const { RefCell::new(None) };
}

fn api() -> Rc<QuantumApi<GlooHttpClient>> {
    Rc::new(QuantumApi::new(GlooHttpClient::new(client_config().api_base.clone())))
}

fn feedback() -> Rc<dyn Feedback> {
    Rc::new(BrowserFeedback)
}

fn html(id: &str) -> AppResult<Rc<dyn RenderTarget>> {
    Ok(Rc::new(ElementTarget::by_id(id)?))
}

fn text(id: &str) -> AppResult<Rc<dyn RenderTarget>> {
    Ok(Rc::new(TextTarget::by_id(id)?))
}

fn shown(id: &str) -> AppResult<Rc<dyn Visibility>> {
    Ok(Rc::new(ElementVisibility::by_id(id)?))
}

fn canvas(id: &str) -> AppResult<CanvasChartBackend> {
    CanvasChartBackend::from_id(id)
}

fn localization() -> AppResult<Rc<Localization>> {
    if let Some(existing) = LOCALIZATION.with(|slot| slot.borrow().clone()) {
        return Ok(existing);
    }
    let created = Rc::new(Localization::new(
        Translator::builtin(),
        Rc::new(BrowserPreferenceStore),
        Rc::new(DomTranslationSurface::new()?),
        feedback(),
    ));
    LOCALIZATION.with(|slot| *slot.borrow_mut() = Some(created.clone()));
    Ok(created)
}

fn unmount_all() {
    let page = CURRENT_PAGE.with(|slot| slot.borrow_mut().take());
    let shell = SHELL.with(|slot| slot.borrow_mut().take());
    for mounted in [page, shell].into_iter().flatten() {
        mounted.teardown();
    }
}

fn ensure_pagehide() {
    PAGEHIDE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = window_event_listener_with_options(ev::pagehide, &EventOptions::default(), |_| unmount_all());
        }
    });
}

fn mount_page(name: &'static str, build: impl FnOnce(&mut MountedPage) -> AppResult<()>) -> Result<(), JsValue> {
    let mut mounted = MountedPage::new(name);
    if let Err(err) = build(&mut mounted) {
        crate::log_error!(LogComponent::Presentation("WasmApi"), "{} not mounted: {}", name, err);
        mounted.teardown();
        return Err(err.into());
    }

    ensure_pagehide();
    crate::log_info!(LogComponent::Presentation("WasmApi"), "{} mounted", name);
    let previous = CURRENT_PAGE.with(|slot| slot.borrow_mut().replace(mounted));
    if let Some(previous) = previous {
        previous.teardown();
    }
    Ok(())
}

/// Toasts, translations, language picker, unread badge and sidebar toggle.
/// Call once per document before mounting the page itself.
#[wasm_bindgen(js_name = mountShell)]
pub fn mount_shell() -> Result<(), JsValue> {
    let mut shell = MountedPage::new("shell");

    mount_to_body(|| view! { <ToastStack/> });

    let localization = localization()?;
    localization.apply();
    language().set(localization.active_language());
    if let Ok(host) = typed::<HtmlElement>("global-lang-switcher", "element") {
        let picker = localization.clone();
        mount_to(host, move || view! { <LanguageSwitcher localization=picker/> }.into_view());
    }

    if let Ok(dot) = ElementVisibility::by_id("notification-dot") {
        let on_count: Rc<dyn Fn(u32)> = Rc::new(|count| unread_count().set(count));
        let badge = Rc::new(UnreadBadge::new(api(), Rc::new(dot), Some(on_count)));
        badge.mount(&shell.scope);
        shell.retain(badge);
    }

    if let (Ok(toggle), Ok(sidebar)) = (element_by_id("sidebar-toggle"), element_by_id("sidebar")) {
        shell.listeners.push(element_event_listener(&toggle, ev::click, move |_| {
            let _ = sidebar.class_list().toggle("collapsed");
        }));
    }

    ensure_pagehide();
    let previous = SHELL.with(|slot| slot.borrow_mut().replace(shell));
    if let Some(previous) = previous {
        previous.teardown();
    }
    Ok(())
}

/// Stops every poll loop and detaches every listener.
#[wasm_bindgen(js_name = unmountAll)]
pub fn unmount() {
    unmount_all();
}

#[wasm_bindgen(js_name = mountBotsPage)]
pub fn mount_bots_page() -> Result<(), JsValue> {
    mount_page("bots", |mounted| {
        let view = Rc::new(DomFormView::from_ids(&FormIds::default())?);
        let page = Rc::new(BotsPage::new(api(), html("bots-table-body")?, view.clone(), feedback()));
        page.mount(&mounted.scope);

        let form = page.form().clone();
        mounted.on_click("create-bot-btn", move || form.open_create())?;
        let form = page.form().clone();
        mounted.on_click("cancel-create", move || form.cancel())?;

        let form = page.form().clone();
        let scope = mounted.scope.clone();
        mounted.on_change(view.strategy_select(), move |strategy| {
            let form = form.clone();
            scope.spawn("bot-strategy", async move {
                let _ = form.select_strategy(&strategy).await;
            });
        });

        let form = page.form().clone();
        let scope = mounted.scope.clone();
        mounted.on_submit(view.form(), move || {
            let form = form.clone();
            scope.spawn("bot-submit", async move {
                let _ = form.submit().await;
            });
        });

        let actions = page.clone();
        let scope = mounted.scope.clone();
        let table = element_by_id("bots-table-body")?;
        mounted.listeners.push(element_event_listener(&table, ev::click, move |event| {
            let Some(button) = closest_with_attribute(&event, "data-action") else { return };
            let (Some(action), Some(id)) = (button.get_attribute("data-action"), button.get_attribute("data-id"))
            else {
                return;
            };
            let Some(action) = BotAction::parse(&action, &id) else { return };
            let page = actions.clone();
            scope.spawn("bot-action", async move { page.handle_action(action).await });
        }));

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountBotDetailPage)]
pub fn mount_bot_detail_page(bot_id: u32) -> Result<(), JsValue> {
    mount_page("bot-detail", |mounted| {
        let targets = BotDetailTargets {
            header: html("bot-header")?,
            parameters: html("bot-parameters-container")?,
            activity: html("history-log-container")?,
            analysis: html("bot-analysis-container")?,
            fundamentals: html("fundamentals-section")?,
        };
        let page = Rc::new(BotDetailPage::new(api(), BotId::from(bot_id), targets));
        page.mount(&mounted.scope);
        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountHistoryPage)]
pub fn mount_history_page() -> Result<(), JsValue> {
    mount_page("history", |mounted| {
        let glyphs = SortColumn::iter()
            .filter_map(|column| text(&format!("sort-{}", column.as_ref())).ok().map(|target| (column, target)))
            .collect();
        let page = Rc::new(HistoryPage::new(api(), html("history-table-body")?, glyphs));
        page.mount(&mounted.scope);

        let sorter = page.clone();
        mounted.on_marked_click("history-table-head", "data-sort", move |column| {
            match column.parse::<SortColumn>() {
                Ok(column) => sorter.sort_by(column),
                Err(_) => crate::log_warn!(
                    LogComponent::Presentation("History"),
                    "unknown sort column {}",
                    column,
                ),
            }
        })?;

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountPortfolioPage)]
pub fn mount_portfolio_page() -> Result<(), JsValue> {
    mount_page("portfolio", |mounted| {
        let page = Rc::new(PortfolioPage::new(
            api(),
            html("portfolio-table-body")?,
            html("portfolio-summary")?,
            canvas("pnlChart")?,
            canvas("assetAllocationChart")?,
        ));
        page.mount(&mounted.scope);
        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountForexPage)]
pub fn mount_forex_page() -> Result<(), JsValue> {
    mount_page("forex", |mounted| {
        let modal = Rc::new(DomModal::from_ids("forex-modal", "modal-title", "modal-content")?);
        let page = Rc::new(ForexPage::new(api(), html("forex-table-body")?, modal));
        page.mount(&mounted.scope);

        let opener = page.clone();
        let scope = mounted.scope.clone();
        mounted.on_marked_click("forex-table-body", "data-symbol", move |symbol| {
            let page = opener.clone();
            scope.spawn("forex-profile", async move { page.profile().open(&symbol).await });
        })?;
        let closer = page.clone();
        mounted.on_click("close-modal", move || closer.profile().close())?;

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountStocksPage)]
pub fn mount_stocks_page() -> Result<(), JsValue> {
    mount_page("stocks", |mounted| {
        let modal = Rc::new(DomModal::from_ids("stock-modal", "modal-title", "modal-content")?);
        let page = Rc::new(StocksPage::new(api(), html("stocks-table-body")?, modal));
        page.mount(&mounted.scope);

        let opener = page.clone();
        let scope = mounted.scope.clone();
        mounted.on_marked_click("stocks-table-body", "data-symbol", move |symbol| {
            let page = opener.clone();
            scope.spawn("stock-profile", async move { page.profile().open(&symbol).await });
        })?;
        let closer = page.clone();
        mounted.on_click("close-modal", move || closer.profile().close())?;

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountCryptoPage)]
pub fn mount_crypto_page() -> Result<(), JsValue> {
    mount_page("crypto", |mounted| {
        let page = Rc::new(CryptoPage::new(api(), html("crypto-table-body")?));
        page.mount(&mounted.scope);
        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountNotificationsPage)]
pub fn mount_notifications_page() -> Result<(), JsValue> {
    mount_page("notifications", |mounted| {
        let page = Rc::new(NotificationsPage::new(api(), html("notifications-container")?));
        page.clone().mount(&mounted.scope);
        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountBacktestPage)]
pub fn mount_backtest_page() -> Result<(), JsValue> {
    mount_page("backtest", |mounted| {
        let form = Rc::new(DomBacktestForm::from_document()?);
        let targets = BacktestTargets {
            summary: html("results-summary")?,
            log: html("results-log")?,
            results: shown("results-container")?,
        };
        let notices = feedback();
        let page = Rc::new(BacktestPage::new(api(), form.clone(), targets, canvas("equity-chart")?, notices.clone()));
        page.clone().mount(&mounted.scope);

        let selector = page.clone();
        let scope = mounted.scope.clone();
        mounted.on_change(form.strategy_select(), move |strategy| {
            let page = selector.clone();
            scope.spawn("backtest-strategy", async move { page.select_strategy(&strategy).await });
        });

        let runner = page.clone();
        let scope = mounted.scope.clone();
        let inputs = form.clone();
        mounted.on_submit(&element_by_id("backtest-form")?, move || {
            let strategy = inputs.strategy_select().value();
            let Some(file) = inputs.selected_file() else {
                notices.notify(NO_FILE, ToastKind::Error);
                return;
            };
            let page = runner.clone();
            scope.spawn("backtest-run", async move {
                let _ = page.run(FormValue::File(file), &strategy).await;
            });
        });

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountBacktestHistoryPage)]
pub fn mount_backtest_history_page() -> Result<(), JsValue> {
    mount_page("backtest-history", |mounted| {
        let detail = RunDetailTargets {
            id: text("detail-id")?,
            timestamp: text("detail-timestamp")?,
            summary: html("detail-summary")?,
            placeholder: shown("detail-placeholder")?,
            view: shown("detail-view")?,
        };
        let page = Rc::new(BacktestHistoryPage::new(
            api(),
            html("history-list-container")?,
            detail,
            canvas("detail-equity-chart")?,
        ));
        page.mount(&mounted.scope);

        let selector = page.clone();
        mounted.on_marked_click("history-list-container", "data-index", move |index| {
            if let Ok(index) = index.parse::<usize>() {
                selector.select(index);
            }
        })?;

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountDashboardPage)]
pub fn mount_dashboard_page() -> Result<(), JsValue> {
    mount_page("dashboard", |mounted| {
        let targets = DashboardTargets {
            stats: html("dashboard-stats")?,
            account: html("account-info")?,
            activity: html("recent-activities")?,
            mentor: html("ai-mentor-card")?,
        };
        let modal = Rc::new(DomModal::from_ids("emotion-modal", "emotion-modal-title", "emotion-modal-content")?);
        let page = Rc::new(DashboardPage::new(
            api(),
            targets,
            canvas("priceChart")?,
            canvas("rsiChart")?,
            modal,
            feedback(),
        ));
        page.mount(&mounted.scope);

        let opener = page.clone();
        mounted.on_click("update-emotion-btn", move || opener.open_emotion_picker())?;
        let closer = page.clone();
        mounted.on_click("close-emotion-modal", move || closer.close_emotion_picker())?;

        let updater = page.clone();
        let scope = mounted.scope.clone();
        mounted.on_marked_click("emotion-modal-content", "data-emotion", move |emotion| {
            let Ok(emotion) = emotion.parse::<Emotion>() else { return };
            let page = updater.clone();
            scope.spawn("emotion-update", async move { page.update_emotion(emotion).await });
        })?;

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountSettingsPage)]
pub fn mount_settings_page() -> Result<(), JsValue> {
    mount_page("settings", |mounted| {
        let localization = localization()?;
        let view = Rc::new(DomSettingsView::from_document()?);
        let page = Rc::new(SettingsPage::new(
            Rc::new(BrowserPreferenceStore),
            localization.clone(),
            view,
            feedback(),
        ));
        page.load();

        let picker: HtmlSelectElement = typed("language-select", "select")?;
        picker.set_value(&localization.active_language());
        let switcher = page.clone();
        mounted.on_change(&picker, move |lang| {
            if switcher.change_language(&lang).is_ok() {
                language().set(lang);
            }
        });

        let saver = page.clone();
        mounted.on_click("save-preferences-btn", move || {
            saver.save_preferences();
        })?;
        let saver = page.clone();
        mounted.on_click("save-profile-btn", move || saver.save_full_name())?;

        mounted.retain(page);
        Ok(())
    })
}

#[wasm_bindgen(js_name = mountProfilePage)]
pub fn mount_profile_page() -> Result<(), JsValue> {
    mount_page("profile", |mounted| {
        let page = Rc::new(ProfilePage::new(api(), Rc::new(DomProfileView::from_document()?), feedback()));

        let loader = page.clone();
        mounted.scope.spawn("profile-load", async move {
            let _ = loader.load().await;
        });

        let saver = page.clone();
        let scope = mounted.scope.clone();
        mounted.on_submit(&element_by_id("profile-form")?, move || {
            let page = saver.clone();
            scope.spawn("profile-save", async move {
                let _ = page.save().await;
            });
        });

        mounted.retain(page);
        Ok(())
    })
}
