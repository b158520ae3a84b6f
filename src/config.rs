//! Client configuration, resolved once at startup.

use once_cell::sync::OnceCell;
use std::time::Duration;

/// Poll intervals and other knobs shared by every page.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base: String,
    pub bots_interval: Duration,
    pub bot_activity_interval: Duration,
    pub bot_analysis_interval: Duration,
    pub portfolio_interval: Duration,
    pub crypto_interval: Duration,
    pub forex_interval: Duration,
    pub stocks_interval: Duration,
    pub unread_interval: Duration,
    pub dashboard_stats_interval: Duration,
    pub dashboard_account_interval: Duration,
    /// Drop responses overtaken by a newer refresh.
    pub stale_guard: bool,
    pub max_chart_points: usize,
    /// Minutes east of UTC used when formatting timestamps.
    pub utc_offset_minutes: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            bots_interval: Duration::from_secs(10),
            bot_activity_interval: Duration::from_secs(10),
            bot_analysis_interval: Duration::from_secs(5),
            portfolio_interval: Duration::from_secs(5),
            crypto_interval: Duration::from_secs(15),
            forex_interval: Duration::from_secs(30),
            stocks_interval: Duration::from_secs(30),
            unread_interval: Duration::from_secs(15),
            dashboard_stats_interval: Duration::from_secs(10),
            dashboard_account_interval: Duration::from_secs(30),
            stale_guard: true,
            max_chart_points: 60,
            utc_offset_minutes: 0,
        }
    }
}

impl ClientConfig {
    /// Defaults adjusted to the hosting page: `window.QUANTUMBOTX_API_BASE`
    /// overrides the API prefix and the browser's zone sets the display offset.
    #[cfg(target_arch = "wasm32")]
    pub fn from_browser() -> Self {
        use wasm_bindgen::JsValue;

        let mut config = Self::default();
        if let Some(window) = web_sys::window() {
            let base = js_sys::Reflect::get(&window, &JsValue::from_str("QUANTUMBOTX_API_BASE"))
                .ok()
                .and_then(|value| value.as_string());
            if let Some(base) = base {
                config.api_base = base.trim_end_matches('/').to_string();
            }
        }
        // getTimezoneOffset is minutes *behind* UTC
        config.utc_offset_minutes = -(js_sys::Date::new_0().get_timezone_offset() as i32);
        config
    }
}

static CONFIG: OnceCell<ClientConfig> = OnceCell::new();

/// Install the configuration. Only the first call has an effect.
pub fn init_config(config: ClientConfig) {
    let _ = CONFIG.set(config);
}

pub fn client_config() -> &'static ClientConfig {
    CONFIG.get_or_init(ClientConfig::default)
}
