use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

#[macro_use]
mod macros;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Logger, clock and configuration. Runs once when the module is instantiated,
/// before any page calls its `mount*` entry point.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::for_build());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    #[cfg(target_arch = "wasm32")]
    config::init_config(config::ClientConfig::from_browser());

    crate::log_info!(
        LogComponent::Presentation("Initialize"),
        "QuantumBotX client ready (api base '{}')",
        config::client_config().api_base
    );
}
