pub mod api;
pub mod dom;
pub mod http;
pub mod rendering;
pub mod storage;

/// Browser-backed implementations of the logging traits.
pub mod services {
    use crate::domain::logging::{LogLevel, LogRecord, Logger, TimeProvider};

    /// Writes records to the devtools console at the matching level.
    pub struct ConsoleLogger {
        min_level: LogLevel,
    }

    impl ConsoleLogger {
        pub fn new(min_level: LogLevel) -> Self {
            Self { min_level }
        }

        /// Debug builds log everything from `Debug` up, release builds from `Info`.
        pub fn for_build() -> Self {
            Self::new(if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info })
        }
    }

    impl Logger for ConsoleLogger {
        fn min_level(&self) -> LogLevel {
            self.min_level
        }

        fn write(&self, record: &LogRecord) {
            let line = wasm_bindgen::JsValue::from(record.to_string());
            match record.level {
                LogLevel::Debug => web_sys::console::debug_1(&line),
                LogLevel::Info => web_sys::console::info_1(&line),
                LogLevel::Warn => web_sys::console::warn_1(&line),
                LogLevel::Error => web_sys::console::error_1(&line),
            }
        }
    }

    /// Wall clock from `Date.now()`, rendered in local time.
    #[derive(Default)]
    pub struct BrowserTimeProvider;

    impl BrowserTimeProvider {
        pub fn new() -> Self {
            Self
        }
    }

    impl TimeProvider for BrowserTimeProvider {
        fn current_timestamp(&self) -> u64 {
            js_sys::Date::now() as u64
        }

        fn format_timestamp(&self, timestamp: u64) -> String {
            let date = js_sys::Date::new(&(timestamp as f64).into());
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                date.get_hours(),
                date.get_minutes(),
                date.get_seconds(),
                date.get_milliseconds()
            )
        }
    }
}
