//! Leveled, layer-tagged log records and the process-wide sink they go to.
//!
//! Call sites use the `log_*!` macros. Until a sink is installed every record
//! is discarded, which is what native tests rely on.

use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer and unit that produced a record, e.g. `APP:PollUnit` or `INF:HTTP`.
#[derive(Debug, Clone, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// One log line. `context` holds the detail behind the message: a status
/// text, an error, a request path.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub at: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub context: Option<String>,
}

impl LogRecord {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            at: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = get_time_provider().format_timestamp(self.at);
        write!(f, "[{}] {} {} | {}", at, self.level, self.component, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " | {}", context)?;
        }
        Ok(())
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Destination for records at or above `min_level`.
pub trait Logger: Send + Sync {
    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn write(&self, record: &LogRecord);
}

static SINK: OnceLock<Box<dyn Logger>> = OnceLock::new();
static CLOCK: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Installs the sink. Only the first call takes effect.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = SINK.set(logger);
}

pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = CLOCK.set(time_provider);
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    CLOCK.get().map(|clock| clock.as_ref()).unwrap_or(&Sequence)
}

pub fn emit(record: LogRecord) {
    if let Some(sink) = SINK.get() {
        if record.level >= sink.min_level() {
            sink.write(&record);
        }
    }
}

pub fn log(level: LogLevel, component: LogComponent, message: String) {
    emit(LogRecord::new(level, component, message));
}

/// Stand-in clock before the browser one is installed: a counter.
struct Sequence;

impl TimeProvider for Sequence {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{}", timestamp)
    }
}

/// Debug records are compiled out of release builds.
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::domain::logging::log($crate::domain::logging::LogLevel::Debug, $component, format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::log($crate::domain::logging::LogLevel::Info, $component, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::log($crate::domain::logging::LogLevel::Warn, $component, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::log($crate::domain::logging::LogLevel::Error, $component, format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_line_carries_level_layer_and_context() {
        let record = LogRecord::new(LogLevel::Warn, LogComponent::Infrastructure("HTTP"), "GET /api/bots -> 503")
            .with_context("Service Unavailable");
        let line = record.to_string();
        assert!(line.contains(" WARN INF:HTTP | GET /api/bots -> 503 | Service Unavailable"));
    }

    #[test]
    fn levels_order_from_debug_to_error() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
