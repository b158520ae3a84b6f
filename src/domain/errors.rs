use derive_more::Display;

/// Every failure a page unit can surface. Caught at the unit boundary and
/// rendered inline; nothing here reaches a global handler.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    /// The request never produced a response (offline, CORS, aborted).
    #[display(fmt = "Network error: {}", _0)]
    Network(String),
    /// Non-2xx response. `message` is the server `error` field or the status text.
    #[display(fmt = "HTTP {}: {}", status, message)]
    Status { status: u16, message: String },
    /// Body did not match the expected shape.
    #[display(fmt = "Unexpected response: {}", _0)]
    Payload(String),
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "Browser error: {}", _0)]
    Dom(String),
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user. Server-provided messages are passed through as-is.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Status { message, .. } if !message.is_empty() => message.clone(),
            AppError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn dom(what: impl Into<String>) -> Self {
        AppError::Dom(what.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Payload(err.to_string())
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(inner) => AppError::Payload(inner.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

/// Browser API failures surface as thrown JS values.
impl From<wasm_bindgen::JsValue> for AppError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        AppError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }
}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(err: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
