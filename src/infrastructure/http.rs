use derive_more::Display;
use gloo::net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, LogLevel, LogRecord, emit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HttpMethod {
    #[display(fmt = "GET")]
    Get,
    #[display(fmt = "POST")]
    Post,
    #[display(fmt = "PUT")]
    Put,
    #[display(fmt = "DELETE")]
    Delete,
}

/// One `multipart/form-data` field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(web_sys::File),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<(String, FormValue)>),
}

/// Transport-neutral description of an API call. Paths are relative to the API base.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(path)
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Put,
            ..Self::get(path)
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            ..Self::get(path)
        }
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_multipart(mut self, fields: Vec<(String, FormValue)>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// JSON body, if any. Handy in assertions.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body,
        }
    }

    pub fn with_status(status: u16, status_text: &str, body: Value) -> Self {
        Self {
            status,
            status_text: status_text.to_string(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        HttpUtils::is_success_status(self.status)
    }

    /// The server `error` field. Validation failures send a list of messages.
    pub fn error_message(&self) -> Option<String> {
        match self.body.get("error")? {
            Value::String(message) => Some(message.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                Some(messages.join("; ")).filter(|joined| !joined.is_empty())
            }
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Success bodies pass through; anything else becomes `AppError::Status`.
    pub fn into_result(self) -> AppResult<Value> {
        if self.is_success() {
            return Ok(self.body);
        }
        let message = self.error_message().unwrap_or_else(|| {
            if self.status_text.is_empty() {
                format!("status {}", self.status)
            } else {
                self.status_text.clone()
            }
        });
        Err(AppError::Status {
            status: self.status,
            message,
        })
    }

    pub fn decode<T: DeserializeOwned>(self) -> AppResult<T> {
        Ok(serde_json::from_value(self.into_result()?)?)
    }
}

/// Sends `ApiRequest`s. The browser implementation is `GlooHttpClient`.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse>;
}

/// `fetch`-backed transport.
#[derive(Debug, Clone)]
pub struct GlooHttpClient {
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl GlooHttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: base_url.into(),
            default_headers,
        }
    }

    pub fn add_header(mut self, key: String, value: String) -> Self {
        self.default_headers.insert(key, value);
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http") || self.base_url.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
        }
    }

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        let mut builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        };
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for GlooHttpClient {
    fn default() -> Self {
        Self::new(crate::config::client_config().api_base.clone())
    }
}

/// Aborts the underlying `fetch` when the request future is dropped early.
struct AbortOnDrop {
    controller: web_sys::AbortController,
    armed: bool,
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abort();
        }
    }
}

impl HttpTransport for GlooHttpClient {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.url(&request.path);
        crate::log_debug!(LogComponent::Infrastructure("HTTP"), "🌐 {} {}", request.method, url);

        let controller = web_sys::AbortController::new()?;
        let mut guard = AbortOnDrop {
            controller,
            armed: true,
        };
        let signal = guard.controller.signal();
        let builder = self.builder(request.method, &url).abort_signal(Some(&signal));

        let prepared = match request.body {
            RequestBody::Empty => builder.build()?,
            RequestBody::Json(body) => builder.json(&body)?,
            RequestBody::Multipart(fields) => {
                let form = web_sys::FormData::new()?;
                for (name, value) in &fields {
                    let appended = match value {
                        FormValue::Text(text) => form.append_with_str(name, text),
                        FormValue::File(file) => form.append_with_blob_and_filename(name, file, &file.name()),
                    };
                    appended?;
                }
                builder.body(form)?
            }
        };

        let response = prepared.send().await?;
        let status = response.status();
        let status_text = response.status_text();
        let text = response.text().await?;
        guard.armed = false;

        if !HttpUtils::is_success_status(status) {
            emit(
                LogRecord::new(
                    LogLevel::Warn,
                    LogComponent::Infrastructure("HTTP"),
                    format!("❌ {} {} -> {}", request.method, url, status),
                )
                .with_context(status_text.as_str()),
            );
        }

        Ok(ApiResponse {
            status,
            status_text,
            body: HttpUtils::parse_body(&text),
        })
    }
}

pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Empty bodies become `null`; non-JSON text is kept as a string.
    pub fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        }
    }

    /// Percent-encodes a path segment or query value.
    pub fn url_encode(input: &str) -> String {
        let mut encoded = String::with_capacity(input.len());
        for byte in input.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    encoded.push(byte as char)
                }
                other => encoded.push_str(&format!("%{:02X}", other)),
            }
        }
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_list_is_joined() {
        let response = ApiResponse::with_status(
            400,
            "BAD REQUEST",
            json!({"error": ["Nama bot wajib diisi", "Lot size harus positif"]}),
        );
        assert_eq!(
            response.into_result().unwrap_err(),
            AppError::Status {
                status: 400,
                message: "Nama bot wajib diisi; Lot size harus positif".into()
            }
        );
    }

    #[test]
    fn status_text_when_body_has_no_error() {
        let response = ApiResponse::with_status(502, "Bad Gateway", Value::Null);
        assert_eq!(response.into_result().unwrap_err().user_message(), "Bad Gateway");
    }

    #[test]
    fn url_encoding() {
        assert_eq!(HttpUtils::url_encode("BTC/USD"), "BTC%2FUSD");
        assert_eq!(HttpUtils::url_encode("a b&c"), "a%20b%26c");
        assert_eq!(HttpUtils::url_encode("XAUUSD"), "XAUUSD");
    }

    #[test]
    fn body_parsing() {
        assert_eq!(HttpUtils::parse_body(""), Value::Null);
        assert_eq!(HttpUtils::parse_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(HttpUtils::parse_body("oops"), json!("oops"));
    }
}
