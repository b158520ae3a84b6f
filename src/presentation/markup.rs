//! Small helpers shared by the row templates.

use crate::domain::errors::AppError;

/// Escapes text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Danger,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Muted => "text-gray-500",
            Tone::Danger => "text-red-500",
        }
    }
}

/// A full-width table row carrying a single message.
pub fn table_message(colspan: u8, text: &str, tone: Tone) -> String {
    format!(
        r#"<tr><td colspan="{}" class="p-4 text-center {}">{}</td></tr>"#,
        colspan,
        tone.class(),
        escape(text)
    )
}

/// A centered paragraph for list containers.
pub fn block_message(text: &str, tone: Tone) -> String {
    format!(r#"<p class="p-6 text-center {}">{}</p>"#, tone.class(), escape(text))
}

/// `"<context>: <cause>"`, where the cause carries the HTTP status when there is one.
pub fn failure_text(context: &str, err: &AppError) -> String {
    format!("{}: {}", context, err)
}

pub fn profit_class(value: f64) -> &'static str {
    if value >= 0.0 { "text-green-600" } else { "text-red-600" }
}

/// Fixed decimals, or `N/A` when absent.
pub fn fixed_or_na(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{:.*}", decimals, value),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape(r#"<b onclick="x">&'"#), "&lt;b onclick=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn failure_text_includes_status() {
        let err = AppError::Status { status: 503, message: "Service Unavailable".into() };
        assert_eq!(failure_text("Gagal memuat data", &err), "Gagal memuat data: HTTP 503: Service Unavailable");
    }
}
