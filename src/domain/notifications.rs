use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub bot_name: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_read: bool,
}

/// SQLite hands booleans back as `0`/`1`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_i64().unwrap_or(0) != 0,
        _ => false,
    })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnreadNotification {
    pub id: u64,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub unread_count: u32,
}

/// Icon and colour family for a notification, chosen from its action text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub icon: &'static str,
    pub color: &'static str,
}

impl Appearance {
    pub fn for_action(action: &str) -> Self {
        let action = action.to_lowercase();
        let (icon, color) = if action.contains("buy") || action.contains("beli") {
            ("fa-arrow-up", "green")
        } else if action.contains("sell") || action.contains("jual") {
            ("fa-arrow-down", "red")
        } else if action.contains("start") {
            ("fa-play-circle", "blue")
        } else if action.contains("stop") {
            ("fa-pause-circle", "yellow")
        } else if action.contains("error") {
            ("fa-exclamation-triangle", "red")
        } else {
            ("fa-info-circle", "gray")
        };
        Self { icon, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_keyword_wins() {
        assert_eq!(Appearance::for_action("POSISI BUY DIBUKA").icon, "fa-arrow-up");
        assert_eq!(Appearance::for_action("Bot Stopped with error").color, "yellow");
        assert_eq!(Appearance::for_action("Info").icon, "fa-info-circle");
    }

    #[test]
    fn read_flag_accepts_integers() {
        let n: Notification = serde_json::from_str(r#"{"id":1,"action":"x","is_read":1}"#).unwrap();
        assert!(n.is_read);
    }
}
