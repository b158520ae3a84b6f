use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActiveBot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub equity: f64,
    #[serde(default)]
    pub todays_profit: f64,
    #[serde(default)]
    pub active_bots_count: u32,
    #[serde(default)]
    pub total_bots: u32,
    #[serde(default)]
    pub active_bots: Vec<ActiveBot>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub equity: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub login: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RsiData {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub rsi_values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Emotion {
    Tenang,
    Serakah,
    Takut,
    Frustasi,
    #[default]
    Netral,
}

impl Emotion {
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Tenang => "😌 Tenang",
            Emotion::Serakah => "🤑 Serakah",
            Emotion::Takut => "😰 Takut",
            Emotion::Frustasi => "😤 Frustasi",
            Emotion::Netral => "😐 Netral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MentorSummary {
    #[serde(default)]
    pub today_emotions: Option<String>,
    #[serde(default)]
    pub trading_analysis: Option<String>,
    #[serde(default)]
    pub daily_tip: Option<String>,
    #[serde(default)]
    pub today_has_data: bool,
}

impl MentorSummary {
    /// Unknown or missing emotions read as neutral.
    pub fn emotion(&self) -> Emotion {
        self.today_emotions
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn analysis_text(&self) -> &str {
        self.trading_analysis
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or("Belum ada data hari ini")
    }

    pub fn tip_text(&self) -> &str {
        self.daily_tip
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or("Mulai trading untuk mendapat tips personal!")
    }

    pub fn status_text(&self) -> &'static str {
        if self.today_has_data { "Aktif Menganalisis" } else { "Siap Membantu" }
    }
}

/// Body of `POST /ai-mentor/update-emotions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionUpdate {
    pub emotions: Emotion,
}

/// `$1,234.50` / `-$3.00`
pub fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_grouping() {
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(-3.0), "-$3.00");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn unknown_emotion_is_neutral() {
        let summary = MentorSummary { today_emotions: Some("bingung".into()), ..Default::default() };
        assert_eq!(summary.emotion(), Emotion::Netral);
        let summary = MentorSummary { today_emotions: Some("takut".into()), ..Default::default() };
        assert_eq!(summary.emotion().label(), "😰 Takut");
    }
}
