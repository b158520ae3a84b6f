//! Trading bots as the backend describes them, and the draft the bot form submits.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use super::errors::{AppError, AppResult};

pub type BotId = u64;

/// Strategy parameter values keyed by parameter name.
pub type ParamMap = BTreeMap<String, Value>;

/// Raw form field values keyed by input name.
pub type FormFields = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BotStatus {
    Active,
    Paused,
    Error,
    Other(String),
}

impl From<String> for BotStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Aktif" => BotStatus::Active,
            "Dijeda" => BotStatus::Paused,
            "Error" => BotStatus::Error,
            _ => BotStatus::Other(raw),
        }
    }
}

impl From<BotStatus> for String {
    fn from(status: BotStatus) -> Self {
        status.label().to_string()
    }
}

impl Default for BotStatus {
    fn default() -> Self {
        BotStatus::Paused
    }
}

impl BotStatus {
    pub fn label(&self) -> &str {
        match self {
            BotStatus::Active => "Aktif",
            BotStatus::Paused => "Dijeda",
            BotStatus::Error => "Error",
            BotStatus::Other(raw) => raw,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BotStatus::Active)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, EnumIter, StrumDisplay,
)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    #[default]
    H1,
    H4,
    D1,
    W1,
    MN1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub strategy_name: Option<String>,
    #[serde(default)]
    pub status: BotStatus,
    #[serde(default)]
    pub lot_size: f64,
    #[serde(default)]
    pub sl_pips: f64,
    #[serde(default)]
    pub tp_pips: f64,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub check_interval_seconds: f64,
    #[serde(default, deserialize_with = "lenient_params")]
    pub strategy_params: ParamMap,
}

impl Bot {
    /// Human strategy name, falling back to the strategy id.
    pub fn strategy_label(&self) -> &str {
        self.strategy_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.strategy)
    }
}

/// Accepts a JSON object, a string holding a JSON object, or null.
pub(crate) fn lenient_params<'de, D>(deserializer: D) -> Result<ParamMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Object(map) => map.into_iter().collect(),
        Value::String(text) => serde_json::from_str(&text).unwrap_or_default(),
        _ => ParamMap::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[default]
    #[serde(alias = "float", alias = "int", alias = "integer")]
    Number,
    #[serde(alias = "string")]
    Text,
    #[serde(alias = "bool", alias = "checkbox")]
    Boolean,
    Select,
    #[serde(other)]
    Unknown,
}

/// One entry of the schema returned by `/api/strategies/{id}/params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParam {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ParamKind,
    #[serde(default)]
    pub default: Value,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub options: Vec<String>,
}

impl StrategyParam {
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() { &self.name } else { &self.label }
    }
}

/// Input control generated for a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamInput {
    Number { name: String, label: String, value: String, step: String },
    Checkbox { name: String, label: String, checked: bool },
    Select { name: String, label: String, options: Vec<String>, selected: String },
    Text { name: String, label: String, value: String },
}

impl From<&StrategyParam> for ParamInput {
    fn from(param: &StrategyParam) -> Self {
        let name = param.name.clone();
        let label = param.display_label().to_string();
        match param.kind {
            ParamKind::Number => ParamInput::Number {
                name,
                label,
                value: value_text(&param.default),
                step: param.step.map(format_plain).unwrap_or_else(|| "any".to_string()),
            },
            ParamKind::Boolean => ParamInput::Checkbox {
                name,
                label,
                checked: param.default.as_bool().unwrap_or(false),
            },
            ParamKind::Select => ParamInput::Select {
                name,
                label,
                options: param.options.clone(),
                selected: value_text(&param.default),
            },
            ParamKind::Text | ParamKind::Unknown => ParamInput::Text {
                name,
                label,
                value: value_text(&param.default),
            },
        }
    }
}

impl ParamInput {
    pub fn name(&self) -> &str {
        match self {
            ParamInput::Number { name, .. }
            | ParamInput::Checkbox { name, .. }
            | ParamInput::Select { name, .. }
            | ParamInput::Text { name, .. } => name,
        }
    }
}

/// Converts a raw input value back to JSON according to the schema type.
pub fn parse_param_value(kind: ParamKind, raw: &str) -> Value {
    match kind {
        ParamKind::Number => {
            let trimmed = raw.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                Value::from(int)
            } else if let Ok(float) = trimmed.parse::<f64>() {
                Value::from(float)
            } else {
                Value::String(raw.to_string())
            }
        }
        ParamKind::Boolean => Value::Bool(matches!(raw, "true" | "on" | "1")),
        ParamKind::Text | ParamKind::Select | ParamKind::Unknown => Value::String(raw.to_string()),
    }
}

/// Text suitable for an input's `value` attribute.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => format_plain(float),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// `100.0` -> `"100"`, `0.01` -> `"0.01"`.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Request body for `POST /api/bots` and `PUT /api/bots/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotDraft {
    pub name: String,
    pub market: String,
    pub lot_size: f64,
    pub sl_pips: u32,
    pub tp_pips: u32,
    pub timeframe: Timeframe,
    pub check_interval_seconds: u32,
    pub strategy: String,
    #[serde(skip_serializing_if = "ParamMap::is_empty")]
    pub strategy_params: ParamMap,
}

impl Default for BotDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            market: String::new(),
            lot_size: 0.01,
            sl_pips: 100,
            tp_pips: 200,
            timeframe: Timeframe::H1,
            check_interval_seconds: 60,
            strategy: String::new(),
            strategy_params: ParamMap::new(),
        }
    }
}

impl BotDraft {
    /// Base field values as the form shows them.
    pub fn to_fields(&self) -> FormFields {
        let mut fields = FormFields::new();
        fields.insert("name".into(), self.name.clone());
        fields.insert("market".into(), self.market.clone());
        fields.insert("lot_size".into(), format_plain(self.lot_size));
        fields.insert("sl_pips".into(), self.sl_pips.to_string());
        fields.insert("tp_pips".into(), self.tp_pips.to_string());
        fields.insert("timeframe".into(), self.timeframe.to_string());
        fields.insert(
            "check_interval_seconds".into(),
            self.check_interval_seconds.to_string(),
        );
        fields.insert("strategy".into(), self.strategy.clone());
        fields
    }

    /// Base fields of an existing bot, used to pre-fill the edit form.
    pub fn fields_from_bot(bot: &Bot) -> FormFields {
        let mut fields = FormFields::new();
        fields.insert("name".into(), bot.name.clone());
        fields.insert("market".into(), bot.market.clone());
        fields.insert("lot_size".into(), format_plain(bot.lot_size));
        fields.insert("sl_pips".into(), format_plain(bot.sl_pips));
        fields.insert("tp_pips".into(), format_plain(bot.tp_pips));
        fields.insert("timeframe".into(), bot.timeframe.clone());
        fields.insert(
            "check_interval_seconds".into(),
            format_plain(bot.check_interval_seconds),
        );
        fields.insert("strategy".into(), bot.strategy.clone());
        fields
    }

    /// Validates raw form input. The first problem found is reported.
    pub fn from_fields(fields: &FormFields, strategy_params: ParamMap) -> AppResult<Self> {
        let text = |key: &str| fields.get(key).map(|v| v.trim()).unwrap_or_default();

        let name = required(text("name"), "Nama bot")?;
        let market = required(text("market"), "Pasar")?;
        let strategy = required(text("strategy"), "Strategi")?;

        let lot_size = text("lot_size")
            .parse::<f64>()
            .ok()
            .filter(|lot| lot.is_finite() && *lot > 0.0)
            .ok_or_else(|| AppError::Validation("Lot size harus angka positif.".into()))?;

        let timeframe = Timeframe::from_str(text("timeframe"))
            .map_err(|_| AppError::Validation("Timeframe tidak dikenal.".into()))?;

        Ok(Self {
            name,
            market,
            lot_size,
            sl_pips: positive_int(text("sl_pips"), "SL (pips)")?,
            tp_pips: positive_int(text("tp_pips"), "TP (pips)")?,
            timeframe,
            check_interval_seconds: positive_int(text("check_interval_seconds"), "Interval cek")?,
            strategy,
            strategy_params,
        })
    }
}

fn required(value: &str, label: &str) -> AppResult<String> {
    if value.is_empty() {
        Err(AppError::Validation(format!("{} wajib diisi.", label)))
    } else {
        Ok(value.to_string())
    }
}

fn positive_int(value: &str, label: &str) -> AppResult<u32> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::Validation(format!("{} harus bilangan bulat positif.", label)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotActivity {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Latest analysis snapshot. Indicator keys depend on the strategy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BotAnalysis {
    #[serde(default)]
    pub signal: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTone {
    Buy,
    Sell,
    Neutral,
}

impl BotAnalysis {
    pub fn signal_text(&self) -> &str {
        self.signal.as_deref().unwrap_or("N/A")
    }

    pub fn signal_tone(&self) -> SignalTone {
        let signal = self.signal_text().to_uppercase();
        if signal.contains("BELI") || signal.contains("BUY") {
            SignalTone::Buy
        } else if signal.contains("JUAL") || signal.contains("SELL") {
            SignalTone::Sell
        } else {
            SignalTone::Neutral
        }
    }

    /// Indicator value as display text, `N/A` when absent.
    pub fn value(&self, key: &str) -> String {
        match self.values.get(key) {
            None | Some(Value::Null) => "N/A".to_string(),
            Some(value) => value_text(value),
        }
    }
}

/// Which indicator rows the analysis panel shows for a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisLayout {
    MaCrossover,
    RsiBreakout,
    MercyEdge,
    PulseSync,
    Generic,
}

impl AnalysisLayout {
    pub fn for_strategy(strategy: &str) -> Self {
        match strategy {
            "MA_CROSSOVER" => AnalysisLayout::MaCrossover,
            "RSI_BREAKOUT" => AnalysisLayout::RsiBreakout,
            "MERCY_EDGE" => AnalysisLayout::MercyEdge,
            "PULSE_SYNC" => AnalysisLayout::PulseSync,
            _ => AnalysisLayout::Generic,
        }
    }

    /// `(key, label)` pairs shown in order; empty for the generic layout.
    pub fn rows(self) -> &'static [(&'static str, &'static str)] {
        match self {
            AnalysisLayout::MaCrossover => &[("price", "Harga"), ("ma7", "MA 7"), ("ma25", "MA 25")],
            AnalysisLayout::RsiBreakout => &[("price", "Harga"), ("rsi", "RSI")],
            AnalysisLayout::MercyEdge => &[("macd", "MACD"), ("stoch_k", "Stoch %K"), ("stoch_d", "Stoch %D")],
            AnalysisLayout::PulseSync => &[("ai_decision", "Keputusan AI"), ("confidence", "Keyakinan")],
            AnalysisLayout::Generic => &[],
        }
    }

    pub fn shows_ai_badge(self) -> bool {
        matches!(self, AnalysisLayout::MercyEdge | AnalysisLayout::PulseSync)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(rename = "strongBuy", default)]
    pub strong_buy: u32,
    #[serde(default)]
    pub buy: u32,
    #[serde(default)]
    pub hold: u32,
    #[serde(default)]
    pub sell: u32,
    #[serde(rename = "strongSell", default)]
    pub strong_sell: u32,
}

impl Recommendations {
    pub fn total(&self) -> u32 {
        self.strong_buy + self.buy + self.hold + self.sell + self.strong_sell
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(default)]
    pub recommendations: Option<Recommendations>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Fundamentals only exist for single-instrument markets (stocks), not pairs like `BTC/USD`.
pub fn has_fundamentals(market: &str) -> bool {
    !market.contains('/')
}
