use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForexQuote {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bid: f64,
    #[serde(default)]
    pub ask: f64,
    /// Spread in points.
    #[serde(default)]
    pub spread: f64,
    #[serde(default)]
    pub digits: u32,
}

impl ForexQuote {
    /// Five/three-digit brokers quote fractional pips, so points are divided by ten.
    pub fn spread_pips(&self) -> f64 {
        let divisor = if self.digits > 3 { 10.0 } else { 1.0 };
        self.spread / divisor
    }

    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.digits as usize, price)
    }
}

/// `/api/forex-data` is an object keyed by symbol.
pub type ForexBoard = BTreeMap<String, ForexQuote>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockQuote {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub last_price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub time: String,
}

impl StockQuote {
    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }

    pub fn change_glyph(&self) -> char {
        if self.is_gain() { '▲' } else { '▼' }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CryptoQuote {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub change: String,
    #[serde(default)]
    pub market_cap: String,
}

impl CryptoQuote {
    pub fn is_gain(&self) -> bool {
        self.change.trim_start().starts_with('+')
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SymbolProfile {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency_base: String,
    #[serde(default)]
    pub currency_profit: String,
    #[serde(default)]
    pub digits: u32,
    #[serde(default)]
    pub spread: f64,
    #[serde(default)]
    pub trade_contract_size: f64,
    #[serde(default)]
    pub volume_min: f64,
    #[serde(default)]
    pub volume_max: f64,
    #[serde(default)]
    pub volume_step: f64,
    #[serde(default)]
    pub margin_initial: f64,
    #[serde(default)]
    pub margin_maintenance: f64,
}

/// Which quote board a symbol profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteBoard {
    Forex,
    Stocks,
}
