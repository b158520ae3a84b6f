use serde::{Deserialize, Serialize};
use repr::DealTypeRepr;

/// MT5 deal/position direction. `0` is buy, `1` is sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DealTypeRepr", into = "DealTypeRepr")]
pub enum DealType {
    #[default]
    Buy,
    Sell,
}

impl DealType {
    pub fn label(self) -> &'static str {
        match self {
            DealType::Buy => "BUY",
            DealType::Sell => "SELL",
        }
    }
}

mod repr {
    use super::DealType;
    use serde::{Deserialize, Serialize};

    /// The backend sends the MT5 integer code, some older endpoints the label.
    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum DealTypeRepr {
        Code(i64),
        Label(String),
    }

    impl From<DealTypeRepr> for DealType {
        fn from(repr: DealTypeRepr) -> Self {
            match repr {
                DealTypeRepr::Code(0) => DealType::Buy,
                DealTypeRepr::Code(_) => DealType::Sell,
                DealTypeRepr::Label(label) if label.eq_ignore_ascii_case("buy") => DealType::Buy,
                DealTypeRepr::Label(_) => DealType::Sell,
            }
        }
    }

    impl From<DealType> for DealTypeRepr {
        fn from(kind: DealType) -> Self {
            DealTypeRepr::Code(match kind {
                DealType::Buy => 0,
                DealType::Sell => 1,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub kind: DealType,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub price_open: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub magic: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deal {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub kind: DealType,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub profit: f64,
    /// Epoch seconds.
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub magic: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

pub fn total_profit(positions: &[Position]) -> f64 {
    positions.iter().map(|position| position.profit).sum()
}

/// Direction of the open P/L relative to the previous refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnlTrend {
    Up,
    Down,
    Flat,
}

impl PnlTrend {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            PnlTrend::Up
        } else if current < previous {
            PnlTrend::Down
        } else {
            PnlTrend::Flat
        }
    }
}

/// Signed two-decimal amount: `+12.50`, `-3.00`.
pub fn format_signed(value: f64) -> String {
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{}{:.2}", sign, value.abs())
}
