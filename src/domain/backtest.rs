use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::bots::{ParamMap, lenient_params};
use super::null_as_default;
use crate::time_utils::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default)]
    pub entry: f64,
    #[serde(default)]
    pub exit: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub position_type: String,
    #[serde(default)]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub spread_cost: Option<f64>,
}

/// A stored run from `/api/backtest/history`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestRun {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub strategy_name: Option<String>,
    #[serde(default)]
    pub data_filename: Option<String>,
    #[serde(default)]
    pub total_profit: Option<f64>,
    #[serde(default)]
    pub total_profit_usd: Option<f64>,
    #[serde(default)]
    pub total_profit_pips: Option<f64>,
    #[serde(default)]
    pub max_drawdown_percent: Option<f64>,
    #[serde(default)]
    pub win_rate_percent: Option<f64>,
    #[serde(default)]
    pub total_trades: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equity_curve: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_params")]
    pub parameters: ParamMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_log: Vec<Trade>,
}

impl BacktestRun {
    /// Profit in USD when present, then the legacy `total_profit`, then pips.
    /// Zero values fall through to the next candidate.
    pub fn profit(&self) -> f64 {
        [self.total_profit_usd, self.total_profit, self.total_profit_pips]
            .into_iter()
            .flatten()
            .find(|value| *value != 0.0)
            .unwrap_or(0.0)
    }

    /// Market derived from the uploaded file name, e.g. `xauusd_h1.csv` -> `XAUUSD`.
    pub fn market_name(&self) -> String {
        self.data_filename
            .as_deref()
            .and_then(|name| name.split('_').next())
            .filter(|part| !part.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn strategy_label(&self) -> &str {
        self.strategy_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Tidak Diketahui")
    }

    fn sort_key(&self) -> i64 {
        parse_timestamp(&self.timestamp)
            .map(|at| at.timestamp_millis())
            .unwrap_or(i64::MIN)
    }
}

/// Newest first. Runs with unreadable timestamps sink to the bottom.
pub fn sort_newest_first(runs: &mut [BacktestRun]) {
    runs.sort_by_key(|run| std::cmp::Reverse(run.sort_key()));
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentConfig {
    #[serde(default)]
    pub max_risk_percent: Option<f64>,
    #[serde(default)]
    pub max_lot_size: Option<f64>,
    #[serde(default)]
    pub typical_spread_pips: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub instrument_config: InstrumentConfig,
}

/// Response of `POST /api/backtest/run`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestResult {
    #[serde(default)]
    pub total_profit_usd: f64,
    #[serde(default)]
    pub net_profit_after_costs: Option<f64>,
    #[serde(default)]
    pub total_spread_costs: Option<f64>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub engine_config: EngineConfig,
    #[serde(default)]
    pub max_drawdown_percent: f64,
    #[serde(default)]
    pub win_rate_percent: f64,
    #[serde(default)]
    pub total_trades: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equity_curve: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    pub fn net_profit(&self) -> f64 {
        self.net_profit_after_costs.unwrap_or(self.total_profit_usd)
    }

    pub fn spread_costs(&self) -> f64 {
        self.total_spread_costs.unwrap_or(0.0)
    }

    pub fn max_risk_percent(&self) -> f64 {
        self.engine_config.instrument_config.max_risk_percent.unwrap_or(2.0)
    }

    pub fn max_lot_size(&self) -> f64 {
        self.engine_config.instrument_config.max_lot_size.unwrap_or(10.0)
    }

    pub fn spread_pips(&self) -> f64 {
        self.engine_config.instrument_config.typical_spread_pips.unwrap_or(2.0)
    }
}

/// Parameters sent with a backtest run. Numeric text becomes a number.
pub fn backtest_param(raw: &str) -> Value {
    match raw.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Value::from(number),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ts: &str) -> BacktestRun {
        BacktestRun { timestamp: ts.into(), ..Default::default() }
    }

    #[test]
    fn newest_run_comes_first() {
        let mut runs = vec![
            run("2024-01-02 10:00:00"),
            run("garbage"),
            run("2024-03-01T08:00:00"),
        ];
        sort_newest_first(&mut runs);
        assert_eq!(runs[0].timestamp, "2024-03-01T08:00:00");
        assert_eq!(runs[2].timestamp, "garbage");
    }

    #[test]
    fn profit_prefers_usd_then_legacy_then_pips() {
        let mut item = BacktestRun { total_profit_pips: Some(40.0), ..Default::default() };
        assert_eq!(item.profit(), 40.0);
        item.total_profit = Some(12.5);
        assert_eq!(item.profit(), 12.5);
        item.total_profit_usd = Some(99.0);
        assert_eq!(item.profit(), 99.0);
    }

    #[test]
    fn market_from_filename() {
        let item = BacktestRun { data_filename: Some("eurusd_H1_2023.csv".into()), ..Default::default() };
        assert_eq!(item.market_name(), "EURUSD");
        assert_eq!(BacktestRun::default().market_name(), "N/A");
    }
}
