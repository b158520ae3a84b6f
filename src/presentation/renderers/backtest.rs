//! Backtest run results and the saved-run history.

use crate::application::Presenter;
use crate::domain::{
    backtest::{BacktestResult, BacktestRun, Trade},
    bots::{format_plain, value_text},
    errors::AppError,
};
use crate::presentation::markup::{escape, failure_text, profit_class};
use crate::time_utils::format_timestamp_text;

pub const NO_RUNS: &str = "Tidak ada riwayat backtest.";
pub const RUN_FAILED: &str = "Gagal terhubung ke server.";

fn stat(label: &str, value: &str, value_class: &str, note: Option<&str>) -> String {
    let note = note
        .map(|note| format!(r#"<p class="text-xs text-gray-400">{}</p>"#, escape(note)))
        .unwrap_or_default();
    format!(
        r#"<div class="p-4 bg-gray-50 rounded-lg"><p class="text-sm text-gray-500">{}</p><p class="text-2xl font-bold {}">{}</p>{}</div>"#,
        label,
        value_class,
        escape(value),
        note
    )
}

/// `#results-summary`
pub fn result_summary(result: &BacktestResult) -> String {
    let net = result.net_profit();
    [
        stat(
            "Instrument",
            result.instrument.as_deref().unwrap_or("UNKNOWN"),
            "text-blue-600",
            Some(&format!("Max Risk: {}%", format_plain(result.max_risk_percent()))),
        ),
        stat(
            "Gross Profit",
            &format!("{:.2} $", result.total_profit_usd),
            "text-green-600",
            Some("Before costs"),
        ),
        stat(
            "Spread Costs",
            &format!("-{:.2} $", result.spread_costs()),
            "text-red-600",
            Some(&format!("{} pips spread", format_plain(result.spread_pips()))),
        ),
        stat("Net Profit", &format!("{:.2} $", net), profit_class(net), Some("After all costs")),
        stat("Max Drawdown", &format!("{:.2}%", result.max_drawdown_percent), "text-red-600", None),
        stat("Win Rate", &format!("{:.2}%", result.win_rate_percent), "text-blue-600", None),
        stat(
            "Total Trades",
            &result.total_trades.to_string(),
            "",
            Some(&format!("Max Lot: {}", format_plain(result.max_lot_size()))),
        ),
        stat("Wins", &result.wins.to_string(), "", None),
        stat("Losses", &result.losses.to_string(), "", None),
    ]
    .concat()
}

fn trade_line(trade: &Trade) -> String {
    let class = if trade.profit > 0.0 { "text-green-600" } else { "text-red-600" };
    format!(
        r#"<p class="mb-1"><span class="font-bold">{}</span> | Entry: {:.4} | Exit: {:.4} | Lot: {:.2} | Profit: <span class="{}">{:.2}</span> | Spread: ${:.2} | Reason: {}</p>"#,
        escape(&trade.position_type),
        trade.entry,
        trade.exit,
        trade.lot_size.unwrap_or(0.0),
        class,
        trade.profit,
        trade.spread_cost.unwrap_or(0.0),
        escape(trade.reason.as_deref().unwrap_or("N/A")),
    )
}

/// `#results-log`; empty when the run produced no trades.
pub fn trade_log(result: &BacktestResult) -> String {
    if result.trades.is_empty() {
        return String::new();
    }
    let lines: String = result.trades.iter().map(trade_line).collect();
    format!(
        r#"<h4 class="text-lg font-semibold mt-6 mb-2">20 Trade Terakhir</h4><div class="text-xs font-mono border rounded p-2 bg-gray-50 max-h-64 overflow-y-auto">{lines}</div><div class="mt-4 p-3 bg-blue-50 rounded border border-blue-200"><h5 class="text-sm font-semibold text-blue-800 mb-2">🚀 Fitur Engine:</h5><div class="text-xs text-blue-700 space-y-1"><p>✅ Biaya spread realistis: {spread} pips per trade</p><p>✅ Ukuran posisi berbasis ATR dengan risiko maks {risk}%</p><p>✅ Proteksi instrumen: lot maks {lot}</p><p>💰 Total biaya spread: ${costs:.2}</p></div></div>"#,
        lines = lines,
        spread = format_plain(result.spread_pips()),
        risk = format_plain(result.max_risk_percent()),
        lot = format_plain(result.max_lot_size()),
        costs = result.spread_costs(),
    )
}

/// `#history-list-container`. Runs arrive sorted newest first; `data-index`
/// points back into that order.
pub struct RunListPresenter;

impl Presenter<Vec<BacktestRun>> for RunListPresenter {
    fn present(&self, runs: &Vec<BacktestRun>) -> String {
        runs.iter()
            .enumerate()
            .map(|(index, run)| {
                format!(
                    r#"<div class="p-3 mb-2 bg-gray-50 rounded cursor-pointer hover:bg-gray-100 border border-gray-200" data-index="{}"><p class="font-medium text-gray-800">{} ({})</p><p class="text-xs text-gray-500">{}</p><p class="text-sm mt-1"><span class="font-semibold">Profit:</span> {:.2}</p></div>"#,
                    index,
                    escape(run.strategy_label()),
                    escape(&run.market_name()),
                    escape(&format_timestamp_text(&run.timestamp)),
                    run.profit(),
                )
            })
            .collect()
    }

    fn is_empty(&self, runs: &Vec<BacktestRun>) -> bool {
        runs.is_empty()
    }

    fn empty(&self) -> String {
        format!(r#"<p class="text-gray-500 text-center py-4">{}</p>"#, NO_RUNS)
    }

    fn error(&self, err: &AppError) -> String {
        format!(
            r#"<p class="text-red-500 text-center py-4">{}</p>"#,
            escape(&failure_text("Gagal memuat riwayat", err))
        )
    }
}

fn detail_cell(label: &str, value: &str) -> String {
    format!(
        r#"<div class="p-3 bg-gray-50 rounded"><p class="text-xs text-gray-500">{}</p><p class="font-bold">{}</p></div>"#,
        label,
        escape(value)
    )
}

/// `#detail-summary` for one saved run.
pub fn run_detail(run: &BacktestRun) -> String {
    let percent = |value: Option<f64>| format!("{}%", format_plain(value.unwrap_or(0.0)));
    let count = |value: Option<u32>| value.unwrap_or(0).to_string();
    let mut cells = vec![
        detail_cell("Strategi", run.strategy_name.as_deref().unwrap_or("N/A")),
        detail_cell("Pasar", &run.market_name()),
        detail_cell("Total Profit", &format!("{:.2}", run.profit())),
        detail_cell("Max Drawdown", &percent(run.max_drawdown_percent)),
        detail_cell("Win Rate", &percent(run.win_rate_percent)),
        detail_cell("Total Trades", &count(run.total_trades)),
        detail_cell("Wins", &count(run.wins)),
        detail_cell("Losses", &count(run.losses)),
    ];
    cells.extend(
        run.parameters
            .iter()
            .map(|(name, value)| detail_cell(name, &value_text(value))),
    );
    cells.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_uses_engine_defaults() {
        let result: BacktestResult = serde_json::from_value(json!({
            "total_profit_usd": 120.0, "max_drawdown_percent": 4.5, "win_rate_percent": 55.0,
            "total_trades": 20, "wins": 11, "losses": 9, "equity_curve": [], "trades": []
        }))
        .unwrap();
        let html = result_summary(&result);
        assert!(html.contains("UNKNOWN"));
        assert!(html.contains("Max Risk: 2%"));
        assert!(html.contains("120.00 $"));
        assert!(trade_log(&result).is_empty());
    }

    #[test]
    fn run_list_item_names_strategy_and_market() {
        let run: BacktestRun = serde_json::from_value(json!({
            "id": 1, "timestamp": "2024-08-17 09:05:00", "strategy_name": "MA Crossover",
            "data_filename": "xauusd_h1.csv", "total_profit_usd": 42.5
        }))
        .unwrap();
        let html = RunListPresenter.present(&vec![run]);
        assert!(html.contains("MA Crossover (XAUUSD)"));
        assert!(html.contains("42.50"));
    }
}
