//! Bot detail page fragments: header, parameters, activity log, analysis and
//! analyst consensus.

use crate::application::Presenter;
use crate::domain::{
    bots::{AnalysisLayout, Bot, BotActivity, BotAnalysis, Fundamentals, SignalTone, format_plain, value_text},
    errors::AppError,
};
use crate::presentation::markup::{Tone, block_message, escape, failure_text};
use crate::time_utils::format_timestamp_text;

pub const NO_ACTIVITY: &str = "Belum ada aktivitas.";
pub const DETAILS_FAILED: &str = "Gagal Memuat";

/// Title line, market line and status badge.
pub struct BotHeaderPresenter;

impl Presenter<Bot> for BotHeaderPresenter {
    fn present(&self, bot: &Bot) -> String {
        let badge_class = if bot.status.is_active() {
            "bg-green-100 text-green-800"
        } else {
            "bg-yellow-100 text-yellow-800"
        };
        let ai_badge = if AnalysisLayout::for_strategy(&bot.strategy).shows_ai_badge() {
            r#"<span class="ml-2 px-2 py-1 text-xs bg-purple-100 text-purple-800 rounded-full">AI</span>"#
        } else {
            ""
        };
        format!(
            r#"<h1 class="text-2xl font-bold text-gray-800">{name}</h1><p class="text-gray-500">Pasar: {market} | Timeframe: {tf}</p><span class="px-3 py-1 text-xs font-medium rounded-full {badge_class}">{status}</span>{ai_badge}"#,
            name = escape(&bot.name),
            market = escape(&bot.market),
            tf = escape(&bot.timeframe),
            badge_class = badge_class,
            status = escape(bot.status.label()),
            ai_badge = ai_badge,
        )
    }

    fn error(&self, err: &AppError) -> String {
        format!(
            r#"<h1 class="text-2xl font-bold text-red-600">{}</h1><p class="text-sm text-red-500">{}</p>"#,
            DETAILS_FAILED,
            escape(&err.to_string())
        )
    }
}

/// Configured lot, stops, interval, strategy and any strategy parameters.
pub struct BotParametersPresenter;

impl BotParametersPresenter {
    fn cell(label: &str, value: &str) -> String {
        format!(
            r#"<div><p class="text-gray-500">{}</p><p class="font-semibold text-gray-800">{}</p></div>"#,
            escape(label),
            escape(value)
        )
    }
}

impl Presenter<Bot> for BotParametersPresenter {
    fn present(&self, bot: &Bot) -> String {
        let mut cells = vec![
            Self::cell("Lot Size", &format_plain(bot.lot_size)),
            Self::cell("Stop Loss", &format!("{} pips", format_plain(bot.sl_pips))),
            Self::cell("Take Profit", &format!("{} pips", format_plain(bot.tp_pips))),
            Self::cell("Interval", &format!("{}s", format_plain(bot.check_interval_seconds))),
            Self::cell("Strategi", bot.strategy_label()),
        ];
        cells.extend(
            bot.strategy_params
                .iter()
                .map(|(name, value)| Self::cell(name, &value_text(value))),
        );
        format!(r#"<div class="grid grid-cols-2 gap-4">{}</div>"#, cells.join(""))
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat parameter bot", err), Tone::Danger)
    }
}

/// `#history-log-container`
pub struct ActivityLogPresenter;

impl ActivityLogPresenter {
    fn icon(action: &str) -> &'static str {
        let action = action.to_uppercase();
        if action.contains("BELI") || action.contains("BUY") {
            "fa-arrow-up text-green-500"
        } else if action.contains("JUAL") || action.contains("SELL") {
            "fa-arrow-down text-red-500"
        } else {
            "fa-info-circle text-blue-500"
        }
    }
}

impl Presenter<Vec<BotActivity>> for ActivityLogPresenter {
    fn present(&self, log: &Vec<BotActivity>) -> String {
        log.iter()
            .map(|entry| {
                format!(
                    r#"<div class="flex items-start p-3 border-b border-gray-100"><i class="fas {} mt-1 mr-3"></i><div class="flex-1"><p class="text-sm text-gray-800">{}</p><p class="text-xs text-gray-400 mt-1">{}</p></div></div>"#,
                    Self::icon(&entry.action),
                    escape(&entry.details),
                    escape(&format_timestamp_text(&entry.timestamp)),
                )
            })
            .collect()
    }

    fn is_empty(&self, log: &Vec<BotActivity>) -> bool {
        log.is_empty()
    }

    fn empty(&self) -> String {
        block_message(NO_ACTIVITY, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat riwayat aktivitas", err), Tone::Danger)
    }
}

/// Analysis snapshot paired with the strategy that decides its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyAnalysis {
    pub strategy: String,
    pub analysis: BotAnalysis,
}

/// Indicator rows plus the signal banner, written together.
pub struct AnalysisPresenter;

impl AnalysisPresenter {
    fn row(label: &str, value: &str) -> String {
        format!(r#"<p><strong>{}:</strong> {}</p>"#, escape(label), escape(value))
    }

    fn banner(text: &str, class: &str) -> String {
        format!(
            r#"<div class="mt-4 text-center font-bold text-lg p-2 rounded-md {}">{}</div>"#,
            class,
            escape(text)
        )
    }

    fn indicator_rows(strategy: &str, analysis: &BotAnalysis) -> String {
        let layout = AnalysisLayout::for_strategy(strategy);
        match layout {
            AnalysisLayout::Generic => analysis
                .values
                .iter()
                .map(|(key, value)| Self::row(key, &value_text(value)))
                .collect(),
            _ => layout
                .rows()
                .iter()
                .map(|(key, label)| Self::row(label, &analysis.value(key)))
                .collect(),
        }
    }
}

impl Presenter<StrategyAnalysis> for AnalysisPresenter {
    fn present(&self, data: &StrategyAnalysis) -> String {
        let analysis = &data.analysis;
        if let Some(message) = &analysis.error {
            return Self::banner(message, "bg-yellow-100 text-yellow-800");
        }
        let class = match analysis.signal_tone() {
            SignalTone::Buy => "bg-green-100 text-green-800",
            SignalTone::Sell => "bg-red-100 text-red-800",
            SignalTone::Neutral => "bg-gray-200 text-gray-800",
        };
        format!(
            r#"<div class="space-y-1">{}</div>{}"#,
            Self::indicator_rows(&data.strategy, analysis),
            Self::banner(analysis.signal_text(), class)
        )
    }

    fn error(&self, err: &AppError) -> String {
        Self::banner(&err.user_message(), "bg-yellow-100 text-yellow-800")
    }
}

/// Analyst consensus card; nothing when the backend has no recommendations.
pub struct FundamentalsPresenter;

impl Presenter<Fundamentals> for FundamentalsPresenter {
    fn present(&self, data: &Fundamentals) -> String {
        let Some(r) = &data.recommendations else {
            return String::new();
        };
        let column = |value: u32, class: &str, label: &str| {
            format!(
                r#"<div><p class="text-xl font-bold {}">{}</p><p>{}</p></div>"#,
                class, value, label
            )
        };
        format!(
            r#"<div class="bg-white rounded-lg shadow p-4 mt-6"><h3 class="text-lg font-semibold text-gray-800 border-b pb-2 mb-3">Konsensus Analis</h3><div class="flex justify-around text-center text-xs">{}{}{}{}{}</div></div>"#,
            column(r.strong_buy, "text-green-600", "Strong Buy"),
            column(r.buy, "text-green-500", "Buy"),
            column(r.hold, "text-gray-500", "Hold"),
            column(r.sell, "text-red-500", "Sell"),
            column(r.strong_sell, "text-red-700", "Strong Sell"),
        )
    }

    fn error(&self, _err: &AppError) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis(value: serde_json::Value) -> BotAnalysis {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn ma_crossover_layout_lists_price_and_averages() {
        let data = StrategyAnalysis {
            strategy: "MA_CROSSOVER".into(),
            analysis: analysis(json!({"signal": "BELI", "price": 1.2345, "ma7": 1.2, "ma25": 1.1})),
        };
        let html = AnalysisPresenter.present(&data);
        assert!(html.contains("<strong>Harga:</strong> 1.2345"));
        assert!(html.contains("<strong>MA 25:</strong> 1.1"));
        assert!(html.contains("bg-green-100"));
    }

    #[test]
    fn missing_indicator_reads_na() {
        let data = StrategyAnalysis {
            strategy: "RSI_BREAKOUT".into(),
            analysis: analysis(json!({"signal": "TAHAN", "price": 2.0})),
        };
        assert!(AnalysisPresenter.present(&data).contains("<strong>RSI:</strong> N/A"));
    }

    #[test]
    fn backend_error_replaces_rows() {
        let data = StrategyAnalysis {
            strategy: "MA_CROSSOVER".into(),
            analysis: analysis(json!({"error": "Data pasar tidak tersedia"})),
        };
        let html = AnalysisPresenter.present(&data);
        assert!(html.contains("Data pasar tidak tersedia"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn fundamentals_without_recommendations_render_nothing() {
        assert_eq!(FundamentalsPresenter.present(&Fundamentals::default()), "");
    }
}
