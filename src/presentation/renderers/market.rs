//! Quote tables for forex, stocks and crypto, plus the symbol profile modal body.

use crate::application::Presenter;
use crate::domain::{
    bots::format_plain,
    errors::AppError,
    market::{CryptoQuote, ForexBoard, StockQuote, SymbolProfile},
};
use crate::presentation::markup::{Tone, escape, failure_text, profit_class, table_message};

pub const NO_FOREX: &str = "Tidak ada data forex dari MT5.";
pub const NO_STOCKS: &str = "Tidak ada data saham yang tersedia atau gagal dimuat dari MT5.";
pub const NO_CRYPTO: &str = "Tidak ada data kripto.";
pub const PROFILE_LOADING: &str = "Loading...";

const TRADE_BUTTON: &str = r#"<button class="bg-blue-600 text-white py-1 px-3 rounded-md text-sm font-medium hover:bg-blue-700">Trade</button>"#;

fn details_button(symbol: &str) -> String {
    format!(
        r#"<button class="bg-gray-600 text-white py-1 px-3 rounded-md text-sm font-medium hover:bg-gray-700 details-btn" data-symbol="{}">Details</button>"#,
        escape(symbol)
    )
}

fn load_failure(colspan: u8, err: &AppError) -> String {
    table_message(colspan, &failure_text("Gagal memuat data", err), Tone::Danger)
}

/// `#forex-table-body`, one row per symbol in key order.
pub struct ForexPresenter;

impl Presenter<ForexBoard> for ForexPresenter {
    fn present(&self, board: &ForexBoard) -> String {
        board
            .iter()
            .map(|(symbol, pair)| {
                format!(
                    r#"<tr><td class="px-6 py-4 whitespace-nowrap"><div class="font-medium text-gray-900">{}</div></td><td class="px-6 py-4 whitespace-nowrap font-medium">{}</td><td class="px-6 py-4 whitespace-nowrap font-medium">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{:.1} pips</td><td class="px-6 py-4 whitespace-nowrap text-right">{}{}</td></tr>"#,
                    escape(if pair.name.is_empty() { symbol } else { &pair.name }),
                    pair.format_price(pair.bid),
                    pair.format_price(pair.ask),
                    pair.spread_pips(),
                    TRADE_BUTTON,
                    details_button(symbol),
                )
            })
            .collect()
    }

    fn is_empty(&self, board: &ForexBoard) -> bool {
        board.is_empty()
    }

    fn empty(&self) -> String {
        table_message(5, NO_FOREX, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        load_failure(5, err)
    }
}

/// `#stocks-table-body`
pub struct StocksPresenter;

impl Presenter<Vec<StockQuote>> for StocksPresenter {
    fn present(&self, stocks: &Vec<StockQuote>) -> String {
        stocks
            .iter()
            .map(|stock| {
                format!(
                    r#"<tr><td class="px-6 py-4 whitespace-nowrap"><div class="flex items-center"><div class="font-medium text-gray-900">{}</div></div></td><td class="px-6 py-4 whitespace-nowrap font-medium">{:.2}</td><td class="px-6 py-4 whitespace-nowrap font-medium {}">{} {}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-right">{}{}</td></tr>"#,
                    escape(&stock.symbol),
                    stock.last_price,
                    profit_class(stock.change),
                    stock.change_glyph(),
                    format_plain(stock.change.abs()),
                    escape(&stock.time),
                    TRADE_BUTTON,
                    details_button(&stock.symbol),
                )
            })
            .collect()
    }

    fn is_empty(&self, stocks: &Vec<StockQuote>) -> bool {
        stocks.is_empty()
    }

    fn empty(&self) -> String {
        table_message(5, NO_STOCKS, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        load_failure(5, err)
    }
}

/// Crypto table; price and change arrive preformatted.
pub struct CryptoPresenter;

impl Presenter<Vec<CryptoQuote>> for CryptoPresenter {
    fn present(&self, coins: &Vec<CryptoQuote>) -> String {
        coins
            .iter()
            .map(|coin| {
                let change_class = if coin.is_gain() { "text-green-600" } else { "text-red-600" };
                format!(
                    r#"<tr><td class="px-6 py-4 whitespace-nowrap"><div class="flex items-center"><div class="font-medium text-gray-900">{}</div><div class="text-sm text-gray-500 ml-2">{}</div></div></td><td class="px-6 py-4 whitespace-nowrap font-medium">{}</td><td class="px-6 py-4 whitespace-nowrap {} font-medium">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-right">{}</td></tr>"#,
                    escape(&coin.name),
                    escape(&coin.symbol),
                    escape(&coin.price),
                    change_class,
                    escape(&coin.change),
                    escape(&coin.market_cap),
                    TRADE_BUTTON,
                )
            })
            .collect()
    }

    fn is_empty(&self, coins: &Vec<CryptoQuote>) -> bool {
        coins.is_empty()
    }

    fn empty(&self) -> String {
        table_message(5, NO_CRYPTO, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        load_failure(5, err)
    }
}

/// Modal body for a symbol's contract specification.
pub fn profile_body(profile: &SymbolProfile) -> String {
    let rows = [
        ("Symbol", escape(&profile.symbol)),
        ("Base Currency", escape(&profile.currency_base)),
        ("Profit Currency", escape(&profile.currency_profit)),
        ("Digits", profile.digits.to_string()),
        ("Spread", format_plain(profile.spread)),
        ("Contract Size", format_plain(profile.trade_contract_size)),
        ("Min Volume", format_plain(profile.volume_min)),
        ("Max Volume", format_plain(profile.volume_max)),
        ("Volume Step", format_plain(profile.volume_step)),
        ("Initial Margin", format_plain(profile.margin_initial)),
        ("Maintenance Margin", format_plain(profile.margin_maintenance)),
    ];
    rows.iter()
        .map(|(label, value)| format!("<p><strong>{}:</strong> {}</p>", label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::ForexQuote;

    #[test]
    fn forex_row_shows_spread_in_pips() {
        let mut board = ForexBoard::new();
        board.insert(
            "EURUSD".into(),
            ForexQuote { name: "EURUSD".into(), bid: 1.08512, ask: 1.08527, spread: 15.0, digits: 5 },
        );
        let html = ForexPresenter.present(&board);
        assert!(html.contains("1.5 pips"));
        assert!(html.contains("1.08527"));
        assert!(html.contains(r#"data-symbol="EURUSD""#));
    }

    #[test]
    fn falling_stock_uses_down_glyph() {
        let stock = StockQuote { symbol: "AAPL".into(), last_price: 190.5, change: -1.25, time: "16:00".into() };
        let html = StocksPresenter.present(&vec![stock]);
        assert!(html.contains("text-red-600\">▼ 1.25"));
    }
}
