use crate::application::Presenter;
use crate::domain::{
    bots::format_plain,
    errors::AppError,
    portfolio::{DealType, PnlTrend, Position, format_signed},
};
use crate::presentation::markup::{Tone, escape, failure_text, profit_class, table_message};

pub const NO_POSITIONS: &str = "Tidak ada posisi terbuka.";

/// `#portfolio-table-body`
pub struct PositionsPresenter;

impl Presenter<Vec<Position>> for PositionsPresenter {
    fn present(&self, positions: &Vec<Position>) -> String {
        positions
            .iter()
            .map(|pos| {
                let type_class = match pos.kind {
                    DealType::Buy => "text-blue-600",
                    DealType::Sell => "text-orange-600",
                };
                format!(
                    r#"<tr class="hover:bg-gray-50"><td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm font-semibold {}">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{:.5}</td><td class="px-6 py-4 whitespace-nowrap text-sm font-semibold {}">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td></tr>"#,
                    escape(&pos.symbol),
                    type_class,
                    pos.kind.label(),
                    format_plain(pos.volume),
                    pos.price_open,
                    profit_class(pos.profit),
                    format_signed(pos.profit),
                    pos.magic,
                )
            })
            .collect()
    }

    fn is_empty(&self, positions: &Vec<Position>) -> bool {
        positions.is_empty()
    }

    fn empty(&self) -> String {
        table_message(6, NO_POSITIONS, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        table_message(6, &failure_text("Gagal memuat data", err), Tone::Danger)
    }
}

pub fn trend_icon(trend: PnlTrend) -> &'static str {
    match trend {
        PnlTrend::Up => r#"<i class="fas fa-arrow-up text-green-500"></i>"#,
        PnlTrend::Down => r#"<i class="fas fa-arrow-down text-red-500"></i>"#,
        PnlTrend::Flat => r#"<i class="fas fa-minus text-gray-400"></i>"#,
    }
}

/// `#portfolio-summary`: open P/L total with its movement since the last cycle.
pub fn pnl_summary(total: f64, trend: PnlTrend) -> String {
    format!(
        r#"<p class="text-sm text-gray-500">Total P/L Terbuka</p><p class="text-2xl font-bold {}">{} <span class="ml-2 text-lg">{}</span></p>"#,
        profit_class(total),
        format_signed(total),
        trend_icon(trend)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_shows_trend_glyph() {
        insta::assert_snapshot!(
            pnl_summary(-3.0, PnlTrend::Down),
            @r#"<p class="text-sm text-gray-500">Total P/L Terbuka</p><p class="text-2xl font-bold text-red-600">-3.00 <span class="ml-2 text-lg"><i class="fas fa-arrow-down text-red-500"></i></span></p>"#
        );
    }

    #[test]
    fn empty_positions_use_placeholder_row() {
        assert!(PositionsPresenter.empty().contains(NO_POSITIONS));
        assert!(PositionsPresenter.is_empty(&Vec::new()));
    }
}
