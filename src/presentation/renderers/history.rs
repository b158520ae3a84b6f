use crate::application::Presenter;
use crate::domain::{bots::format_plain, errors::AppError, portfolio::Deal};
use crate::presentation::markup::{Tone, escape, failure_text, profit_class, table_message};
use crate::time_utils::format_epoch_seconds;

pub const NO_DEALS: &str = "Tidak ada riwayat transaksi ditemukan.";

/// `#history-table-body`; rows arrive already sorted.
pub struct DealTablePresenter;

impl Presenter<Vec<Deal>> for DealTablePresenter {
    fn present(&self, deals: &Vec<Deal>) -> String {
        deals
            .iter()
            .map(|deal| {
                format!(
                    r#"<tr class="hover:bg-gray-50"><td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm font-semibold {}">${:.2}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td><td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{}</td></tr>"#,
                    escape(&deal.symbol),
                    deal.kind.label(),
                    format_plain(deal.volume),
                    profit_class(deal.profit),
                    deal.profit,
                    format_epoch_seconds(deal.time),
                    deal.magic,
                )
            })
            .collect()
    }

    fn is_empty(&self, deals: &Vec<Deal>) -> bool {
        deals.is_empty()
    }

    fn empty(&self) -> String {
        table_message(6, NO_DEALS, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        table_message(6, &failure_text("Gagal memuat riwayat", err), Tone::Danger)
    }
}
