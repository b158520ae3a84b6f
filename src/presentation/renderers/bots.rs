use crate::application::Presenter;
use crate::domain::{
    bots::{Bot, BotStatus, format_plain},
    errors::AppError,
};
use crate::presentation::markup::{Tone, escape, failure_text, table_message};

pub const NO_BOTS: &str = "Belum ada bot yang dibuat.";

/// `#bots-table-body`
pub struct BotTablePresenter;

impl BotTablePresenter {
    fn status_class(status: &BotStatus) -> &'static str {
        match status {
            BotStatus::Active => "bg-green-100 text-green-800",
            BotStatus::Error => "bg-red-100 text-red-800",
            _ => "bg-yellow-100 text-yellow-800",
        }
    }

    fn row(bot: &Bot) -> String {
        let toggle = if bot.status.is_active() {
            format!(
                r#"<button data-action="stop" data-id="{}" class="text-yellow-600 hover:text-yellow-900" title="Hentikan Bot"><i class="fas fa-pause-circle fa-lg"></i></button>"#,
                bot.id
            )
        } else {
            format!(
                r#"<button data-action="start" data-id="{}" class="text-green-600 hover:text-green-900" title="Jalankan Bot"><i class="fas fa-play-circle fa-lg"></i></button>"#,
                bot.id
            )
        };
        format!(
            r#"<tr class="hover:bg-gray-50"><td class="px-4 py-4"><div class="font-medium text-gray-900">{name}</div><div class="text-sm text-gray-500">{market}</div></td><td class="px-4 py-4 text-sm text-gray-500"><div>Lot: {lot}</div><div>SL: {sl} pips | TP: {tp} pips</div></td><td class="px-4 py-4 text-sm text-gray-500"><div>Strategi: {strategy}</div><div>TF: {tf} | Interval: {interval}s</div></td><td class="px-4 py-4"><span class="px-2 py-1 rounded-full text-xs font-semibold {status_class}">{status}</span></td><td class="px-4 py-4 text-center"><div class="flex justify-center items-center gap-4">{toggle}<a href="/bots/{id}" class="text-blue-600 hover:text-blue-900" title="Lihat Detail &amp; Analisis"><i class="fas fa-chart-line"></i></a><button data-action="edit" data-id="{id}" class="text-gray-600 hover:text-gray-900" title="Edit Bot"><i class="fas fa-pencil-alt"></i></button><button data-action="delete" data-id="{id}" class="text-red-600 hover:text-red-900" title="Hapus Bot"><i class="fas fa-trash"></i></button></div></td></tr>"#,
            name = escape(&bot.name),
            market = escape(&bot.market),
            lot = format_plain(bot.lot_size),
            sl = format_plain(bot.sl_pips),
            tp = format_plain(bot.tp_pips),
            strategy = escape(bot.strategy_label()),
            tf = escape(&bot.timeframe),
            interval = format_plain(bot.check_interval_seconds),
            status_class = Self::status_class(&bot.status),
            status = escape(bot.status.label()),
            toggle = toggle,
            id = bot.id,
        )
    }
}

impl Presenter<Vec<Bot>> for BotTablePresenter {
    fn present(&self, bots: &Vec<Bot>) -> String {
        bots.iter().map(Self::row).collect::<Vec<_>>().join("")
    }

    fn is_empty(&self, bots: &Vec<Bot>) -> bool {
        bots.is_empty()
    }

    fn empty(&self) -> String {
        table_message(5, NO_BOTS, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        table_message(5, &failure_text("Gagal memuat data bot", err), Tone::Danger)
    }
}
