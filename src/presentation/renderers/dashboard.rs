//! Dashboard cards: bot/equity stats, MT5 account and the AI mentor panel.

use strum::IntoEnumIterator;

use crate::application::Presenter;
use crate::domain::{
    dashboard::{AccountInfo, DashboardStats, Emotion, MentorSummary, format_usd},
    errors::AppError,
    notifications::UnreadNotification,
};
use crate::presentation::markup::{Tone, block_message, escape, failure_text};

pub const NO_ACTIVE_BOTS: &str = "Tidak ada bot yang aktif";
pub const NO_ACTIVITY: &str = "Belum ada aktivitas";
/// Entries shown in the recent-activity panel.
pub const ACTIVITY_LIMIT: usize = 5;

fn card(label: &str, value: &str, value_class: &str) -> String {
    format!(
        r#"<div class="bg-white p-5 rounded-lg shadow"><p class="text-sm font-medium text-gray-500">{}</p><p class="mt-1 text-2xl font-semibold {}">{}</p></div>"#,
        label,
        value_class,
        escape(value)
    )
}

fn signed_class(value: f64) -> &'static str {
    if value >= 0.0 { "profit-positive" } else { "profit-negative" }
}

/// `#dashboard-stats`: summary cards followed by the active bot list.
pub struct StatsPresenter;

impl StatsPresenter {
    fn active_list(stats: &DashboardStats) -> String {
        if stats.active_bots.is_empty() {
            return format!(r#"<p class="p-4 text-gray-500">{}</p>"#, NO_ACTIVE_BOTS);
        }
        stats
            .active_bots
            .iter()
            .map(|bot| {
                format!(
                    r#"<div class="p-4 flex justify-between items-center hover:bg-gray-50 transition"><h4 class="font-medium text-gray-800">{}</h4><p class="text-sm text-gray-600">{}</p></div>"#,
                    escape(&bot.name),
                    escape(&bot.market)
                )
            })
            .collect()
    }
}

impl Presenter<DashboardStats> for StatsPresenter {
    fn present(&self, stats: &DashboardStats) -> String {
        format!(
            r#"<div class="grid grid-cols-1 md:grid-cols-4 gap-4">{}{}{}{}</div><div id="active-bots-list" class="divide-y">{}</div>"#,
            card("Total Equity", &format_usd(stats.equity), "text-gray-900"),
            card("Profit Hari Ini", &format_usd(stats.todays_profit), signed_class(stats.todays_profit)),
            card("Bot Aktif", &stats.active_bots_count.to_string(), "text-gray-900"),
            card("Total Bot", &stats.total_bots.to_string(), "text-gray-900"),
            Self::active_list(stats),
        )
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat statistik", err), Tone::Danger)
    }
}

/// `#account-info`
pub struct AccountPresenter;

impl Presenter<AccountInfo> for AccountPresenter {
    fn present(&self, account: &AccountInfo) -> String {
        let owner = match (&account.name, account.login) {
            (Some(name), Some(login)) => format!("{} (#{})", name, login),
            (Some(name), None) => name.clone(),
            (None, Some(login)) => format!("#{}", login),
            (None, None) => "N/A".to_string(),
        };
        format!(
            r#"<p class="text-sm text-gray-500">{}</p><div class="grid grid-cols-3 gap-4">{}{}{}</div>"#,
            escape(&owner),
            card("Balance", &format_usd(account.balance), "text-gray-900"),
            card("Equity", &format_usd(account.equity), "text-gray-900"),
            card("Profit", &format_usd(account.profit), signed_class(account.profit)),
        )
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat info akun", err), Tone::Danger)
    }
}

/// `#ai-mentor-card`
pub struct MentorPresenter;

impl Presenter<MentorSummary> for MentorPresenter {
    fn present(&self, summary: &MentorSummary) -> String {
        let status_class = if summary.today_has_data { "text-xl font-bold text-green-100" } else { "text-xl font-bold" };
        format!(
            r#"<p id="ai-mentor-status" class="{}">{}</p><p id="emotion-status" class="text-lg">{}</p><p id="trading-analysis" class="text-sm">{}</p><p id="daily-tip" class="text-sm italic">{}</p>"#,
            status_class,
            summary.status_text(),
            summary.emotion().label(),
            escape(summary.analysis_text()),
            escape(summary.tip_text()),
        )
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat ringkasan AI Mentor", err), Tone::Danger)
    }
}

/// `#recent-activities`: unread notifications, newest first. The endpoint
/// returns them oldest first.
pub struct RecentActivityPresenter;

impl Presenter<Vec<UnreadNotification>> for RecentActivityPresenter {
    fn present(&self, items: &Vec<UnreadNotification>) -> String {
        items
            .iter()
            .rev()
            .take(ACTIVITY_LIMIT)
            .map(|item| {
                format!(
                    r#"<div class="activity-item p-4 hover:bg-gray-50 transition-colors" data-id="{}"><p class="text-sm text-gray-900">{}</p></div>"#,
                    item.id,
                    escape(&item.details)
                )
            })
            .collect()
    }

    fn is_empty(&self, items: &Vec<UnreadNotification>) -> bool {
        items.is_empty()
    }

    fn empty(&self) -> String {
        format!(r#"<div class="p-4 text-gray-500 text-center">{}</div>"#, NO_ACTIVITY)
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat aktivitas", err), Tone::Danger)
    }
}

/// Buttons for the emotion check-in; each carries `data-emotion`.
pub fn emotion_picker() -> String {
    Emotion::iter()
        .map(|emotion| {
            format!(
                r#"<button data-emotion="{}" class="w-full text-left p-3 rounded-lg border hover:bg-gray-50 transition-colors">{}</button>"#,
                emotion.as_ref(),
                emotion.label()
            )
        })
        .collect()
}
