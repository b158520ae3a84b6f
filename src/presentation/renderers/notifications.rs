use crate::application::Presenter;
use crate::domain::{
    errors::AppError,
    notifications::{Appearance, Notification},
};
use crate::presentation::markup::{Tone, block_message, escape, failure_text};
use crate::time_utils::format_timestamp_text;

pub const NO_NOTIFICATIONS: &str = "Tidak ada notifikasi.";

/// `#notifications-container`
pub struct NotificationsPresenter;

impl Presenter<Vec<Notification>> for NotificationsPresenter {
    fn present(&self, notifications: &Vec<Notification>) -> String {
        notifications
            .iter()
            .map(|notif| {
                let look = Appearance::for_action(&notif.action);
                let source = notif.bot_name.as_deref().unwrap_or("Sistem");
                let weight = if notif.is_read { "" } else { " font-semibold" };
                format!(
                    r#"<div class="p-4 flex items-start hover:bg-gray-50 cursor-pointer" data-id="{id}"><div class="w-10 h-10 rounded-full bg-{color}-100 flex items-center justify-center text-{color}-600 mr-4 flex-shrink-0"><i class="fas {icon}"></i></div><div><p class="text-sm text-gray-800{weight}"><strong>[{source}]</strong> {details}</p><p class="text-xs text-gray-500 mt-1">{time}</p></div></div>"#,
                    id = notif.id,
                    color = look.color,
                    icon = look.icon,
                    weight = weight,
                    source = escape(source),
                    details = escape(&notif.details),
                    time = escape(&format_timestamp_text(&notif.timestamp)),
                )
            })
            .collect()
    }

    fn is_empty(&self, notifications: &Vec<Notification>) -> bool {
        notifications.is_empty()
    }

    fn empty(&self) -> String {
        block_message(NO_NOTIFICATIONS, Tone::Muted)
    }

    fn error(&self, err: &AppError) -> String {
        block_message(&failure_text("Gagal memuat notifikasi", err), Tone::Danger)
    }
}
