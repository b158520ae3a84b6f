use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::config::client_config;

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Parses the timestamp shapes the backend emits: RFC 3339, SQL datetime
/// (`2024-01-02 10:00:00`), ISO without zone, or a bare date. Zone-less values are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn local(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(client_config().utc_offset_minutes * 60)
        .or_else(|| FixedOffset::east_opt(0));
    match offset {
        Some(offset) => at.with_timezone(&offset),
        None => at.fixed_offset(),
    }
}

/// `02 Jan 2024 10:05`
pub fn format_datetime(at: DateTime<Utc>) -> String {
    let at = local(at);
    format!(
        "{:02} {} {} {:02}:{:02}",
        at.day(),
        MONTHS_ID[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}

/// Display text for a backend timestamp string. Unparseable input is shown verbatim.
pub fn format_timestamp_text(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(at) => format_datetime(at),
        None if raw.trim().is_empty() => "N/A".to_string(),
        None => raw.to_string(),
    }
}

/// Deal times arrive as epoch seconds.
pub fn format_epoch_seconds(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(at) => format_datetime(at),
        None => "N/A".to_string(),
    }
}

/// `HH:MM:SS` label for a live chart point.
pub fn format_clock_label(epoch_millis: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_millis) {
        Some(at) => {
            let at = local(at);
            format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second())
        }
        None => "--:--:--".to_string(),
    }
}

/// Wall clock in epoch milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_and_iso_timestamps_agree() {
        let sql = parse_timestamp("2024-05-01 13:45:00").unwrap();
        let iso = parse_timestamp("2024-05-01T13:45:00.000").unwrap();
        let zoned = parse_timestamp("2024-05-01T13:45:00Z").unwrap();
        assert_eq!(sql, iso);
        assert_eq!(iso, zoned);
    }

    #[test]
    fn indonesian_month_names() {
        let at = parse_timestamp("2024-08-17 09:05:00").unwrap();
        assert_eq!(format_datetime(at), "17 Agu 2024 09:05");
    }

    #[test]
    fn unreadable_text_is_passed_through() {
        assert_eq!(format_timestamp_text("kemarin"), "kemarin");
        assert_eq!(format_timestamp_text(""), "N/A");
    }

    #[test]
    fn epoch_seconds_for_deals() {
        assert_eq!(format_epoch_seconds(0), "01 Jan 1970 00:00");
        assert_eq!(format_clock_label(3_723_000), "01:02:03");
    }
}
