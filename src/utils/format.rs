use chrono::{Datelike, Weekday};

use super::dates::parse_api_date;

const MALAY_MONTHS: [&str; 12] = [
    "Januari", "Februari", "Mac", "April", "Mei", "Jun", "Julai", "Ogos", "September", "Oktober",
    "November", "Disember",
];

fn malay_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Isnin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Khamis",
        Weekday::Fri => "Jumaat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Ahad",
    }
}

/// Format a countdown in minutes as "Xj Ym" or "Ym" (j = jam)
pub fn format_countdown(minutes: u32) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;
    if hours > 0 {
        format!("{}j {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Trim an API time ("05:50:00") to "HH:MM"
pub fn format_time(time: &str) -> String {
    let mut parts = time.trim().split(':');
    match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => format!("{}:{}", h, m),
        _ => time.to_string(),
    }
}

/// "02-Sep-2025" → "Selasa, 2 September 2025"
pub fn format_gregorian_date(date: &str) -> String {
    match parse_api_date(date) {
        Some(d) => format!(
            "{}, {} {} {}",
            malay_weekday(d.weekday()),
            d.day(),
            MALAY_MONTHS[d.month0() as usize],
            d.year()
        ),
        None => date.to_string(),
    }
}
