/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(HIJRI_MONTH_NAMES[month - 1])
    } else {
        None
    }
}

/// "1447-03-09" → "9 Rabi' al-Awwal 1447H". Unparseable parts are passed
/// through as-is.
pub fn format_hijri_date(hijri: &str) -> String {
    let mut parts = hijri.trim().splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return hijri.to_string();
    };

    let month_name = month
        .parse::<usize>()
        .ok()
        .and_then(hijri_month_name)
        .unwrap_or(month);
    let day = day
        .parse::<u32>()
        .map(|d| d.to_string())
        .unwrap_or_else(|_| day.to_string());

    format!("{} {} {}H", day, month_name, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_api_hijri() {
        assert_eq!(format_hijri_date("1447-03-09"), "9 Rabi' al-Awwal 1447H");
        assert_eq!(format_hijri_date("1446-09-01"), "1 Ramadan 1446H");
    }

    #[test]
    fn keeps_unknown_month_number() {
        assert_eq!(format_hijri_date("1447-13-09"), "9 13 1447H");
        assert_eq!(format_hijri_date("garbage"), "garbage");
    }
}
