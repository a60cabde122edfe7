use chrono::{Datelike, NaiveDate};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse an e-Solat row date such as "02-Sep-2025".
pub fn parse_api_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d-%b-%Y") {
        return Some(date);
    }

    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].trim().parse().ok()?;
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == parts[1].trim())? as u32
        + 1;
    let year: i32 = parts[2].trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// "YYYY-MM", the month component of cache keys.
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_format() {
        assert_eq!(
            parse_api_date("02-Sep-2025"),
            NaiveDate::from_ymd_opt(2025, 9, 2)
        );
        assert_eq!(
            parse_api_date(" 31-Dec-2024 "),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert_eq!(parse_api_date("2025-09-02"), None);
        assert_eq!(parse_api_date("02-Sept-2025"), None);
        assert_eq!(parse_api_date("31-Feb-2025"), None);
        assert_eq!(parse_api_date(""), None);
    }

    #[test]
    fn month_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(month_key(date), "2025-03");
    }
}
