use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerKind {
    Imsak,
    Fajr,
    Syuruk,
    Dhuha,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKind {
    /// Canonical declaration order of every time marker in a daily row.
    pub const ALL: [PrayerKind; 8] = [
        PrayerKind::Imsak,
        PrayerKind::Fajr,
        PrayerKind::Syuruk,
        PrayerKind::Dhuha,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ];

    /// The five obligatory daily prayers, always shown.
    pub const MAIN: [PrayerKind; 5] = [
        PrayerKind::Fajr,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ];

    pub fn is_main(&self) -> bool {
        !matches!(
            self,
            PrayerKind::Imsak | PrayerKind::Syuruk | PrayerKind::Dhuha
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerKind::Imsak => "imsak",
            PrayerKind::Fajr => "fajr",
            PrayerKind::Syuruk => "syuruk",
            PrayerKind::Dhuha => "dhuha",
            PrayerKind::Dhuhr => "dhuhr",
            PrayerKind::Asr => "asr",
            PrayerKind::Maghrib => "maghrib",
            PrayerKind::Isha => "isha",
        }
    }

    /// Malay name as used by JAKIM.
    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerKind::Imsak => "Imsak",
            PrayerKind::Fajr => "Subuh",
            PrayerKind::Syuruk => "Syuruk",
            PrayerKind::Dhuha => "Dhuha",
            PrayerKind::Dhuhr => "Zohor",
            PrayerKind::Asr => "Asar",
            PrayerKind::Maghrib => "Maghrib",
            PrayerKind::Isha => "Isyak",
        }
    }

    pub fn arabic_name(&self) -> &'static str {
        match self {
            PrayerKind::Imsak => "إمساك",
            PrayerKind::Fajr => "فجر",
            PrayerKind::Syuruk => "شروق",
            PrayerKind::Dhuha => "ضحى",
            PrayerKind::Dhuhr => "ظهر",
            PrayerKind::Asr => "عصر",
            PrayerKind::Maghrib => "مغرب",
            PrayerKind::Isha => "عشاء",
        }
    }
}

impl std::fmt::Display for PrayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imsak" => Ok(PrayerKind::Imsak),
            "fajr" | "subuh" => Ok(PrayerKind::Fajr),
            "syuruk" | "sunrise" => Ok(PrayerKind::Syuruk),
            "dhuha" => Ok(PrayerKind::Dhuha),
            "dhuhr" | "zohor" | "zuhr" => Ok(PrayerKind::Dhuhr),
            "asr" | "asar" => Ok(PrayerKind::Asr),
            "maghrib" => Ok(PrayerKind::Maghrib),
            "isha" | "isyak" => Ok(PrayerKind::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

/// One day of the e-Solat table. Times are local "HH:MM" (the live API
/// appends ":SS").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTime {
    pub hijri: String,
    pub date: String,
    pub day: String,
    pub imsak: String,
    pub fajr: String,
    pub syuruk: String,
    pub dhuha: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl PrayerTime {
    pub fn time_of(&self, kind: PrayerKind) -> &str {
        match kind {
            PrayerKind::Imsak => &self.imsak,
            PrayerKind::Fajr => &self.fajr,
            PrayerKind::Syuruk => &self.syuruk,
            PrayerKind::Dhuha => &self.dhuha,
            PrayerKind::Dhuhr => &self.dhuhr,
            PrayerKind::Asr => &self.asr,
            PrayerKind::Maghrib => &self.maghrib,
            PrayerKind::Isha => &self.isha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerResponse {
    pub prayer_time: Vec<PrayerTime>,
    pub status: String,
    pub server_time: String,
    pub period_type: String,
    pub lang: String,
    pub zone: String,
    pub bearing: String,
}

impl PrayerResponse {
    /// Status marker e-Solat puts on a successful payload.
    pub const STATUS_OK: &'static str = "OK!";

    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}

/// A monthly response as persisted in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedEntry {
    pub data: PrayerResponse,
    /// "YYYY-MM"
    pub month: String,
    pub zone: String,
    /// Milliseconds since the Unix epoch.
    pub cached_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Today,
    Week,
    #[default]
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

/// Minutes since midnight for "HH:MM" or "HH:MM:SS".
pub fn minutes_since_midnight(s: &str) -> Result<u32, CalcError> {
    let invalid = || CalcError::InvalidTime(s.to_string());
    let mut parts = s.trim().split(':');
    let hours: u32 = parts
        .next()
        .and_then(|h| h.parse().ok())
        .ok_or_else(invalid)?;
    let minutes: u32 = parts
        .next()
        .and_then(|m| m.parse().ok())
        .ok_or_else(invalid)?;
    if let Some(secs) = parts.next() {
        secs.parse::<u32>().map_err(|_| invalid())?;
    }
    if parts.next().is_some() || hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_json_shape() {
        let json = r#"{
            "prayerTime": [{
                "hijri": "1447-03-09", "date": "02-Sep-2025", "day": "Tuesday",
                "imsak": "05:40:00", "fajr": "05:50:00", "syuruk": "07:02:00",
                "dhuha": "07:28:00", "dhuhr": "13:10:00", "asr": "16:18:00",
                "maghrib": "19:14:00", "isha": "20:24:00"
            }],
            "status": "OK!",
            "serverTime": "2025-09-02 10:00:00",
            "periodType": "month",
            "lang": "ms_my",
            "zone": "WLY01",
            "bearing": "292° 31′ 16″"
        }"#;
        let resp: PrayerResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.prayer_time.len(), 1);
        assert_eq!(resp.prayer_time[0].time_of(PrayerKind::Asr), "16:18:00");
    }

    #[test]
    fn minutes_accepts_seconds_suffix() {
        assert_eq!(minutes_since_midnight("05:50").unwrap(), 350);
        assert_eq!(minutes_since_midnight("20:35:00").unwrap(), 1235);
        assert_eq!(minutes_since_midnight("00:00").unwrap(), 0);
    }

    #[test]
    fn minutes_rejects_garbage() {
        assert!(minutes_since_midnight("").is_err());
        assert!(minutes_since_midnight("5").is_err());
        assert!(minutes_since_midnight("25:00").is_err());
        assert!(minutes_since_midnight("12:60").is_err());
        assert!(minutes_since_midnight("ab:cd").is_err());
    }

    #[test]
    fn prayer_kind_aliases() {
        assert_eq!("Zohor".parse::<PrayerKind>().unwrap(), PrayerKind::Dhuhr);
        assert_eq!("isyak".parse::<PrayerKind>().unwrap(), PrayerKind::Isha);
        assert!("witr".parse::<PrayerKind>().is_err());
        assert_eq!(PrayerKind::Asr.to_string(), "Asar");
    }

    #[test]
    fn main_prayers_exclude_markers() {
        let main: Vec<_> = PrayerKind::ALL.iter().filter(|k| k.is_main()).copied().collect();
        assert_eq!(main, PrayerKind::MAIN.to_vec());
    }
}
