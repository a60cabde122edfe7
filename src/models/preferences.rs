use serde::{Deserialize, Serialize};

use super::prayer::PrayerKind;
use super::zone::{self, Zone};

fn default_true() -> bool {
    true
}

fn default_zone() -> &'static Zone {
    Zone::default_zone()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerPreferences {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub early_notification: bool,
    #[serde(default = "default_true")]
    pub show_imsak: bool,
    #[serde(default = "default_true")]
    pub show_syuruk: bool,
    #[serde(default = "default_true")]
    pub show_dhuha: bool,
    #[serde(default = "default_zone", with = "zone::by_code")]
    pub selected_zone: &'static Zone,
}

impl Default for PrayerPreferences {
    fn default() -> Self {
        Self {
            notifications: true,
            early_notification: true,
            show_imsak: true,
            show_syuruk: true,
            show_dhuha: true,
            selected_zone: default_zone(),
        }
    }
}

impl PrayerPreferences {
    /// Whether `kind` takes part in current/next derivation. Main prayers
    /// are always shown.
    pub fn shows(&self, kind: PrayerKind) -> bool {
        match kind {
            PrayerKind::Imsak => self.show_imsak,
            PrayerKind::Syuruk => self.show_syuruk,
            PrayerKind::Dhuha => self.show_dhuha,
            _ => true,
        }
    }

    pub fn visible_extras(&self) -> Vec<PrayerKind> {
        [PrayerKind::Imsak, PrayerKind::Syuruk, PrayerKind::Dhuha]
            .into_iter()
            .filter(|k| self.shows(*k))
            .collect()
    }

    pub fn merged(&self, patch: &PreferencesPatch) -> Self {
        Self {
            notifications: patch.notifications.unwrap_or(self.notifications),
            early_notification: patch.early_notification.unwrap_or(self.early_notification),
            show_imsak: patch.show_imsak.unwrap_or(self.show_imsak),
            show_syuruk: patch.show_syuruk.unwrap_or(self.show_syuruk),
            show_dhuha: patch.show_dhuha.unwrap_or(self.show_dhuha),
            selected_zone: patch.selected_zone.unwrap_or(self.selected_zone),
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesPatch {
    pub notifications: Option<bool>,
    pub early_notification: Option<bool>,
    pub show_imsak: Option<bool>,
    pub show_syuruk: Option<bool>,
    pub show_dhuha: Option<bool>,
    pub selected_zone: Option<&'static Zone>,
}

impl PreferencesPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_record_merges_over_defaults() {
        let prefs: PrayerPreferences =
            serde_json::from_str(r#"{"showDhuha": false}"#).unwrap();
        assert!(!prefs.show_dhuha);
        assert!(prefs.show_imsak);
        assert_eq!(prefs.selected_zone.code, "JHR01");
    }

    #[test]
    fn selected_zone_round_trips_by_code() {
        let prefs = PrayerPreferences {
            selected_zone: Zone::find("SGR01").unwrap(),
            ..Default::default()
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains(r#""code":"SGR01""#));
        let back: PrayerPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn unknown_zone_code_keeps_other_fields() {
        let prefs: PrayerPreferences = serde_json::from_str(
            r#"{"showDhuha": false, "notifications": false, "selectedZone": {"code": "ZZZ01"}}"#,
        )
        .unwrap();
        assert!(!prefs.show_dhuha);
        assert!(!prefs.notifications);
        assert_eq!(prefs.selected_zone.code, "JHR01");
    }

    #[test]
    fn zone_stored_as_bare_code_or_junk() {
        let prefs: PrayerPreferences =
            serde_json::from_str(r#"{"selectedZone": "wly01"}"#).unwrap();
        assert_eq!(prefs.selected_zone.code, "WLY01");

        let prefs: PrayerPreferences =
            serde_json::from_str(r#"{"showImsak": false, "selectedZone": 42}"#).unwrap();
        assert!(!prefs.show_imsak);
        assert_eq!(prefs.selected_zone.code, "JHR01");
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let prefs = PrayerPreferences::default();
        let patch = PreferencesPatch {
            show_syuruk: Some(false),
            ..Default::default()
        };
        let merged = prefs.merged(&patch);
        assert!(!merged.show_syuruk);
        assert!(merged.show_imsak && merged.show_dhuha && merged.notifications);
        assert!(PreferencesPatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn main_prayers_always_shown() {
        let prefs = PrayerPreferences {
            show_imsak: false,
            show_syuruk: false,
            show_dhuha: false,
            ..Default::default()
        };
        assert!(PrayerKind::MAIN.iter().all(|k| prefs.shows(*k)));
        assert!(prefs.visible_extras().is_empty());
    }
}
