use anyhow::{Context, Result};
use log::{error, warn};

use crate::db::KeyValueStore;
use crate::models::{PrayerPreferences, PreferencesPatch};

pub const PREFERENCES_KEY: &str = "@prayer_preferences";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The write failed and memory was reset to the persisted record.
    Reverted,
    /// The write failed and so did re-reading; the new values live only in
    /// memory.
    Unsaved,
}

/// User preferences, loaded once from the store and rewritten whole on every
/// update.
pub struct PreferencesContext<S> {
    store: S,
    preferences: PrayerPreferences,
}

impl<S: KeyValueStore> PreferencesContext<S> {
    /// Never fails: an unreadable or missing record yields the defaults.
    pub fn load(store: S) -> Self {
        let preferences = match read_persisted(&store) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => PrayerPreferences::default(),
            Err(e) => {
                error!("Failed to load prayer preferences: {:#}", e);
                PrayerPreferences::default()
            }
        };
        Self { store, preferences }
    }

    pub fn preferences(&self) -> &PrayerPreferences {
        &self.preferences
    }

    /// Merge `patch` into memory right away, then persist the whole record.
    pub fn update(&mut self, patch: &PreferencesPatch) -> SaveOutcome {
        self.preferences = self.preferences.merged(patch);

        let Err(e) = write_persisted(&self.store, &self.preferences) else {
            return SaveOutcome::Saved;
        };
        error!("Failed to save prayer preferences: {:#}", e);

        match read_persisted(&self.store) {
            Ok(persisted) => {
                self.preferences = persisted.unwrap_or_default();
                SaveOutcome::Reverted
            }
            Err(e) => {
                warn!("Could not re-read preferences, keeping unsaved values: {:#}", e);
                SaveOutcome::Unsaved
            }
        }
    }
}

fn read_persisted(store: &impl KeyValueStore) -> Result<Option<PrayerPreferences>> {
    let Some(raw) = store.get(PREFERENCES_KEY)? else {
        return Ok(None);
    };
    let prefs = serde_json::from_str(&raw).context("Parsing stored preferences")?;
    Ok(Some(prefs))
}

fn write_persisted(store: &impl KeyValueStore, prefs: &PrayerPreferences) -> Result<()> {
    let json = serde_json::to_string(prefs).context("Serializing preferences")?;
    store.set(PREFERENCES_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::Zone;
    use crate::prayer_times::PrayerCalculator;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: Cell<bool>,
        fail_writes: Cell<bool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads.get() {
                return Err(anyhow!("read failed"));
            }
            self.inner.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(anyhow!("write failed"));
            }
            self.inner.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
        fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
            self.inner.keys_with_prefix(prefix)
        }
    }

    fn hide_dhuha() -> PreferencesPatch {
        PreferencesPatch {
            show_dhuha: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_when_nothing_stored() {
        let ctx = PreferencesContext::load(MemoryStore::new());
        assert_eq!(*ctx.preferences(), PrayerPreferences::default());
    }

    #[test]
    fn defaults_when_record_is_garbage() {
        let store = MemoryStore::new();
        store.set(PREFERENCES_KEY, "][").unwrap();
        let ctx = PreferencesContext::load(&store);
        assert_eq!(*ctx.preferences(), PrayerPreferences::default());
    }

    #[test]
    fn retired_zone_code_keeps_user_choices() {
        let store = MemoryStore::new();
        store
            .set(
                PREFERENCES_KEY,
                r#"{"showDhuha":false,"showImsak":false,"notifications":false,"selectedZone":{"code":"KTN03"}}"#,
            )
            .unwrap();
        let ctx = PreferencesContext::load(&store);
        let prefs = ctx.preferences();
        assert!(!prefs.show_dhuha);
        assert!(!prefs.show_imsak);
        assert!(!prefs.notifications);
        assert!(prefs.show_syuruk);
        assert_eq!(prefs.selected_zone.code, "JHR01");
    }

    #[test]
    fn update_persists_and_reloads() {
        let store = MemoryStore::new();
        let mut ctx = PreferencesContext::load(&store);
        let outcome = ctx.update(&PreferencesPatch {
            selected_zone: Zone::find("WLY01"),
            ..hide_dhuha()
        });
        assert_eq!(outcome, SaveOutcome::Saved);

        let reloaded = PreferencesContext::load(&store);
        assert!(!reloaded.preferences().show_dhuha);
        assert!(reloaded.preferences().show_imsak);
        assert_eq!(reloaded.preferences().selected_zone.code, "WLY01");
    }

    #[test]
    fn failed_write_reverts_to_persisted() {
        let store = FlakyStore::default();
        let mut ctx = PreferencesContext::load(&store);
        ctx.update(&PreferencesPatch {
            show_imsak: Some(false),
            ..Default::default()
        });

        store.fail_writes.set(true);
        assert_eq!(ctx.update(&hide_dhuha()), SaveOutcome::Reverted);
        assert!(ctx.preferences().show_dhuha);
        assert!(!ctx.preferences().show_imsak);
    }

    #[test]
    fn failed_write_with_nothing_persisted_reverts_to_defaults() {
        let store = FlakyStore::default();
        store.fail_writes.set(true);
        let mut ctx = PreferencesContext::load(&store);
        assert_eq!(ctx.update(&hide_dhuha()), SaveOutcome::Reverted);
        assert_eq!(*ctx.preferences(), PrayerPreferences::default());
    }

    #[test]
    fn failed_write_and_read_keeps_optimistic_value() {
        let store = FlakyStore::default();
        let mut ctx = PreferencesContext::load(&store);
        store.fail_writes.set(true);
        store.fail_reads.set(true);
        assert_eq!(ctx.update(&hide_dhuha()), SaveOutcome::Unsaved);
        assert!(!ctx.preferences().show_dhuha);
    }

    #[test]
    fn hiding_dhuha_drops_it_from_derivation() {
        let mut ctx = PreferencesContext::load(MemoryStore::new());
        let row = crate::models::PrayerTime {
            hijri: String::new(),
            date: "02-Sep-2025".into(),
            day: String::new(),
            imsak: "05:40".into(),
            fajr: "05:50".into(),
            syuruk: "07:05".into(),
            dhuha: "07:30".into(),
            dhuhr: "13:15".into(),
            asr: "16:30".into(),
            maghrib: "19:20".into(),
            isha: "20:35".into(),
        };
        let now = chrono::NaiveTime::from_hms_opt(7, 10, 0).unwrap();

        let before = PrayerCalculator::new(ctx.preferences()).status_at(&row, now).unwrap();
        assert_eq!(before.next.display_name(), "Dhuha");

        ctx.update(&hide_dhuha());
        let after = PrayerCalculator::new(ctx.preferences()).status_at(&row, now).unwrap();
        assert_eq!(after.next.display_name(), "Zohor");
        assert_eq!(after.current.display_name(), "Syuruk");
    }
}
