use chrono::NaiveDate;
use log::{debug, warn};

use crate::api::PrayerSource;
use crate::db::KeyValueStore;
use crate::error::FetchError;
use crate::models::{CachedEntry, Period, PrayerResponse, PrayerTime};
use crate::utils::clock::Clock;
use crate::utils::dates::{month_key, parse_api_date};

pub const CACHE_KEY_PREFIX: &str = "prayer_cache_";

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Outcome of reading the monthly cache for a zone.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(CachedEntry),
    Miss,
    /// An entry was stored under the key but belongs to another month or
    /// zone. It has been purged.
    Stale { month: String, zone: String },
    /// The store failed or the entry did not decode. Treated as a miss.
    Faulted(String),
}

impl CacheLookup {
    pub fn into_entry(self) -> Option<CachedEntry> {
        match self {
            CacheLookup::Hit(entry) => Some(entry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Network,
}

/// Row picked from a monthly table for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodayRow<'a> {
    Exact(&'a PrayerTime),
    /// Today was not in the table; the first row is used instead.
    Fallback(&'a PrayerTime),
}

impl<'a> TodayRow<'a> {
    pub fn row(&self) -> &'a PrayerTime {
        match self {
            TodayRow::Exact(r) | TodayRow::Fallback(r) => r,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, TodayRow::Exact(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qibla {
    pub degrees: u32,
    pub direction: &'static str,
}

/// Monthly prayer tables, served from the local store when the stored month
/// and zone still match the wall clock, otherwise from the network.
pub struct PrayerService<S, A, C> {
    store: S,
    source: A,
    clock: C,
}

impl<S: KeyValueStore, A: PrayerSource, C: Clock> PrayerService<S, A, C> {
    pub fn new(store: S, source: A, clock: C) -> Self {
        Self {
            store,
            source,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    pub fn current_month(&self) -> String {
        month_key(self.today())
    }

    pub fn cache_key(zone: &str, month: &str) -> String {
        format!("{}{}_{}", CACHE_KEY_PREFIX, zone, month)
    }

    /// Read the cache entry for `zone` in the current month. Entries of other
    /// months for the zone are purged on the way.
    pub fn cache_status(&self, zone: &str) -> CacheLookup {
        let zone = normalize_zone(zone);
        let month = self.current_month();
        self.purge_other_months(&zone, &month);

        let key = Self::cache_key(&zone, &month);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => {
                warn!("Cache read for {} failed: {:#}", key, e);
                return CacheLookup::Faulted(e.to_string());
            }
        };

        let entry: CachedEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Dropping undecodable cache entry {}: {}", key, e);
                self.remove_quietly(&key);
                return CacheLookup::Faulted(e.to_string());
            }
        };

        if entry.month != month || entry.zone != zone {
            debug!(
                "Cache entry {} is for {}/{}, wanted {}/{}",
                key, entry.zone, entry.month, zone, month
            );
            self.remove_quietly(&key);
            return CacheLookup::Stale {
                month: entry.month,
                zone: entry.zone,
            };
        }

        CacheLookup::Hit(entry)
    }

    pub fn fetch_prayer_times(&self, zone: &str) -> Result<PrayerResponse, FetchError> {
        self.fetch_prayer_times_traced(zone).map(|(data, _)| data)
    }

    /// Like [`fetch_prayer_times`](Self::fetch_prayer_times), also reporting
    /// where the payload came from.
    pub fn fetch_prayer_times_traced(
        &self,
        zone: &str,
    ) -> Result<(PrayerResponse, Source), FetchError> {
        if let Some(entry) = self.cache_status(zone).into_entry() {
            debug!("Cache hit for {} ({})", entry.zone, entry.month);
            return Ok((entry.data, Source::Cache));
        }
        let fresh = self.refresh_prayer_times(zone)?;
        Ok((fresh, Source::Network))
    }

    /// Fetch from the network regardless of cache state and overwrite the
    /// cache entry for the current month.
    pub fn refresh_prayer_times(&self, zone: &str) -> Result<PrayerResponse, FetchError> {
        let zone = normalize_zone(zone);
        let fresh = self.source.fetch_month(&zone)?;
        self.store_entry(&zone, &fresh);
        Ok(fresh)
    }

    /// Uncached fetch of a shorter period.
    pub fn fetch_period(&self, zone: &str, period: Period) -> Result<PrayerResponse, FetchError> {
        self.source.fetch(&normalize_zone(zone), period)
    }

    pub fn get_today_prayer_time<'a>(&self, monthly: &'a PrayerResponse) -> Option<TodayRow<'a>> {
        today_row(monthly, self.today())
    }

    /// Remove every cached month of every zone. Returns how many entries went.
    pub fn clear_cache(&self) -> usize {
        let keys = match self.store.keys_with_prefix(CACHE_KEY_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Listing cache keys failed: {:#}", e);
                return 0;
            }
        };
        if keys.is_empty() {
            return 0;
        }
        match self.store.remove_many(&keys) {
            Ok(()) => keys.len(),
            Err(e) => {
                warn!("Clearing cache failed: {:#}", e);
                0
            }
        }
    }

    /// Returns whether the entry was written. Failures only log.
    fn store_entry(&self, zone: &str, data: &PrayerResponse) -> bool {
        let month = self.current_month();
        let key = Self::cache_key(zone, &month);
        let entry = CachedEntry {
            data: data.clone(),
            month: month.clone(),
            zone: zone.to_string(),
            cached_at: self.clock.now_utc().timestamp_millis(),
        };

        let written = serde_json::to_string(&entry)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(&key, &json));
        if let Err(e) = written {
            warn!("Caching {} failed: {:#}", key, e);
            return false;
        }

        self.purge_other_months(zone, &month);
        true
    }

    fn purge_other_months(&self, zone: &str, month: &str) {
        let current = Self::cache_key(zone, month);
        let zone_prefix = format!("{}{}_", CACHE_KEY_PREFIX, zone);
        match self.store.keys_with_prefix(&zone_prefix) {
            Ok(keys) => {
                let old: Vec<String> = keys.into_iter().filter(|k| *k != current).collect();
                if old.is_empty() {
                    return;
                }
                debug!("Purging {} old cache entries for {}", old.len(), zone);
                if let Err(e) = self.store.remove_many(&old) {
                    warn!("Purging old cache for {} failed: {:#}", zone, e);
                }
            }
            Err(e) => warn!("Listing cache keys for {} failed: {:#}", zone, e),
        }
    }

    fn remove_quietly(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!("Removing {} failed: {:#}", key, e);
        }
    }
}

fn normalize_zone(zone: &str) -> String {
    zone.trim().to_uppercase()
}

/// The row dated `today`, or the first row when none matches. `None` only
/// for an empty table.
pub fn today_row(monthly: &PrayerResponse, today: NaiveDate) -> Option<TodayRow<'_>> {
    monthly
        .prayer_time
        .iter()
        .find(|row| parse_api_date(&row.date) == Some(today))
        .map(TodayRow::Exact)
        .or_else(|| monthly.prayer_time.first().map(TodayRow::Fallback))
}

/// Parse a bearing like "292° 31′ 16″" into whole degrees and a 16-point
/// compass direction. The first degree sign preceded by digits wins; none
/// means 0°.
pub fn parse_qibla_direction(bearing: &str) -> Qibla {
    let degrees = bearing
        .char_indices()
        .filter(|(_, c)| *c == '°')
        .find_map(|(end, _)| {
            let head = &bearing[..end];
            let start = head
                .rfind(|c: char| !c.is_ascii_digit())
                .map(|i| i + head[i..].chars().next().map_or(1, char::len_utf8))
                .unwrap_or(0);
            head[start..].parse::<u32>().ok()
        })
        .unwrap_or(0);

    let index = (degrees as f64 / 22.5).round() as usize % COMPASS_POINTS.len();
    Qibla {
        degrees,
        direction: COMPASS_POINTS[index],
    }
}
