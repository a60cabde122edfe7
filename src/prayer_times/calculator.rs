use chrono::{NaiveTime, Timelike};

use crate::error::CalcError;
use crate::models::prayer::minutes_since_midnight;
use crate::models::{PrayerKind, PrayerPreferences, PrayerTime};
use crate::utils::format::format_countdown;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub kind: PrayerKind,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerStatus {
    pub current: PrayerKind,
    pub next: PrayerKind,
    pub minutes_left: u32,
    /// `next` belongs to the following calendar day.
    pub next_is_tomorrow: bool,
}

impl PrayerStatus {
    pub fn time_left(&self) -> String {
        format_countdown(self.minutes_left)
    }
}

/// Derives current/next prayer from one day's row. Imsak, Syuruk and Dhuha
/// take part only when the matching preference is on.
#[derive(Debug, Clone)]
pub struct PrayerCalculator {
    prefs: PrayerPreferences,
}

impl Default for PrayerCalculator {
    fn default() -> Self {
        Self::main_only()
    }
}

impl PrayerCalculator {
    pub fn new(prefs: &PrayerPreferences) -> Self {
        Self {
            prefs: prefs.clone(),
        }
    }

    pub fn main_only() -> Self {
        Self::new(&PrayerPreferences {
            show_imsak: false,
            show_syuruk: false,
            show_dhuha: false,
            ..Default::default()
        })
    }

    pub fn includes(&self, kind: PrayerKind) -> bool {
        self.prefs.shows(kind)
    }

    /// Rows to display, in canonical order, with their raw times.
    pub fn schedule<'a>(&self, row: &'a PrayerTime) -> Vec<(PrayerKind, &'a str)> {
        PrayerKind::ALL
            .into_iter()
            .filter(|k| self.includes(*k))
            .map(|k| (k, row.time_of(k)))
            .collect()
    }

    /// Included prayers sorted by time of day; equal times keep canonical order.
    pub fn candidates(&self, row: &PrayerTime) -> Result<Vec<Candidate>, CalcError> {
        let mut list = PrayerKind::ALL
            .into_iter()
            .filter(|k| self.includes(*k))
            .map(|kind| {
                Ok(Candidate {
                    kind,
                    minutes: minutes_since_midnight(row.time_of(kind))?,
                })
            })
            .collect::<Result<Vec<_>, CalcError>>()?;
        list.sort_by_key(|c| c.minutes);
        Ok(list)
    }

    pub fn status_at(&self, row: &PrayerTime, now: NaiveTime) -> Result<PrayerStatus, CalcError> {
        let list = self.candidates(row)?;
        status_from_candidates(&list, now.hour() * 60 + now.minute())
    }

    /// (current, next) at `now`.
    pub fn current_prayer(
        &self,
        row: &PrayerTime,
        now: NaiveTime,
    ) -> Result<(PrayerKind, PrayerKind), CalcError> {
        let status = self.status_at(row, now)?;
        Ok((status.current, status.next))
    }

    /// (time left as "Xj Ym", next prayer) at `now`.
    pub fn next_prayer_countdown(
        &self,
        row: &PrayerTime,
        now: NaiveTime,
    ) -> Result<(String, PrayerKind), CalcError> {
        let status = self.status_at(row, now)?;
        Ok((status.time_left(), status.next))
    }
}

/// A candidate whose time equals `now_minutes` counts as already passed.
pub fn status_from_candidates(
    sorted: &[Candidate],
    now_minutes: u32,
) -> Result<PrayerStatus, CalcError> {
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(CalcError::NoCandidates),
    };

    match sorted.iter().position(|c| c.minutes > now_minutes) {
        Some(i) => {
            let next = sorted[i];
            // Before the first prayer of the day, the previous night's last one is current
            let current = if i > 0 { sorted[i - 1] } else { last };
            Ok(PrayerStatus {
                current: current.kind,
                next: next.kind,
                minutes_left: next.minutes - now_minutes,
                next_is_tomorrow: false,
            })
        }
        None => Ok(PrayerStatus {
            current: last.kind,
            next: first.kind,
            minutes_left: first.minutes + MINUTES_PER_DAY - now_minutes,
            next_is_tomorrow: true,
        }),
    }
}
