pub mod calculator;
pub mod service;
pub mod session;

pub use calculator::{PrayerCalculator, PrayerStatus};
pub use service::{parse_qibla_direction, CacheLookup, PrayerService, Qibla, Source, TodayRow};
pub use session::{FetchTicket, ZoneSession};
