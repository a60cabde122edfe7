pub mod preferences;
pub mod prayer;
pub mod zone;

pub use preferences::{PrayerPreferences, PreferencesPatch};
pub use prayer::{CachedEntry, Period, PrayerKind, PrayerResponse, PrayerTime};
pub use zone::{Zone, MALAYSIAN_ZONES};
