use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Source of local wall-clock time for the selected zone.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// The same instant as an absolute timestamp.
    fn now_utc(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }
}

/// Wall clock at a fixed UTC offset. Malaysia does not observe DST, so a
/// fixed +08:00 is exact for every zone.
pub struct SystemClock {
    offset_secs: i32,
}

impl SystemClock {
    pub const MALAYSIA_OFFSET_MINUTES: i32 = 480;

    pub fn new(tz_offset_minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(tz_offset_minutes * 60).map(|o| Self {
            offset_secs: o.local_minus_utc(),
        })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match FixedOffset::east_opt(self.offset_secs) {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Utc::now().naive_utc(),
        }
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant. The wall time doubles as UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.0.and_utc()
    }
}
