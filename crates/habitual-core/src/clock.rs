//! Wall-clock access.
//!
//! Habit ids, creation timestamps and the year gate all read the current
//! time; going through [`Clock`] keeps those reads in one injectable place.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Local calendar date of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }

    /// Year used by the year gate.
    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Clock at `hour:00` local time on `date`.
    pub fn at_local(date: NaiveDate, hour: u32) -> Self {
        let naive = date.and_hms_opt(hour, 0, 0).unwrap_or_default();
        let at = Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive));
        Self(at)
    }

    /// Move the clock to a new instant.
    pub fn set(&mut self, at: DateTime<Utc>) {
        self.0 = at;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
