//! Habit records and day keys.
//!
//! A habit is completed per calendar day. Days are stored as canonical
//! `YYYY-MM-DD` keys in the user's local time zone; no time-of-day component
//! is ever kept, so membership checks compare whole days only.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Habit identifier: creation time in epoch milliseconds.
pub type HabitId = i64;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar-day identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    /// Accepts `YYYY-MM-DD`, or a full RFC 3339 date-time which is reduced to
    /// the local calendar date of that instant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match NaiveDate::parse_from_str(s, DAY_KEY_FORMAT) {
            Ok(date) => Ok(Self(date)),
            Err(date_err) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Self(dt.with_timezone(&Local).date_naive()))
                .map_err(|_| date_err),
        }
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub completed_days: BTreeSet<DayKey>,
}

impl Habit {
    pub fn new(id: HabitId, name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created,
            completed_days: BTreeSet::new(),
        }
    }

    /// Local calendar date on which the habit was created.
    pub fn created_day(&self) -> NaiveDate {
        self.created.with_timezone(&Local).date_naive()
    }

    /// A habit is active on every day from its creation day onward.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.created_day() <= day
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed_days.contains(&DayKey::from(day))
    }

    pub fn completed_count(&self) -> usize {
        self.completed_days.len()
    }

    /// Flip completion for `day`. Returns `true` if the day is now completed.
    pub(crate) fn flip(&mut self, day: NaiveDate) -> bool {
        let key = DayKey::from(day);
        if self.completed_days.remove(&key) {
            false
        } else {
            self.completed_days.insert(key);
            true
        }
    }
}
