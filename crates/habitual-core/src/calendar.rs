//! Calendar arithmetic for the day/week/month views.
//!
//! All functions work on local calendar dates ([`NaiveDate`]); time of day
//! never enters navigation or completion checks.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::view::ViewMode;

/// Short weekday labels in Sunday-first order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First day of the week, as configured by the user's locale convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Tuesday => Weekday::Tue,
            WeekStart::Wednesday => Weekday::Wed,
            WeekStart::Thursday => Weekday::Thu,
            WeekStart::Friday => Weekday::Fri,
            WeekStart::Saturday => Weekday::Sat,
        }
    }
}

/// Weekday index with Sunday = 0.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[weekday_index(date)]
}

/// The year gate: only dates inside `current_year` may be edited.
pub fn is_editable(date: NaiveDate, current_year: i32) -> bool {
    date.year() == current_year
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday()
        - week_start.weekday().num_days_from_sunday())
        % 7;
    date - Duration::days(i64::from(offset))
}

/// The seven days of the week containing `date`, starting at `week_start`.
pub fn week_days(date: NaiveDate, week_start: WeekStart) -> [NaiveDate; 7] {
    let start = start_of_week(date, week_start);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Week-of-year number.
///
/// Week 1 is the week containing January 1. Days in the week that contains
/// the following January 1 already count as week 1 of the next year.
pub fn week_number(date: NaiveDate, week_start: WeekStart) -> u32 {
    let start = start_of_week(date, week_start);
    if let Some(next_jan1) = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1) {
        if start >= start_of_week(next_jan1, week_start) {
            return 1;
        }
    }
    let first_week = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|jan1| start_of_week(jan1, week_start))
        .unwrap_or(start);
    ((start - first_week).num_days() / 7) as u32 + 1
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Every day of the month containing `date`, in order.
pub fn month_days(date: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(date);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// Number of blank cells before day 1 in a Sunday-first month grid.
pub fn leading_blanks(date: NaiveDate) -> usize {
    weekday_index(first_of_month(date))
}

/// Move `date` by `steps` units of the given view mode.
///
/// Month steps clamp to the end of shorter months (Jan 31 + 1 month is the
/// last day of February). Dates that would leave chrono's range are returned
/// unchanged.
pub fn shift(date: NaiveDate, mode: ViewMode, steps: i32) -> NaiveDate {
    let moved = match mode {
        ViewMode::Day => date.checked_add_signed(Duration::days(i64::from(steps))),
        ViewMode::Week => date.checked_add_signed(Duration::weeks(i64::from(steps))),
        ViewMode::Month => {
            let months = Months::new(steps.unsigned_abs());
            if steps >= 0 {
                date.checked_add_months(months)
            } else {
                date.checked_sub_months(months)
            }
        }
    };
    moved.unwrap_or(date)
}
