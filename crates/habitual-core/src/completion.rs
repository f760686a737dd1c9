//! Day completion model.

use chrono::NaiveDate;

use crate::habit::Habit;

/// Habits active on `day`, in store order.
pub fn active_habits(habits: &[Habit], day: NaiveDate) -> impl Iterator<Item = &Habit> {
    habits.iter().filter(move |h| h.is_active_on(day))
}

/// Whether `day` counts as completed.
///
/// A day with no active habits is never completed.
pub fn completion_status(habits: &[Habit], day: NaiveDate) -> bool {
    let mut active = active_habits(habits, day).peekable();
    if active.peek().is_none() {
        return false;
    }
    active.all(|h| h.is_completed_on(day))
}
