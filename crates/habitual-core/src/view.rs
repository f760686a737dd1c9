//! View state and the day/week/month/habit-list projections.
//!
//! Renderers are pure functions over an immutable habit slice; they never
//! touch the store. The resulting structures are plain data that any front
//! end (the CLI's text renderer, JSON output) can draw.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    is_editable, leading_blanks, month_days, week_days, week_number, weekday_label, WeekStart,
    WEEKDAY_LABELS,
};
use crate::completion::{active_habits, completion_status};
use crate::habit::{Habit, HabitId};

/// Calendar granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(ViewMode::Day),
            "week" | "w" => Ok(ViewMode::Week),
            "month" | "m" => Ok(ViewMode::Month),
            other => Err(format!("unknown view `{other}`; expected day|week|month")),
        }
    }
}

/// Transient UI state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub current_date: NaiveDate,
    pub view: ViewMode,
    pub habit_list_visible: bool,
    pub new_habit_draft: String,
}

impl ViewState {
    /// Day view on `today`, habit list hidden, empty draft.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_date: today,
            view: ViewMode::Day,
            habit_list_visible: false,
            new_habit_draft: String::new(),
        }
    }
}

/// How a calendar cell is shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellShade {
    /// Outside the current year; not clickable.
    Disabled,
    Completed,
    Pending,
}

/// One day cell of the week or month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub day_number: u32,
    pub shade: CellShade,
}

impl DayCell {
    fn new(habits: &[Habit], date: NaiveDate, current_year: i32) -> Self {
        let shade = if !is_editable(date, current_year) {
            CellShade::Disabled
        } else if completion_status(habits, date) {
            CellShade::Completed
        } else {
            CellShade::Pending
        };
        Self {
            date,
            weekday: weekday_label(date),
            day_number: date.day(),
            shade,
        }
    }

    pub fn clickable(&self) -> bool {
        self.shade != CellShade::Disabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub id: HabitId,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    pub title: String,
    pub date: NaiveDate,
    /// False when the date is outside the current year; `entries` is then empty.
    pub editable: bool,
    pub entries: Vec<DayEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub title: String,
    pub week_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub title: String,
    pub year: i32,
    pub month: u32,
    pub headers: [&'static str; 7],
    pub leading_blanks: usize,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: HabitId,
    pub name: String,
    pub completed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitListView {
    pub rows: Vec<HabitRow>,
}

/// What the front end should draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Day(DayView),
    Week(WeekView),
    Month(MonthView),
    HabitList(HabitListView),
}

pub fn render_day(habits: &[Habit], date: NaiveDate, current_year: i32) -> DayView {
    let editable = is_editable(date, current_year);
    let entries = if editable {
        active_habits(habits, date)
            .map(|h| DayEntry {
                id: h.id,
                name: h.name.clone(),
                completed: h.is_completed_on(date),
            })
            .collect()
    } else {
        Vec::new()
    };
    DayView {
        title: format!("Daily View - {}", date.format("%B %-d, %Y")),
        date,
        editable,
        entries,
    }
}

pub fn render_week(
    habits: &[Habit],
    date: NaiveDate,
    week_start: WeekStart,
    current_year: i32,
) -> WeekView {
    let days = week_days(date, week_start);
    let (start, end) = (days[0], days[6]);
    let week_number = week_number(date, week_start);
    WeekView {
        title: format!(
            "Weekly View - Week {week_number} ({} - {})",
            start.format("%b %-d"),
            end.format("%b %-d")
        ),
        week_number,
        start,
        end,
        cells: days
            .iter()
            .map(|&d| DayCell::new(habits, d, current_year))
            .collect(),
    }
}

pub fn render_month(habits: &[Habit], date: NaiveDate, current_year: i32) -> MonthView {
    MonthView {
        title: format!("Monthly View - {}", date.format("%B %Y")),
        year: date.year(),
        month: date.month(),
        headers: WEEKDAY_LABELS,
        leading_blanks: leading_blanks(date),
        cells: month_days(date)
            .into_iter()
            .map(|d| DayCell::new(habits, d, current_year))
            .collect(),
    }
}

pub fn render_habit_list(habits: &[Habit]) -> HabitListView {
    HabitListView {
        rows: habits
            .iter()
            .map(|h| HabitRow {
                id: h.id,
                name: h.name.clone(),
                completed_count: h.completed_count(),
            })
            .collect(),
    }
}

/// Project habits and view state into a screen.
///
/// The habit list, when visible, replaces the calendar regardless of `view`.
pub fn render(
    habits: &[Habit],
    state: &ViewState,
    week_start: WeekStart,
    current_year: i32,
) -> Screen {
    if state.habit_list_visible {
        return Screen::HabitList(render_habit_list(habits));
    }
    match state.view {
        ViewMode::Day => Screen::Day(render_day(habits, state.current_date, current_year)),
        ViewMode::Week => Screen::Week(render_week(
            habits,
            state.current_date,
            week_start,
            current_year,
        )),
        ViewMode::Month => Screen::Month(render_month(habits, state.current_date, current_year)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(id: i64, name: &str, created: NaiveDate) -> Habit {
        let at = Local
            .from_local_datetime(&created.and_hms_opt(8, 0, 0).unwrap())
            .single()
            .unwrap()
            .with_timezone(&Utc);
        Habit::new(id, name, at)
    }

    #[test]
    fn view_mode_parses_aliases() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!("m".parse::<ViewMode>().unwrap(), ViewMode::Month);
        assert!("year".parse::<ViewMode>().is_err());
    }

    #[test]
    fn day_view_lists_active_habits_only() {
        let habits = vec![
            habit(1, "Read", date(2026, 3, 1)),
            habit(2, "Walk", date(2026, 3, 10)),
        ];
        let view = render_day(&habits, date(2026, 3, 5), 2026);
        assert_eq!(view.title, "Daily View - March 5, 2026");
        assert!(view.editable);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].name, "Read");
        assert!(!view.entries[0].completed);
    }

    #[test]
    fn day_view_outside_current_year_is_empty() {
        let habits = vec![habit(1, "Read", date(2025, 3, 1))];
        let view = render_day(&habits, date(2025, 12, 31), 2026);
        assert!(!view.editable);
        assert!(view.entries.is_empty());
    }

    #[test]
    fn week_view_disables_cells_across_year_boundary() {
        let habits = vec![habit(1, "Read", date(2025, 12, 1))];
        // Week of 2026-01-01 starts on Sunday 2025-12-28.
        let view = render_week(&habits, date(2026, 1, 1), WeekStart::Sunday, 2026);
        assert_eq!(view.start, date(2025, 12, 28));
        assert_eq!(view.end, date(2026, 1, 3));
        assert_eq!(view.week_number, 1);
        assert_eq!(view.cells.len(), 7);
        assert_eq!(view.cells[0].shade, CellShade::Disabled);
        assert_eq!(view.cells[3].date, date(2025, 12, 31));
        assert!(!view.cells[3].clickable());
        assert_eq!(view.cells[4].shade, CellShade::Pending);
        assert_eq!(view.cells[4].weekday, "Thu");
        assert_eq!(view.title, "Weekly View - Week 1 (Dec 28 - Jan 3)");
    }

    #[test]
    fn month_view_pads_to_first_weekday() {
        // April 2026 starts on a Wednesday.
        let view = render_month(&[], date(2026, 4, 18), 2026);
        assert_eq!(view.leading_blanks, 3);
        assert_eq!(view.cells.len(), 30);
        assert_eq!(view.cells[0].weekday, "Wed");
        assert_eq!(view.title, "Monthly View - April 2026");
        assert!(view.cells.iter().all(|c| c.shade == CellShade::Pending));
    }

    #[test]
    fn habit_list_overrides_calendar() {
        let habits = vec![habit(1, "Read", date(2026, 3, 1))];
        let mut state = ViewState::new(date(2026, 3, 5));
        state.view = ViewMode::Month;
        state.habit_list_visible = true;
        match render(&habits, &state, WeekStart::Sunday, 2026) {
            Screen::HabitList(list) => {
                assert_eq!(list.rows.len(), 1);
                assert_eq!(list.rows[0].completed_count, 0);
            }
            other => panic!("expected habit list, got {other:?}"),
        }
    }
}
