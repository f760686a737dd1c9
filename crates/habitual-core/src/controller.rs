//! Calendar view controller.
//!
//! Routes user actions into view-state changes or habit store calls and
//! renders the current [`Screen`]. Every action is processed synchronously
//! and completely before the next one.
//!
//! ## State
//!
//! ```text
//! view: Day <-> Week <-> Month   (free transitions via SelectView)
//! Week/Month cell click (OpenDay) -> Day
//! habit_list_visible: independent toggle, hides the calendar when true
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = CalendarController::new(store, SystemClock, WeekStart::Sunday);
//! controller.dispatch(Action::EditDraft("Read".into()));
//! controller.dispatch(Action::AddHabit);
//! let screen = controller.render();
//! ```

use chrono::NaiveDate;

use crate::calendar::{is_editable, shift, WeekStart};
use crate::clock::Clock;
use crate::events::Event;
use crate::habit::HabitId;
use crate::storage::BlobStore;
use crate::store::HabitStore;
use crate::view::{render, Screen, ViewMode, ViewState};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectView(ViewMode),
    ToggleHabitList,
    EditDraft(String),
    /// Add a habit named after the current draft.
    AddHabit,
    DeleteHabit(HabitId),
    /// Toggle a habit on the cursor date. Ignored while the habit list is
    /// shown or before the habit was created.
    ToggleHabit(HabitId),
    Previous,
    Next,
    /// Day cell click in the week or month grid.
    OpenDay(NaiveDate),
    /// Move the cursor to an arbitrary date without changing the view.
    GoTo(NaiveDate),
    GoToday,
}

pub struct CalendarController<B, C> {
    store: HabitStore<B>,
    state: ViewState,
    clock: C,
    week_start: WeekStart,
}

impl<B: BlobStore, C: Clock> CalendarController<B, C> {
    /// Controller showing the day view for today.
    pub fn new(store: HabitStore<B>, clock: C, week_start: WeekStart) -> Self {
        let state = ViewState::new(clock.today());
        Self {
            store,
            state,
            clock,
            week_start,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &HabitStore<B> {
        &self.store
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn render(&self) -> Screen {
        render(
            self.store.habits(),
            &self.state,
            self.week_start,
            self.clock.current_year(),
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one action. Returns `None` when the action changed nothing.
    pub fn dispatch(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::SelectView(view) => {
                if self.state.view == view {
                    return None;
                }
                self.state.view = view;
                Some(Event::ViewChanged {
                    view,
                    date: self.state.current_date,
                })
            }
            Action::ToggleHabitList => {
                self.state.habit_list_visible = !self.state.habit_list_visible;
                Some(Event::HabitListToggled {
                    visible: self.state.habit_list_visible,
                })
            }
            Action::EditDraft(draft) => {
                if self.state.new_habit_draft == draft {
                    return None;
                }
                self.state.new_habit_draft = draft.clone();
                Some(Event::DraftEdited { draft })
            }
            Action::AddHabit => {
                let now = self.clock.now();
                let id = self.store.add(&self.state.new_habit_draft, now)?;
                self.state.new_habit_draft.clear();
                let name = self.store.get(id)?.name.clone();
                Some(Event::HabitAdded { id, name, at: now })
            }
            Action::DeleteHabit(id) => {
                if !self.store.delete(id) {
                    return None;
                }
                Some(Event::HabitDeleted {
                    id,
                    at: self.clock.now(),
                })
            }
            Action::ToggleHabit(id) => {
                let day = self.state.current_date;
                // Only habits listed on the visible day view can be toggled.
                if self.state.habit_list_visible || !self.store.get(id)?.is_active_on(day) {
                    return None;
                }
                let outcome = self.store.toggle_on(id, day, self.clock.today());
                if !outcome.changed() {
                    return None;
                }
                Some(Event::HabitToggled {
                    id,
                    day,
                    outcome,
                    at: self.clock.now(),
                })
            }
            Action::Previous => self.move_cursor(-1),
            Action::Next => self.move_cursor(1),
            Action::OpenDay(date) => {
                if !is_editable(date, self.clock.current_year()) {
                    return None;
                }
                self.state.current_date = date;
                self.state.view = ViewMode::Day;
                Some(Event::ViewChanged {
                    view: ViewMode::Day,
                    date,
                })
            }
            Action::GoTo(date) => self.set_date(date),
            Action::GoToday => self.set_date(self.clock.today()),
        }
    }

    fn move_cursor(&mut self, steps: i32) -> Option<Event> {
        self.set_date(shift(self.state.current_date, self.state.view, steps))
    }

    fn set_date(&mut self, date: NaiveDate) -> Option<Event> {
        if self.state.current_date == date {
            return None;
        }
        self.state.current_date = date;
        Some(Event::DateChanged { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryBlobStore;
    use crate::store::ToggleOutcome;
    use crate::view::CellShade;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller(today: NaiveDate) -> CalendarController<MemoryBlobStore, FixedClock> {
        CalendarController::new(
            HabitStore::open(MemoryBlobStore::new()),
            FixedClock::at_local(today, 12),
            WeekStart::Sunday,
        )
    }

    fn add(c: &mut CalendarController<MemoryBlobStore, FixedClock>, name: &str) -> HabitId {
        c.dispatch(Action::EditDraft(name.into()));
        match c.dispatch(Action::AddHabit) {
            Some(Event::HabitAdded { id, .. }) => id,
            other => panic!("expected HabitAdded, got {other:?}"),
        }
    }

    #[test]
    fn starts_on_day_view_for_today() {
        let c = controller(date(2026, 10, 16));
        assert_eq!(c.state().view, ViewMode::Day);
        assert_eq!(c.state().current_date, date(2026, 10, 16));
        assert!(!c.state().habit_list_visible);
    }

    #[test]
    fn add_clears_draft_only_on_success() {
        let mut c = controller(date(2026, 10, 16));
        c.dispatch(Action::EditDraft("   ".into()));
        assert!(c.dispatch(Action::AddHabit).is_none());
        assert_eq!(c.state().new_habit_draft, "   ");

        add(&mut c, "Read");
        assert!(c.state().new_habit_draft.is_empty());
        assert_eq!(c.store().len(), 1);
    }

    #[test]
    fn navigation_steps_follow_view_mode() {
        let mut c = controller(date(2026, 10, 16));
        c.dispatch(Action::Next);
        assert_eq!(c.state().current_date, date(2026, 10, 17));
        c.dispatch(Action::SelectView(ViewMode::Week));
        c.dispatch(Action::Previous);
        assert_eq!(c.state().current_date, date(2026, 10, 10));
        c.dispatch(Action::SelectView(ViewMode::Month));
        c.dispatch(Action::Next);
        assert_eq!(c.state().current_date, date(2026, 11, 10));
        c.dispatch(Action::GoToday);
        assert_eq!(c.state().current_date, date(2026, 10, 16));
    }

    #[test]
    fn open_day_drills_into_day_view() {
        let mut c = controller(date(2026, 10, 16));
        c.dispatch(Action::SelectView(ViewMode::Month));
        let event = c.dispatch(Action::OpenDay(date(2026, 10, 3)));
        assert_eq!(
            event,
            Some(Event::ViewChanged {
                view: ViewMode::Day,
                date: date(2026, 10, 3)
            })
        );
        assert_eq!(c.state().view, ViewMode::Day);
    }

    #[test]
    fn open_day_outside_current_year_is_ignored() {
        let mut c = controller(date(2026, 1, 2));
        c.dispatch(Action::SelectView(ViewMode::Week));
        assert!(c.dispatch(Action::OpenDay(date(2025, 12, 30))).is_none());
        assert_eq!(c.state().view, ViewMode::Week);
        assert_eq!(c.state().current_date, date(2026, 1, 2));
    }

    #[test]
    fn toggle_uses_cursor_date_and_year_gate() {
        let mut c = controller(date(2026, 1, 1));
        let id = add(&mut c, "Read");
        match c.dispatch(Action::ToggleHabit(id)) {
            Some(Event::HabitToggled { outcome, day, .. }) => {
                assert_eq!(outcome, ToggleOutcome::Completed);
                assert_eq!(day, date(2026, 1, 1));
            }
            other => panic!("expected HabitToggled, got {other:?}"),
        }
        c.dispatch(Action::Previous);
        assert!(c.dispatch(Action::ToggleHabit(id)).is_none());
    }

    #[test]
    fn habit_list_preserves_underlying_view() {
        let mut c = controller(date(2026, 10, 16));
        c.dispatch(Action::SelectView(ViewMode::Week));
        c.dispatch(Action::ToggleHabitList);
        assert!(matches!(c.render(), Screen::HabitList(_)));
        c.dispatch(Action::ToggleHabitList);
        assert!(matches!(c.render(), Screen::Week(_)));
    }

    #[test]
    fn go_to_keeps_view_and_ignores_year_gate() {
        let mut c = controller(date(2026, 10, 16));
        c.dispatch(Action::SelectView(ViewMode::Month));
        let event = c.dispatch(Action::GoTo(date(2024, 2, 29)));
        assert_eq!(event, Some(Event::DateChanged { date: date(2024, 2, 29) }));
        assert_eq!(c.state().view, ViewMode::Month);
        assert!(c.dispatch(Action::GoTo(date(2024, 2, 29))).is_none());
    }

    #[test]
    fn delete_unknown_habit_emits_nothing() {
        let mut c = controller(date(2026, 10, 16));
        add(&mut c, "Read");
        assert!(c.dispatch(Action::DeleteHabit(1)).is_none());
        assert_eq!(c.store().len(), 1);
    }

    #[test]
    fn year_rollover_locks_previous_year() {
        let new_years_eve = date(2026, 12, 31);
        let mut c = controller(new_years_eve);
        let id = add(&mut c, "Read");
        assert!(c.dispatch(Action::ToggleHabit(id)).is_some());

        let next_year = FixedClock::at_local(date(2027, 1, 1), 12).now();
        c.clock_mut().set(next_year);

        assert_eq!(c.state().current_date, new_years_eve);
        assert!(c.dispatch(Action::ToggleHabit(id)).is_none());
        assert!(c.store().get(id).unwrap().is_completed_on(new_years_eve));

        c.dispatch(Action::SelectView(ViewMode::Week));
        let Screen::Week(week) = c.render() else {
            panic!("expected week view");
        };
        let cell = week
            .cells
            .iter()
            .find(|cell| cell.date == new_years_eve)
            .unwrap();
        assert_eq!(cell.shade, CellShade::Disabled);
        let jan_first = week
            .cells
            .iter()
            .find(|cell| cell.date == date(2027, 1, 1))
            .unwrap();
        assert_eq!(jan_first.shade, CellShade::Pending);
    }

    #[test]
    fn toggle_ignores_days_before_creation() {
        let mut c = controller(date(2026, 10, 16));
        let id = add(&mut c, "Read");
        c.dispatch(Action::Previous);
        assert!(c.dispatch(Action::ToggleHabit(id)).is_none());
        assert_eq!(c.store().get(id).unwrap().completed_count(), 0);
    }

    #[test]
    fn toggle_ignored_while_habit_list_is_shown() {
        let mut c = controller(date(2026, 10, 16));
        let id = add(&mut c, "Read");
        c.dispatch(Action::ToggleHabitList);
        assert!(c.dispatch(Action::ToggleHabit(id)).is_none());
        assert_eq!(c.store().get(id).unwrap().completed_count(), 0);

        c.dispatch(Action::ToggleHabitList);
        assert!(c.dispatch(Action::ToggleHabit(id)).is_some());
    }
}
