//! Habit store: the in-memory habit sequence and its persisted blob.
//!
//! Every mutation rewrites the whole sequence to the [`BlobStore`]. Read and
//! write failures are logged and swallowed; the in-memory sequence remains
//! the source of truth for the session.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::is_editable;
use crate::error::PersistenceError;
use crate::habit::{Habit, HabitId};
use crate::storage::{BlobStore, HABITS_KEY};

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The day was added to the habit's completed days.
    Completed,
    /// The day was removed from the habit's completed days.
    Cleared,
    /// The day lies outside the current year; nothing changed.
    Locked,
    /// No habit with that id; nothing changed.
    UnknownHabit,
}

impl ToggleOutcome {
    pub fn changed(self) -> bool {
        matches!(self, ToggleOutcome::Completed | ToggleOutcome::Cleared)
    }
}

/// Ordered habit collection synchronized to a blob store.
pub struct HabitStore<B> {
    backend: B,
    habits: Vec<Habit>,
}

impl<B: BlobStore> HabitStore<B> {
    /// Open the store and load whatever the backend holds.
    pub fn open(backend: B) -> Self {
        let mut store = Self {
            backend,
            habits: Vec::new(),
        };
        store.habits = store.load();
        store
    }

    /// Read the persisted habit sequence.
    ///
    /// A missing, unreadable or malformed blob yields an empty sequence.
    pub fn load(&self) -> Vec<Habit> {
        match self.try_load() {
            Ok(habits) => habits,
            Err(e) => {
                warn!(error = %e, "failed to load habits, starting empty");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Habit>, PersistenceError> {
        let Some(blob) = self.backend.read(HABITS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&blob).map_err(|source| PersistenceError::Decode {
            key: HABITS_KEY.to_string(),
            source,
        })
    }

    /// Write the full habit sequence. Failures are logged, never returned.
    pub fn save(&mut self) {
        if let Err(e) = self.try_save() {
            warn!(error = %e, count = self.habits.len(), "failed to save habits");
        }
    }

    fn try_save(&mut self) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(&self.habits).map_err(|e| PersistenceError::Write {
            key: HABITS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.backend.write(HABITS_KEY, &blob)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a new habit named `name` (trimmed), created at `now`.
    ///
    /// Returns `None` without touching the store when the trimmed name is
    /// empty.
    pub fn add(&mut self, name: &str, now: DateTime<Utc>) -> Option<HabitId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut id = now.timestamp_millis();
        if self.get(id).is_some() {
            id = self.habits.iter().map(|h| h.id).max().unwrap_or(id) + 1;
        }

        self.habits.push(Habit::new(id, name, now));
        debug!(id, name, "habit added");
        self.save();
        Some(id)
    }

    /// Remove the habit with `id`. Returns whether a habit was removed.
    pub fn delete(&mut self, id: HabitId) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return false;
        }
        debug!(id, "habit deleted");
        self.save();
        true
    }

    /// Flip completion of `day` for habit `id`.
    ///
    /// Only days inside `current_year` can be toggled.
    pub fn toggle(&mut self, id: HabitId, day: NaiveDate, current_year: i32) -> ToggleOutcome {
        if !is_editable(day, current_year) {
            debug!(id, %day, current_year, "toggle outside current year ignored");
            return ToggleOutcome::Locked;
        }
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return ToggleOutcome::UnknownHabit;
        };

        let outcome = if habit.flip(day) {
            ToggleOutcome::Completed
        } else {
            ToggleOutcome::Cleared
        };
        debug!(id, %day, ?outcome, "habit toggled");
        self.save();
        outcome
    }

    /// Toggle using `today`'s year as the year gate.
    pub fn toggle_on(&mut self, id: HabitId, day: NaiveDate, today: NaiveDate) -> ToggleOutcome {
        self.toggle(id, day, today.year())
    }
}
