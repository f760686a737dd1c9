//! # Habitual Core Library
//!
//! This library provides the core logic for the Habitual habit tracker.
//! Every operation is available through the `habitual` CLI, which is a thin
//! front end over the same library.
//!
//! ## Architecture
//!
//! - **Habit Store**: the ordered habit sequence, rewritten to a key-value
//!   blob store on every mutation
//! - **Calendar View Controller**: derives day/week/month screens from the
//!   store plus a date cursor and routes user actions back into the store
//! - **Storage**: SQLite or JSON-file blob backends and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitStore`]: Habit collection and persistence
//! - [`CalendarController`]: View state machine
//! - [`BlobStore`]: Trait for persistence backends
//! - [`Config`]: Application configuration management

pub mod calendar;
pub mod clock;
pub mod completion;
pub mod controller;
pub mod error;
pub mod events;
pub mod habit;
pub mod storage;
pub mod store;
pub mod view;

pub use calendar::{is_editable, WeekStart};
pub use clock::{Clock, FixedClock, SystemClock};
pub use completion::{active_habits, completion_status};
pub use controller::{Action, CalendarController};
pub use error::{ConfigError, CoreError, PersistenceError};
pub use events::Event;
pub use habit::{DayKey, Habit, HabitId};
pub use storage::{
    open_backend, BlobStore, Config, JsonFileBlobStore, MemoryBlobStore, SqliteBlobStore,
    StorageBackend,
};
pub use store::{HabitStore, ToggleOutcome};
pub use view::{CellShade, DayCell, Screen, ViewMode, ViewState};
