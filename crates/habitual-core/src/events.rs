use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::HabitId;
use crate::store::ToggleOutcome;
use crate::view::ViewMode;

/// Every effective state change in the controller produces an Event.
/// No-op actions produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    HabitAdded {
        id: HabitId,
        name: String,
        at: DateTime<Utc>,
    },
    HabitDeleted {
        id: HabitId,
        at: DateTime<Utc>,
    },
    HabitToggled {
        id: HabitId,
        day: NaiveDate,
        outcome: ToggleOutcome,
        at: DateTime<Utc>,
    },
    ViewChanged {
        view: ViewMode,
        date: NaiveDate,
    },
    DateChanged {
        date: NaiveDate,
    },
    HabitListToggled {
        visible: bool,
    },
    DraftEdited {
        draft: String,
    },
}
