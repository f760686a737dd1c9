pub mod config;
pub mod habit;
pub mod shell;
pub mod toggle;
pub mod view;

use chrono::NaiveDate;
use habitual_core::{
    open_backend, BlobStore, CalendarController, Clock, Config, HabitStore, SystemClock,
};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the habit store on the configured backend.
pub fn open_store(config: &Config) -> CliResult<HabitStore<Box<dyn BlobStore>>> {
    Ok(HabitStore::open(open_backend(config)?))
}

pub fn open_controller(
    config: &Config,
) -> CliResult<CalendarController<Box<dyn BlobStore>, SystemClock>> {
    Ok(CalendarController::new(
        open_store(config)?,
        SystemClock,
        config.calendar.week_start,
    ))
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date(arg: Option<&str>) -> CliResult<NaiveDate> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{raw}' (expected YYYY-MM-DD): {e}").into()),
        None => Ok(SystemClock.today()),
    }
}
