use clap::Args;
use habitual_core::{Clock, Config, HabitId, SystemClock, ToggleOutcome};

use super::{open_store, parse_date, CliResult};

#[derive(Args)]
pub struct ToggleArgs {
    /// Habit id
    pub id: HabitId,
    /// Day to toggle as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

pub fn run(args: ToggleArgs, config: &Config) -> CliResult {
    let mut store = open_store(config)?;
    let day = parse_date(args.date.as_deref())?;

    match store.toggle_on(args.id, day, SystemClock.today()) {
        ToggleOutcome::Completed => println!("{day}: completed"),
        ToggleOutcome::Cleared => println!("{day}: not completed"),
        ToggleOutcome::Locked => {
            println!("{day} is outside the current year; nothing changed");
        }
        ToggleOutcome::UnknownHabit => {
            return Err(format!("no habit with id {}", args.id).into());
        }
    }
    Ok(())
}
