use clap::{Args, ValueEnum};
use habitual_core::{active_habits, completion_status, Action, Config, ViewMode};
use serde::Serialize;

use super::{open_controller, open_store, parse_date, CliResult};
use crate::render;

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewKind {
    Day,
    Week,
    Month,
    /// Habit list with completed-day counts
    Habits,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Which view to render
    #[arg(value_enum, default_value = "day")]
    pub kind: ViewKind,
    /// Date the view is centred on, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Day to inspect, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DayStatus {
    date: chrono::NaiveDate,
    completed: bool,
    active_habits: usize,
    done_habits: usize,
}

pub fn run(args: ViewArgs, config: &Config) -> CliResult {
    let mut controller = open_controller(config)?;
    let date = parse_date(args.date.as_deref())?;

    controller.dispatch(Action::GoTo(date));
    match args.kind {
        ViewKind::Day => {
            controller.dispatch(Action::SelectView(ViewMode::Day));
        }
        ViewKind::Week => {
            controller.dispatch(Action::SelectView(ViewMode::Week));
        }
        ViewKind::Month => {
            controller.dispatch(Action::SelectView(ViewMode::Month));
        }
        ViewKind::Habits => {
            controller.dispatch(Action::ToggleHabitList);
        }
    }

    let screen = controller.render();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&screen)?);
    } else {
        print!("{}", render::screen(&screen));
    }
    Ok(())
}

pub fn status(args: StatusArgs, config: &Config) -> CliResult {
    let store = open_store(config)?;
    let date = parse_date(args.date.as_deref())?;

    let active: Vec<_> = active_habits(store.habits(), date).collect();
    let status = DayStatus {
        date,
        completed: completion_status(store.habits(), date),
        active_habits: active.len(),
        done_habits: active.iter().filter(|h| h.is_completed_on(date)).count(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let label = if status.completed {
            "completed"
        } else {
            "not completed"
        };
        println!(
            "{}: {label} ({}/{} habits done)",
            status.date, status.done_habits, status.active_habits
        );
    }
    Ok(())
}
