use clap::Subcommand;
use habitual_core::{Clock, Config, HabitId, SystemClock};

use super::{open_store, CliResult};
use crate::render;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
    },
    /// List all habits with their completed-day counts
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Delete a habit
    Delete {
        /// Habit id
        id: HabitId,
    },
}

pub fn run(action: HabitAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        HabitAction::Add { name } => {
            let id = store
                .add(&name, SystemClock.now())
                .ok_or("habit name cannot be empty")?;
            println!("Habit added: {id}");
            if let Some(habit) = store.get(id) {
                println!("{}", serde_json::to_string_pretty(habit)?);
            }
        }
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.habits())?);
            } else {
                let list = habitual_core::view::render_habit_list(store.habits());
                print!("{}", render::habit_list(&list));
            }
        }
        HabitAction::Delete { id } => {
            if store.delete(id) {
                println!("Habit deleted: {id}");
            } else {
                eprintln!("no habit with id {id}; nothing deleted");
            }
        }
    }
    Ok(())
}
