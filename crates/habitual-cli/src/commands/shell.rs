//! Interactive calendar session.
//!
//! Reads one command per line, applies it to the controller and redraws the
//! screen. Input ends on `quit` or end of stream.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use habitual_core::{Action, BlobStore, CalendarController, Clock, Config, HabitId, ViewMode};

use super::{open_controller, CliResult};
use crate::render;

const HELP: &str = "\
commands:
  day | week | month     switch calendar view
  habits                 show/hide the habit list
  prev | next | today    move the date cursor
  open <YYYY-MM-DD>      open a day (current year only)
  draft <text>           set the new-habit name
  add [name]             add a habit (uses the draft when no name is given)
  toggle <id>            toggle a habit on the current day
  delete <id>            delete a habit
  help                   show this help
  quit                   leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Apply(Vec<Action>),
    Help,
    Quit,
    Empty,
}

fn parse_id(arg: &str) -> Result<HabitId, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("invalid habit id '{arg}'"))
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let actions = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Empty),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "day" => vec![Action::SelectView(ViewMode::Day)],
        "week" => vec![Action::SelectView(ViewMode::Week)],
        "month" => vec![Action::SelectView(ViewMode::Month)],
        "habits" => vec![Action::ToggleHabitList],
        "prev" | "p" => vec![Action::Previous],
        "next" | "n" => vec![Action::Next],
        "today" => vec![Action::GoToday],
        "open" => {
            let date = NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .map_err(|_| format!("invalid date '{rest}' (expected YYYY-MM-DD)"))?;
            vec![Action::OpenDay(date)]
        }
        "draft" => vec![Action::EditDraft(rest.to_string())],
        "add" if rest.is_empty() => vec![Action::AddHabit],
        "add" => vec![Action::EditDraft(rest.to_string()), Action::AddHabit],
        "toggle" | "t" => vec![Action::ToggleHabit(parse_id(rest)?)],
        "delete" | "del" => vec![Action::DeleteHabit(parse_id(rest)?)],
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Command::Apply(actions))
}

/// Drive `controller` from `input`, drawing to `output`.
fn session<B, C, R, W>(
    controller: &mut CalendarController<B, C>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    B: BlobStore,
    C: Clock,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render::screen(&controller.render()))?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        match parse_command(&line?) {
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(Command::Apply(actions)) => {
                for action in actions {
                    if let Some(event) = controller.dispatch(action) {
                        tracing::debug!(?event, "shell action applied");
                    }
                }
                write!(output, "{}", render::screen(&controller.render()))?;
            }
            Err(message) => writeln!(output, "{message}")?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

pub fn run(config: &Config) -> CliResult {
    let mut controller = open_controller(config)?;
    let stdin = io::stdin();
    session(&mut controller, stdin.lock(), io::stdout().lock())?;
    Ok(())
}
