//! Plain-text drawing of controller screens.

use std::fmt::Write;

use habitual_core::view::{DayView, HabitListView, MonthView, WeekView};
use habitual_core::{CellShade, DayCell, Screen};

pub fn screen(screen: &Screen) -> String {
    match screen {
        Screen::Day(view) => day(view),
        Screen::Week(view) => week(view),
        Screen::Month(view) => month(view),
        Screen::HabitList(view) => habit_list(view),
    }
}

fn mark(cell: &DayCell) -> char {
    match cell.shade {
        CellShade::Completed => '*',
        CellShade::Pending => ' ',
        CellShade::Disabled => '-',
    }
}

pub fn day(view: &DayView) -> String {
    let mut out = format!("{}\n", view.title);
    if !view.editable {
        out.push_str("  (outside the current year)\n");
    } else if view.entries.is_empty() {
        out.push_str("  no habits yet\n");
    }
    for entry in &view.entries {
        let check = if entry.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{check}] {}  (id {})", entry.name, entry.id);
    }
    out
}

pub fn week(view: &WeekView) -> String {
    let mut out = format!("{}\n", view.title);
    for cell in &view.cells {
        let state = match cell.shade {
            CellShade::Completed => "[x]",
            CellShade::Pending => "[ ]",
            CellShade::Disabled => " - ",
        };
        let _ = writeln!(out, "  {} {:>2} {state}  {}", cell.weekday, cell.day_number, cell.date);
    }
    out
}

pub fn month(view: &MonthView) -> String {
    let mut out = format!("{}\n", view.title);
    for header in view.headers {
        let _ = write!(out, "{header:>4}");
    }
    out.push('\n');

    let mut column = 0;
    for _ in 0..view.leading_blanks {
        out.push_str("    ");
        column += 1;
    }
    for cell in &view.cells {
        let _ = write!(out, " {:>2}{}", cell.day_number, mark(cell));
        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }
    out.push_str("  * completed   - outside current year\n");
    out
}

pub fn habit_list(view: &HabitListView) -> String {
    let mut out = String::from("Habit List\n");
    if view.rows.is_empty() {
        out.push_str("  no habits yet\n");
    }
    for row in &view.rows {
        let _ = writeln!(
            out,
            "  {} ({} times)  [id {}]",
            row.name, row.completed_count, row.id
        );
    }
    out
}
