use std::str::FromStr;

use anyhow::anyhow;
use tracing::debug;

use crate::datetime::{CalendarDate, CursorMonth};
use crate::grid::{CalendarGrid, build_grid};
use crate::selection::SelectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    /// One week back.
    Up,
    /// One week forward.
    Down,
}

impl Direction {
    pub fn day_offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up => -7,
            Direction::Down => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Arrow(Direction),
    Enter,
    Space,
    Escape,
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Key::Arrow(Direction::Left)),
            "right" | "arrowright" => Ok(Key::Arrow(Direction::Right)),
            "up" | "arrowup" => Ok(Key::Arrow(Direction::Up)),
            "down" | "arrowdown" => Ok(Key::Arrow(Direction::Down)),
            "enter" | "return" => Ok(Key::Enter),
            "space" | " " => Ok(Key::Space),
            "escape" | "esc" => Ok(Key::Escape),
            other => Err(anyhow!("unknown key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub candidate: CalendarDate,
    pub cursor: CursorMonth,
}

/// Moves the candidate date and shifts the cursor by however many months
/// the candidate left it.
pub fn step(current: CalendarDate, direction: Direction, cursor: CursorMonth) -> Step {
    let candidate = current.add_days(direction.day_offset());
    let cursor = if cursor.contains(candidate) {
        cursor
    } else {
        let delta = cursor.months_until(candidate);
        debug!(%candidate, delta, "focus crossed month boundary");
        cursor.shift(delta)
    };
    Step { candidate, cursor }
}

/// Finds the in-month cell for `day`. `None` is a focus resolution miss.
pub fn resolve_day_of_month(grid: &CalendarGrid, day: u32) -> Option<CalendarDate> {
    let found = grid.current_month_cell(day).map(|cell| cell.date);
    if found.is_none() {
        debug!(day, month = %grid.month, "focus resolution miss; keeping focus");
    }
    found
}

#[tracing::instrument(skip(selection, today))]
pub fn move_focus(
    current: CalendarDate,
    direction: Direction,
    cursor: CursorMonth,
    selection: &SelectionState,
    today: CalendarDate,
) -> (CalendarDate, CursorMonth) {
    let Step { candidate, cursor } = step(current, direction, cursor);
    let grid = build_grid(cursor, selection, Some(current), today);
    let focus = resolve_day_of_month(&grid, candidate.day()).unwrap_or(current);
    (focus, cursor)
}

pub fn page_month(cursor: CursorMonth, delta: i32) -> CursorMonth {
    cursor.shift(delta)
}

pub fn refocus_after_page(grid: &CalendarGrid, selected: &[CalendarDate]) -> Option<CalendarDate> {
    grid.cells()
        .iter()
        .find(|cell| selected.contains(&cell.date))
        .map(|cell| cell.date)
}

/// Initial focus: the 1st of the cursor month, else the grid's first cell.
pub fn initial_focus(grid: &CalendarGrid) -> Option<CalendarDate> {
    grid.find(grid.month.first_day())
        .or_else(|| grid.first_cell())
        .map(|cell| cell.date)
}
