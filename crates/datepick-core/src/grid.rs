use chrono::Weekday;
use serde::Serialize;
use tracing::trace;

use crate::collab::DateLocalizer;
use crate::datetime::{CalendarDate, CursorMonth, same_day};
use crate::selection::{SelectionMode, SelectionState};

pub const DAYS_PER_WEEK: usize = 7;

const SUNDAY_FIRST: [Weekday; DAYS_PER_WEEK] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_in_range: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub week_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub month: CursorMonth,
    cells: Vec<DayCell>,
}

impl CalendarGrid {
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn week_count(&self) -> usize {
        self.cells.len() / DAYS_PER_WEEK
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn first_cell(&self) -> Option<&DayCell> {
        self.cells.first()
    }

    pub fn find(&self, date: CalendarDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    /// The in-month cell showing `day`, never a spillover cell with the same
    /// number.
    pub fn current_month_cell(&self, day: u32) -> Option<&DayCell> {
        self.cells
            .iter()
            .find(|cell| cell.is_current_month && cell.date.day() == day)
    }
}

/// Inclusive shading bounds, ascending.
fn range_endpoints(
    selection: &SelectionState,
    focused: Option<CalendarDate>,
) -> Option<(CalendarDate, CalendarDate)> {
    if selection.mode != SelectionMode::Range {
        return None;
    }

    match selection.selected_days[..] {
        [a, b] => Some((a.min(b), a.max(b))),
        [start] if selection.is_selecting_range => {
            let hover = focused.unwrap_or(start);
            Some((start.min(hover), start.max(hover)))
        }
        _ => None,
    }
}

pub fn build_grid(
    cursor: CursorMonth,
    selection: &SelectionState,
    focused: Option<CalendarDate>,
    today: CalendarDate,
) -> CalendarGrid {
    let first = cursor.first_day();
    let last = first.last_of_month();
    let first_weekday = first.weekday_from_sunday() as usize;
    let last_weekday = last.weekday_from_sunday() as usize;

    let total_days = first_weekday + first.days_in_month() as usize + (6 - last_weekday);
    let weeks_needed = total_days.div_ceil(DAYS_PER_WEEK);

    let endpoints = range_endpoints(selection, focused);
    let range_start = selection.selected_days.first().copied();
    let range_end = selection.selected_days.get(1).copied();
    let previewing = selection.mode == SelectionMode::Range && selection.is_selecting_range;

    let cells = (0..weeks_needed * DAYS_PER_WEEK)
        .map(|index| {
            let date = first.add_days(index as i64 - first_weekday as i64);
            let is_in_range = endpoints
                .map(|(start, end)| start <= date && date <= end)
                .unwrap_or(false);
            let is_selected = selection.contains(date) || (previewing && focused == Some(date));

            DayCell {
                date,
                is_current_month: cursor.contains(date),
                is_today: same_day(date, today),
                is_selected,
                is_in_range,
                is_range_start: is_in_range && range_start == Some(date),
                is_range_end: is_in_range && range_end == Some(date),
                week_index: index / DAYS_PER_WEEK,
            }
        })
        .collect::<Vec<_>>();

    trace!(
        month = %cursor,
        weeks = weeks_needed,
        ?endpoints,
        "built calendar grid"
    );

    CalendarGrid {
        month: cursor,
        cells,
    }
}

/// Grids for the cursor month and the month after it.
pub fn build_dual(
    cursor: CursorMonth,
    selection: &SelectionState,
    focused: Option<CalendarDate>,
    today: CalendarDate,
) -> [CalendarGrid; 2] {
    [
        build_grid(cursor, selection, focused, today),
        build_grid(cursor.shift(1), selection, focused, today),
    ]
}

pub fn weekday_labels(localizer: &dyn DateLocalizer) -> Vec<String> {
    SUNDAY_FIRST
        .iter()
        .map(|weekday| localizer.weekday_label(*weekday))
        .collect()
}
