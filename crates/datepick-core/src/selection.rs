use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, trace};

use crate::datetime::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
    Range,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
            SelectionMode::Range => "range",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multiple" | "multi" => Ok(SelectionMode::Multiple),
            "range" => Ok(SelectionMode::Range),
            other => Err(anyhow!(
                "unknown selection mode: {other} (expected single, multiple or range)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notification {
    Change,
    Input,
    Focus,
    Blur,
    Invalid,
}

impl Notification {
    pub fn as_str(self) -> &'static str {
        match self {
            Notification::Change => "change",
            Notification::Input => "input",
            Notification::Focus => "focus",
            Notification::Blur => "blur",
            Notification::Invalid => "invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialValue {
    One(CalendarDate),
    Many(Vec<CalendarDate>),
}

impl From<CalendarDate> for InitialValue {
    fn from(date: CalendarDate) -> Self {
        InitialValue::One(date)
    }
}

impl From<Vec<CalendarDate>> for InitialValue {
    fn from(dates: Vec<CalendarDate>) -> Self {
        InitialValue::Many(dates)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub mode: SelectionMode,
    pub selected_days: Vec<CalendarDate>,
    /// True between the first and second pick of a range.
    pub is_selecting_range: bool,
}

impl SelectionState {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected_days: vec![],
            is_selecting_range: false,
        }
    }

    pub fn first(&self) -> Option<CalendarDate> {
        self.selected_days.first().copied()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.selected_days.contains(&date)
    }

    /// Replaces the value verbatim. Range ordering is the engine's job, not
    /// the setter's.
    pub fn set_value(&mut self, value: InitialValue) {
        self.selected_days = match value {
            InitialValue::One(date) => vec![date],
            InitialValue::Many(dates) => dates,
        };
        if self.selected_days.len() != 1 {
            self.is_selecting_range = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("single mode holds {0} dates; at most one is allowed")]
    SingleOverflow(usize),
    #[error("range mode holds {0} dates; at most two are allowed")]
    RangeOverflow(usize),
    #[error("range endpoints {start} and {end} are out of order")]
    RangeUnsorted {
        start: CalendarDate,
        end: CalendarDate,
    },
    #[error("range pick is in progress outside range mode")]
    StrayRangePick,
}

pub fn check_invariants(state: &SelectionState) -> Result<(), InvariantViolation> {
    let count = state.selected_days.len();
    match state.mode {
        SelectionMode::Single => {
            if count > 1 {
                return Err(InvariantViolation::SingleOverflow(count));
            }
        }
        SelectionMode::Range => {
            if count > 2 {
                return Err(InvariantViolation::RangeOverflow(count));
            }
            if let [start, end] = state.selected_days[..]
                && start > end
            {
                return Err(InvariantViolation::RangeUnsorted { start, end });
            }
        }
        SelectionMode::Multiple => {}
    }

    if state.is_selecting_range && state.mode != SelectionMode::Range {
        return Err(InvariantViolation::StrayRangePick);
    }

    Ok(())
}

fn assert_invariants(state: &SelectionState) {
    let checked = check_invariants(state);
    if let Err(err) = &checked {
        error!(error = %err, mode = %state.mode, "selection invariant violated");
    }
    debug_assert!(checked.is_ok(), "selection invariant violated: {checked:?}");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub state: SelectionState,
    pub did_change: bool,
    pub notifications: Vec<Notification>,
}

impl Activation {
    fn settle(before: &SelectionState, state: SelectionState, touched: bool) -> Self {
        assert_invariants(&state);
        let did_change = before.selected_days != state.selected_days;
        let notifications = if did_change {
            vec![Notification::Change, Notification::Input]
        } else if touched {
            vec![Notification::Input]
        } else {
            vec![]
        };
        Self {
            state,
            did_change,
            notifications,
        }
    }
}

pub fn initialize(initial: impl Into<InitialValue>, mode: SelectionMode) -> SelectionState {
    let mut state = SelectionState::new(mode);
    state.set_value(initial.into());
    debug!(
        mode = %mode,
        selected = state.selected_days.len(),
        "initialized selection"
    );
    state
}

#[tracing::instrument(skip(state), fields(mode = %state.mode))]
pub fn activate(state: &SelectionState, date: CalendarDate) -> Activation {
    let mut next = state.clone();

    match state.mode {
        SelectionMode::Single => {
            next.selected_days = vec![date];
        }
        SelectionMode::Multiple => {
            // Duplicates are kept; only remove() takes a day back out.
            next.selected_days.push(date);
        }
        SelectionMode::Range => match (state.is_selecting_range, state.first()) {
            (true, Some(start)) => {
                let mut pair = vec![start, date];
                pair.sort();
                next.selected_days = pair;
                next.is_selecting_range = false;
            }
            _ => {
                next.selected_days = vec![date];
                next.is_selecting_range = true;
            }
        },
    }

    trace!(
        selected = ?next.selected_days,
        picking = next.is_selecting_range,
        "applied activation"
    );
    Activation::settle(state, next, true)
}

#[tracing::instrument(skip(state), fields(mode = %state.mode))]
pub fn remove(state: &SelectionState, date: CalendarDate) -> Activation {
    let mut next = state.clone();
    next.selected_days.retain(|day| *day != date);
    finish_removal(state, next)
}

/// Drops exactly the entry at `index`, so duplicate chips in multiple mode
/// can be dismissed one at a time.
#[tracing::instrument(skip(state), fields(mode = %state.mode))]
pub fn remove_at(state: &SelectionState, index: usize) -> Activation {
    let mut next = state.clone();
    if index < next.selected_days.len() {
        next.selected_days.remove(index);
    } else {
        debug!(
            index,
            len = state.selected_days.len(),
            "removal index out of bounds"
        );
    }
    finish_removal(state, next)
}

fn finish_removal(before: &SelectionState, mut next: SelectionState) -> Activation {
    if next.selected_days.is_empty() {
        next.is_selecting_range = false;
    }
    Activation::settle(before, next, false)
}

pub fn arm_range_pick(state: &SelectionState) -> SelectionState {
    let mut next = state.clone();
    if next.mode == SelectionMode::Range && next.selected_days.len() == 1 {
        next.is_selecting_range = true;
    }
    next
}
