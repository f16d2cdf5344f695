use thiserror::Error;
use tracing::{debug, trace};

use crate::collab::{DateLocalizer, DateStyle};
use crate::datetime::{CalendarDate, CursorMonth};
use crate::selection::{SelectionMode, SelectionState};

pub const DELIMITER: &str = " – ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("not a valid date: {segment:?}")]
    InvalidDate { segment: String },
    #[error("{mode} selection cannot hold {count} dates")]
    Shape { mode: SelectionMode, count: usize },
    #[error("range ends before it starts")]
    RangeOrder,
}

pub fn to_text(selected_days: &[CalendarDate], localizer: &dyn DateLocalizer) -> String {
    selected_days
        .iter()
        .map(|day| localizer.format_date(*day, DateStyle::Display))
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Parses delimited text. One bad segment rejects the whole text; blank text
/// is an empty selection.
pub fn from_text(
    text: &str,
    localizer: &dyn DateLocalizer,
) -> Result<Vec<CalendarDate>, ParseError> {
    text.split(DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            localizer
                .parse_date(segment)
                .ok_or_else(|| ParseError::InvalidDate {
                    segment: segment.to_string(),
                })
        })
        .collect()
}

pub fn check_shape(mode: SelectionMode, dates: &[CalendarDate]) -> Result<(), ParseError> {
    let count = dates.len();
    match mode {
        SelectionMode::Single if count > 1 => Err(ParseError::Shape { mode, count }),
        SelectionMode::Range if count > 2 => Err(ParseError::Shape { mode, count }),
        SelectionMode::Range if count == 2 && dates[0] > dates[1] => Err(ParseError::RangeOrder),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Blur or Enter.
    Committed,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied(Vec<CalendarDate>),
    /// Live input still being typed; nothing changes, validity untouched.
    Pending,
    Rejected(ParseError),
}

#[tracing::instrument(skip(localizer))]
pub fn apply_edit(
    text: &str,
    kind: EditKind,
    mode: SelectionMode,
    localizer: &dyn DateLocalizer,
) -> EditOutcome {
    if kind == EditKind::Live && text.trim().is_empty() {
        return EditOutcome::Pending;
    }

    let parsed = from_text(text, localizer).and_then(|dates| {
        check_shape(mode, &dates)?;
        Ok(dates)
    });

    match (parsed, kind) {
        (Ok(dates), _) => {
            trace!(count = dates.len(), "text edit parsed");
            EditOutcome::Applied(dates)
        }
        (Err(err), EditKind::Live) => {
            trace!(error = %err, "tolerating partial input");
            EditOutcome::Pending
        }
        (Err(err), EditKind::Committed) => {
            debug!(error = %err, "rejected committed text");
            EditOutcome::Rejected(err)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    pub input_text: String,
    pub cursor_month: CursorMonth,
}

pub fn derive_from_value(
    state: &SelectionState,
    localizer: &dyn DateLocalizer,
    today: CalendarDate,
) -> DerivedView {
    DerivedView {
        input_text: to_text(&state.selected_days, localizer),
        cursor_month: CursorMonth::containing(state.first().unwrap_or(today)),
    }
}
