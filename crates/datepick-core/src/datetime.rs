use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Zero-based month (January = 0).
    pub fn month0(self) -> u32 {
        self.0.month0()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub fn weekday_from_sunday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn add_days(self, days: i64) -> Self {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Self)
            .unwrap_or(self)
    }

    pub fn first_of_month(self) -> Self {
        first_day_of_month(self.year(), self.month())
    }

    pub fn last_of_month(self) -> Self {
        last_day_of_month(self.year(), self.month())
    }

    pub fn days_in_month(self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    pub fn same_month(self, other: Self) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT).map(Self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Strips the time of day, keeping the calendar day as seen in `dt`'s own
/// offset.
#[must_use]
pub fn normalize<Z: TimeZone>(dt: &DateTime<Z>) -> CalendarDate {
    CalendarDate(dt.date_naive())
}

pub fn same_day(a: CalendarDate, b: CalendarDate) -> bool {
    a == b
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorMonth(CalendarDate);

impl CursorMonth {
    pub fn containing(date: CalendarDate) -> Self {
        Self(date.first_of_month())
    }

    pub fn first_day(self) -> CalendarDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        self.0.same_month(date)
    }

    // Day stays at 1 so short months never overflow.
    pub fn shift(self, months: i32) -> Self {
        let mut year = self.year();
        let mut month = self.month() as i32 + months;

        while month < 1 {
            month += 12;
            year = year.saturating_sub(1);
        }
        while month > 12 {
            month -= 12;
            year = year.saturating_add(1);
        }

        Self(first_day_of_month(year, month as u32))
    }

    pub fn months_until(self, date: CalendarDate) -> i32 {
        (date.year() - self.year()) * 12 + (date.month() as i32 - self.month() as i32)
    }
}

impl fmt::Display for CursorMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.naive().format("%Y-%m"))
    }
}

pub fn first_day_of_month(year: i32, month: u32) -> CalendarDate {
    CalendarDate(NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN))
}

pub fn last_day_of_month(year: i32, month: u32) -> CalendarDate {
    let (next_year, next_month) = if month >= 12 {
        (year.saturating_add(1), 1_u32)
    } else {
        (year, month + 1)
    };
    first_day_of_month(next_year, next_month).add_days(-1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).day()
}

pub fn resolve_timezone(raw: Option<&str>, source: &str) -> Tz {
    raw.and_then(|value| parse_timezone(value, source))
        .unwrap_or(chrono_tz::UTC)
}

fn parse_timezone(raw: &str, source: &str) -> Option<Tz> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!(source, "timezone source was empty");
        return None;
    }

    match trimmed.parse::<Tz>() {
        Ok(tz) => {
            tracing::debug!(source, timezone = %trimmed, "configured picker timezone");
            Some(tz)
        }
        Err(err) => {
            tracing::error!(
                source,
                timezone = %trimmed,
                error = %err,
                "failed to parse timezone id"
            );
            None
        }
    }
}

pub fn today_in(timezone: Tz) -> CalendarDate {
    today_at(Utc::now(), timezone)
}

pub fn today_at(now: DateTime<Utc>, timezone: Tz) -> CalendarDate {
    normalize(&now.with_timezone(&timezone))
}
