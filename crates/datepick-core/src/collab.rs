use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::FormatConfig;
use crate::datetime::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Display,
    DayOfMonth,
    MonthYear,
    MonthName,
}

pub trait DateLocalizer {
    fn format_date(&self, date: CalendarDate, style: DateStyle) -> String;

    fn parse_date(&self, text: &str) -> Option<CalendarDate>;

    fn weekday_label(&self, weekday: Weekday) -> String;
}

#[derive(Debug, Clone)]
pub struct ChronoLocalizer {
    display: String,
    parse: Vec<String>,
}

impl ChronoLocalizer {
    pub fn new(format: &FormatConfig) -> Self {
        Self {
            display: format.display.clone(),
            parse: format.parse.clone(),
        }
    }
}

impl Default for ChronoLocalizer {
    fn default() -> Self {
        Self::new(&FormatConfig::default())
    }
}

impl DateLocalizer for ChronoLocalizer {
    fn format_date(&self, date: CalendarDate, style: DateStyle) -> String {
        let pattern = match style {
            DateStyle::Display => self.display.as_str(),
            DateStyle::DayOfMonth => "%-d",
            DateStyle::MonthYear => "%B %Y",
            DateStyle::MonthName => "%B",
        };
        date.naive().format(pattern).to_string()
    }

    fn parse_date(&self, text: &str) -> Option<CalendarDate> {
        let token = text.trim();
        if token.is_empty() {
            return None;
        }

        std::iter::once(self.display.as_str())
            .chain(self.parse.iter().map(String::as_str))
            .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
            .map(CalendarDate::from_naive)
            .or_else(|| {
                trace!(token, "no parse format matched");
                None
            })
    }

    fn weekday_label(&self, weekday: Weekday) -> String {
        match weekday {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

pub trait FormControl {
    fn update_validity(&mut self, validity: Validity);

    /// An empty message restores validity.
    fn set_custom_validity(&mut self, message: &str);

    fn report_validity(&mut self) -> bool;

    fn validity(&self) -> Validity;
}

#[derive(Debug, Clone, Default)]
pub struct FormValidity {
    computed: Option<String>,
    custom: Option<String>,
    reports: usize,
}

impl FormValidity {
    pub fn reports(&self) -> usize {
        self.reports
    }
}

impl FormControl for FormValidity {
    fn update_validity(&mut self, validity: Validity) {
        debug!(?validity, "validity updated");
        self.computed = match validity {
            Validity::Valid => None,
            Validity::Invalid(message) => Some(message),
        };
    }

    fn set_custom_validity(&mut self, message: &str) {
        self.custom = if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        };
    }

    fn report_validity(&mut self) -> bool {
        self.reports += 1;
        self.validity().is_valid()
    }

    fn validity(&self) -> Validity {
        match self.custom.as_ref().or(self.computed.as_ref()) {
            Some(message) => Validity::Invalid(message.clone()),
            None => Validity::Valid,
        }
    }
}

pub trait Overlay {
    fn show(&mut self);

    fn hide(&mut self);

    fn is_open(&self) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct PopupOverlay {
    open: bool,
}

impl Overlay for PopupOverlay {
    fn show(&mut self) {
        self.open = true;
    }

    fn hide(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
