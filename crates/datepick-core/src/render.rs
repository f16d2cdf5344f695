use std::io::{self, IsTerminal, Write};

use chrono::Datelike;
use unicode_width::UnicodeWidthStr;

use crate::collab::{DateLocalizer, DateStyle, Validity};
use crate::config::PickerConfig;
use crate::datetime::CalendarDate;
use crate::grid::{CalendarGrid, DayCell, weekday_labels};
use crate::picker::DatePicker;
use crate::selection::Notification;

const CELL_WIDTH: usize = 4;
const MONTH_GAP: &str = "   ";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &PickerConfig) -> Self {
        Self { color: cfg.color }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_calendar(&mut self, picker: &DatePicker) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_calendar(&mut out, picker)
    }

    pub fn write_calendar<W: Write>(&self, mut writer: W, picker: &DatePicker) -> anyhow::Result<()> {
        let localizer = picker.localizer();
        let focused = picker.focused();

        let blocks = picker
            .grids()
            .iter()
            .map(|grid| self.grid_lines(grid, localizer, focused))
            .collect::<Vec<_>>();
        for line in side_by_side(&blocks) {
            writeln!(writer, "{}", line.trim_end())?;
        }
        writeln!(writer)?;

        let selection = picker.selection();
        let mode = if selection.is_selecting_range {
            format!("{} (picking)", selection.mode)
        } else {
            selection.mode.to_string()
        };
        let focus = focused
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        let validity = match picker.validity() {
            Validity::Valid => "valid".to_string(),
            Validity::Invalid(message) => self.paint(&format!("invalid: {message}"), "31"),
        };

        let cursor = picker.cursor().first_day();
        let previous = localizer.format_date(cursor.add_days(-1), DateStyle::MonthName);
        let next = localizer.format_date(cursor.last_of_month().add_days(1), DateStyle::MonthName);

        writeln!(writer, "paging    < {previous} | {next} >")?;
        writeln!(writer, "value     {}", picker.input_text())?;
        writeln!(writer, "mode      {mode}")?;
        writeln!(writer, "focus     {focus}")?;
        writeln!(writer, "validity  {validity}")?;
        writeln!(
            writer,
            "overlay   {}",
            if picker.is_open() { "open" } else { "closed" }
        )?;
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub fn print_snapshot_json(&mut self, picker: &DatePicker) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &picker.snapshot())?;
        writeln!(out)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, events))]
    pub fn print_event_log(&mut self, events: &[(String, Vec<Notification>)]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let headers = vec!["Event".to_string(), "Notifications".to_string()];
        let rows = events
            .iter()
            .map(|(event, notes)| {
                let notes = if notes.is_empty() {
                    "-".to_string()
                } else {
                    notes
                        .iter()
                        .map(|note| self.paint(note.as_str(), "33"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                vec![event.clone(), notes]
            })
            .collect();
        write_table(&mut out, headers, rows)
    }

    #[tracing::instrument(skip(self, dates, localizer))]
    pub fn print_parsed(
        &mut self,
        dates: &[CalendarDate],
        localizer: &dyn DateLocalizer,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let headers = vec![
            "#".to_string(),
            "Date".to_string(),
            "Display".to_string(),
            "Weekday".to_string(),
        ];
        let rows = dates
            .iter()
            .enumerate()
            .map(|(idx, date)| {
                vec![
                    self.paint(&idx.to_string(), "33"),
                    date.to_string(),
                    localizer.format_date(*date, DateStyle::Display),
                    localizer.weekday_label(date.naive().weekday()),
                ]
            })
            .collect();
        write_table(&mut out, headers, rows)
    }

    fn grid_lines(
        &self,
        grid: &CalendarGrid,
        localizer: &dyn DateLocalizer,
        focused: Option<CalendarDate>,
    ) -> Vec<String> {
        let width = CELL_WIDTH * crate::grid::DAYS_PER_WEEK;
        let title = localizer.format_date(grid.month.first_day(), DateStyle::MonthYear);
        let title_width = UnicodeWidthStr::width(title.as_str());
        let indent = width.saturating_sub(title_width) / 2;

        let mut lines = vec![format!("{}{}", " ".repeat(indent), self.paint(&title, "1"))];
        lines.push(
            weekday_labels(localizer)
                .iter()
                .map(|label| pad_left(label, CELL_WIDTH))
                .collect(),
        );
        for week in grid.weeks() {
            lines.push(
                week.iter()
                    .map(|cell| self.cell_text(cell, localizer, focused))
                    .collect(),
            );
        }
        lines
    }

    fn cell_text(
        &self,
        cell: &DayCell,
        localizer: &dyn DateLocalizer,
        focused: Option<CalendarDate>,
    ) -> String {
        let is_focused = focused == Some(cell.date);
        let left = if is_focused {
            '>'
        } else if cell.is_selected {
            '['
        } else if cell.is_in_range {
            '('
        } else {
            ' '
        };
        let right = if cell.is_selected {
            ']'
        } else if cell.is_in_range {
            ')'
        } else if cell.is_today {
            '*'
        } else {
            ' '
        };

        let mut codes = Vec::new();
        if !cell.is_current_month {
            codes.push("2");
        }
        if is_focused {
            codes.push("1");
        }
        if cell.is_today {
            codes.push("4");
        }
        if cell.is_selected {
            codes.push("7");
        } else if cell.is_in_range {
            codes.push("36");
        }

        let day = localizer.format_date(cell.date, DateStyle::DayOfMonth);
        let text = format!("{left}{}{right}", pad_left(&day, 2));
        if codes.is_empty() {
            text
        } else {
            self.paint(&text, &codes.join(";"))
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn side_by_side(blocks: &[Vec<String>]) -> Vec<String> {
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let width = CELL_WIDTH * crate::grid::DAYS_PER_WEEK;

    (0..height)
        .map(|row| {
            blocks
                .iter()
                .map(|block| {
                    let line = block.get(row).map(String::as_str).unwrap_or("");
                    let visible = UnicodeWidthStr::width(strip_ansi(line).as_str());
                    format!("{line}{}", " ".repeat(width.saturating_sub(visible)))
                })
                .collect::<Vec<_>>()
                .join(MONTH_GAP)
        })
        .collect()
}

fn pad_left(text: &str, width: usize) -> String {
    let visible = UnicodeWidthStr::width(strip_ansi(text).as_str());
    format!("{}{text}", " ".repeat(width.saturating_sub(visible)))
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
