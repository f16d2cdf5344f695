use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::collab::{
    ChronoLocalizer, DateLocalizer, FormControl, FormValidity, Overlay, PopupOverlay, Validity,
};
use crate::config::PickerConfig;
use crate::datetime::{CalendarDate, CursorMonth};
use crate::focus::{self, Direction, Key};
use crate::grid::{CalendarGrid, build_dual, build_grid};
use crate::selection::{
    self, Activation, InitialValue, Notification, SelectionMode, SelectionState,
};
use crate::value_sync::{self, EditKind, EditOutcome, ParseError};

const VALUE_MISSING: &str = "Please select a date.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusOwner {
    Input,
    Trigger,
    Calendar,
    PreviousMonth,
    NextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthControl {
    Previous,
    Next,
}

impl MonthControl {
    fn delta(self) -> i32 {
        match self {
            MonthControl::Previous => -1,
            MonthControl::Next => 1,
        }
    }
}

/// Focus work that has to wait until the new grid is on screen. Each task
/// reads live state when it runs, so nothing is ever stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterPaint {
    FocusDayOfMonth(u32),
    FocusSelectedDay,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickerSnapshot {
    pub mode: SelectionMode,
    pub selected_days: Vec<CalendarDate>,
    pub is_selecting_range: bool,
    pub cursor_month: CursorMonth,
    pub focused: Option<CalendarDate>,
    pub focus_owner: FocusOwner,
    pub text: String,
    pub validity: Validity,
    pub overlay_open: bool,
    pub grids: Vec<CalendarGrid>,
}

pub struct DatePicker {
    config: PickerConfig,
    localizer: Box<dyn DateLocalizer>,
    overlay: Box<dyn Overlay>,
    form: Box<dyn FormControl>,
    today: CalendarDate,
    selection: SelectionState,
    cursor: CursorMonth,
    focused: Option<CalendarDate>,
    input_text: String,
    has_focus: bool,
    focus_owner: FocusOwner,
    after_paint: Vec<AfterPaint>,
    torn_down: bool,
}

impl DatePicker {
    pub fn new(
        config: PickerConfig,
        initial: impl Into<InitialValue>,
        today: CalendarDate,
    ) -> anyhow::Result<Self> {
        let localizer = ChronoLocalizer::new(&config.format);
        Self::with_collaborators(
            config,
            initial,
            today,
            Box::new(localizer),
            Box::new(PopupOverlay::default()),
            Box::new(FormValidity::default()),
        )
    }

    #[instrument(skip_all, fields(mode = %config.mode, %today))]
    pub fn with_collaborators(
        config: PickerConfig,
        initial: impl Into<InitialValue>,
        today: CalendarDate,
        localizer: Box<dyn DateLocalizer>,
        overlay: Box<dyn Overlay>,
        form: Box<dyn FormControl>,
    ) -> anyhow::Result<Self> {
        let selection = selection::initialize(initial, config.mode);
        value_sync::check_shape(config.mode, &selection.selected_days)
            .context("initial value does not fit the selection mode")?;

        let view = value_sync::derive_from_value(&selection, localizer.as_ref(), today);
        let mut picker = Self {
            config,
            localizer,
            overlay,
            form,
            today,
            selection,
            cursor: view.cursor_month,
            focused: None,
            input_text: view.input_text,
            has_focus: false,
            focus_owner: FocusOwner::Input,
            after_paint: vec![],
            torn_down: false,
        };
        picker.focused = focus::initial_focus(&picker.grid());
        picker.refresh_validity(None);

        info!(
            cursor = %picker.cursor,
            selected = picker.selection.selected_days.len(),
            "date picker initialized"
        );
        Ok(picker)
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn cursor(&self) -> CursorMonth {
        self.cursor
    }

    pub fn focused(&self) -> Option<CalendarDate> {
        self.focused
    }

    pub fn focus_owner(&self) -> FocusOwner {
        self.focus_owner
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn validity(&self) -> Validity {
        self.form.validity()
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn localizer(&self) -> &dyn DateLocalizer {
        self.localizer.as_ref()
    }

    pub fn pending_after_paint(&self) -> &[AfterPaint] {
        &self.after_paint
    }

    pub fn grid(&self) -> CalendarGrid {
        build_grid(self.cursor, &self.selection, self.focused, self.today)
    }

    pub fn grids(&self) -> Vec<CalendarGrid> {
        if self.config.dual {
            build_dual(self.cursor, &self.selection, self.focused, self.today).into()
        } else {
            vec![self.grid()]
        }
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            mode: self.selection.mode,
            selected_days: self.selection.selected_days.clone(),
            is_selecting_range: self.selection.is_selecting_range,
            cursor_month: self.cursor,
            focused: self.focused,
            focus_owner: self.focus_owner,
            text: self.input_text.clone(),
            validity: self.validity(),
            overlay_open: self.is_open(),
            grids: self.grids(),
        }
    }

    #[instrument(skip(self))]
    pub fn day_pressed(&mut self, date: CalendarDate) -> Vec<Notification> {
        if self.config.disabled {
            debug!("picker disabled; ignoring day press");
            return vec![];
        }
        self.focused = Some(date);
        self.focus_owner = FocusOwner::Calendar;
        let activation = selection::activate(&self.selection, date);
        self.commit(activation)
    }

    pub fn day_hovered(&mut self, date: CalendarDate) {
        if self.selection.mode == SelectionMode::Range && self.selection.is_selecting_range {
            trace!(%date, "hover preview");
            self.focused = Some(date);
        }
    }

    #[instrument(skip(self))]
    pub fn key_down(&mut self, key: Key) -> Vec<Notification> {
        match key {
            Key::Escape => {
                self.overlay.hide();
                self.focus_owner = FocusOwner::Trigger;
                vec![]
            }
            Key::Enter | Key::Space => {
                if self.config.disabled {
                    return vec![];
                }
                match self.focused {
                    Some(date) => {
                        let activation = selection::activate(&self.selection, date);
                        self.commit(activation)
                    }
                    None => vec![],
                }
            }
            Key::Arrow(direction) => {
                self.arrow(direction);
                vec![]
            }
        }
    }

    fn arrow(&mut self, direction: Direction) {
        let current = self.focused.unwrap_or(self.cursor.first_day());
        let step = focus::step(current, direction, self.cursor);
        if step.cursor != self.cursor {
            debug!(from = %self.cursor, to = %step.cursor, "keyboard paged calendar");
        }
        self.cursor = step.cursor;
        self.focus_owner = FocusOwner::Calendar;
        self.after_paint
            .push(AfterPaint::FocusDayOfMonth(step.candidate.day()));
    }

    pub fn previous_month(&mut self) {
        self.page(-1);
        self.after_paint.push(AfterPaint::FocusSelectedDay);
    }

    pub fn next_month(&mut self) {
        self.page(1);
        self.after_paint.push(AfterPaint::FocusSelectedDay);
    }

    pub fn month_control_key(&mut self, control: MonthControl, key: Key) {
        match key {
            Key::Enter | Key::Space => self.page(control.delta()),
            Key::Arrow(Direction::Down) => {
                self.page(1);
                self.focus_owner = FocusOwner::NextMonth;
            }
            Key::Arrow(Direction::Up) => {
                self.page(-1);
                self.focus_owner = FocusOwner::PreviousMonth;
            }
            _ => {}
        }
    }

    fn page(&mut self, delta: i32) {
        self.cursor = focus::page_month(self.cursor, delta);
        debug!(cursor = %self.cursor, delta, "paged calendar");
    }

    /// Committed text edit (blur or Enter).
    #[instrument(skip(self))]
    pub fn text_changed(&mut self, text: &str) -> Vec<Notification> {
        self.text_edit(text, EditKind::Committed)
    }

    #[instrument(skip(self))]
    pub fn text_input(&mut self, text: &str) -> Vec<Notification> {
        self.text_edit(text, EditKind::Live)
    }

    fn text_edit(&mut self, text: &str, kind: EditKind) -> Vec<Notification> {
        if self.config.disabled {
            return vec![];
        }
        self.focus_owner = FocusOwner::Input;

        match value_sync::apply_edit(text, kind, self.selection.mode, self.localizer.as_ref()) {
            EditOutcome::Applied(dates) => {
                let before = self.selection.selected_days.clone();
                self.selection.set_value(InitialValue::Many(dates));
                let view = value_sync::derive_from_value(
                    &self.selection,
                    self.localizer.as_ref(),
                    self.today,
                );
                self.cursor = view.cursor_month;
                self.input_text = match kind {
                    EditKind::Committed => view.input_text,
                    EditKind::Live => text.to_string(),
                };
                self.refresh_validity(None);

                if before != self.selection.selected_days {
                    vec![Notification::Change, Notification::Input]
                } else {
                    vec![Notification::Input]
                }
            }
            EditOutcome::Pending => {
                self.input_text = text.to_string();
                vec![]
            }
            EditOutcome::Rejected(err) => {
                self.input_text = text.to_string();
                self.refresh_validity(Some(&err));
                vec![Notification::Invalid]
            }
        }
    }

    #[instrument(skip(self))]
    pub fn tag_removed(&mut self, index: usize) -> Vec<Notification> {
        if self.config.disabled {
            return vec![];
        }
        let activation = selection::remove_at(&self.selection, index);
        self.commit(activation)
    }

    #[instrument(skip(self))]
    pub fn remove_day(&mut self, date: CalendarDate) -> Vec<Notification> {
        if self.config.disabled {
            return vec![];
        }
        let activation = selection::remove(&self.selection, date);
        self.commit(activation)
    }

    pub fn open(&mut self) {
        self.overlay.show();
        self.overlay_shown();
    }

    pub fn close(&mut self) {
        self.overlay.hide();
    }

    pub fn overlay_shown(&mut self) {
        self.selection = selection::arm_range_pick(&self.selection);
    }

    pub fn focus_in(&mut self) -> Vec<Notification> {
        self.has_focus = true;
        vec![Notification::Focus]
    }

    pub fn focus_out(&mut self) -> Vec<Notification> {
        self.has_focus = false;
        vec![Notification::Blur]
    }

    pub fn after_paint(&mut self) {
        if self.torn_down {
            trace!("after-paint after teardown; nothing to do");
            return;
        }

        for task in std::mem::take(&mut self.after_paint) {
            let grid = self.grid();
            let target = match task {
                AfterPaint::FocusDayOfMonth(day) => focus::resolve_day_of_month(&grid, day),
                AfterPaint::FocusSelectedDay => {
                    focus::refocus_after_page(&grid, &self.selection.selected_days)
                }
            };
            if let Some(date) = target {
                trace!(?task, %date, "focus placed");
                self.focused = Some(date);
            }
        }
    }

    pub fn teardown(&mut self) {
        debug!("date picker torn down");
        self.torn_down = true;
        self.after_paint.clear();
    }

    pub fn report_validity(&mut self) -> (bool, Vec<Notification>) {
        if !self.config.inline && !self.validity().is_valid() {
            self.overlay.show();
            let notifications = if self.config.disabled {
                vec![]
            } else {
                vec![Notification::Invalid]
            };
            return (self.form.report_validity(), notifications);
        }
        (self.form.report_validity(), vec![])
    }

    pub fn set_custom_validity(&mut self, message: &str) {
        self.form.set_custom_validity(message);
    }

    fn commit(&mut self, activation: Activation) -> Vec<Notification> {
        let Activation {
            state,
            did_change,
            notifications,
        } = activation;
        trace!(did_change, "committing selection");
        self.selection = state;
        // Text always follows the value, even when the value is unchanged.
        self.input_text =
            value_sync::to_text(&self.selection.selected_days, self.localizer.as_ref());
        self.refresh_validity(None);
        notifications
    }

    fn refresh_validity(&mut self, error: Option<&ParseError>) {
        let validity = match error {
            Some(err) => Validity::Invalid(err.to_string()),
            None if self.config.required && self.selection.selected_days.is_empty() => {
                Validity::Invalid(VALUE_MISSING.to_string())
            }
            None => Validity::Valid,
        };
        self.form.update_validity(validity);
    }
}

#[cfg(test)]
mod tests {
    use super::{AfterPaint, DatePicker, FocusOwner, MonthControl};
    use crate::collab::Validity;
    use crate::config::PickerConfig;
    use crate::datetime::{CalendarDate, CursorMonth};
    use crate::focus::{Direction, Key};
    use crate::selection::{Notification, SelectionMode};

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).expect("valid date")
    }

    fn month(year: i32, month: u32) -> CursorMonth {
        CursorMonth::containing(date(year, month, 1))
    }

    fn picker(mode: SelectionMode, initial: Vec<CalendarDate>) -> DatePicker {
        let config = PickerConfig {
            mode,
            ..PickerConfig::default()
        };
        DatePicker::new(config, initial, date(2024, 3, 15)).expect("picker")
    }

    #[test]
    fn initializes_cursor_focus_and_text() {
        let p = picker(SelectionMode::Single, vec![date(2024, 5, 20)]);
        assert_eq!(p.cursor(), month(2024, 5));
        assert_eq!(p.focused(), Some(date(2024, 5, 1)));
        assert_eq!(p.input_text(), "05/20/2024");
        assert_eq!(p.validity(), Validity::Valid);
    }

    #[test]
    fn empty_value_opens_on_today() {
        let p = picker(SelectionMode::Multiple, vec![]);
        assert_eq!(p.cursor(), month(2024, 3));
        assert_eq!(p.input_text(), "");
    }

    #[test]
    fn rejects_initial_value_that_breaks_mode() {
        let config = PickerConfig {
            mode: SelectionMode::Single,
            ..PickerConfig::default()
        };
        assert!(DatePicker::new(config, vec![date(2024, 1, 1), date(2024, 1, 2)], date(2024, 1, 1)).is_err());
    }

    #[test]
    fn range_press_then_hover_then_press() {
        let mut p = picker(SelectionMode::Range, vec![]);
        assert_eq!(
            p.day_pressed(date(2024, 3, 10)),
            vec![Notification::Change, Notification::Input]
        );
        assert!(p.selection().is_selecting_range);

        p.day_hovered(date(2024, 3, 12));
        let grid = p.grid();
        assert!(grid.find(date(2024, 3, 11)).expect("cell").is_in_range);
        assert!(grid.find(date(2024, 3, 12)).expect("cell").is_selected);

        p.day_pressed(date(2024, 3, 5));
        assert_eq!(
            p.selection().selected_days,
            vec![date(2024, 3, 5), date(2024, 3, 10)]
        );
        assert_eq!(p.input_text(), "03/05/2024 – 03/10/2024");
    }

    #[test]
    fn hover_is_ignored_outside_range_pick() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 3, 1)]);
        let before = p.focused();
        p.day_hovered(date(2024, 3, 20));
        assert_eq!(p.focused(), before);
    }

    #[test]
    fn arrow_across_month_defers_focus() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 1, 31)]);
        p.day_pressed(date(2024, 1, 31));
        p.key_down(Key::Arrow(Direction::Right));

        assert_eq!(p.cursor(), month(2024, 2));
        assert_eq!(p.focused(), Some(date(2024, 1, 31)));
        assert_eq!(p.pending_after_paint(), &[AfterPaint::FocusDayOfMonth(1)]);

        p.after_paint();
        assert_eq!(p.focused(), Some(date(2024, 2, 1)));
        assert!(p.pending_after_paint().is_empty());
    }

    #[test]
    fn enter_activates_focused_day() {
        let mut p = picker(SelectionMode::Multiple, vec![]);
        p.key_down(Key::Arrow(Direction::Down));
        p.after_paint();
        assert_eq!(p.focused(), Some(date(2024, 3, 8)));
        let notes = p.key_down(Key::Enter);
        assert_eq!(notes, vec![Notification::Change, Notification::Input]);
        assert_eq!(p.selection().selected_days, vec![date(2024, 3, 8)]);
    }

    #[test]
    fn escape_closes_and_returns_to_trigger() {
        let mut p = picker(SelectionMode::Single, vec![]);
        p.open();
        assert!(p.is_open());
        p.key_down(Key::Escape);
        assert!(!p.is_open());
        assert_eq!(p.focus_owner(), FocusOwner::Trigger);
    }

    #[test]
    fn paging_refocuses_selected_day_when_visible() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 4, 12)]);
        p.previous_month();
        p.after_paint();
        assert_eq!(p.cursor(), month(2024, 3));
        // April 12 is not on the March grid, so focus stays put.
        assert_eq!(p.focused(), Some(date(2024, 4, 1)));

        p.next_month();
        p.after_paint();
        assert_eq!(p.focused(), Some(date(2024, 4, 12)));
    }

    #[test]
    fn month_button_group_keys_page_and_move_focus() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 12, 1)]);
        p.month_control_key(MonthControl::Previous, Key::Arrow(Direction::Down));
        assert_eq!(p.cursor(), month(2025, 1));
        assert_eq!(p.focus_owner(), FocusOwner::NextMonth);

        p.month_control_key(MonthControl::Next, Key::Enter);
        assert_eq!(p.cursor(), month(2025, 2));

        p.month_control_key(MonthControl::Next, Key::Arrow(Direction::Up));
        assert_eq!(p.cursor(), month(2025, 1));
        assert_eq!(p.focus_owner(), FocusOwner::PreviousMonth);
    }

    #[test]
    fn invalid_commit_keeps_value_and_flags_validity() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 3, 10)]);
        let notes = p.text_changed("13/40/2024");
        assert_eq!(notes, vec![Notification::Invalid]);
        assert_eq!(p.selection().selected_days, vec![date(2024, 3, 10)]);
        assert!(!p.validity().is_valid());
        assert_eq!(p.input_text(), "13/40/2024");

        p.text_changed("2024-03-11");
        assert_eq!(p.selection().selected_days, vec![date(2024, 3, 11)]);
        assert_eq!(p.input_text(), "03/11/2024");
        assert!(p.validity().is_valid());
    }

    #[test]
    fn reactivating_same_day_restores_text_after_bad_commit() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 3, 10)]);
        p.text_changed("13/40/2024");
        assert_eq!(p.input_text(), "13/40/2024");

        assert_eq!(p.day_pressed(date(2024, 3, 10)), vec![Notification::Input]);
        assert_eq!(p.selection().selected_days, vec![date(2024, 3, 10)]);
        assert_eq!(p.input_text(), "03/10/2024");
        assert!(p.validity().is_valid());
    }

    #[test]
    fn live_input_applies_only_complete_text() {
        let mut p = picker(SelectionMode::Range, vec![date(2024, 3, 10)]);
        assert!(p.text_input("03/05/2024 – 03/1").is_empty());
        assert_eq!(p.selection().selected_days, vec![date(2024, 3, 10)]);
        assert_eq!(p.input_text(), "03/05/2024 – 03/1");

        let notes = p.text_input("03/05/2024 – 04/12/2024");
        assert_eq!(notes, vec![Notification::Change, Notification::Input]);
        assert_eq!(
            p.selection().selected_days,
            vec![date(2024, 3, 5), date(2024, 4, 12)]
        );
        assert_eq!(p.cursor(), month(2024, 3));
    }

    #[test]
    fn tag_removal_dismisses_one_chip() {
        let mut p = picker(SelectionMode::Multiple, vec![date(2024, 1, 1), date(2024, 1, 2)]);
        p.tag_removed(0);
        assert_eq!(p.selection().selected_days, vec![date(2024, 1, 2)]);
        assert_eq!(p.input_text(), "01/02/2024");
    }

    #[test]
    fn disabled_picker_ignores_edits() {
        let config = PickerConfig {
            mode: SelectionMode::Multiple,
            disabled: true,
            ..PickerConfig::default()
        };
        let mut p = DatePicker::new(config, vec![date(2024, 1, 1)], date(2024, 1, 1)).expect("picker");
        assert!(p.day_pressed(date(2024, 1, 5)).is_empty());
        assert!(p.tag_removed(0).is_empty());
        assert!(p.text_changed("01/09/2024").is_empty());
        assert_eq!(p.selection().selected_days, vec![date(2024, 1, 1)]);
    }

    #[test]
    fn opening_rearms_half_finished_range() {
        let mut p = picker(SelectionMode::Range, vec![date(2024, 3, 10)]);
        assert!(!p.selection().is_selecting_range);
        p.open();
        assert!(p.selection().is_selecting_range);
        p.day_pressed(date(2024, 3, 20));
        assert_eq!(
            p.selection().selected_days,
            vec![date(2024, 3, 10), date(2024, 3, 20)]
        );
    }

    #[test]
    fn required_picker_reports_missing_value() {
        let config = PickerConfig {
            mode: SelectionMode::Multiple,
            required: true,
            ..PickerConfig::default()
        };
        let mut p = DatePicker::new(config, vec![date(2024, 1, 1)], date(2024, 1, 1)).expect("picker");
        assert!(p.validity().is_valid());
        p.tag_removed(0);
        assert!(!p.validity().is_valid());

        let (valid, notes) = p.report_validity();
        assert!(!valid);
        assert_eq!(notes, vec![Notification::Invalid]);
        assert!(p.is_open());
    }

    #[test]
    fn deferred_focus_reads_cursor_at_paint_time() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 1, 31)]);
        p.day_pressed(date(2024, 1, 31));
        p.key_down(Key::Arrow(Direction::Right));
        assert_eq!(p.cursor(), month(2024, 2));

        p.month_control_key(MonthControl::Next, Key::Enter);
        assert_eq!(p.cursor(), month(2024, 3));

        p.after_paint();
        assert_eq!(p.focused(), Some(date(2024, 3, 1)));
    }

    #[test]
    fn focus_stays_when_day_is_missing_from_painted_month() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 1, 15)]);
        assert_eq!(p.focused(), Some(date(2024, 1, 1)));

        // Queues day 31, but November is on screen by the time it runs.
        p.key_down(Key::Arrow(Direction::Left));
        assert_eq!(p.cursor(), month(2023, 12));
        p.previous_month();

        p.after_paint();
        assert_eq!(p.cursor(), month(2023, 11));
        assert_eq!(p.focused(), Some(date(2024, 1, 1)));
        assert!(p.pending_after_paint().is_empty());
    }

    #[test]
    fn custom_validity_overrides_and_clears() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 3, 10)]);
        p.set_custom_validity("weekdays only");
        assert_eq!(p.validity(), Validity::Invalid("weekdays only".to_string()));

        let (valid, notes) = p.report_validity();
        assert!(!valid);
        assert_eq!(notes, vec![Notification::Invalid]);
        assert!(p.is_open());

        p.set_custom_validity("");
        assert!(p.validity().is_valid());
        assert_eq!(p.report_validity(), (true, vec![]));
    }

    #[test]
    fn after_paint_is_noop_after_teardown() {
        let mut p = picker(SelectionMode::Single, vec![date(2024, 3, 31)]);
        p.day_pressed(date(2024, 3, 31));
        p.key_down(Key::Arrow(Direction::Right));
        p.teardown();
        p.after_paint();
        assert_eq!(p.focused(), Some(date(2024, 3, 31)));
        assert!(p.pending_after_paint().is_empty());
    }

    #[test]
    fn dual_layout_renders_two_months() {
        let config = PickerConfig {
            dual: true,
            ..PickerConfig::default()
        };
        let p = DatePicker::new(config, date(2024, 12, 24), date(2024, 1, 1)).expect("picker");
        let grids = p.grids();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[1].month, month(2025, 1));
    }

    #[test]
    fn focus_events_toggle_has_focus() {
        let mut p = picker(SelectionMode::Single, vec![]);
        assert_eq!(p.focus_in(), vec![Notification::Focus]);
        assert!(p.has_focus());
        assert_eq!(p.focus_out(), vec![Notification::Blur]);
        assert!(!p.has_focus());
    }
}
