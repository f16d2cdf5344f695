use std::fs;

use datepick_core::collab::{ChronoLocalizer, FormValidity, PopupOverlay};
use datepick_core::config::PickerConfig;
use datepick_core::datetime::{CalendarDate, CursorMonth};
use datepick_core::focus::{Direction, Key, page_month};
use datepick_core::picker::DatePicker;
use datepick_core::selection::{Notification, SelectionMode, activate, initialize, remove};
use datepick_core::value_sync::{from_text, to_text};
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).expect("valid date")
}

fn month(year: i32, month: u32) -> CursorMonth {
    CursorMonth::containing(date(year, month, 1))
}

#[test]
fn range_and_multiple_scenarios_through_public_api() {
    let state = initialize(Vec::new(), SelectionMode::Range);
    let first = activate(&state, date(2024, 3, 10));
    assert_eq!(first.state.selected_days, vec![date(2024, 3, 10)]);
    assert!(first.state.is_selecting_range);

    let second = activate(&first.state, date(2024, 3, 5));
    assert_eq!(
        second.state.selected_days,
        vec![date(2024, 3, 5), date(2024, 3, 10)]
    );
    assert!(!second.state.is_selecting_range);

    let multi = initialize(Vec::new(), SelectionMode::Multiple);
    let multi = activate(&multi, date(2024, 1, 1)).state;
    let multi = activate(&multi, date(2024, 1, 2)).state;
    let multi = remove(&multi, date(2024, 1, 1)).state;
    assert_eq!(multi.selected_days, vec![date(2024, 1, 2)]);

    let localizer = ChronoLocalizer::default();
    let text = to_text(&second.state.selected_days, &localizer);
    assert_eq!(
        from_text(&text, &localizer).expect("parse"),
        second.state.selected_days
    );

    assert_eq!(page_month(month(2024, 12), 1), month(2025, 1));
}

#[test]
fn picker_session_keyboard_and_text() {
    let config = PickerConfig {
        mode: SelectionMode::Single,
        ..PickerConfig::default()
    };
    let mut picker = DatePicker::with_collaborators(
        config,
        date(2024, 3, 10),
        date(2024, 3, 15),
        Box::new(ChronoLocalizer::default()),
        Box::new(PopupOverlay::default()),
        Box::new(FormValidity::default()),
    )
    .expect("picker");

    assert_eq!(picker.focus_in(), vec![Notification::Focus]);
    picker.open();

    // Focus starts on March 1; Left leaves the month.
    picker.key_down(Key::Arrow(Direction::Left));
    assert_eq!(picker.cursor(), month(2024, 2));
    picker.after_paint();
    assert_eq!(picker.focused(), Some(date(2024, 2, 29)));

    let notes = picker.key_down(Key::Space);
    assert_eq!(notes, vec![Notification::Change, Notification::Input]);
    assert_eq!(picker.selection().selected_days, vec![date(2024, 2, 29)]);
    assert_eq!(picker.input_text(), "02/29/2024");

    // Same date again still announces input.
    assert_eq!(picker.key_down(Key::Enter), vec![Notification::Input]);

    assert_eq!(picker.text_changed("13/40/2024"), vec![Notification::Invalid]);
    assert_eq!(picker.selection().selected_days, vec![date(2024, 2, 29)]);
    assert!(!picker.validity().is_valid());

    picker.key_down(Key::Escape);
    assert!(!picker.is_open());
    assert_eq!(picker.focus_out(), vec![Notification::Blur]);
}

#[test]
fn config_file_and_overrides_shape_the_picker() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
mode = "multiple"
timezone = "America/New_York"
dual = true

[format]
display = "%Y-%m-%d"
"#,
    )
    .expect("write config");

    let mut cfg = PickerConfig::load(Some(&path)).expect("load config");
    assert_eq!(cfg.mode, SelectionMode::Multiple);
    assert_eq!(cfg.loaded_from.as_deref(), Some(path.as_path()));
    assert_eq!(cfg.timezone(), chrono_tz::America::New_York);

    cfg.apply_overrides(vec![("rc.mode".to_string(), "range".to_string())])
        .expect("override");
    assert_eq!(cfg.mode, SelectionMode::Range);

    let picker = DatePicker::new(
        cfg,
        vec![date(2024, 12, 30), date(2025, 1, 2)],
        date(2024, 12, 1),
    )
    .expect("picker");
    assert_eq!(picker.input_text(), "2024-12-30 – 2025-01-02");

    let grids = picker.grids();
    assert_eq!(grids.len(), 2);
    assert_eq!(grids[0].month, month(2024, 12));
    assert_eq!(grids[1].month, month(2025, 1));
    assert!(grids[1].find(date(2025, 1, 1)).expect("cell").is_in_range);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let missing = temp.path().join("nope.toml");
    assert!(PickerConfig::load(Some(&missing)).is_err());
}

#[test]
fn snapshot_serializes_to_json() {
    let picker = DatePicker::new(
        PickerConfig::default(),
        date(2024, 3, 10),
        date(2024, 3, 15),
    )
    .expect("picker");
    let value = serde_json::to_value(picker.snapshot()).expect("json");
    assert_eq!(value["mode"], "single");
    assert_eq!(value["selected_days"][0], "2024-03-10");
    assert_eq!(value["text"], "03/10/2024");
    assert_eq!(value["validity"]["state"], "valid");
    assert_eq!(value["grids"].as_array().map(Vec::len), Some(1));
}
