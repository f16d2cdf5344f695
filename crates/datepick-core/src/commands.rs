use std::str::FromStr;

use anyhow::{Context, anyhow};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::cli::Invocation;
use crate::collab::ChronoLocalizer;
use crate::config::PickerConfig;
use crate::datetime::{CalendarDate, today_in};
use crate::focus::Key;
use crate::picker::DatePicker;
use crate::render::Renderer;
use crate::selection::{InitialValue, Notification};
use crate::value_sync;

pub fn known_command_names() -> Vec<&'static str> {
    vec!["show", "run", "parse", "help", "version"]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Click(CalendarDate),
    Hover(CalendarDate),
    Key(Key),
    Previous,
    Next,
    Type(String),
    Commit(String),
    Remove(usize),
    RemoveDay(CalendarDate),
    Open,
    Close,
    Paint,
}

impl Event {
    const PREFIXED: [&'static str; 7] = [
        "click",
        "hover",
        "key",
        "type",
        "commit",
        "remove",
        "removeday",
    ];
    const BARE: [&'static str; 5] = ["prev", "next", "open", "close", "paint"];

    pub fn looks_like_event(token: &str) -> bool {
        match token.split_once(':') {
            Some((name, _)) => Self::PREFIXED.iter().any(|known| *known == name),
            None => Self::BARE.iter().any(|known| *known == token),
        }
    }

    /// Feeds the event to the picker and returns what it announced.
    pub fn apply(&self, picker: &mut DatePicker) -> Vec<Notification> {
        match self {
            Event::Click(date) => picker.day_pressed(*date),
            Event::Hover(date) => {
                picker.day_hovered(*date);
                vec![]
            }
            Event::Key(key) => picker.key_down(*key),
            Event::Previous => {
                picker.previous_month();
                vec![]
            }
            Event::Next => {
                picker.next_month();
                vec![]
            }
            Event::Type(text) => picker.text_input(text),
            Event::Commit(text) => picker.text_changed(text),
            Event::Remove(index) => picker.tag_removed(*index),
            Event::RemoveDay(date) => picker.remove_day(*date),
            Event::Open => {
                picker.open();
                vec![]
            }
            Event::Close => {
                picker.close();
                vec![]
            }
            Event::Paint => {
                picker.after_paint();
                vec![]
            }
        }
    }
}

impl FromStr for Event {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = |raw: &str| {
            raw.trim()
                .parse::<CalendarDate>()
                .map_err(|e| anyhow!("invalid date {raw:?} in event {s:?}: {e}"))
        };

        match s.split_once(':') {
            Some(("click", arg)) => Ok(Event::Click(date(arg)?)),
            Some(("hover", arg)) => Ok(Event::Hover(date(arg)?)),
            Some(("key", arg)) => Ok(Event::Key(arg.parse()?)),
            Some(("type", arg)) => Ok(Event::Type(arg.to_string())),
            Some(("commit", arg)) => Ok(Event::Commit(arg.to_string())),
            Some(("remove", arg)) => {
                let index = arg
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("invalid chip index in event {s:?}"))?;
                Ok(Event::Remove(index))
            }
            Some(("removeday", arg)) => Ok(Event::RemoveDay(date(arg)?)),
            Some(_) => Err(anyhow!("unknown event: {s}")),
            None => match s {
                "prev" => Ok(Event::Previous),
                "next" => Ok(Event::Next),
                "open" => Ok(Event::Open),
                "close" => Ok(Event::Close),
                "paint" => Ok(Event::Paint),
                other => Err(anyhow!("unknown event: {other}")),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Output {
    pub json: bool,
}

#[instrument(skip(cfg, renderer, inv, value))]
pub fn dispatch(
    cfg: &PickerConfig,
    renderer: &mut Renderer,
    inv: Invocation,
    value: Option<&str>,
    output: Output,
) -> anyhow::Result<()> {
    let command = inv.command.as_str();
    debug!(command, args = ?inv.command_args, "dispatching command");

    match command {
        "show" => {
            let picker = build_picker(cfg, value)?;
            cmd_show(&picker, renderer, &output)
        }
        "run" => {
            let mut picker = build_picker(cfg, value)?;
            cmd_run(&mut picker, renderer, &inv.command_args, &output)
        }
        "parse" => cmd_parse(cfg, renderer, &inv.command_args, &output),
        "help" => cmd_help(),
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

#[instrument(skip(cfg))]
pub fn build_picker(cfg: &PickerConfig, value: Option<&str>) -> anyhow::Result<DatePicker> {
    let localizer = ChronoLocalizer::new(&cfg.format);
    let initial = match value {
        Some(text) => {
            let dates = value_sync::from_text(text, &localizer)
                .with_context(|| format!("invalid --value {text:?}"))?;
            InitialValue::Many(dates)
        }
        None => InitialValue::Many(vec![]),
    };
    let today = today_in(cfg.timezone());
    DatePicker::new(cfg.clone(), initial, today)
}

fn cmd_show(picker: &DatePicker, renderer: &mut Renderer, output: &Output) -> anyhow::Result<()> {
    info!("command show");
    if output.json {
        renderer.print_snapshot_json(picker)
    } else {
        renderer.print_calendar(picker)
    }
}

#[instrument(skip(picker, renderer, args, output))]
fn cmd_run(
    picker: &mut DatePicker,
    renderer: &mut Renderer,
    args: &[String],
    output: &Output,
) -> anyhow::Result<()> {
    info!(events = args.len(), "command run");

    let events = args
        .iter()
        .map(|token| token.parse::<Event>().map(|event| (token.clone(), event)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut log = Vec::with_capacity(events.len());
    for (token, event) in events {
        let notifications = event.apply(picker);
        debug!(event = %token, ?notifications, "applied event");
        log.push((token, notifications));
    }

    // Printing the result is itself a paint.
    picker.after_paint();

    if output.json {
        let notifications = log
            .iter()
            .map(|(event, notes)| json!({ "event": event, "notifications": notes }))
            .collect::<Vec<_>>();
        let doc = json!({ "events": notifications, "state": picker.snapshot() });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if !log.is_empty() {
        renderer.print_event_log(&log)?;
        println!();
    }
    renderer.print_calendar(picker)
}

#[instrument(skip(cfg, renderer, args, output))]
fn cmd_parse(
    cfg: &PickerConfig,
    renderer: &mut Renderer,
    args: &[String],
    output: &Output,
) -> anyhow::Result<()> {
    info!("command parse");
    if args.is_empty() {
        return Err(anyhow!("parse requires text argument"));
    }

    let text = args.join(" ");
    let localizer = ChronoLocalizer::new(&cfg.format);
    let dates = value_sync::from_text(&text, &localizer)
        .and_then(|dates| {
            value_sync::check_shape(cfg.mode, &dates)?;
            Ok(dates)
        })
        .with_context(|| format!("cannot parse {text:?} as a {} selection", cfg.mode))?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&dates)?);
        return Ok(());
    }
    renderer.print_parsed(&dates, &localizer)
}

fn cmd_help() -> anyhow::Result<()> {
    println!(
        "Commands: show, run EVENT..., parse TEXT, help, version\n\
         Events: click:DATE hover:DATE key:NAME prev next type:TEXT commit:TEXT \
         remove:INDEX removeday:DATE open close paint"
    );
    Ok(())
}
