pub mod cli;
pub mod collab;
pub mod commands;
pub mod config;
pub mod datetime;
pub mod focus;
pub mod grid;
pub mod picker;
pub mod render;
pub mod selection;
pub mod value_sync;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args)?;
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting datepick"
    );
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::PickerConfig::load(cli.config.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value))),
    )
    .context("failed to apply config overrides")?;
    if let Some(mode) = cli.mode {
        cfg.mode = mode;
    }

    let mut renderer = render::Renderer::new(&cfg);
    let inv = cli::Invocation::parse(cli.rest)?;

    commands::dispatch(
        &cfg,
        &mut renderer,
        inv,
        cli.value.as_deref(),
        commands::Output { json: cli.json },
    )?;

    info!("done");
    Ok(())
}
