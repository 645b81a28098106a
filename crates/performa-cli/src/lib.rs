pub mod cli;
pub mod commands;
pub mod render;

use std::ffi::OsString;

use clap::Parser;
use performa_core::datetime::resolve_timezone;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting performa CLI"
    );

    let config = cli::load_config(cli.config.as_deref())?;
    let tz = resolve_timezone(&config.app.timezone);
    debug!(timezone = %tz, "resolved dashboard timezone");

    let renderer = render::Renderer::new();
    commands::dispatch(config, tz, &renderer, cli.command)?;

    info!("done");
    Ok(())
}
