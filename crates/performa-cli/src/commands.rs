use std::io::{self, Write};

use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use performa_core::config::DashboardConfig;
use performa_core::controller::DashboardController;
use performa_core::storage::MemoryStore;
use performa_core::view::ViewKind;
use tracing::{debug, info, instrument, warn};

use crate::cli::{Command, FilterArgs, ShowArgs};
use crate::render::Renderer;

type CliController = DashboardController<MemoryStore, MemoryStore>;

#[instrument(skip(config, renderer, command))]
pub fn dispatch(config: DashboardConfig, tz: Tz, renderer: &Renderer, command: Command) -> anyhow::Result<()> {
    let out = io::stdout().lock();
    match command {
        Command::Check => cmd_check(&config, tz, renderer, out),
        Command::Show(args) => cmd_show(config, tz, renderer, &args, out),
        Command::Next(args) => cmd_next(config, tz, renderer, &args, out),
    }
}

fn controller(config: DashboardConfig, tz: Tz, view: ViewKind, filter: &FilterArgs) -> CliController {
    let mut dash = DashboardController::new(config, tz, view, MemoryStore::default(), MemoryStore::default());
    let now = filter.now();
    dash.start(now);
    if !filter.query.is_empty() {
        dash.set_query(&filter.query, now);
    }
    if filter.status.is_some() {
        dash.set_status_filter(filter.status.clone(), now);
    }
    dash
}

fn cmd_check<W: Write>(config: &DashboardConfig, tz: Tz, renderer: &Renderer, mut out: W) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} v{} ({})",
        config.app.name, config.app.version, tz
    )?;
    writeln!(
        out,
        "statuses={} tasks={} goals={} projects={} updates={} kpis={}",
        config.statuses.len(),
        config.tasks.len(),
        config.goals.len(),
        config.projects.len(),
        config.updates.len(),
        config.kpi_cards.len()
    )?;

    let issues = config.status_issues();
    renderer.write_issues(&mut out, &issues)?;
    if issues.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} record(s) reference undefined statuses", issues.len()))
    }
}

fn cmd_show<W: Write>(
    config: DashboardConfig,
    tz: Tz,
    renderer: &Renderer,
    args: &ShowArgs,
    mut out: W,
) -> anyhow::Result<()> {
    if let Some(status) = args.filter.status.as_deref()
        && !config.statuses.contains(status)
    {
        warn!(status, "status selector is not defined; no rows will match");
    }

    let dash = controller(config, tz, args.view, &args.filter);
    let bound = dash
        .bound()
        .context("dashboard did not bind a view")?;
    debug!(view = args.view.key(), "rendering view");

    if args.json {
        serde_json::to_writer_pretty(&mut out, bound).context("failed to encode view as JSON")?;
        writeln!(out)?;
    } else {
        renderer.write_view(&mut out, bound)?;
    }
    info!(view = args.view.key(), "done");
    Ok(())
}

fn cmd_next<W: Write>(
    config: DashboardConfig,
    tz: Tz,
    renderer: &Renderer,
    args: &FilterArgs,
    out: W,
) -> anyhow::Result<()> {
    let dash = controller(config, tz, ViewKind::Tasks, args);
    renderer.write_next(out, dash.panel(), tz)
}
