use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use performa_core::config::DashboardConfig;
use performa_core::view::ViewKind;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub const CONFIG_ENV_VAR: &str = "PERFORMA_CONFIG";
const CONFIG_DIR_NAME: &str = "performa";
const CONFIG_FILE_NAME: &str = "dashboard.toml";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "performa",
    version,
    about = "Performa: performance-management dashboard in the terminal",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Dashboard data file; defaults to $PERFORMA_CONFIG, then the user config dir.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate the dashboard data and report unknown statuses.
    Check,
    /// Print one view as it would be bound in the browser.
    Show(ShowArgs),
    /// Print the next open deadline and its countdown.
    Next(FilterArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_parser = parse_view, default_value = "dashboard")]
    pub view: ViewKind,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Emit the bound view as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long = "query", default_value = "")]
    pub query: String,

    #[arg(long = "status")]
    pub status: Option<String>,

    /// Evaluate at this instant (RFC 3339) instead of the current time.
    #[arg(long = "now", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,
}

impl FilterArgs {
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

fn parse_view(raw: &str) -> anyhow::Result<ViewKind> {
    let key = raw.trim().to_ascii_lowercase();
    ViewKind::from_key(&key)
        .or_else(|| {
            key.ends_with(".html")
                .then(|| ViewKind::detect(&key))
        })
        .ok_or_else(|| {
            let known = ViewKind::ALL
                .iter()
                .map(|view| view.key())
                .collect::<Vec<_>>()
                .join(", ");
            anyhow!("unknown view `{raw}`; expected one of: {known}")
        })
}

fn parse_now(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid --now timestamp: {raw}"))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Picks the dashboard file: flag, then `PERFORMA_CONFIG`, then
/// `<config dir>/performa/dashboard.toml` when it exists.
pub fn resolve_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path.to_path_buf());
    }

    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR)
        && !raw.trim().is_empty()
    {
        return Some(PathBuf::from(raw.trim()));
    }

    let candidate = dirs::config_dir()?
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        Some(candidate)
    } else {
        debug!(path = %candidate.display(), "no user dashboard file");
        None
    }
}

#[tracing::instrument]
pub fn load_config(flag: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match resolve_config_path(flag) {
        Some(path) => DashboardConfig::from_path(&path),
        None => {
            info!("using built-in dashboard data");
            DashboardConfig::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_view_and_filters() {
        let cli = GlobalCli::parse_from([
            "performa",
            "-vv",
            "show",
            "tasks",
            "--query",
            "الأداء",
            "--status",
            "active",
            "--now",
            "2026-02-24T12:00:00+03:00",
        ]);
        assert_eq!(cli.verbose, 2);

        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.view, ViewKind::Tasks);
        assert_eq!(args.filter.query, "الأداء");
        assert_eq!(args.filter.status.as_deref(), Some("active"));
        assert_eq!(
            args.filter.now().to_rfc3339(),
            "2026-02-24T09:00:00+00:00"
        );
    }

    #[test]
    fn views_accept_page_names() {
        assert_eq!(parse_view("performance.html").unwrap(), ViewKind::Performance);
        assert_eq!(parse_view("Charts").unwrap(), ViewKind::Charts);
        assert!(parse_view("settings").is_err());
    }

    #[test]
    fn rejects_bad_timestamps() {
        let result = GlobalCli::try_parse_from(["performa", "next", "--now", "tomorrow"]);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_config_flag_wins() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("custom.toml");
        assert_eq!(resolve_config_path(Some(&path)), Some(path.clone()));
    }
}
