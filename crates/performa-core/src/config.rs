use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use thiserror::Error;
use tracing::{
  debug,
  info,
  warn
};

use crate::status::StatusTaxonomy;
use crate::theme::Theme;

const BUILTIN_DASHBOARD_TOML: &str =
  include_str!("../assets/dashboard.toml");

/// Rejected mutation of the dashboard configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("unknown KPI card `{0}`")]
  UnknownKpi(String),
  #[error(
    "no task at index {index} (have \
     {len})"
  )]
  TaskIndex { index: usize, len: usize },
  #[error("unknown status key `{0}`")]
  UnknownStatus(String),
  #[error(
    "progress {0} is outside 0..=100"
  )]
  ProgressOutOfRange(u8),
  #[error("{field} must not be empty")]
  Empty { field: &'static str }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct DashboardConfig {
  pub app:             AppInfo,
  pub themes:          ThemePalettes,
  #[serde(default)]
  pub navigation:      Vec<NavItem>,
  #[serde(default)]
  pub kpi_cards:       Vec<KpiCard>,
  pub charts:          ChartSeries,
  #[serde(default)]
  pub heatmap:         Heatmap,
  pub statuses:        StatusTaxonomy,
  #[serde(default)]
  pub tasks:           Vec<TaskRecord>,
  #[serde(default)]
  pub goals:           Vec<GoalRecord>,
  #[serde(default)]
  pub projects:        Vec<ProjectRecord>,
  #[serde(default)]
  pub updates:         Vec<UpdateRecord>,
  #[serde(default)]
  pub quality_metrics: QualityMetrics
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct AppInfo {
  pub name:         String,
  pub subtitle:     String,
  #[serde(default)]
  pub version:      String,
  #[serde(default)]
  pub last_updated: String,
  #[serde(
    default = "default_timezone"
  )]
  pub timezone:     String
}

fn default_timezone() -> String {
  crate::datetime::DEFAULT_TIMEZONE
    .to_string()
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ThemePalettes {
  pub dark:  BTreeMap<String, String>,
  pub light: BTreeMap<String, String>
}

impl ThemePalettes {
  pub fn palette(
    &self,
    theme: Theme
  ) -> &BTreeMap<String, String> {
    match theme {
      | Theme::Dark => &self.dark,
      | Theme::Light => &self.light
    }
  }

  /// CSS custom properties for `theme`, e.g. `--bg-secondary: #1a1f2e;`.
  pub fn css_variables(
    &self,
    theme: Theme
  ) -> String {
    self
      .palette(theme)
      .iter()
      .map(|(key, value)| {
        format!(
          "--{}: {value};",
          key.replace('_', "-")
        )
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct NavItem {
  #[serde(default)]
  pub icon:   String,
  pub label:  String,
  pub target: String,
  pub id:     String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct KpiCard {
  pub id:         String,
  pub label:      String,
  pub value:      u64,
  pub change:     i32,
  pub progress:   u8,
  #[serde(default)]
  pub ring_color: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ChartSeries {
  pub daily:       DailySeries,
  pub performance: PerformanceSeries,
  pub quality:     QualitySeries
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct DailySeries {
  pub labels: Vec<String>,
  pub data:   Vec<f64>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct PerformanceSeries {
  pub labels:      Vec<String>,
  pub completed:   Vec<f64>,
  pub in_progress: Vec<f64>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct QualitySeries {
  pub percentage: u8
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Heatmap {
  pub days:        Vec<String>,
  pub departments: Vec<String>,
  pub data:        Vec<Vec<f64>>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskRecord {
  pub name:     String,
  pub project:  String,
  pub assignee: String,
  pub status:   String,
  pub progress: u8,
  pub due_date: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct GoalRecord {
  pub name:     String,
  pub duration: String,
  pub owner:    String,
  pub progress: u8,
  pub status:   String,
  #[serde(default)]
  pub due_date: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ProjectRecord {
  pub name:     String,
  pub team:     String,
  pub owner:    String,
  pub progress: u8,
  pub status:   String,
  pub due_date: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct UpdateRecord {
  pub task:   String,
  pub status: String,
  pub date:   String
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct QualityMetrics {
  pub rework:        String,
  pub approval_time: String,
  pub first_time_ok: String
}

/// Record whose status key is missing from the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIssue {
  pub section: &'static str,
  pub index:   usize,
  pub name:    String,
  pub status:  String
}

impl DashboardConfig {
  /// The dashboard data compiled into the binary.
  pub fn builtin() -> anyhow::Result<Self>
  {
    Self::from_toml_str(
      BUILTIN_DASHBOARD_TOML
    )
    .context(
      "failed to parse built-in \
       dashboard config"
    )
  }

  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let config =
      toml::from_str::<Self>(raw)
        .context(
          "invalid dashboard config"
        )?;
    debug!(
      tasks = config.tasks.len(),
      goals = config.goals.len(),
      projects = config.projects.len(),
      statuses = config.statuses.len(),
      "parsed dashboard config"
    );
    Ok(config)
  }

  #[tracing::instrument]
  pub fn from_path(
    path: &Path
  ) -> anyhow::Result<Self> {
    info!(config = %path.display(), "loading dashboard config");
    let raw = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    Self::from_toml_str(&raw)
      .with_context(|| {
        format!(
          "failed to load {}",
          path.display()
        )
      })
  }

  /// Records whose status is not in the taxonomy. They still render,
  /// using the `active` definition.
  pub fn status_issues(
    &self
  ) -> Vec<StatusIssue> {
    let mut issues = Vec::new();
    let mut check =
      |section: &'static str,
       index: usize,
       name: &str,
       status: &str| {
        if !self.statuses.contains(status)
        {
          issues.push(StatusIssue {
            section,
            index,
            name: name.to_string(),
            status: status.to_string()
          });
        }
      };

    for (idx, task) in
      self.tasks.iter().enumerate()
    {
      check(
        "tasks",
        idx,
        &task.name,
        &task.status
      );
    }
    for (idx, goal) in
      self.goals.iter().enumerate()
    {
      check(
        "goals",
        idx,
        &goal.name,
        &goal.status
      );
    }
    for (idx, project) in
      self.projects.iter().enumerate()
    {
      check(
        "projects",
        idx,
        &project.name,
        &project.status
      );
    }
    for (idx, update) in
      self.updates.iter().enumerate()
    {
      check(
        "updates",
        idx,
        &update.task,
        &update.status
      );
    }

    for issue in &issues {
      warn!(
        section = issue.section,
        index = issue.index,
        status = %issue.status,
        "record status missing from taxonomy"
      );
    }
    issues
  }

  pub fn kpi(
    &self,
    id: &str
  ) -> Option<&KpiCard> {
    self
      .kpi_cards
      .iter()
      .find(|card| card.id == id)
  }

  pub fn set_app_name(
    &mut self,
    name: impl Into<String>
  ) -> Result<(), ConfigError> {
    self.app.name =
      non_empty(name.into(), "app name")?;
    Ok(())
  }

  pub fn set_app_subtitle(
    &mut self,
    subtitle: impl Into<String>
  ) -> Result<(), ConfigError> {
    self.app.subtitle = non_empty(
      subtitle.into(),
      "app subtitle"
    )?;
    Ok(())
  }

  pub fn set_kpi_value(
    &mut self,
    id: &str,
    value: u64
  ) -> Result<(), ConfigError> {
    self.kpi_mut(id)?.value = value;
    Ok(())
  }

  pub fn set_kpi_change(
    &mut self,
    id: &str,
    change: i32
  ) -> Result<(), ConfigError> {
    self.kpi_mut(id)?.change = change;
    Ok(())
  }

  pub fn set_kpi_progress(
    &mut self,
    id: &str,
    progress: u8
  ) -> Result<(), ConfigError> {
    let progress =
      checked_progress(progress)?;
    self.kpi_mut(id)?.progress = progress;
    Ok(())
  }

  pub fn set_task_status(
    &mut self,
    index: usize,
    status: &str
  ) -> Result<(), ConfigError> {
    if !self.statuses.contains(status) {
      return Err(
        ConfigError::UnknownStatus(
          status.to_string()
        )
      );
    }
    self.task_mut(index)?.status =
      status.to_string();
    Ok(())
  }

  pub fn set_task_progress(
    &mut self,
    index: usize,
    progress: u8
  ) -> Result<(), ConfigError> {
    let progress =
      checked_progress(progress)?;
    self.task_mut(index)?.progress =
      progress;
    Ok(())
  }

  pub fn push_task(
    &mut self,
    task: TaskRecord
  ) -> Result<(), ConfigError> {
    if !self.statuses.contains(&task.status)
    {
      return Err(
        ConfigError::UnknownStatus(
          task.status
        )
      );
    }
    checked_progress(task.progress)?;
    let task = TaskRecord {
      name: non_empty(
        task.name, "task name"
      )?,
      ..task
    };
    self.tasks.push(task);
    Ok(())
  }

  pub fn set_quality_percentage(
    &mut self,
    percentage: u8
  ) -> Result<(), ConfigError> {
    self.charts.quality.percentage =
      checked_progress(percentage)?;
    Ok(())
  }

  fn kpi_mut(
    &mut self,
    id: &str
  ) -> Result<&mut KpiCard, ConfigError>
  {
    self
      .kpi_cards
      .iter_mut()
      .find(|card| card.id == id)
      .ok_or_else(|| {
        ConfigError::UnknownKpi(
          id.to_string()
        )
      })
  }

  fn task_mut(
    &mut self,
    index: usize
  ) -> Result<&mut TaskRecord, ConfigError>
  {
    let len = self.tasks.len();
    self.tasks.get_mut(index).ok_or(
      ConfigError::TaskIndex {
        index,
        len
      }
    )
  }
}

fn checked_progress(
  progress: u8
) -> Result<u8, ConfigError> {
  if progress > 100 {
    return Err(
      ConfigError::ProgressOutOfRange(
        progress
      )
    );
  }
  Ok(progress)
}

fn non_empty(
  value: String,
  field: &'static str
) -> Result<String, ConfigError> {
  if value.trim().is_empty() {
    return Err(ConfigError::Empty {
      field
    });
  }
  Ok(value)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_config_parses_with_all_sections()
  {
    let config =
      DashboardConfig::builtin().unwrap();
    assert_eq!(config.tasks.len(), 7);
    assert_eq!(config.goals.len(), 2);
    assert_eq!(config.projects.len(), 2);
    assert_eq!(config.updates.len(), 5);
    assert_eq!(config.kpi_cards.len(), 4);
    assert_eq!(config.statuses.len(), 5);
    assert_eq!(
      config.app.timezone,
      "Asia/Riyadh"
    );
    assert!(
      config.status_issues().is_empty()
    );
  }

  #[test]
  fn missing_active_status_fails_to_load()
  {
    let raw = BUILTIN_DASHBOARD_TOML
      .replace(
        "key = \"active\"",
        "key = \"open\""
      );
    let err =
      DashboardConfig::from_toml_str(&raw)
        .unwrap_err();
    assert!(
      format!("{err:#}")
        .contains("active")
    );
  }

  #[test]
  fn unknown_record_status_is_reported()
  {
    let mut config =
      DashboardConfig::builtin().unwrap();
    config.tasks[1].status =
      "archived".to_string();

    let issues = config.status_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].section, "tasks");
    assert_eq!(issues[0].index, 1);
    assert_eq!(issues[0].status, "archived");
  }

  #[test]
  fn typed_setters_reject_unknown_targets()
  {
    let mut config =
      DashboardConfig::builtin().unwrap();

    assert_eq!(
      config.set_kpi_value("missing", 3),
      Err(ConfigError::UnknownKpi(
        "missing".to_string()
      ))
    );
    assert_eq!(
      config.set_task_status(0, "archived"),
      Err(ConfigError::UnknownStatus(
        "archived".to_string()
      ))
    );
    assert_eq!(
      config.set_task_progress(99, 10),
      Err(ConfigError::TaskIndex {
        index: 99,
        len:   7
      })
    );
    assert_eq!(
      config.set_kpi_progress("goals", 101),
      Err(
        ConfigError::ProgressOutOfRange(
          101
        )
      )
    );
    assert!(config.set_app_name("  ").is_err());
  }

  #[test]
  fn typed_setters_update_fields() {
    let mut config =
      DashboardConfig::builtin().unwrap();

    config
      .set_kpi_value("projects", 1500)
      .unwrap();
    config
      .set_task_status(3, "done")
      .unwrap();
    config
      .set_quality_percentage(88)
      .unwrap();

    assert_eq!(
      config.kpi("projects").unwrap().value,
      1500
    );
    assert_eq!(config.tasks[3].status, "done");
    assert_eq!(
      config.charts.quality.percentage,
      88
    );
  }

  #[test]
  fn css_variables_use_kebab_case_keys()
  {
    let config =
      DashboardConfig::builtin().unwrap();
    let css = config
      .themes
      .css_variables(Theme::Dark);
    assert!(
      css.contains("--bg-secondary: #1a1f2e;")
    );
    assert!(css.contains("--accent: #1abc9c;"));
  }
}
