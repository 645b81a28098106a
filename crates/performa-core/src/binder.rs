use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::charts::{
  self,
  ChartSpec
};
use crate::config::{
  DashboardConfig,
  GoalRecord,
  ProjectRecord,
  QualityMetrics,
  TaskRecord,
  UpdateRecord
};
use crate::datetime::format_clock;
use crate::format::{
  ChangeText,
  DueLabel,
  format_change,
  format_kpi_value,
  progress_width
};
use crate::status::{
  OVERDUE,
  StatusDef,
  StatusTaxonomy
};
use crate::theme::Theme;
use crate::view::ViewKind;

pub const DASHBOARD_TASK_LIMIT: usize = 5;
pub const OVERDUE_ROW_CLASS: &str =
  "overdue-task-row";

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct AppHeader {
  pub name:     String,
  pub subtitle: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct StatusBadge {
  pub key:   String,
  pub label: String,
  pub class: String,
  pub color: String
}

impl From<&StatusDef> for StatusBadge {
  fn from(def: &StatusDef) -> Self {
    Self {
      key:   def.key.clone(),
      label: def.label.clone(),
      class: def.css_class.clone(),
      color: def.color.clone()
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct KpiCardView {
  pub id:             String,
  pub label:          String,
  pub value_text:     String,
  pub change:         ChangeText,
  pub progress_width: String,
  pub ring_color:     String
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
  DashboardTasks,
  Tasks,
  Goals,
  Projects
}

impl TableId {
  pub fn title(self) -> &'static str {
    match self {
      | Self::DashboardTasks => {
        "أحدث المهام"
      }
      | Self::Tasks => "المهام",
      | Self::Goals => "الأهداف",
      | Self::Projects => "المشاريع"
    }
  }

  pub fn columns(
    self
  ) -> &'static [&'static str] {
    match self {
      | Self::DashboardTasks
      | Self::Tasks => &[
        "المهمة",
        "المسؤول",
        "الحالة",
        "التقدم",
        "الموعد"
      ],
      | Self::Goals => &[
        "الهدف",
        "المدة",
        "المسؤول",
        "التقدم",
        "الحالة"
      ],
      | Self::Projects => &[
        "المشروع",
        "الفريق",
        "المسؤول",
        "التقدم",
        "الحالة",
        "الموعد"
      ]
    }
  }
}

/// One table row. `context` is the secondary line: project for tasks,
/// duration for goals, team for projects.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct RowView {
  pub name:       String,
  pub context:    String,
  pub owner:      String,
  pub status_key: String,
  pub badge:      StatusBadge,
  pub progress:   u8,
  pub due_raw:    String,
  pub due_label:  Option<DueLabel>,
  pub overdue:    bool,
  pub visible:    bool
}

impl RowView {
  pub fn row_class(
    &self
  ) -> Option<&'static str> {
    self.overdue.then_some(OVERDUE_ROW_CLASS)
  }

  pub fn progress_width(&self) -> String {
    progress_width(self.progress)
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct TableView {
  pub id:   TableId,
  pub rows: Vec<RowView>
}

impl TableView {
  pub fn visible_rows(
    &self
  ) -> impl Iterator<Item = &RowView> {
    self.rows.iter().filter(|row| row.visible)
  }

  pub fn visible_count(&self) -> usize {
    self.visible_rows().count()
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct UpdateItemView {
  pub task:  String,
  pub badge: StatusBadge,
  pub date:  String
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct OverdueAlert {
  pub count: usize
}

impl OverdueAlert {
  pub fn visible(self) -> bool {
    self.count > 0
  }
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct HeatmapRow {
  pub department: String,
  pub cells:      Vec<HeatmapCell>
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct HeatmapCell {
  pub intensity: f64,
  pub tooltip:   String
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct PerformanceView {
  pub quality_text: String,
  pub metrics:      QualityMetrics,
  pub heatmap_days: Vec<String>,
  pub heatmap:      Vec<HeatmapRow>
}

/// Everything one view needs, recomputed from scratch on every bind.
#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct BoundView {
  pub view:         ViewKind,
  pub header:       AppHeader,
  pub kpis:         Vec<KpiCardView>,
  pub tables:       Vec<TableView>,
  pub updates:      Vec<UpdateItemView>,
  pub alert:        Option<OverdueAlert>,
  pub performance:  Option<PerformanceView>,
  pub charts:       Vec<ChartSpec>,
  pub last_updated: String
}

impl BoundView {
  pub fn table(
    &self,
    id: TableId
  ) -> Option<&TableView> {
    self
      .tables
      .iter()
      .find(|table| table.id == id)
  }
}

/// Reads the dashboard config and produces the bound fragments of a view.
pub struct ViewBinder<'a> {
  config: &'a DashboardConfig,
  tz:     Tz
}

impl<'a> ViewBinder<'a> {
  pub fn new(
    config: &'a DashboardConfig,
    tz: Tz
  ) -> Self {
    Self {
      config,
      tz
    }
  }

  #[tracing::instrument(skip(self, now))]
  pub fn bind(
    &self,
    view: ViewKind,
    theme: Theme,
    now: DateTime<Utc>
  ) -> BoundView {
    let mut bound = BoundView {
      view,
      header: self.header(),
      kpis: Vec::new(),
      tables: Vec::new(),
      updates: Vec::new(),
      alert: None,
      performance: None,
      charts: Vec::new(),
      last_updated: format!(
        "آخر تحديث: {}",
        format_clock(now, self.tz)
      )
    };

    let palette = theme.chart_palette();
    let series = &self.config.charts;

    match view {
      | ViewKind::Dashboard => {
        bound.kpis = self.kpi_cards();
        bound.tables.push(
          self.task_table(
            TableId::DashboardTasks,
            now
          )
        );
        bound.updates = self.updates();
        bound.alert =
          Some(self.overdue_alert());
        bound.charts = vec![
          charts::daily_completion(
            series, &palette
          ),
          charts::performance_trend(
            series, &palette
          ),
        ];
      }
      | ViewKind::Tasks => {
        bound.tables.push(
          self.task_table(
            TableId::Tasks,
            now
          )
        );
      }
      | ViewKind::Goals => {
        bound
          .tables
          .push(self.goal_table(now));
      }
      | ViewKind::Projects => {
        bound
          .tables
          .push(self.project_table(now));
      }
      | ViewKind::Performance => {
        bound.performance =
          Some(self.performance());
        bound.charts =
          vec![charts::quality_ring(
            series, &palette
          )];
      }
      | ViewKind::Charts => {
        bound.charts = vec![
          charts::daily_completion(
            series, &palette
          ),
          charts::performance_trend(
            series, &palette
          ),
          charts::quality_ring(
            series, &palette
          ),
        ];
      }
      | ViewKind::Team
      | ViewKind::Reports => {}
    }

    debug!(
      view = view.key(),
      tables = bound.tables.len(),
      kpis = bound.kpis.len(),
      charts = bound.charts.len(),
      "bound view"
    );
    bound
  }

  fn statuses(&self) -> &StatusTaxonomy {
    &self.config.statuses
  }

  pub fn header(&self) -> AppHeader {
    AppHeader {
      name:     self.config.app.name.clone(),
      subtitle: self
        .config
        .app
        .subtitle
        .clone()
    }
  }

  pub fn kpi_cards(
    &self
  ) -> Vec<KpiCardView> {
    self
      .config
      .kpi_cards
      .iter()
      .map(|card| KpiCardView {
        id:             card.id.clone(),
        label:          card.label.clone(),
        value_text:     format_kpi_value(
          card.value
        ),
        change:         format_change(
          card.change
        ),
        progress_width: progress_width(
          card.progress
        ),
        ring_color:     card
          .ring_color
          .clone()
      })
      .collect()
  }

  pub fn task_table(
    &self,
    id: TableId,
    now: DateTime<Utc>
  ) -> TableView {
    let limit = match id {
      | TableId::DashboardTasks => {
        DASHBOARD_TASK_LIMIT
      }
      | _ => usize::MAX
    };

    TableView {
      id,
      rows: self
        .config
        .tasks
        .iter()
        .take(limit)
        .map(|task| self.task_row(task, now))
        .collect()
    }
  }

  pub fn goal_table(
    &self,
    now: DateTime<Utc>
  ) -> TableView {
    TableView {
      id:   TableId::Goals,
      rows: self
        .config
        .goals
        .iter()
        .map(|goal| self.goal_row(goal, now))
        .collect()
    }
  }

  pub fn project_table(
    &self,
    now: DateTime<Utc>
  ) -> TableView {
    TableView {
      id:   TableId::Projects,
      rows: self
        .config
        .projects
        .iter()
        .map(|project| {
          self.project_row(project, now)
        })
        .collect()
    }
  }

  pub fn updates(
    &self
  ) -> Vec<UpdateItemView> {
    self
      .config
      .updates
      .iter()
      .map(|update: &UpdateRecord| {
        UpdateItemView {
          task:  update.task.clone(),
          badge: self
            .statuses()
            .resolve(&update.status)
            .into(),
          date:  update.date.clone()
        }
      })
      .collect()
  }

  pub fn overdue_alert(
    &self
  ) -> OverdueAlert {
    OverdueAlert {
      count: self
        .config
        .tasks
        .iter()
        .filter(|task| task.status == OVERDUE)
        .count()
    }
  }

  pub fn performance(
    &self
  ) -> PerformanceView {
    let heatmap = &self.config.heatmap;
    PerformanceView {
      quality_text: format!(
        "{}%",
        self.config.charts.quality.percentage
      ),
      metrics:      self
        .config
        .quality_metrics
        .clone(),
      heatmap_days: heatmap.days.clone(),
      heatmap:      heatmap
        .departments
        .iter()
        .zip(heatmap.data.iter())
        .map(|(department, values)| {
          HeatmapRow {
            department: department.clone(),
            cells:      values
              .iter()
              .map(|&intensity| HeatmapCell {
                intensity,
                tooltip: charts::heatmap_tooltip(
                  intensity
                )
              })
              .collect()
          }
        })
        .collect()
    }
  }

  fn row(
    &self,
    parts: RowParts<'_>,
    now: DateTime<Utc>
  ) -> RowView {
    let badge: StatusBadge = self
      .statuses()
      .resolve(parts.status)
      .into();
    let due_label = (!parts
      .due_raw
      .trim()
      .is_empty())
    .then(|| {
      DueLabel::compute(
        parts.due_raw,
        now,
        self.tz
      )
    });

    RowView {
      name: parts.name.to_string(),
      context: parts.context.to_string(),
      owner: parts.owner.to_string(),
      status_key: parts.status.to_string(),
      badge,
      progress: parts.progress,
      due_raw: parts.due_raw.to_string(),
      due_label,
      overdue: parts.status == OVERDUE,
      visible: true
    }
  }

  fn task_row(
    &self,
    task: &TaskRecord,
    now: DateTime<Utc>
  ) -> RowView {
    self.row(
      RowParts {
        name:     &task.name,
        context:  &task.project,
        owner:    &task.assignee,
        status:   &task.status,
        progress: task.progress,
        due_raw:  &task.due_date
      },
      now
    )
  }

  fn goal_row(
    &self,
    goal: &GoalRecord,
    now: DateTime<Utc>
  ) -> RowView {
    self.row(
      RowParts {
        name:     &goal.name,
        context:  &goal.duration,
        owner:    &goal.owner,
        status:   &goal.status,
        progress: goal.progress,
        due_raw:  &goal.due_date
      },
      now
    )
  }

  fn project_row(
    &self,
    project: &ProjectRecord,
    now: DateTime<Utc>
  ) -> RowView {
    self.row(
      RowParts {
        name:     &project.name,
        context:  &project.team,
        owner:    &project.owner,
        status:   &project.status,
        progress: project.progress,
        due_raw:  &project.due_date
      },
      now
    )
  }
}

struct RowParts<'r> {
  name:     &'r str,
  context:  &'r str,
  owner:    &'r str,
  status:   &'r str,
  progress: u8,
  due_raw:  &'r str
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(
        2026, 2, 24, 9, 0, 0
      )
      .unwrap()
  }

  fn riyadh() -> Tz {
    "Asia/Riyadh".parse().unwrap()
  }

  #[test]
  fn dashboard_binds_summary_fragments() {
    let config =
      DashboardConfig::builtin().unwrap();
    let bound = ViewBinder::new(
      &config,
      riyadh()
    )
    .bind(
      ViewKind::Dashboard,
      Theme::Dark,
      now()
    );

    assert_eq!(
      bound.header.name,
      "إدارة الأداء الوظيفي"
    );
    assert_eq!(bound.kpis.len(), 4);
    assert_eq!(bound.kpis[2].value_text, "156");
    assert_eq!(
      bound.kpis[3].change.text,
      "-3%"
    );
    let table = bound
      .table(TableId::DashboardTasks)
      .unwrap();
    assert_eq!(
      table.rows.len(),
      DASHBOARD_TASK_LIMIT
    );
    assert_eq!(
      table.rows[0].name,
      config.tasks[0].name
    );
    assert_eq!(bound.updates.len(), 5);
    assert_eq!(
      bound.alert,
      Some(OverdueAlert { count: 1 })
    );
    assert_eq!(bound.charts.len(), 2);
    assert_eq!(
      bound.last_updated,
      "آخر تحديث: 12:00"
    );
  }

  #[test]
  fn task_view_keeps_insertion_order() {
    let config =
      DashboardConfig::builtin().unwrap();
    let bound = ViewBinder::new(
      &config,
      riyadh()
    )
    .bind(ViewKind::Tasks, Theme::Dark, now());

    let names: Vec<_> = bound.tables[0]
      .rows
      .iter()
      .map(|row| row.name.clone())
      .collect();
    let expected: Vec<_> = config
      .tasks
      .iter()
      .map(|task| task.name.clone())
      .collect();
    assert_eq!(names, expected);
    assert!(bound.kpis.is_empty());
    assert!(bound.alert.is_none());
  }

  #[test]
  fn overdue_rows_get_style_hook_and_label()
  {
    let config =
      DashboardConfig::builtin().unwrap();
    let table = ViewBinder::new(
      &config,
      riyadh()
    )
    .task_table(TableId::Tasks, now());

    let overdue = &table.rows[2];
    assert!(overdue.overdue);
    assert_eq!(
      overdue.row_class(),
      Some(OVERDUE_ROW_CLASS)
    );
    assert_eq!(
      overdue.due_label,
      Some(DueLabel::OverdueBy(9))
    );
    assert_eq!(overdue.badge.label, "متأخر");
    assert_eq!(table.rows[0].row_class(), None);
    assert_eq!(
      table.rows[0].due_label,
      Some(DueLabel::InDays(4))
    );
  }

  #[test]
  fn unknown_status_renders_as_active() {
    let mut config =
      DashboardConfig::builtin().unwrap();
    config.tasks[0].status =
      "archived".to_string();

    let table = ViewBinder::new(
      &config,
      riyadh()
    )
    .task_table(TableId::Tasks, now());

    let row = &table.rows[0];
    assert_eq!(row.status_key, "archived");
    assert_eq!(row.badge.label, "نشط");
    assert_eq!(row.badge.class, "badge-active");
    assert!(!row.overdue);
  }

  #[test]
  fn alert_hides_without_overdue_tasks() {
    let mut config =
      DashboardConfig::builtin().unwrap();
    config.set_task_status(2, "done").unwrap();

    let alert = ViewBinder::new(
      &config,
      riyadh()
    )
    .overdue_alert();
    assert_eq!(alert.count, 0);
    assert!(!alert.visible());
  }

  #[test]
  fn performance_view_binds_quality_and_heatmap()
  {
    let config =
      DashboardConfig::builtin().unwrap();
    let bound = ViewBinder::new(
      &config,
      riyadh()
    )
    .bind(
      ViewKind::Performance,
      Theme::Light,
      now()
    );

    let perf = bound.performance.unwrap();
    assert_eq!(perf.quality_text, "92%");
    assert_eq!(perf.heatmap.len(), 4);
    assert_eq!(perf.heatmap[0].cells.len(), 6);
    assert_eq!(perf.metrics.rework, "5.2%");
    assert!(bound.tables.is_empty());
  }

  #[test]
  fn team_view_binds_only_the_header() {
    let config =
      DashboardConfig::builtin().unwrap();
    let bound = ViewBinder::new(
      &config,
      riyadh()
    )
    .bind(ViewKind::Team, Theme::Dark, now());

    assert_eq!(
      bound.header.subtitle,
      "لوحة التحكم"
    );
    assert!(bound.tables.is_empty());
    assert!(bound.charts.is_empty());
    assert!(bound.performance.is_none());
  }
}
