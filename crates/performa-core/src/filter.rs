use serde::Serialize;
use tracing::debug;

use crate::binder::{
  RowView,
  TableView
};
use crate::status::StatusTaxonomy;

/// Search box text plus the optional status selector.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct RowFilter {
  query:  String,
  status: Option<String>
}

impl RowFilter {
  pub fn new(
    query: impl Into<String>,
    status: Option<String>
  ) -> Self {
    let mut filter = Self::default();
    filter.set_query(query);
    filter.set_status(status);
    filter
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn status(&self) -> Option<&str> {
    self.status.as_deref()
  }

  pub fn set_query(
    &mut self,
    query: impl Into<String>
  ) {
    self.query =
      query.into().trim().to_lowercase();
  }

  /// An empty selector means "all statuses".
  pub fn set_status(
    &mut self,
    status: Option<String>
  ) {
    self.status = status
      .map(|key| key.trim().to_string())
      .filter(|key| !key.is_empty());
  }

  pub fn is_empty(&self) -> bool {
    self.query.is_empty()
      && self.status.is_none()
  }

  pub fn matches(
    &self,
    row: &RowView,
    taxonomy: &StatusTaxonomy
  ) -> bool {
    let text_ok = self.query.is_empty()
      || row
        .name
        .to_lowercase()
        .contains(&self.query);
    if !text_ok {
      return false;
    }

    match self.status.as_deref() {
      | None => true,
      | Some(key) => {
        taxonomy.get(key).is_some_and(|def| {
          row.badge.class == def.css_class
        })
      }
    }
  }

  /// Sets each row's visibility flag; returns the visible count.
  pub fn apply(
    &self,
    table: &mut TableView,
    taxonomy: &StatusTaxonomy
  ) -> usize {
    let mut visible = 0;
    for row in &mut table.rows {
      row.visible =
        self.matches(row, taxonomy);
      if row.visible {
        visible += 1;
      }
    }
    debug!(
      table = ?table.id,
      query = %self.query,
      status = ?self.status,
      visible,
      total = table.rows.len(),
      "applied row filter"
    );
    visible
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::*;
  use crate::binder::{
    TableId,
    ViewBinder
  };
  use crate::config::DashboardConfig;

  fn tasks_table(
    config: &DashboardConfig
  ) -> TableView {
    let now = Utc
      .with_ymd_and_hms(
        2026, 2, 24, 9, 0, 0
      )
      .unwrap();
    ViewBinder::new(config, chrono_tz::UTC)
      .task_table(TableId::Tasks, now)
  }

  fn visible_names(
    table: &TableView
  ) -> Vec<&str> {
    table
      .visible_rows()
      .map(|row| row.name.as_str())
      .collect()
  }

  #[test]
  fn query_matches_name_substring() {
    let config =
      DashboardConfig::builtin().unwrap();
    let mut table = tasks_table(&config);

    let shown = RowFilter::new("الأداء", None)
      .apply(&mut table, &config.statuses);
    assert_eq!(shown, 1);
    assert_eq!(
      visible_names(&table),
      vec!["تحسين الأداء"]
    );
  }

  #[test]
  fn query_ignores_case() {
    let mut config =
      DashboardConfig::builtin().unwrap();
    config.tasks[0].name =
      "Frontend Build".to_string();
    let mut table = tasks_table(&config);

    let shown = RowFilter::new("  fRONT ", None)
      .apply(&mut table, &config.statuses);
    assert_eq!(shown, 1);
  }

  #[test]
  fn status_selector_matches_rendered_class()
  {
    let config =
      DashboardConfig::builtin().unwrap();
    let mut table = tasks_table(&config);

    let shown = RowFilter::new(
      "",
      Some("done".to_string())
    )
    .apply(&mut table, &config.statuses);
    assert_eq!(shown, 2);
    assert!(table.visible_rows().all(
      |row| row.badge.class == "badge-done"
    ));
  }

  #[test]
  fn unknown_selector_matches_nothing() {
    let config =
      DashboardConfig::builtin().unwrap();
    let mut table = tasks_table(&config);

    let shown = RowFilter::new(
      "",
      Some("archived".to_string())
    )
    .apply(&mut table, &config.statuses);
    assert_eq!(shown, 0);
  }

  #[test]
  fn empty_selector_means_all() {
    let config =
      DashboardConfig::builtin().unwrap();
    let mut table = tasks_table(&config);

    let filter = RowFilter::new(
      "",
      Some("  ".to_string())
    );
    assert!(filter.is_empty());
    assert_eq!(
      filter.apply(
        &mut table,
        &config.statuses
      ),
      config.tasks.len()
    );
  }

  #[test]
  fn unknown_row_status_filters_as_active()
  {
    let mut config =
      DashboardConfig::builtin().unwrap();
    config.tasks[1].status =
      "archived".to_string();
    let mut table = tasks_table(&config);

    RowFilter::new(
      "",
      Some("active".to_string())
    )
    .apply(&mut table, &config.statuses);
    assert_eq!(
      visible_names(&table),
      vec![
        "اختبار قاعدة البيانات",
        "تحسين الأداء"
      ]
    );
  }

  #[test]
  fn applying_twice_changes_nothing() {
    let config =
      DashboardConfig::builtin().unwrap();
    let mut table = tasks_table(&config);
    let filter = RowFilter::new(
      "ال",
      Some("progress".to_string())
    );

    filter.apply(&mut table, &config.statuses);
    let once = table.clone();
    filter.apply(&mut table, &config.statuses);
    assert_eq!(table, once);
  }

  #[test]
  fn clearing_the_filter_restores_rows() {
    let config =
      DashboardConfig::builtin().unwrap();
    let mut table = tasks_table(&config);

    RowFilter::new("zzz", None)
      .apply(&mut table, &config.statuses);
    assert_eq!(table.visible_count(), 0);

    RowFilter::default()
      .apply(&mut table, &config.statuses);
    assert_eq!(
      table.visible_count(),
      table.rows.len()
    );
  }
}
