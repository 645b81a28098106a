use serde::Serialize;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
  #[default]
  Dashboard,
  Tasks,
  Goals,
  Projects,
  Team,
  Reports,
  Performance,
  Charts
}

const PAGE_MARKERS: [(&str, ViewKind); 8] = [
  ("index.html", ViewKind::Dashboard),
  ("tasks.html", ViewKind::Tasks),
  ("goals.html", ViewKind::Goals),
  ("projects.html", ViewKind::Projects),
  ("team.html", ViewKind::Team),
  ("reports.html", ViewKind::Reports),
  (
    "performance.html",
    ViewKind::Performance
  ),
  ("charts.html", ViewKind::Charts)
];

impl ViewKind {
  pub const ALL: [ViewKind; 8] = [
    ViewKind::Dashboard,
    ViewKind::Tasks,
    ViewKind::Goals,
    ViewKind::Projects,
    ViewKind::Team,
    ViewKind::Reports,
    ViewKind::Performance,
    ViewKind::Charts
  ];

  /// View for a location path; anything unrecognised is the dashboard.
  pub fn detect(path: &str) -> Self {
    PAGE_MARKERS
      .iter()
      .find(|(marker, _)| {
        path.contains(marker)
      })
      .map(|(_, view)| *view)
      .unwrap_or_default()
  }

  pub fn key(self) -> &'static str {
    match self {
      | Self::Dashboard => "dashboard",
      | Self::Tasks => "tasks",
      | Self::Goals => "goals",
      | Self::Projects => "projects",
      | Self::Team => "team",
      | Self::Reports => "reports",
      | Self::Performance => {
        "performance"
      }
      | Self::Charts => "charts"
    }
  }

  pub fn page(self) -> &'static str {
    PAGE_MARKERS
      .iter()
      .find(|(_, view)| *view == self)
      .map(|(page, _)| *page)
      .unwrap_or("index.html")
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|view| view.key() == key)
  }
}

#[cfg(test)]
mod tests {
  use super::ViewKind;

  #[test]
  fn detects_views_from_path_substrings()
  {
    assert_eq!(
      ViewKind::detect("/"),
      ViewKind::Dashboard
    );
    assert_eq!(
      ViewKind::detect(
        "/dash/index.html"
      ),
      ViewKind::Dashboard
    );
    assert_eq!(
      ViewKind::detect("/app/tasks.html"),
      ViewKind::Tasks
    );
    assert_eq!(
      ViewKind::detect(
        "/performance.html?tab=2"
      ),
      ViewKind::Performance
    );
    assert_eq!(
      ViewKind::detect("/settings.html"),
      ViewKind::Dashboard
    );
  }

  #[test]
  fn keys_round_trip_through_pages() {
    for view in ViewKind::ALL {
      assert_eq!(
        ViewKind::from_key(view.key()),
        Some(view)
      );
      assert_eq!(
        ViewKind::detect(view.page()),
        view
      );
    }
  }
}
