use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::binder::RowView;
use crate::countdown::CountdownParts;
use crate::datetime::due_instant;
use crate::status::StatusTaxonomy;

pub const EMPTY_TITLE: &str =
  "لا توجد مهام قادمة";
pub const EMPTY_DESCRIPTION: &str =
  "جميع المهام مكتملة أو لا توجد مواعيد قادمة";
pub const EMPTY_STATUS: &str = "--";
pub const ACCENT_CLASS: &str =
  "badge-active";

/// The open row with the earliest future due instant.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct NextDeadline {
  pub name:         String,
  pub context:      String,
  pub owner:        String,
  pub status_label: String,
  pub due:          DateTime<Utc>
}

impl NextDeadline {
  pub fn description(&self) -> String {
    format!(
      "{} - المسؤول: {}",
      self.context, self.owner
    )
  }

  pub fn badge_class(
    &self
  ) -> &'static str {
    ACCENT_CLASS
  }
}

/// Picks the next deadline among the visible rows whose rendered label is
/// the `active` or `progress` label. Ties keep the first row seen.
#[tracing::instrument(skip_all)]
pub fn find_next<'r>(
  rows: impl IntoIterator<Item = &'r RowView>,
  taxonomy: &StatusTaxonomy,
  tz: Tz,
  now: DateTime<Utc>
) -> Option<NextDeadline> {
  let open = taxonomy.open_labels();
  let mut best: Option<(&RowView, DateTime<Utc>)> =
    None;

  for row in rows {
    if !row.visible
      || !open.contains(&row.badge.label.as_str())
    {
      continue;
    }
    let Some(due) =
      due_instant(&row.due_raw, tz)
    else {
      continue;
    };
    if due <= now {
      continue;
    }
    if best.is_none_or(|(_, current)| {
      due < current
    }) {
      best = Some((row, due));
    }
  }

  let next = best.map(|(row, due)| {
    NextDeadline {
      name: row.name.clone(),
      context: row.context.clone(),
      owner: row.owner.clone(),
      status_label: row.badge.label.clone(),
      due
    }
  });
  debug!(
    next = next
      .as_ref()
      .map(|deadline| deadline.name.as_str()),
    "selected next deadline"
  );
  next
}

/// What the "next task" counter shows.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
#[serde(
  tag = "state",
  rename_all = "snake_case"
)]
pub enum NextTaskPanel {
  Empty,
  Upcoming {
    deadline: NextDeadline,
    parts:    CountdownParts
  }
}

impl NextTaskPanel {
  pub fn title(&self) -> &str {
    match self {
      | Self::Empty => EMPTY_TITLE,
      | Self::Upcoming {
        deadline,
        ..
      } => &deadline.name
    }
  }

  pub fn description(&self) -> String {
    match self {
      | Self::Empty => {
        EMPTY_DESCRIPTION.to_string()
      }
      | Self::Upcoming {
        deadline,
        ..
      } => deadline.description()
    }
  }

  pub fn status_text(&self) -> &str {
    match self {
      | Self::Empty => EMPTY_STATUS,
      | Self::Upcoming {
        deadline,
        ..
      } => &deadline.status_label
    }
  }

  pub fn parts(&self) -> CountdownParts {
    match self {
      | Self::Empty => CountdownParts::zero(),
      | Self::Upcoming {
        parts, ..
      } => *parts
    }
  }

  pub fn deadline(
    &self
  ) -> Option<&NextDeadline> {
    match self {
      | Self::Empty => None,
      | Self::Upcoming {
        deadline,
        ..
      } => Some(deadline)
    }
  }
}
