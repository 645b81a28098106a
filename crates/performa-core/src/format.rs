use std::fmt;

use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::datetime::{
  calendar_days_until,
  due_day
};

/// KPI value text: `1.2k` style above 999, the integer otherwise.
/// Rounds half up to one decimal.
#[must_use]
pub fn format_kpi_value(
  value: u64
) -> String {
  if value < 1000 {
    return value.to_string();
  }

  let tenths = (value + 50) / 100;
  format!(
    "{}.{}k",
    tenths / 10,
    tenths % 10
  )
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct ChangeText {
  pub text:  String,
  pub class: &'static str
}

#[must_use]
pub fn format_change(
  change: i32
) -> ChangeText {
  if change > 0 {
    ChangeText {
      text:  format!("+{change}%"),
      class: "kpi-change positive"
    }
  } else {
    ChangeText {
      text:  format!("{change}%"),
      class: "kpi-change negative"
    }
  }
}

#[must_use]
pub fn progress_width(
  progress: u8
) -> String {
  format!("{}%", progress.min(100))
}

/// Relative due-date bucket shown in table date cells.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
#[serde(
  tag = "kind",
  content = "value",
  rename_all = "snake_case"
)]
pub enum DueLabel {
  OverdueBy(u64),
  Today,
  Tomorrow,
  InDays(u64),
  Date(String)
}

impl DueLabel {
  pub fn compute(
    raw: &str,
    now: DateTime<Utc>,
    tz: Tz
  ) -> Self {
    let Some(due) = due_day(raw, tz)
    else {
      return Self::Date(raw.to_string());
    };

    match calendar_days_until(
      now, due, tz
    ) {
      | days if days < 0 => {
        Self::OverdueBy(
          days.unsigned_abs()
        )
      }
      | 0 => Self::Today,
      | 1 => Self::Tomorrow,
      | days @ 2..=7 => {
        Self::InDays(days.unsigned_abs())
      }
      | _ => Self::Date(raw.to_string())
    }
  }

  pub fn is_overdue(&self) -> bool {
    matches!(self, Self::OverdueBy(_))
  }
}

impl fmt::Display for DueLabel {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::OverdueBy(days) => {
        write!(f, "متأخر {days} يوم")
      }
      | Self::Today => f.write_str("اليوم"),
      | Self::Tomorrow => {
        f.write_str("غداً")
      }
      | Self::InDays(days) => {
        write!(f, "بعد {days} أيام")
      }
      | Self::Date(raw) => f.write_str(raw)
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    Duration,
    TimeZone
  };

  use super::*;

  fn noon() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(
        2026, 2, 24, 12, 0, 0
      )
      .unwrap()
  }

  fn label_in(days: i64) -> DueLabel {
    let due = (noon()
      + Duration::days(days))
    .format("%Y-%m-%d")
    .to_string();
    DueLabel::compute(
      &due,
      noon(),
      chrono_tz::UTC
    )
  }

  #[test]
  fn kpi_values_abbreviate_thousands() {
    assert_eq!(format_kpi_value(0), "0");
    assert_eq!(format_kpi_value(999), "999");
    assert_eq!(
      format_kpi_value(1000),
      "1.0k"
    );
    assert_eq!(
      format_kpi_value(1250),
      "1.3k"
    );
    assert_eq!(
      format_kpi_value(1249),
      "1.2k"
    );
    assert_eq!(
      format_kpi_value(15_960),
      "16.0k"
    );
  }

  #[test]
  fn change_sign_picks_class() {
    assert_eq!(
      format_change(12),
      ChangeText {
        text:  "+12%".to_string(),
        class: "kpi-change positive"
      }
    );
    assert_eq!(
      format_change(-3).text,
      "-3%"
    );
    assert_eq!(
      format_change(0).class,
      "kpi-change negative"
    );
  }

  #[test]
  fn due_buckets_follow_day_distance() {
    assert_eq!(
      label_in(-4),
      DueLabel::OverdueBy(4)
    );
    assert_eq!(label_in(0), DueLabel::Today);
    assert_eq!(
      label_in(1),
      DueLabel::Tomorrow
    );
    assert_eq!(
      label_in(2),
      DueLabel::InDays(2)
    );
    assert_eq!(
      label_in(7),
      DueLabel::InDays(7)
    );
    assert_eq!(
      label_in(8),
      DueLabel::Date(
        "2026-03-04".to_string()
      )
    );
  }

  #[test]
  fn unparsable_due_is_shown_raw() {
    let label = DueLabel::compute(
      "قريباً",
      noon(),
      chrono_tz::UTC
    );
    assert_eq!(label.to_string(), "قريباً");
  }

  #[test]
  fn due_labels_render_in_arabic() {
    assert_eq!(
      DueLabel::OverdueBy(3).to_string(),
      "متأخر 3 يوم"
    );
    assert_eq!(
      DueLabel::InDays(2).to_string(),
      "بعد 2 أيام"
    );
    assert_eq!(
      DueLabel::Tomorrow.to_string(),
      "غداً"
    );
  }

  #[test]
  fn progress_width_is_clamped() {
    assert_eq!(progress_width(45), "45%");
    assert_eq!(progress_width(140), "100%");
  }
}
