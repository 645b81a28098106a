use chrono::{
  DateTime,
  LocalResult,
  NaiveDate,
  NaiveDateTime,
  TimeZone,
  Utc
};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str =
  "Asia/Riyadh";
pub const TIMEZONE_ENV_VAR: &str =
  "PERFORMA_TIMEZONE";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves the dashboard timezone: `PERFORMA_TIMEZONE` first, then the
/// configured id, then the built-in default, then UTC.
pub fn resolve_timezone(
  configured: &str
) -> Tz {
  if let Ok(raw) =
    std::env::var(TIMEZONE_ENV_VAR)
    && let Some(tz) =
      parse_timezone(&raw, TIMEZONE_ENV_VAR)
  {
    return tz;
  }

  if let Some(tz) =
    parse_timezone(configured, "config")
  {
    return tz;
  }

  parse_timezone(
    DEFAULT_TIMEZONE,
    "DEFAULT_TIMEZONE"
  )
  .unwrap_or_else(|| {
    tracing::error!(
      "failed to parse fallback \
       timezone; using UTC"
    );
    chrono_tz::UTC
  })
}

pub fn parse_timezone(
  raw: &str,
  source: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    tracing::debug!(
      source,
      "timezone source was empty"
    );
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => {
      tracing::debug!(
        source,
        timezone = %trimmed,
        "configured dashboard timezone"
      );
      Some(tz)
    }
    | Err(err) => {
      tracing::error!(
        source,
        timezone = %trimmed,
        error = %err,
        "failed to parse timezone id"
      );
      None
    }
  }
}

#[must_use]
pub fn today(
  now: DateTime<Utc>,
  tz: Tz
) -> NaiveDate {
  now.with_timezone(&tz).date_naive()
}

/// Calendar day of a due-date string: either `YYYY-MM-DD` or an RFC 3339
/// timestamp (taken in the dashboard timezone).
pub fn due_day(
  raw: &str,
  tz: Tz
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if let Ok(date) =
    NaiveDate::parse_from_str(
      trimmed,
      DATE_FORMAT
    )
  {
    return Some(date);
  }

  DateTime::parse_from_rfc3339(trimmed)
    .ok()
    .map(|dt| {
      dt.with_timezone(&tz).date_naive()
    })
}

/// Instant a due-date string refers to. Plain dates resolve to the start
/// of that day in the dashboard timezone.
pub fn due_instant(
  raw: &str,
  tz: Tz
) -> Option<DateTime<Utc>> {
  let trimmed = raw.trim();
  if let Ok(dt) =
    DateTime::parse_from_rfc3339(trimmed)
  {
    return Some(dt.with_timezone(&Utc));
  }

  let date = NaiveDate::parse_from_str(
    trimmed,
    DATE_FORMAT
  )
  .ok()?;
  to_utc_from_local(
    date.and_hms_opt(0, 0, 0)?,
    tz,
    trimmed
  )
}

/// Signed number of calendar days from today to `due`.
#[must_use]
pub fn calendar_days_until(
  now: DateTime<Utc>,
  due: NaiveDate,
  tz: Tz
) -> i64 {
  due
    .signed_duration_since(today(
      now, tz
    ))
    .num_days()
}

#[must_use]
pub fn format_clock(
  now: DateTime<Utc>,
  tz: Tz
) -> String {
  now
    .with_timezone(&tz)
    .format("%H:%M")
    .to_string()
}

fn to_utc_from_local(
  local_naive: NaiveDateTime,
  tz: Tz,
  context: &str
) -> Option<DateTime<Utc>> {
  match tz.from_local_datetime(
    &local_naive
  ) {
    | LocalResult::Single(local_dt) => {
      Some(local_dt.with_timezone(&Utc))
    }
    | LocalResult::Ambiguous(
      first,
      second
    ) => {
      tracing::warn!(
        context,
        first = %first,
        second = %second,
        "ambiguous local datetime; using earliest"
      );
      let chosen = if first <= second {
        first
      } else {
        second
      };
      Some(chosen.with_timezone(&Utc))
    }
    | LocalResult::None => {
      tracing::warn!(
        context,
        "local datetime does not exist \
         in dashboard timezone"
      );
      None
    }
  }
}
