use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;
use tracing::{
  debug,
  info
};

use crate::binder::{
  BoundView,
  TableView,
  ViewBinder
};
use crate::charts::ChartDefaults;
use crate::config::{
  ConfigError,
  DashboardConfig
};
use crate::countdown::{
  CountdownHandle,
  CountdownParts,
  CountdownSlot,
  CountdownTick
};
use crate::datetime::format_clock;
use crate::deadline::{
  NextTaskPanel,
  find_next
};
use crate::filter::RowFilter;
use crate::notify::{
  Inbox,
  ToastDraft,
  ToastQueue,
  overdue_toast_once,
  refresh_summary
};
use crate::session::{
  Session,
  load_session,
  sign_out
};
use crate::status::OVERDUE;
use crate::storage::KeyValueStore;
use crate::theme::{
  Theme,
  ThemeController
};
use crate::view::ViewKind;

pub const REFRESH_INTERVAL_MS: u32 = 30_000;
pub const COUNTDOWN_TICK_MS: u32 = 1_000;

/// One page's dashboard state, driven by the host's timers.
///
/// `L` is the persistent store (theme, session), `S` the per-session one
/// (one-shot notices). Nothing runs on its own: the host calls
/// [`refresh`](Self::refresh) every [`REFRESH_INTERVAL_MS`] and
/// [`tick`](Self::tick) every [`COUNTDOWN_TICK_MS`] while a countdown
/// handle is live.
#[derive(Debug)]
pub struct DashboardController<L, S> {
  config:    DashboardConfig,
  tz:        Tz,
  view:      ViewKind,
  local:     L,
  session:   S,
  themes:    ThemeController,
  filter:    RowFilter,
  bound:     Option<BoundView>,
  countdown: CountdownSlot,
  panel:     NextTaskPanel,
  toasts:    ToastQueue,
  inbox:     Inbox,
  running:   bool
}

impl<L, S> DashboardController<L, S>
where
  L: KeyValueStore,
  S: KeyValueStore
{
  pub fn new(
    config: DashboardConfig,
    tz: Tz,
    view: ViewKind,
    local: L,
    session: S
  ) -> Self {
    let themes = ThemeController::load(&local);
    Self {
      config,
      tz,
      view,
      local,
      session,
      themes,
      filter: RowFilter::default(),
      bound: None,
      countdown: CountdownSlot::default(),
      panel: NextTaskPanel::Empty,
      toasts: ToastQueue::default(),
      inbox: Inbox::builtin(),
      running: false
    }
  }

  /// Binds the view. Returns the countdown handle to tick, if any.
  #[tracing::instrument(skip(self, now), fields(view = self.view.key()))]
  pub fn start(
    &mut self,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    self.running = true;
    let handle = self.refresh(now);
    info!("dashboard started");
    handle
  }

  pub fn stop(&mut self) {
    self.running = false;
    self.countdown.stop();
    info!(view = self.view.key(), "dashboard stopped");
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  /// Full re-bind. The filter is re-applied, the one-shot overdue notice
  /// raised if it is due, and the next deadline recomputed; the countdown
  /// restarts only when its target moved.
  pub fn refresh(
    &mut self,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    let mut bound = ViewBinder::new(
      &self.config,
      self.tz
    )
    .bind(self.view, self.themes.current(), now);

    for table in &mut bound.tables {
      self
        .filter
        .apply(table, &self.config.statuses);
    }
    let overdue =
      bound.alert.map_or(0, |alert| alert.count);
    self.bound = Some(bound);
    if let Some(draft) =
      overdue_toast_once(&mut self.session, overdue)
    {
      self.toasts.push(draft, now);
    }
    debug!(view = self.view.key(), overdue, "refreshed");
    self.track_deadline(now)
  }

  /// Refresh triggered by the user; also queues a summary toast.
  pub fn manual_refresh(
    &mut self,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    let handle = self.refresh(now);
    let draft = refresh_summary(
      self.overdue_rows(),
      &format_clock(now, self.tz)
    );
    self.toasts.push(draft, now);
    handle
  }

  pub fn tick(
    &mut self,
    handle: CountdownHandle,
    now: DateTime<Utc>
  ) -> Option<CountdownTick> {
    let tick = self.countdown.tick(handle, now)?;
    if let NextTaskPanel::Upcoming {
      parts,
      ..
    } = &mut self.panel
    {
      *parts = tick.parts;
    }
    if tick.finished {
      info!("next deadline reached");
    }
    Some(tick)
  }

  pub fn set_query(
    &mut self,
    query: &str,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    self.filter.set_query(query);
    self.reapply_filter(now)
  }

  pub fn set_status_filter(
    &mut self,
    status: Option<String>,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    self.filter.set_status(status);
    self.reapply_filter(now)
  }

  /// Flips and persists the theme, then re-binds so chart inputs pick up
  /// the new palette.
  pub fn toggle_theme(
    &mut self,
    now: DateTime<Utc>
  ) -> Theme {
    let theme =
      self.themes.toggle(&mut self.local);
    self.refresh(now);
    theme
  }

  /// Applies a typed mutation and re-binds on success. A rejected
  /// mutation leaves the config untouched.
  pub fn update_config<F>(
    &mut self,
    mutate: F,
    now: DateTime<Utc>
  ) -> Result<Option<CountdownHandle>, ConfigError>
  where
    F: FnOnce(
      &mut DashboardConfig
    ) -> Result<(), ConfigError>
  {
    let mut next = self.config.clone();
    mutate(&mut next)?;
    self.config = next;
    Ok(self.refresh(now))
  }

  pub fn push_toast(
    &mut self,
    draft: ToastDraft,
    now: DateTime<Utc>
  ) -> u64 {
    self.toasts.push(draft, now)
  }

  pub fn dismiss_toast(
    &mut self,
    id: u64
  ) -> bool {
    self.toasts.dismiss(id)
  }

  pub fn expire_toasts(
    &mut self,
    now: DateTime<Utc>
  ) -> usize {
    self.toasts.expire(now)
  }

  pub fn current_session(
    &self
  ) -> Option<Session> {
    load_session(&self.local)
  }

  pub fn sign_out(&mut self) {
    self.stop();
    sign_out(&mut self.local);
  }

  pub fn config(&self) -> &DashboardConfig {
    &self.config
  }

  pub fn timezone(&self) -> Tz {
    self.tz
  }

  pub fn view(&self) -> ViewKind {
    self.view
  }

  pub fn bound(&self) -> Option<&BoundView> {
    self.bound.as_ref()
  }

  pub fn panel(&self) -> &NextTaskPanel {
    &self.panel
  }

  pub fn countdown_handle(
    &self
  ) -> Option<CountdownHandle> {
    self.countdown.current()
  }

  pub fn filter(&self) -> &RowFilter {
    &self.filter
  }

  pub fn theme(&self) -> Theme {
    self.themes.current()
  }

  pub fn chart_defaults(
    &self
  ) -> ChartDefaults {
    ChartDefaults::for_palette(
      &self.theme().chart_palette()
    )
  }

  pub fn css_variables(&self) -> String {
    self
      .config
      .themes
      .css_variables(self.theme())
  }

  pub fn toasts(&self) -> &ToastQueue {
    &self.toasts
  }

  pub fn inbox(&self) -> &Inbox {
    &self.inbox
  }

  pub fn inbox_mut(&mut self) -> &mut Inbox {
    &mut self.inbox
  }

  /// Notification-button badge: the overdue badge count of the bound view,
  /// or the inbox unread count when nothing is overdue.
  pub fn notification_badge(
    &self
  ) -> Option<String> {
    self.inbox.badge(self.overdue_badges())
  }

  pub fn local(&self) -> &L {
    &self.local
  }

  pub fn session_store(&self) -> &S {
    &self.session
  }

  fn reapply_filter(
    &mut self,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    if let Some(bound) = self.bound.as_mut()
    {
      for table in &mut bound.tables {
        self
          .filter
          .apply(table, &self.config.statuses);
      }
    }
    self.track_deadline(now)
  }

  /// The table the deadline tracker scans: the first one the view binds.
  fn active_table(&self) -> Option<&TableView> {
    self
      .bound
      .as_ref()
      .and_then(|bound| bound.tables.first())
  }

  fn overdue_rows(&self) -> usize {
    self.bound.as_ref().map_or(0, |bound| {
      bound
        .tables
        .iter()
        .flat_map(|table| table.rows.iter())
        .filter(|row| row.overdue)
        .count()
    })
  }

  /// Overdue status badges across tables and the update feed.
  fn overdue_badges(&self) -> usize {
    self.bound.as_ref().map_or(0, |bound| {
      let rows = bound
        .tables
        .iter()
        .flat_map(|table| table.rows.iter())
        .filter(|row| row.badge.key == OVERDUE);
      let updates = bound
        .updates
        .iter()
        .filter(|item| item.badge.key == OVERDUE);
      rows.count() + updates.count()
    })
  }

  fn track_deadline(
    &mut self,
    now: DateTime<Utc>
  ) -> Option<CountdownHandle> {
    let next = self.active_table().and_then(
      |table| {
        find_next(
          &table.rows,
          &self.config.statuses,
          self.tz,
          now
        )
      }
    );

    let Some(deadline) = next else {
      self.countdown.stop();
      self.panel = NextTaskPanel::Empty;
      return None;
    };

    let handle = match self.countdown.current() {
      | Some(handle)
        if self.countdown.target()
          == Some(deadline.due) =>
      {
        handle
      }
      | _ => self.countdown.start(deadline.due)
    };
    self.panel = NextTaskPanel::Upcoming {
      parts: CountdownParts::until(
        now,
        deadline.due
      ),
      deadline
    };
    Some(handle)
  }
}
