use std::cell::RefCell;
use std::rc::Rc;

use chrono::{
  DateTime,
  Utc
};
use gloo::timers::callback::Interval;
use performa_core::config::DashboardConfig;
use performa_core::controller::{
  COUNTDOWN_TICK_MS,
  DashboardController,
  REFRESH_INTERVAL_MS
};
use performa_core::countdown::CountdownHandle;
use performa_core::datetime::resolve_timezone;
use performa_core::session::{
  Session,
  avatar_initial,
  load_session,
  profile_label,
  requires_login
};
use performa_core::theme::Theme;
use performa_core::view::ViewKind;
use yew::{
  Callback,
  Html,
  Properties,
  UseForceUpdateHandle,
  UseStateHandle,
  classes,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo,
  use_mut_ref,
  use_state_eq
};
use yew_router::prelude::*;

use crate::components::{
  ChartsPanel,
  KpiCards,
  LoginPage,
  NextTaskCounter,
  OverdueBanner,
  PerformancePanel,
  Sidebar,
  Toasts,
  Topbar,
  UpdatesFeed,
  WorkTable
};
use crate::storage::BrowserStore;

const TOAST_SWEEP_MS: u32 = 500;

type WebController =
  DashboardController<BrowserStore, BrowserStore>;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
  #[at("/")]
  Home,
  #[at("/login.html")]
  Login,
  #[at("/:page")]
  Page { page: String },
  #[not_found]
  #[at("/404")]
  NotFound
}

impl Route {
  fn page(&self) -> &str {
    match self {
      | Self::Home | Self::NotFound => {
        "index.html"
      }
      | Self::Login => "login.html",
      | Self::Page {
        page
      } => page
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  html! {
      <BrowserRouter>
          <Switch<Route> render={switch} />
      </BrowserRouter>
  }
}

fn switch(route: Route) -> Html {
  match route {
    | Route::Login => {
      html! { <LoginPage /> }
    }
    | other => {
      let page = other.page().to_string();
      html! { <GatedPage page={page} /> }
    }
  }
}

#[derive(Properties, PartialEq)]
struct GatedPageProps {
  page: String
}

/// Loads the session and config; bounces to the login page without a
/// session.
#[function_component(GatedPage)]
fn gated_page(
  props: &GatedPageProps
) -> Html {
  let config = use_memo((), |_| {
    DashboardConfig::builtin()
      .map(Rc::new)
      .map_err(|err| format!("{err:#}"))
  });
  let session =
    load_session(&BrowserStore::local());

  if requires_login(
    &props.page,
    session.as_ref()
  ) {
    tracing::info!(
      page = %props.page,
      "no session; redirecting to login"
    );
    return html! {
        <Redirect<Route> to={Route::Login} />
    };
  }
  let Some(session) = session else {
    return html! {
        <Redirect<Route> to={Route::Login} />
    };
  };

  match &*config {
    | Ok(config) => {
      let view =
        ViewKind::detect(&props.page);
      html! {
          <Dashboard
              key={view.key()}
              view={view}
              config={config.clone()}
              session={session}
          />
      }
    }
    | Err(err) => {
      tracing::error!(
        error = %err,
        "dashboard config failed to load"
      );
      html! {
          <div class="config-error">{ err.clone() }</div>
      }
    }
  }
}

/// Shared handles a UI event needs to drive the controller and schedule
/// a re-render.
#[derive(Clone)]
struct Driver {
  controller: Rc<RefCell<WebController>>,
  countdown:
    UseStateHandle<Option<CountdownHandle>>,
  force:      UseForceUpdateHandle
}

impl Driver {
  /// Runs an operation that may restart the countdown.
  fn run<F>(&self, op: F)
  where
    F: FnOnce(
      &mut WebController,
      DateTime<Utc>
    ) -> Option<CountdownHandle>
  {
    let handle = op(
      &mut self.controller.borrow_mut(),
      Utc::now()
    );
    self.countdown.set(handle);
    self.force.force_update();
  }

  fn touch<F>(&self, op: F)
  where
    F: FnOnce(
      &mut WebController,
      DateTime<Utc>
    )
  {
    op(
      &mut self.controller.borrow_mut(),
      Utc::now()
    );
    self.force.force_update();
  }
}

#[derive(Properties, PartialEq)]
struct DashboardProps {
  view:    ViewKind,
  config:  Rc<DashboardConfig>,
  session: Session
}

#[function_component(Dashboard)]
fn dashboard(
  props: &DashboardProps
) -> Html {
  let controller = {
    let config = (*props.config).clone();
    let view = props.view;
    use_mut_ref(move || {
      let tz =
        resolve_timezone(&config.app.timezone);
      DashboardController::new(
        config,
        tz,
        view,
        BrowserStore::local(),
        BrowserStore::session()
      )
    })
  };
  let countdown =
    use_state_eq(|| None::<CountdownHandle>);
  let force = use_force_update();
  let navigator = use_navigator();

  let driver = Driver {
    controller: controller.clone(),
    countdown:  countdown.clone(),
    force:      force.clone()
  };

  {
    let driver = driver.clone();
    use_effect_with((), move |_| {
      driver.run(|dash, now| dash.start(now));

      let refresh = {
        let driver = driver.clone();
        Interval::new(
          REFRESH_INTERVAL_MS,
          move || {
            tracing::debug!(
              "periodic refresh"
            );
            driver.run(|dash, now| {
              dash.refresh(now)
            });
          }
        )
      };

      move || {
        drop(refresh);
        driver.controller.borrow_mut().stop();
      }
    });
  }

  {
    let driver = driver.clone();
    use_effect_with(
      *countdown,
      move |handle| {
        let ticker = handle.map(|handle| {
          Interval::new(
            COUNTDOWN_TICK_MS,
            move || {
              let tick = driver
                .controller
                .borrow_mut()
                .tick(handle, Utc::now());
              if tick.is_none_or(|tick| {
                tick.finished
              }) {
                driver.countdown.set(None);
              }
              driver.force.force_update();
            }
          )
        });
        move || drop(ticker)
      }
    );
  }

  let toast_count = controller
    .borrow()
    .toasts()
    .toasts()
    .len();
  {
    let driver = driver.clone();
    use_effect_with(
      toast_count,
      move |count| {
        let sweeper = (*count > 0).then(|| {
          Interval::new(
            TOAST_SWEEP_MS,
            move || {
              let expired = driver
                .controller
                .borrow_mut()
                .expire_toasts(Utc::now());
              if expired > 0 {
                driver.force.force_update();
              }
            }
          )
        });
        move || drop(sweeper)
      }
    );
  }

  let on_query = {
    let driver = driver.clone();
    Callback::from(move |query: String| {
      driver.run(|dash, now| {
        dash.set_query(&query, now)
      });
    })
  };
  let on_status = {
    let driver = driver.clone();
    Callback::from(
      move |status: Option<String>| {
        driver.run(|dash, now| {
          dash.set_status_filter(status, now)
        });
      }
    )
  };
  let on_toggle_theme = {
    let driver = driver.clone();
    Callback::from(move |_: ()| {
      driver.touch(|dash, now| {
        dash.toggle_theme(now);
      });
    })
  };
  let on_refresh = {
    let driver = driver.clone();
    Callback::from(move |_: ()| {
      driver.run(|dash, now| {
        dash.manual_refresh(now)
      });
    })
  };
  let on_dismiss_toast = {
    let driver = driver.clone();
    Callback::from(move |id: u64| {
      driver.touch(|dash, _| {
        dash.dismiss_toast(id);
      });
    })
  };
  let on_read_inbox = {
    let driver = driver.clone();
    Callback::from(move |_: ()| {
      driver.touch(|dash, _| {
        dash.inbox_mut().mark_all_read();
      });
    })
  };
  let on_logout = {
    let driver = driver.clone();
    Callback::from(move |_: ()| {
      driver.touch(|dash, _| dash.sign_out());
      if let Some(navigator) = &navigator {
        navigator.push(&Route::Login);
      }
    })
  };

  let dash = controller.borrow();
  let Some(bound) = dash.bound().cloned() else {
    return html! {
        <div class="app loading" dir="rtl"></div>
    };
  };

  let theme = dash.theme();
  let theme_class = match theme {
    | Theme::Dark => "dark-theme",
    | Theme::Light => "light-theme"
  };
  let statuses = dash.config().statuses.clone();
  let has_tables = !bound.tables.is_empty();

  html! {
      <div class={classes!("app", theme_class)} style={dash.css_variables()} dir="rtl">
          <Sidebar
              items={dash.config().navigation.clone()}
              active={props.view.page()}
          />
          <main class="content">
              <Topbar
                  header={bound.header.clone()}
                  last_updated={bound.last_updated.clone()}
                  theme_label={theme.toggle_label()}
                  profile={profile_label(&props.session)}
                  initial={avatar_initial(&props.session)}
                  inbox={dash.inbox().clone()}
                  badge={dash.notification_badge()}
                  on_toggle_theme={on_toggle_theme}
                  on_refresh={on_refresh}
                  on_read_inbox={on_read_inbox}
                  on_logout={on_logout}
              />
              <OverdueBanner alert={bound.alert} />
              if !bound.kpis.is_empty() {
                  <KpiCards cards={bound.kpis.clone()} />
              }
              if has_tables {
                  <NextTaskCounter panel={dash.panel().clone()} />
              }
              {
                  for bound.tables.iter().cloned().map(|table| html! {
                      <WorkTable
                          key={table.id.title()}
                          table={table.clone()}
                          statuses={statuses.clone()}
                          query={dash.filter().query().to_string()}
                          status={dash.filter().status().map(str::to_string)}
                          on_query={on_query.clone()}
                          on_status={on_status.clone()}
                      />
                  })
              }
              if !bound.updates.is_empty() {
                  <UpdatesFeed items={bound.updates.clone()} />
              }
              if let Some(perf) = bound.performance.clone() {
                  <PerformancePanel performance={perf} />
              }
              if !bound.charts.is_empty() {
                  <ChartsPanel
                      charts={bound.charts.clone()}
                      defaults={dash.chart_defaults()}
                  />
              }
          </main>
          <Toasts
              toasts={dash.toasts().toasts().to_vec()}
              on_dismiss={on_dismiss_toast}
          />
      </div>
  }
}
