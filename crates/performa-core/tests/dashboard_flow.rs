use std::fs;

use chrono::{Duration, TimeZone, Utc};
use performa_core::binder::TableId;
use performa_core::config::DashboardConfig;
use performa_core::controller::DashboardController;
use performa_core::deadline::NextTaskPanel;
use performa_core::session::{UserDirectory, load_session, requires_login, sign_in};
use performa_core::storage::{KeyValueStore, MemoryStore, THEME_KEY};
use performa_core::view::ViewKind;
use tempfile::tempdir;

const BUILTIN: &str = include_str!("../assets/dashboard.toml");

#[test]
fn file_config_drives_tasks_view_and_countdown() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("dashboard.toml");

    let raw = BUILTIN.replace("إدارة الأداء الوظيفي", "لوحة الفريق");
    fs::write(&path, raw).expect("write config");

    let config = DashboardConfig::from_path(&path).expect("load config from file");
    assert_eq!(config.app.name, "لوحة الفريق");
    assert!(config.status_issues().is_empty());

    let now = Utc.with_ymd_and_hms(2026, 2, 24, 9, 0, 0).unwrap();
    let mut local = MemoryStore::default();
    local.set(THEME_KEY, "light");

    let mut dash = DashboardController::new(
        config,
        chrono_tz::Asia::Riyadh,
        ViewKind::detect("/site/tasks.html"),
        local,
        MemoryStore::default(),
    );
    let handle = dash.start(now).expect("an open task is upcoming");

    let bound = dash.bound().expect("bound view");
    assert_eq!(bound.header.name, "لوحة الفريق");
    let tasks = bound.table(TableId::Tasks).expect("tasks table");
    assert_eq!(tasks.rows.len(), 7);
    assert_eq!(tasks.visible_count(), 7);

    match dash.panel() {
        NextTaskPanel::Upcoming { deadline, parts } => {
            assert_eq!(deadline.name, "تطوير الواجهة الأمامية");
            // 2026-02-28 00:00 Riyadh is 2026-02-27 21:00 UTC.
            assert_eq!(parts.days, 3);
            assert_eq!(parts.hours, 12);
        }
        NextTaskPanel::Empty => panic!("expected an upcoming deadline"),
    }

    let later = now + Duration::seconds(90);
    let tick = dash.tick(handle, later).expect("live handle ticks");
    assert_eq!(tick.parts.padded(), ["03", "11", "58", "30"]);
}

#[test]
fn filtered_refresh_and_status_change_move_the_deadline() {
    let now = Utc.with_ymd_and_hms(2026, 2, 24, 9, 0, 0).unwrap();
    let mut dash = DashboardController::new(
        DashboardConfig::builtin().expect("builtin config"),
        chrono_tz::UTC,
        ViewKind::Tasks,
        MemoryStore::default(),
        MemoryStore::default(),
    );
    let first = dash.start(now).expect("first countdown");

    dash.set_query("الاختبارات", now);
    let second = dash.countdown_handle().expect("second countdown");
    assert_ne!(first, second);
    assert_eq!(dash.tick(first, now), None);
    assert_eq!(
        dash.panel().deadline().map(|d| d.name.as_str()),
        Some("إعداد الاختبارات")
    );

    dash.update_config(|config| config.set_task_status(4, "done"), now)
        .expect("known status");
    assert_eq!(dash.panel(), &NextTaskPanel::Empty);
    assert_eq!(dash.countdown_handle(), None);

    dash.set_query("", now + Duration::seconds(30));
    let table = dash
        .bound()
        .and_then(|bound| bound.table(TableId::Tasks))
        .expect("tasks table");
    assert_eq!(table.visible_count(), 7);
}

#[test]
fn login_gates_and_theme_persists_across_controllers() {
    let mut local = MemoryStore::default();
    assert!(requires_login("/index.html", load_session(&local).as_ref()));

    sign_in(&UserDirectory::builtin(), &mut local, "Admin@moe.gov.sa ", "123456")
        .expect("valid credentials");
    let session = load_session(&local).expect("stored session");
    assert!(!requires_login("/index.html", Some(&session)));

    let now = Utc.with_ymd_and_hms(2026, 2, 24, 9, 0, 0).unwrap();
    let mut dash = DashboardController::new(
        DashboardConfig::builtin().expect("builtin config"),
        chrono_tz::UTC,
        ViewKind::Dashboard,
        local,
        MemoryStore::default(),
    );
    dash.start(now);
    dash.toggle_theme(now);
    assert_eq!(dash.local().get(THEME_KEY).as_deref(), Some("light"));

    dash.sign_out();
    assert_eq!(dash.current_session(), None);
    assert_eq!(dash.local().get(THEME_KEY).as_deref(), Some("light"));
}
