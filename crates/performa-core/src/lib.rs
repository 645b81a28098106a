//! Data binding and view logic for the performance-management dashboard.
//!
//! Everything here is target-neutral: time is passed in, persistence
//! goes through [`storage::KeyValueStore`]. The web UI and the CLI are
//! thin hosts around [`controller::DashboardController`].

pub mod binder;
pub mod charts;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod datetime;
pub mod deadline;
pub mod filter;
pub mod format;
pub mod notify;
pub mod session;
pub mod status;
pub mod storage;
pub mod theme;
pub mod view;

pub use config::DashboardConfig;
pub use controller::DashboardController;
pub use view::ViewKind;
