mod charts_panel;
mod kpi_cards;
mod login_page;
mod next_task_counter;
mod overdue_banner;
mod performance_panel;
mod sidebar;
mod toasts;
mod topbar;
mod updates_feed;
mod work_table;

pub use charts_panel::ChartsPanel;
pub use kpi_cards::KpiCards;
pub use login_page::LoginPage;
pub use next_task_counter::NextTaskCounter;
pub use overdue_banner::OverdueBanner;
pub use performance_panel::PerformancePanel;
pub use sidebar::Sidebar;
pub use toasts::Toasts;
pub use topbar::Topbar;
pub use updates_feed::UpdatesFeed;
pub use work_table::WorkTable;
