pub mod dashboard_stats;

pub use dashboard_stats::{DashboardStats, TASK_STATUS_PENDING};
