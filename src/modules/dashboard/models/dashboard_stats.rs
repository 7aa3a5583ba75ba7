use serde::{Deserialize, Serialize};

/// Task status counted as outstanding work
pub const TASK_STATUS_PENDING: &str = "pendiente";

/// Counters shown on the employee landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Orders started since local midnight, any status
    pub today_orders: i64,
    pub pending_tasks: i64,
}
