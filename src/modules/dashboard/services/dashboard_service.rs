use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::core::timezone::{local_date, local_midnight};
use crate::core::Result;
use crate::modules::dashboard::models::{DashboardStats, TASK_STATUS_PENDING};
use crate::modules::dashboard::repositories::DashboardRepository;

pub struct DashboardService {
    repo: Arc<dyn DashboardRepository>,
    timezone: Tz,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn DashboardRepository>, timezone: Tz) -> Self {
        Self { repo, timezone }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.stats_at(Utc::now()).await
    }

    /// Orders since the shop's local midnight and the pending task backlog
    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let start_of_day = local_midnight(local_date(now, &self.timezone), &self.timezone);
        debug!(from = %start_of_day, "Loading employee dashboard counters");

        let (today_orders, pending_tasks) = futures_util::try_join!(
            self.repo.count_orders_since(start_of_day),
            self.repo.count_tasks_with_status(TASK_STATUS_PENDING),
        )?;

        Ok(DashboardStats {
            today_orders,
            pending_tasks,
        })
    }
}
