use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::Result;

/// Counters backing the employee dashboard
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Orders of any status started at or after `from`
    async fn count_orders_since(&self, from: DateTime<Utc>) -> Result<i64>;

    async fn count_tasks_with_status(&self, status: &str) -> Result<i64>;
}

pub struct MySqlDashboardRepository {
    pool: MySqlPool,
}

impl MySqlDashboardRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for MySqlDashboardRepository {
    async fn count_orders_since(&self, from: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ordenes WHERE fecha_inicio >= ?",
        )
        .bind(from)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_tasks_with_status(&self, status: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tareas WHERE estado = ?")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
