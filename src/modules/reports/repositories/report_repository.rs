use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::reports::models::{
    PaymentPoint, RecentOrderRecord, ServiceRecord, ServiceUsage, VehicleOrderCount,
    ORDER_STATUS_CANCELLED, PAYMENT_STATUS_COMPLETED,
};

/// Read-only query interface the report aggregator runs on.
///
/// "Active" means the order is not cancelled. Methods returning lists must
/// keep a stable order so repeated calls over the same data agree.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Active orders started at or after `from`
    async fn count_active_orders_since(&self, from: DateTime<Utc>) -> Result<i64>;

    /// Sum of payments received at or after `from` whose order is active.
    /// `None` when no payment matches.
    async fn sum_active_payments_since(&self, from: DateTime<Utc>) -> Result<Option<Decimal>>;

    /// Distinct vehicles with at least one active order started at or after `from`
    async fn count_vehicles_with_active_orders_since(&self, from: DateTime<Utc>) -> Result<i64>;

    /// Link counts per service for active orders started at or after `from`,
    /// in order of each service's first link
    async fn active_service_usage_since(&self, from: DateTime<Utc>) -> Result<Vec<ServiceUsage>>;

    /// Link counts per service over every order-service link
    async fn service_usage(&self) -> Result<Vec<ServiceUsage>>;

    async fn find_service(&self, service_id: i64) -> Result<Option<ServiceRecord>>;

    async fn find_services(&self, service_ids: &[i64]) -> Result<Vec<ServiceRecord>>;

    /// Payments received at or after `from`, any order status, in storage order
    async fn payments_since(&self, from: DateTime<Utc>) -> Result<Vec<PaymentPoint>>;

    /// Order count per vehicle over all orders
    async fn order_counts_by_vehicle(&self) -> Result<Vec<VehicleOrderCount>>;

    /// Latest `limit` orders by start timestamp, newest first. The payment
    /// amount is the latest completed payment, higher `id_pago` on equal times.
    async fn recent_orders(&self, limit: i64) -> Result<Vec<RecentOrderRecord>>;

    /// Services linked to one order, in link order
    async fn services_for_order(&self, order_id: i64) -> Result<Vec<ServiceRecord>>;
}

/// MySQL-backed report queries
pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SERVICE_COLUMNS: &str = "CAST(s.id_servicio AS SIGNED) AS service_id, \
     s.nombre AS name, \
     CAST(s.duracion_estimada AS SIGNED) AS estimated_minutes";

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn count_active_orders_since(&self, from: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM ordenes
            WHERE fecha_inicio >= ? AND estado <> ?
            "#,
        )
        .bind(from)
        .bind(ORDER_STATUS_CANCELLED)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn sum_active_payments_since(&self, from: DateTime<Utc>) -> Result<Option<Decimal>> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(p.monto)
            FROM pagos p
            INNER JOIN ordenes o ON o.id_orden = p.id_orden
            WHERE p.fecha_pago >= ? AND o.estado <> ?
            "#,
        )
        .bind(from)
        .bind(ORDER_STATUS_CANCELLED)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn count_vehicles_with_active_orders_since(&self, from: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT id_vehiculo)
            FROM ordenes
            WHERE fecha_inicio >= ? AND estado <> ?
            "#,
        )
        .bind(from)
        .bind(ORDER_STATUS_CANCELLED)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn active_service_usage_since(&self, from: DateTime<Utc>) -> Result<Vec<ServiceUsage>> {
        let usage = sqlx::query_as::<_, ServiceUsage>(
            r#"
            SELECT CAST(os.id_servicio AS SIGNED) AS service_id, COUNT(*) AS link_count
            FROM ordenes_servicios os
            INNER JOIN ordenes o ON o.id_orden = os.id_orden
            WHERE o.fecha_inicio >= ? AND o.estado <> ?
            GROUP BY os.id_servicio
            ORDER BY MIN(os.id)
            "#,
        )
        .bind(from)
        .bind(ORDER_STATUS_CANCELLED)
        .fetch_all(&self.pool)
        .await?;

        Ok(usage)
    }

    async fn service_usage(&self) -> Result<Vec<ServiceUsage>> {
        let usage = sqlx::query_as::<_, ServiceUsage>(
            r#"
            SELECT CAST(id_servicio AS SIGNED) AS service_id, COUNT(*) AS link_count
            FROM ordenes_servicios
            GROUP BY id_servicio
            ORDER BY MIN(id)
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(usage)
    }

    async fn find_service(&self, service_id: i64) -> Result<Option<ServiceRecord>> {
        let sql = format!(
            "SELECT {} FROM servicios s WHERE s.id_servicio = ?",
            SERVICE_COLUMNS
        );

        let service = sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    async fn find_services(&self, service_ids: &[i64]) -> Result<Vec<ServiceRecord>> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM servicios s WHERE s.id_servicio IN (",
            SERVICE_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in service_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let services = builder
            .build_query_as::<ServiceRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(services)
    }

    async fn payments_since(&self, from: DateTime<Utc>) -> Result<Vec<PaymentPoint>> {
        let payments = sqlx::query_as::<_, PaymentPoint>(
            r#"
            SELECT fecha_pago AS paid_at, monto AS amount
            FROM pagos
            WHERE fecha_pago >= ?
            ORDER BY id_pago
            "#,
        )
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn order_counts_by_vehicle(&self) -> Result<Vec<VehicleOrderCount>> {
        let counts = sqlx::query_as::<_, VehicleOrderCount>(
            r#"
            SELECT CAST(id_vehiculo AS SIGNED) AS vehicle_id, COUNT(*) AS order_count
            FROM ordenes
            GROUP BY id_vehiculo
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn recent_orders(&self, limit: i64) -> Result<Vec<RecentOrderRecord>> {
        let orders = sqlx::query_as::<_, RecentOrderRecord>(
            r#"
            SELECT
                CAST(o.id_orden AS SIGNED) AS order_id,
                o.fecha_inicio AS started_at,
                o.estado AS status,
                u.nombre AS first_name,
                u.apellido_paterno AS paternal_surname,
                u.apellido_materno AS maternal_surname,
                (
                    SELECT p.monto
                    FROM pagos p
                    WHERE p.id_orden = o.id_orden AND p.estado = ?
                    ORDER BY p.fecha_pago DESC, p.id_pago DESC
                    LIMIT 1
                ) AS completed_payment
            FROM ordenes o
            LEFT JOIN vehiculos v ON v.id_vehiculo = o.id_vehiculo
            LEFT JOIN usuarios u ON u.id_usuario = v.id_usuario
            ORDER BY o.fecha_inicio DESC, o.id_orden DESC
            LIMIT ?
            "#,
        )
        .bind(PAYMENT_STATUS_COMPLETED)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn services_for_order(&self, order_id: i64) -> Result<Vec<ServiceRecord>> {
        let sql = format!(
            "SELECT {} FROM ordenes_servicios os \
             INNER JOIN servicios s ON s.id_servicio = os.id_servicio \
             WHERE os.id_orden = ? \
             ORDER BY os.id",
            SERVICE_COLUMNS
        );

        let services = sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(services)
    }
}
