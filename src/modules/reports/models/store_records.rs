use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Order status that removes an order from every windowed report
pub const ORDER_STATUS_CANCELLED: &str = "cancelado";

/// Payment status counted as money actually received
pub const PAYMENT_STATUS_COMPLETED: &str = "completado";

/// Number of order-service links pointing at one service
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ServiceUsage {
    pub service_id: i64,
    pub link_count: i64,
}

/// Catalog entry from `servicios`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ServiceRecord {
    pub service_id: i64,
    pub name: Option<String>,
    /// Estimated duration in minutes
    pub estimated_minutes: Option<i64>,
}

/// Payment amount and when it was received
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PaymentPoint {
    pub paid_at: DateTime<Utc>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VehicleOrderCount {
    pub vehicle_id: i64,
    pub order_count: i64,
}

/// Recent order joined with its owner and latest completed payment
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecentOrderRecord {
    pub order_id: i64,
    pub started_at: DateTime<Utc>,
    pub status: Option<String>,
    pub first_name: Option<String>,
    pub paternal_surname: Option<String>,
    pub maternal_surname: Option<String>,
    pub completed_payment: Option<Decimal>,
}
