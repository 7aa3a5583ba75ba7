// Report payloads. Field names on the wire are the ones the dashboard
// front end already consumes (Spanish, camelCase); amounts are JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Service name reported when no order-service link falls in the window
pub const NO_POPULAR_SERVICE: &str = "Ninguno";

/// Service name reported when a linked service record is missing
pub const UNKNOWN_SERVICE: &str = "Desconocido";

pub const UNNAMED_CUSTOMER: &str = "Cliente sin nombre";

pub const NO_LINKED_SERVICES: &str = "Servicio desconocido";

/// Headline numbers for the selected range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(rename = "totalOrdenes")]
    pub total_orders: i64,
    #[serde(rename = "totalIngresos", with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(rename = "clientesNuevos")]
    pub new_customers: i64,
    #[serde(rename = "servicioPopular")]
    pub most_popular_service: PopularService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularService {
    #[serde(rename = "nombre")]
    pub name: String,
    /// Share of in-window orders that include this service, 0..=100
    #[serde(rename = "porcentaje")]
    pub percentage: f64,
}

impl PopularService {
    pub fn none() -> Self {
        Self {
            name: NO_POPULAR_SERVICE.to_string(),
            percentage: 0.0,
        }
    }
}

/// One point of the revenue chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub name: String,
    #[serde(rename = "ingresos", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Named count, the shape pie charts consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: i64,
}

impl ChartSlice {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Vehicles split by how many orders they have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CustomerTypeBreakdown {
    /// Vehicles with more than one order
    pub registered: i64,
    /// Vehicles with exactly one order
    pub occasional: i64,
}

impl CustomerTypeBreakdown {
    pub fn total(&self) -> i64 {
        self.registered + self.occasional
    }

    pub fn into_slices(self) -> Vec<ChartSlice> {
        vec![
            ChartSlice::new("Registrados", self.registered),
            ChartSlice::new("Ocasionales", self.occasional),
        ]
    }
}

/// Row of the "latest orders" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrderSummary {
    pub id: i64,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "servicio")]
    pub services: String,
    /// Start timestamp, ISO 8601 UTC
    #[serde(rename = "fecha")]
    pub started_at: String,
    #[serde(rename = "monto", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "estado")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrdersPage {
    pub data: Vec<RecentOrderSummary>,
}
