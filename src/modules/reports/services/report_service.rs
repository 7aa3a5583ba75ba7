use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::core::timezone::format_iso8601_millis;
use crate::core::Result;
use crate::modules::reports::models::{
    ChartSlice, CustomerTypeBreakdown, PopularService, RecentOrderSummary, ReportRange,
    RevenuePoint, SalesSummary, SeriesOrder,
};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::aggregation;

/// Dashboard report aggregator.
///
/// Stateless between calls: every operation reads through the injected
/// repository and builds its result from scratch. The `*_at` variants take
/// the reference instant explicitly; the plain variants use the current time.
pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
    config: ReportConfig,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>, config: ReportConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub async fn summarize(&self, range: ReportRange) -> Result<SalesSummary> {
        self.summarize_at(range, Utc::now()).await
    }

    /// Orders, revenue, customers and the most requested service since the
    /// start of `range`, cancelled orders excluded.
    pub async fn summarize_at(&self, range: ReportRange, now: DateTime<Utc>) -> Result<SalesSummary> {
        let from = range.window_start(self.config.summary_window, now, &self.config.timezone);
        debug!(range = %range, from = %from, "Building report summary");

        let (total_orders, revenue, new_customers, usage) = futures_util::try_join!(
            self.repo.count_active_orders_since(from),
            self.repo.sum_active_payments_since(from),
            self.repo.count_vehicles_with_active_orders_since(from),
            self.repo.active_service_usage_since(from),
        )?;

        let most_popular_service = match aggregation::most_popular(&usage) {
            Some(top) => {
                let service = self.repo.find_service(top.service_id).await?;
                PopularService {
                    name: aggregation::popular_service_name(service.as_ref()),
                    percentage: aggregation::popularity_percentage(top.link_count, total_orders),
                }
            }
            None => PopularService::none(),
        };

        info!(
            range = %range,
            total_orders = total_orders,
            new_customers = new_customers,
            "Report summary generated"
        );

        Ok(SalesSummary {
            total_orders,
            total_revenue: revenue.unwrap_or(Decimal::ZERO),
            new_customers,
            most_popular_service,
        })
    }

    pub async fn revenue_series(
        &self,
        range: ReportRange,
        order: Option<SeriesOrder>,
    ) -> Result<Vec<RevenuePoint>> {
        self.revenue_series_at(range, order, Utc::now()).await
    }

    /// Payments since the start of `range` summed per chart label.
    ///
    /// Cancelled orders are not excluded here. `order` falls back to the
    /// configured series ordering.
    pub async fn revenue_series_at(
        &self,
        range: ReportRange,
        order: Option<SeriesOrder>,
        now: DateTime<Utc>,
    ) -> Result<Vec<RevenuePoint>> {
        let from = range.window_start(self.config.series_window, now, &self.config.timezone);
        let order = order.unwrap_or(self.config.series_order);

        let payments = self.repo.payments_since(from).await?;
        let series = aggregation::bucket_revenue(&payments, range, &self.config.timezone, order);

        debug!(
            range = %range,
            order = %order,
            payments = payments.len(),
            buckets = series.len(),
            "Revenue series built"
        );

        Ok(series)
    }

    /// Link count per service over all orders
    pub async fn service_distribution(&self) -> Result<Vec<ChartSlice>> {
        let usage = self.repo.service_usage().await?;
        let ids: Vec<i64> = usage.iter().map(|u| u.service_id).collect();
        let services = self.repo.find_services(&ids).await?;

        Ok(aggregation::distribution_slices(&usage, &services))
    }

    pub async fn customer_type_breakdown(&self) -> Result<CustomerTypeBreakdown> {
        let counts = self.repo.order_counts_by_vehicle().await?;
        Ok(aggregation::classify_customers(&counts))
    }

    /// Latest orders using the configured page size
    pub async fn recent_orders(&self) -> Result<Vec<RecentOrderSummary>> {
        self.recent_orders_with_limit(self.config.recent_orders_limit)
            .await
    }

    /// Latest `limit` orders, newest first, with customer, services and paid amount.
    ///
    /// Service lookups for the orders run concurrently; any failure fails the call.
    pub async fn recent_orders_with_limit(&self, limit: i64) -> Result<Vec<RecentOrderSummary>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let mut orders = self.repo.recent_orders(limit).await?;
        orders.truncate(limit as usize);

        let services = try_join_all(
            orders
                .iter()
                .map(|order| self.repo.services_for_order(order.order_id)),
        )
        .await?;

        let summaries = orders
            .into_iter()
            .zip(services)
            .map(|(order, services)| RecentOrderSummary {
                id: order.order_id,
                customer: aggregation::customer_display_name(
                    order.first_name.as_deref(),
                    order.paternal_surname.as_deref(),
                    order.maternal_surname.as_deref(),
                ),
                services: aggregation::describe_services(&services),
                started_at: format_iso8601_millis(order.started_at),
                amount: order.completed_payment.unwrap_or(Decimal::ZERO),
                status: order.status,
            })
            .collect();

        Ok(summaries)
    }
}
