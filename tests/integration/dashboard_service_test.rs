//! Integration tests for the employee dashboard counters.

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use helpers::*;

/// 2025-10-16 00:30 in Mexico City
fn just_after_midnight() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 16, 6, 30, 0).unwrap()
}

#[tokio::test]
async fn test_today_orders_start_at_local_midnight() {
    let now = just_after_midnight();
    let store = ShopBuilder::new()
        .vehicle(1, 1)
        // 00:10 local today
        .order(1, 1, Utc.with_ymd_and_hms(2025, 10, 16, 6, 10, 0).unwrap(), PENDING)
        // 23:50 local yesterday, already the 16th in UTC
        .order(2, 1, Utc.with_ymd_and_hms(2025, 10, 16, 5, 50, 0).unwrap(), PENDING)
        .order(3, 1, Utc.with_ymd_and_hms(2025, 10, 16, 6, 20, 0).unwrap(), CANCELLED)
        .build();
    let service = dashboard_service(store);

    let stats = service.stats_at(now).await.unwrap();

    assert_eq!(stats.today_orders, 2);
}

#[tokio::test]
async fn test_pending_tasks_only() {
    let store = ShopBuilder::new()
        .task(PENDING)
        .task(PENDING)
        .task(IN_PROGRESS)
        .task("completada")
        .build();
    let service = dashboard_service(store);

    let stats = service.stats_at(just_after_midnight()).await.unwrap();

    assert_eq!(stats.today_orders, 0);
    assert_eq!(stats.pending_tasks, 2);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let service = dashboard_service(Arc::new(FailingStore));
    assert!(service.stats_at(just_after_midnight()).await.is_err());
}
