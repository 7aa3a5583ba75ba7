// Property-based tests for revenue bucketing
//
// Bucketing must conserve money: whatever the range and ordering, the sum of
// bucket amounts equals the sum of the payments fed in, and every label
// appears once.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

use taller_reports::reports::models::{PaymentPoint, ReportRange, SeriesOrder};
use taller_reports::reports::services::aggregation::bucket_revenue;

const MX: Tz = chrono_tz::America::Mexico_City;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 6, 0, 0).unwrap()
}

fn payments_strategy() -> impl Strategy<Value = Vec<PaymentPoint>> {
    prop::collection::vec((0i64..(365 * 24 * 60), 0i64..10_000_000i64), 0..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(minutes, cents)| PaymentPoint {
                paid_at: base() + Duration::minutes(minutes),
                amount: Decimal::new(cents, 2),
            })
            .collect()
    })
}

fn range_strategy() -> impl Strategy<Value = ReportRange> {
    prop_oneof![
        Just(ReportRange::Week),
        Just(ReportRange::Month),
        Just(ReportRange::Year),
    ]
}

fn order_strategy() -> impl Strategy<Value = SeriesOrder> {
    prop_oneof![Just(SeriesOrder::FirstSeen), Just(SeriesOrder::Chronological)]
}

proptest! {
    #[test]
    fn test_bucketing_conserves_total(
        payments in payments_strategy(),
        range in range_strategy(),
        order in order_strategy(),
    ) {
        let series = bucket_revenue(&payments, range, &MX, order);

        let expected: Decimal = payments.iter().map(|p| p.amount).sum();
        let actual: Decimal = series.iter().map(|p| p.amount).sum();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn test_labels_are_unique(
        payments in payments_strategy(),
        range in range_strategy(),
        order in order_strategy(),
    ) {
        let series = bucket_revenue(&payments, range, &MX, order);

        let labels: HashSet<&str> = series.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(labels.len(), series.len());

        if range == ReportRange::Week {
            prop_assert!(series.len() <= 7);
        }
    }

    #[test]
    fn test_orderings_hold_same_buckets(
        payments in payments_strategy(),
        range in range_strategy(),
    ) {
        let mut first_seen = bucket_revenue(&payments, range, &MX, SeriesOrder::FirstSeen);
        let mut chronological = bucket_revenue(&payments, range, &MX, SeriesOrder::Chronological);

        first_seen.sort_by(|a, b| a.name.cmp(&b.name));
        chronological.sort_by(|a, b| a.name.cmp(&b.name));
        prop_assert_eq!(first_seen, chronological);
    }
}

#[test]
fn test_first_seen_follows_input_order() {
    let payments = vec![
        PaymentPoint {
            paid_at: Utc.with_ymd_and_hms(2025, 12, 2, 18, 0, 0).unwrap(),
            amount: Decimal::new(1000, 2),
        },
        PaymentPoint {
            paid_at: Utc.with_ymd_and_hms(2025, 3, 2, 18, 0, 0).unwrap(),
            amount: Decimal::new(500, 2),
        },
    ];

    let series = bucket_revenue(&payments, ReportRange::Year, &MX, SeriesOrder::FirstSeen);
    assert_eq!(series[0].name, "dic 2025");
    assert_eq!(series[1].name, "mar 2025");

    let series = bucket_revenue(&payments, ReportRange::Year, &MX, SeriesOrder::Chronological);
    assert_eq!(series[0].name, "mar 2025");
    assert_eq!(series[1].name, "dic 2025");
}

#[test]
fn test_empty_input_yields_empty_series() {
    assert!(bucket_revenue(&[], ReportRange::Week, &MX, SeriesOrder::FirstSeen).is_empty());
}
