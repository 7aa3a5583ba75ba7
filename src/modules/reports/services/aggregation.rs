// Pure aggregation rules shared by the report service.
//
// Nothing here touches the store: inputs are rows already fetched, outputs
// are the report payload pieces. Missing related records resolve to the
// sentinel names from `models::report`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::modules::reports::models::{
    ChartSlice, CustomerTypeBreakdown, PaymentPoint, ReportRange, RevenuePoint, SeriesOrder,
    ServiceRecord, ServiceUsage, VehicleOrderCount, NO_LINKED_SERVICES, UNKNOWN_SERVICE,
    UNNAMED_CUSTOMER,
};

/// Service with the most links. Ties keep the earlier entry.
pub fn most_popular(usage: &[ServiceUsage]) -> Option<&ServiceUsage> {
    usage.iter().fold(None, |best, candidate| match best {
        Some(current) if current.link_count >= candidate.link_count => Some(current),
        _ => Some(candidate),
    })
}

/// `link_count / max(total_orders, 1) * 100`, kept within 0..=100
pub fn popularity_percentage(link_count: i64, total_orders: i64) -> f64 {
    let share = link_count.max(0) as f64 / total_orders.max(1) as f64 * 100.0;
    share.clamp(0.0, 100.0)
}

/// Display name of the popular service: trimmed catalog name, or `Desconocido`
pub fn popular_service_name(service: Option<&ServiceRecord>) -> String {
    service
        .and_then(|s| s.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_SERVICE)
        .to_string()
}

/// Sum payments per chart label.
///
/// `FirstSeen` keeps labels in the order their first payment appears in
/// `payments`; `Chronological` sorts labels by their earliest payment.
pub fn bucket_revenue(
    payments: &[PaymentPoint],
    range: ReportRange,
    tz: &Tz,
    order: SeriesOrder,
) -> Vec<RevenuePoint> {
    let mut buckets: Vec<(String, Decimal, DateTime<Utc>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for payment in payments {
        let label = range.bucket_label(payment.paid_at, tz);

        match positions.get(&label) {
            Some(&idx) => {
                let bucket = &mut buckets[idx];
                bucket.1 += payment.amount;
                if payment.paid_at < bucket.2 {
                    bucket.2 = payment.paid_at;
                }
            }
            None => {
                positions.insert(label.clone(), buckets.len());
                buckets.push((label, payment.amount, payment.paid_at));
            }
        }
    }

    if order == SeriesOrder::Chronological {
        buckets.sort_by_key(|(_, _, earliest)| *earliest);
    }

    buckets
        .into_iter()
        .map(|(name, amount, _)| RevenuePoint { name, amount })
        .collect()
}

/// Pair link counts with catalog names
pub fn distribution_slices(usage: &[ServiceUsage], services: &[ServiceRecord]) -> Vec<ChartSlice> {
    let names: HashMap<i64, &str> = services
        .iter()
        .filter_map(|s| s.name.as_deref().map(|name| (s.service_id, name)))
        .collect();

    usage
        .iter()
        .map(|u| {
            let name = names
                .get(&u.service_id)
                .copied()
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_SERVICE);
            ChartSlice::new(name, u.link_count)
        })
        .collect()
}

pub fn classify_customers(counts: &[VehicleOrderCount]) -> CustomerTypeBreakdown {
    counts
        .iter()
        .fold(CustomerTypeBreakdown::default(), |mut acc, vehicle| {
            if vehicle.order_count > 1 {
                acc.registered += 1;
            } else {
                acc.occasional += 1;
            }
            acc
        })
}

/// `"nombre paterno materno"` with missing parts left empty, trimmed at both ends
pub fn customer_display_name(
    first_name: Option<&str>,
    paternal_surname: Option<&str>,
    maternal_surname: Option<&str>,
) -> String {
    let full = format!(
        "{} {} {}",
        first_name.unwrap_or(""),
        paternal_surname.unwrap_or(""),
        maternal_surname.unwrap_or("")
    );

    match full.trim() {
        "" => UNNAMED_CUSTOMER.to_string(),
        name => name.to_string(),
    }
}

/// `"Lavado - 30min, Encerado - ?min"`, or `Servicio desconocido` when empty
pub fn describe_services(services: &[ServiceRecord]) -> String {
    if services.is_empty() {
        return NO_LINKED_SERVICES.to_string();
    }

    services
        .iter()
        .map(|s| {
            let duration = s
                .estimated_minutes
                .map(|m| m.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "{} - {}min",
                s.name.as_deref().unwrap_or(UNKNOWN_SERVICE),
                duration
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
