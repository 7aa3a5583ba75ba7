//! Contract tests for the /reports endpoints
//!
//! Drives the real route table over the in-memory store and checks the JSON
//! field names, types and error bodies the dashboard front end relies on.
//! Fixtures are placed relative to the current time because handlers read
//! the clock themselves.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, App};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

use helpers::*;

macro_rules! init_app {
    ($store:expr) => {{
        let (reports, dashboard) = app_data($store);
        test::init_service(
            App::new()
                .app_data(reports)
                .app_data(dashboard)
                .configure(taller_reports::modules::configure),
        )
        .await
    }};
}

/// GET `uri` and return the status code with the parsed JSON body
macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }};
}

#[actix_web::test]
async fn test_summary_schema() {
    let app = init_app!(weekly_shop(Utc::now()).build());

    let (status, json) = get_json!(&app, "/reports/resumen");

    assert_eq!(status, 200);
    assert_eq!(json["totalOrdenes"], 3);
    assert!(json["totalIngresos"].is_number(), "totalIngresos must be a number");
    assert_eq!(json["totalIngresos"].as_f64().unwrap(), 350.0);
    assert_eq!(json["clientesNuevos"], 2);
    assert_eq!(json["servicioPopular"]["nombre"], "Lavado");
    assert_eq!(json["servicioPopular"]["porcentaje"].as_f64().unwrap(), 100.0);
}

#[actix_web::test]
async fn test_summary_accepts_range_tokens() {
    let app = init_app!(weekly_shop(Utc::now()).build());

    for uri in [
        "/reports/resumen?range=month",
        "/reports/resumen?range=year",
        "/reports/resumen?range=quarter",
    ] {
        let (status, json) = get_json!(&app, uri);
        assert_eq!(status, 200, "{uri}");
        assert_eq!(json["totalOrdenes"], 3, "{uri}");
    }
}

#[actix_web::test]
async fn test_summary_on_empty_store() {
    let app = init_app!(ShopBuilder::new().build());

    let (status, json) = get_json!(&app, "/reports/resumen");

    assert_eq!(status, 200);
    assert_eq!(json["totalOrdenes"], 0);
    assert_eq!(json["totalIngresos"].as_f64().unwrap(), 0.0);
    assert_eq!(json["clientesNuevos"], 0);
    assert_eq!(json["servicioPopular"]["nombre"], "Ninguno");
    assert_eq!(json["servicioPopular"]["porcentaje"].as_f64().unwrap(), 0.0);
}

#[actix_web::test]
async fn test_revenue_series_schema() {
    let app = init_app!(weekly_shop(Utc::now()).build());

    let (status, json) = get_json!(&app, "/reports/ingresos");

    assert_eq!(status, 200);
    let points = json.as_array().expect("array body");
    assert!(!points.is_empty());

    let mut total = 0.0;
    for point in points {
        assert!(point["name"].is_string());
        assert!(point["ingresos"].is_number());
        total += point["ingresos"].as_f64().unwrap();
    }
    // Payments on cancelled orders still count here
    assert_eq!(total, 10349.0);
}

#[actix_web::test]
async fn test_revenue_series_sort_param() {
    let now = Utc::now();
    let store = ShopBuilder::new()
        .vehicle(1, 1)
        .order(1, 1, hours_ago(now, 60), COMPLETED)
        .payment(1, Decimal::from(10), hours_ago(now, 1), COMPLETED)
        .payment(1, Decimal::from(20), hours_ago(now, 50), COMPLETED)
        .build();
    let app = init_app!(store);

    let (_, first_seen) = get_json!(&app, "/reports/ingresos?range=week");
    assert_eq!(first_seen[0]["ingresos"].as_f64().unwrap(), 10.0);
    assert_eq!(first_seen[1]["ingresos"].as_f64().unwrap(), 20.0);

    let (status, chronological) =
        get_json!(&app, "/reports/ingresos?range=week&sort=chronological");
    assert_eq!(status, 200);
    assert_eq!(chronological[0]["ingresos"].as_f64().unwrap(), 20.0);
    assert_eq!(chronological[1]["ingresos"].as_f64().unwrap(), 10.0);

    // Unknown values fall back to the configured order
    let (_, fallback) = get_json!(&app, "/reports/ingresos?range=week&sort=random");
    assert_eq!(fallback, first_seen);
}

#[actix_web::test]
async fn test_service_distribution_schema() {
    let app = init_app!(weekly_shop(Utc::now()).build());

    let (status, json) = get_json!(&app, "/reports/servicios-distribucion");

    assert_eq!(status, 200);
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "Lavado", "value": 3 },
            { "name": "Encerado", "value": 2 }
        ])
    );
}

#[actix_web::test]
async fn test_customer_types_schema() {
    let app = init_app!(weekly_shop(Utc::now()).build());

    let (status, json) = get_json!(&app, "/reports/clientes-tipo");

    assert_eq!(status, 200);
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "Registrados", "value": 1 },
            { "name": "Ocasionales", "value": 2 }
        ])
    );
}

#[actix_web::test]
async fn test_recent_orders_schema() {
    let app = init_app!(weekly_shop(Utc::now()).build());

    let (status, json) = get_json!(&app, "/reports/ultimas-ordenes");

    assert_eq!(status, 200);
    let rows = json["data"].as_array().expect("data wrapper");
    assert_eq!(rows.len(), 4);

    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![103, 102, 101, 100]);

    let newest = &rows[0];
    assert_eq!(newest["cliente"], "Cliente sin nombre");
    assert_eq!(newest["servicio"], "Encerado - ?min");
    assert_eq!(newest["monto"].as_f64().unwrap(), 9999.0);
    assert_eq!(newest["estado"], "cancelado");

    let fecha = newest["fecha"].as_str().unwrap();
    assert_eq!(fecha.len(), 24, "ISO 8601 with milliseconds: {fecha}");
    assert!(fecha.ends_with('Z'));

    assert_eq!(rows[2]["cliente"], "Ana Pérez Luna");
    assert_eq!(rows[2]["servicio"], "Lavado - 30min, Encerado - ?min");
    assert_eq!(rows[1]["cliente"], "Luis Gómez");
}

#[actix_web::test]
async fn test_summary_failure_includes_detail() {
    let app = init_app!(Arc::new(FailingStore));

    let (status, json) = get_json!(&app, "/reports/resumen");

    assert_eq!(status, 500);
    assert_eq!(json["message"], "Error al obtener resumen");
    assert!(json["error"].is_string());
}

#[actix_web::test]
async fn test_other_failures_carry_message_only() {
    let app = init_app!(Arc::new(FailingStore));

    let cases = [
        ("/reports/ingresos", "Error al obtener ingresos"),
        (
            "/reports/servicios-distribucion",
            "Error al obtener distribución de servicios",
        ),
        ("/reports/clientes-tipo", "Error al obtener tipos de clientes"),
        (
            "/reports/ultimas-ordenes",
            "Error al obtener las últimas órdenes",
        ),
    ];

    for (uri, message) in cases {
        let (status, json) = get_json!(&app, uri);
        assert_eq!(status, 500, "{uri}");
        assert_eq!(json, serde_json::json!({ "message": message }), "{uri}");
    }
}

#[actix_web::test]
async fn test_repeated_range_falls_back_to_week() {
    let now = Utc::now();
    // Only the 40-day-old order separates the week window from month and year
    let store = weekly_shop(now)
        .order(104, 20, days_ago(now, 40), PENDING)
        .payment(104, Decimal::from(70), days_ago(now, 40), COMPLETED)
        .build();
    let app = init_app!(store);

    let (status, repeated) = get_json!(&app, "/reports/resumen?range=year&range=year");
    assert_eq!(status, 200);
    let (_, week) = get_json!(&app, "/reports/resumen?range=week");
    assert_eq!(repeated, week);
    assert_eq!(repeated["totalOrdenes"], 3);

    let (status, json) = get_json!(&app, "/reports/resumen?range=month&range=year");
    assert_eq!(status, 200);
    assert_eq!(json["totalOrdenes"], 3);
}

#[actix_web::test]
async fn test_repeated_series_params_fall_back_to_defaults() {
    let now = Utc::now();
    let store = ShopBuilder::new()
        .vehicle(1, 1)
        .order(1, 1, hours_ago(now, 60), COMPLETED)
        .payment(1, Decimal::from(10), hours_ago(now, 1), COMPLETED)
        .payment(1, Decimal::from(20), hours_ago(now, 50), COMPLETED)
        .build();
    let app = init_app!(store);

    let (_, defaults) = get_json!(&app, "/reports/ingresos");

    for uri in [
        "/reports/ingresos?range=year&range=month",
        "/reports/ingresos?sort=chronological&sort=chronological",
        "/reports/ingresos?range=week&range=week&sort=chronological&sort=first_seen",
    ] {
        let (status, json) = get_json!(&app, uri);
        assert_eq!(status, 200, "{uri}");
        assert_eq!(json, defaults, "{uri}");
    }
    assert_eq!(defaults[0]["ingresos"].as_f64().unwrap(), 10.0);
}

#[actix_web::test]
async fn test_failed_report_keeps_request_id() {
    let (reports, dashboard) = app_data(Arc::new(FailingStore));
    let app = test::init_service(
        App::new()
            .wrap(taller_reports::middleware::RequestId)
            .app_data(reports)
            .app_data(dashboard)
            .configure(taller_reports::modules::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/reports/resumen")
        .insert_header(("X-Request-ID", "req-500"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-500");
}
