use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::error;

use crate::core::AppError;
use crate::middleware::RequestIdValue;
use crate::modules::reports::models::{RecentOrdersPage, ReportRange, SeriesOrder};
use crate::modules::reports::services::ReportService;

/// Raw query string pairs. Any query string decodes into this shape, so the
/// report endpoints never answer 400 on odd parameters.
type RawQuery = web::Query<Vec<(String, String)>>;

/// Query parameters shared by the windowed report endpoints
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportRangeQuery {
    /// `week` (default), `month` or `year`
    pub range: Option<String>,
    /// `first_seen` or `chronological`; revenue series only
    pub sort: Option<String>,
}

impl ReportRangeQuery {
    /// Pick `range` and `sort` out of the query pairs. A key given more than
    /// once is treated as absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            range: single_value(pairs, "range"),
            sort: single_value(pairs, "sort"),
        }
    }

    fn report_range(&self) -> ReportRange {
        ReportRange::from_token(self.range.as_deref())
    }
}

fn single_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);

    match (values.next(), values.next()) {
        (Some(value), None) => Some(value.clone()),
        _ => None,
    }
}

/// 500 body for a failed report. `detail` adds the error text under `error`.
fn report_failure(
    req: &HttpRequest,
    operation: &str,
    message: &str,
    err: &AppError,
    detail: bool,
) -> HttpResponse {
    let request_id = RequestIdValue::of(req).unwrap_or_default();
    error!(
        request_id = %request_id,
        operation = operation,
        error = %err,
        "Report query failed"
    );

    let body = if detail {
        serde_json::json!({ "message": message, "error": err.to_string() })
    } else {
        serde_json::json!({ "message": message })
    };

    HttpResponse::InternalServerError().json(body)
}

/// GET /reports/resumen
pub async fn get_summary(
    req: HttpRequest,
    service: web::Data<Arc<ReportService>>,
    query: RawQuery,
) -> HttpResponse {
    let query = ReportRangeQuery::from_pairs(&query);

    match service.summarize(query.report_range()).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => report_failure(&req, "resumen", "Error al obtener resumen", &e, true),
    }
}

/// GET /reports/ingresos
pub async fn get_revenue_series(
    req: HttpRequest,
    service: web::Data<Arc<ReportService>>,
    query: RawQuery,
) -> HttpResponse {
    let query = ReportRangeQuery::from_pairs(&query);
    let order = query
        .sort
        .as_deref()
        .map(|sort| SeriesOrder::from_query(Some(sort), service.config().series_order));

    match service.revenue_series(query.report_range(), order).await {
        Ok(series) => HttpResponse::Ok().json(series),
        Err(e) => report_failure(&req, "ingresos", "Error al obtener ingresos", &e, false),
    }
}

/// GET /reports/servicios-distribucion
pub async fn get_service_distribution(
    req: HttpRequest,
    service: web::Data<Arc<ReportService>>,
) -> HttpResponse {
    match service.service_distribution().await {
        Ok(slices) => HttpResponse::Ok().json(slices),
        Err(e) => report_failure(
            &req,
            "servicios-distribucion",
            "Error al obtener distribución de servicios",
            &e,
            false,
        ),
    }
}

/// GET /reports/clientes-tipo
pub async fn get_customer_types(
    req: HttpRequest,
    service: web::Data<Arc<ReportService>>,
) -> HttpResponse {
    match service.customer_type_breakdown().await {
        Ok(breakdown) => HttpResponse::Ok().json(breakdown.into_slices()),
        Err(e) => report_failure(
            &req,
            "clientes-tipo",
            "Error al obtener tipos de clientes",
            &e,
            false,
        ),
    }
}

/// GET /reports/ultimas-ordenes
pub async fn get_recent_orders(
    req: HttpRequest,
    service: web::Data<Arc<ReportService>>,
) -> HttpResponse {
    match service.recent_orders().await {
        Ok(data) => HttpResponse::Ok().json(RecentOrdersPage { data }),
        Err(e) => report_failure(
            &req,
            "ultimas-ordenes",
            "Error al obtener las últimas órdenes",
            &e,
            false,
        ),
    }
}

/// Configure routes for reports module
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/resumen", web::get().to(get_summary))
            .route("/ingresos", web::get().to(get_revenue_series))
            .route(
                "/servicios-distribucion",
                web::get().to(get_service_distribution),
            )
            .route("/clientes-tipo", web::get().to(get_customer_types))
            .route("/ultimas-ordenes", web::get().to(get_recent_orders)),
    );
}
