use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::error;

use crate::middleware::RequestIdValue;
use crate::modules::dashboard::services::DashboardService;

/// GET /empleado/dashboard
pub async fn get_dashboard_stats(
    req: HttpRequest,
    service: web::Data<Arc<DashboardService>>,
) -> HttpResponse {
    match service.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            error!(
                request_id = %RequestIdValue::of(&req).unwrap_or_default(),
                error = %e,
                "Failed to load employee dashboard stats"
            );
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Error al obtener estadísticas"
            }))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/empleado").route("/dashboard", web::get().to(get_dashboard_stats)),
    );
}
