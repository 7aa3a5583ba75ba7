mod dashboard_controller;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    dashboard_controller::configure_routes(cfg);
}
