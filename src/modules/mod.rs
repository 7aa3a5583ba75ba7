pub mod dashboard;
pub mod health;
pub mod reports;

/// Mount every HTTP module. Services are registered as app data by the caller.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    health::configure(cfg);
    reports::configure(cfg);
    dashboard::configure(cfg);
}
